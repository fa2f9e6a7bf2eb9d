//! Animated particle field
//!
//! A [`ParticleField`] owns one [`ParticleSet`] plus the orientation of the
//! group it is rendered as. `update` is the per-frame rule: it recomputes the
//! orientation from frame input and nudges positions in place. It never
//! allocates.

use crate::config::FieldConfig;
use crate::frame::FrameInput;
use crate::particles::{generate, ParticleSet};
use folio_theme::Theme;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Euler rotation of the whole point group, radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Pitch
    pub x: f32,
    /// Yaw
    pub y: f32,
    /// Roll
    pub z: f32,
}

/// Generated point cloud and its per-frame animation state
#[derive(Debug, Clone)]
pub struct ParticleField {
    theme: Theme,
    config: FieldConfig,
    set: ParticleSet,
    orientation: Orientation,
    frames: u64,
}

impl ParticleField {
    /// Generate a field for `theme` with an explicit configuration
    pub fn generate<R: Rng + ?Sized>(theme: Theme, config: FieldConfig, rng: &mut R) -> Self {
        let set = generate(&config, rng);
        tracing::info!("Particle field ready: {} theme, {} points", theme, set.len());

        Self {
            theme,
            config,
            set,
            orientation: Orientation::default(),
            frames: 0,
        }
    }

    /// Generate a field with the preset for `theme`
    pub fn for_theme<R: Rng + ?Sized>(theme: Theme, rng: &mut R) -> Self {
        Self::generate(theme, FieldConfig::for_theme(theme), rng)
    }

    /// Replace the whole point cloud
    ///
    /// The new set is built before the old one is dropped, so a reader never
    /// sees a partially generated field. Orientation and frame count restart.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, theme: Theme, config: FieldConfig, rng: &mut R) {
        let set = generate(&config, rng);
        tracing::info!(
            "Regenerated particle field: {} -> {} theme, {} points",
            self.theme,
            theme,
            set.len()
        );

        self.set = set;
        self.theme = theme;
        self.config = config;
        self.orientation = Orientation::default();
        self.frames = 0;
    }

    /// Apply one frame
    ///
    /// Orientation is a pure function of the input, so the pointer's
    /// contribution never accumulates across frames.
    pub fn update(&mut self, input: &FrameInput) {
        let motion = &self.config.motion;
        let t = input.elapsed;

        let wobble = motion
            .wobble
            .map_or(0.0, |w| (t * w.frequency).sin() * w.amplitude);

        self.orientation = Orientation {
            x: wobble + input.pointer.y * motion.pointer.pitch,
            y: t * motion.spin_rate,
            z: input.pointer.x * motion.pointer.roll,
        };

        if let Some(drift) = motion.drift {
            for (i, p) in self.set.positions_mut().iter_mut().enumerate() {
                let d = drift.offset(t, i);
                p[0] += d[0];
                p[1] += d[1];
                p[2] += d[2];
            }
        }

        self.frames += 1;
    }

    /// Theme the field was generated for
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Configuration the field was generated from
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current points
    #[inline]
    #[must_use]
    pub fn particles(&self) -> &ParticleSet {
        &self.set
    }

    /// Current group rotation
    #[inline]
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Frames applied since the last (re)generation
    #[inline]
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Pointer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn dark_rotation_follows_spin_and_wobble() {
        let mut field = ParticleField::for_theme(Theme::Dark, &mut rng());
        field.update(&FrameInput::new(10.0, 1, Pointer::CENTER));

        let o = field.orientation();
        assert!((o.y - 0.08).abs() < 1e-6);
        assert!((o.x - (0.03f32).sin() * 0.02).abs() < 1e-6);
        assert_eq!(o.z, 0.0);
    }

    #[test]
    fn dark_positions_do_not_move() {
        let mut field = ParticleField::for_theme(Theme::Dark, &mut rng());
        let before = field.particles().clone();
        field.update(&FrameInput::new(3.0, 1, Pointer::new(0.5, 0.5)));
        assert_eq!(field.particles(), &before);
    }

    #[test]
    fn light_drift_moves_points_by_small_amount() {
        let mut field = ParticleField::generate(
            Theme::Light,
            FieldConfig::light().with_count(50),
            &mut rng(),
        );
        let before = field.particles().positions().to_vec();
        field.update(&FrameInput::new(1.0, 1, Pointer::CENTER));

        let moved = field
            .particles()
            .positions()
            .iter()
            .zip(&before)
            .any(|(a, b)| a != b);
        assert!(moved);
        for (a, b) in field.particles().positions().iter().zip(&before) {
            for axis in 0..3 {
                assert!((a[axis] - b[axis]).abs() <= 0.001);
            }
        }
    }

    #[test]
    fn pointer_does_not_accumulate() {
        let mut field = ParticleField::for_theme(Theme::Light, &mut rng());
        let pointer = Pointer::new(1.0, -1.0);
        for frame in 1..=5 {
            field.update(&FrameInput::new(0.0, frame, pointer));
        }

        let o = field.orientation();
        assert!((o.x + 0.015).abs() < 1e-6);
        assert!((o.z - 0.008).abs() < 1e-6);
        assert_eq!(field.frames_rendered(), 5);
    }

    #[test]
    fn regenerate_swaps_theme_and_resets() {
        let mut r = rng();
        let mut field = ParticleField::for_theme(Theme::Dark, &mut r);
        field.update(&FrameInput::new(2.0, 1, Pointer::CENTER));

        field.regenerate(Theme::Light, FieldConfig::light(), &mut r);
        assert_eq!(field.theme(), Theme::Light);
        assert_eq!(field.particles().len(), 3000);
        assert_eq!(field.orientation(), Orientation::default());
        assert_eq!(field.frames_rendered(), 0);
    }

    #[test]
    fn empty_field_still_rotates() {
        let config = FieldConfig::light().with_count(0);
        let mut field = ParticleField::generate(Theme::Light, config, &mut rng());
        field.update(&FrameInput::new(4.0, 1, Pointer::CENTER));
        assert!(field.particles().is_empty());
        assert!((field.orientation().y - 0.1).abs() < 1e-6);
    }
}
