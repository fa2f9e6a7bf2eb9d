//! Particle generation
//!
//! [`generate`] is the only place randomness enters the scene. Everything
//! downstream of it is a pure function of frame input.

use crate::color::hsl_to_rgb;
use crate::config::{Bounds, FieldConfig, HueGradient, Palette, StarBands};
use crate::error::SceneError;
use rand::Rng;

/// Point cloud: positions (mutable per frame) and colours (fixed)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl ParticleSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble from parallel arrays
    ///
    /// # Errors
    /// Returns error if the arrays have different lengths
    pub fn from_parts(positions: Vec<[f32; 3]>, colors: Vec<[f32; 3]>) -> Result<Self, SceneError> {
        if positions.len() != colors.len() {
            return Err(SceneError::LengthMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        Ok(Self { positions, colors })
    }

    /// Number of points
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the set has no points
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Point positions
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Point colours
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` buffer
    #[inline]
    #[must_use]
    pub fn position_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colours as a flat `r, g, b, r, g, b, ...` buffer
    #[inline]
    #[must_use]
    pub fn color_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Mean position, `None` when empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Option<[f32; 3]> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f32;
        let sum = self.positions.iter().fold([0.0f32; 3], |acc, p| {
            [acc[0] + p[0], acc[1] + p[1], acc[2] + p[2]]
        });
        Some([sum[0] / n, sum[1] / n, sum[2] / n])
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [[f32; 3]] {
        &mut self.positions
    }
}

/// Generate a fresh point cloud for `config`
///
/// Arrays are allocated once at full size; a zero count yields an empty but
/// valid set.
pub fn generate<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> ParticleSet {
    let count = config.count;
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for _ in 0..count {
        let position = sample_position(&config.bounds, rng);
        let color = match &config.palette {
            Palette::StarBands(bands) => star_color(bands, rng),
            Palette::HueGradient(gradient) => gradient_color(gradient, position, rng),
        };
        positions.push(position);
        colors.push(color);
    }

    tracing::debug!(
        "Generated {} particles within ±{:?}",
        count,
        config.bounds.as_array()
    );

    ParticleSet { positions, colors }
}

fn sample_position<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> [f32; 3] {
    let mut axis = |half: f32| (rng.random::<f32>() * 2.0 - 1.0) * half;
    [axis(bounds.x), axis(bounds.y), axis(bounds.z)]
}

fn star_color<R: Rng + ?Sized>(bands: &StarBands, rng: &mut R) -> [f32; 3] {
    let brightness = lerp(bands.brightness_floor, bands.brightness_ceiling, rng.random::<f32>());
    let roll = rng.random::<f32>();

    let b = brightness.clamp(0.0, 1.0);
    if roll < bands.white_share {
        [b, b, b]
    } else if roll < bands.white_share + bands.blue_share {
        [b * 0.8, b * 0.9, b]
    } else {
        [b, b * 0.9, b * 0.7]
    }
}

fn gradient_color<R: Rng + ?Sized>(
    gradient: &HueGradient,
    position: [f32; 3],
    rng: &mut R,
) -> [f32; 3] {
    let distance = (position[0].powi(2) + position[1].powi(2) + position[2].powi(2)).sqrt();
    let normalized = if gradient.distance_scale > 0.0 {
        distance / gradient.distance_scale
    } else {
        0.0
    };

    let hue = gradient.base_hue + normalized * gradient.hue_span;
    let saturation = lerp(gradient.saturation.0, gradient.saturation.1, rng.random::<f32>());
    let lightness = lerp(gradient.lightness.0, gradient.lightness.1, rng.random::<f32>());

    hsl_to_rgb(hue, saturation, lightness)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_count_is_valid() {
        let config = FieldConfig::dark().with_count(0);
        let set = generate(&config, &mut StdRng::seed_from_u64(1));
        assert!(set.is_empty());
        assert!(set.position_buffer().is_empty());
        assert!(set.color_buffer().is_empty());
        assert_eq!(set.centroid(), None);
    }

    #[test]
    fn flat_buffers_have_three_floats_per_point() {
        let set = generate(&FieldConfig::light().with_count(10), &mut StdRng::seed_from_u64(2));
        assert_eq!(set.position_buffer().len(), 30);
        assert_eq!(set.color_buffer().len(), 30);
        assert_eq!(set.position_buffer()[3], set.positions()[1][0]);
    }

    #[test]
    fn same_seed_same_cloud() {
        let config = FieldConfig::dark().with_count(64);
        let a = generate(&config, &mut StdRng::seed_from_u64(9));
        let b = generate(&config, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn star_bands_use_expected_ratios() {
        let set = generate(&FieldConfig::dark().with_count(4000), &mut StdRng::seed_from_u64(3));

        let white = set.colors().iter().filter(|c| c[0] == c[1] && c[1] == c[2]).count();
        let share = white as f64 / set.len() as f64;
        assert!((0.65..0.75).contains(&share), "white share {share}");
    }

    #[test]
    fn star_brightness_within_range() {
        let set = generate(&FieldConfig::dark().with_count(500), &mut StdRng::seed_from_u64(4));
        for c in set.colors() {
            let peak = c.iter().copied().fold(0.0f32, f32::max);
            assert!((0.7..=1.0).contains(&peak), "peak {peak}");
        }
    }

    #[test]
    fn from_parts_rejects_mismatch() {
        let err = ParticleSet::from_parts(vec![[0.0; 3]; 2], vec![[0.0; 3]; 1]).unwrap_err();
        assert_eq!(
            err,
            SceneError::LengthMismatch {
                positions: 2,
                colors: 1
            }
        );
    }
}
