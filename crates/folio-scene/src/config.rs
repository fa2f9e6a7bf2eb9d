//! Particle field configuration
//!
//! Exact densities and volumes are tunable; what holds for every preset is
//! that the dark field is denser than the light one and that positions are
//! drawn from symmetric bounds.

use crate::motion::MotionProfile;
use folio_theme::Theme;
use serde::{Deserialize, Serialize};

/// Upper limit on generated points
pub const MAX_PARTICLES: usize = 1_000_000;

/// Symmetric half-extents: points lie in `[-x, x] × [-y, y] × [-z, z]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Half-width along X
    pub x: f32,
    /// Half-height along Y
    pub y: f32,
    /// Half-depth along Z
    pub z: f32,
}

impl Bounds {
    /// Create bounds; negative extents are mirrored, non-finite ones zeroed
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        let fix = |v: f32| if v.is_finite() { v.abs() } else { 0.0 };
        Self {
            x: fix(x),
            y: fix(y),
            z: fix(z),
        }
    }

    /// Check if a point lies inside (inclusive)
    #[must_use]
    pub fn contains(&self, p: [f32; 3]) -> bool {
        p[0].abs() <= self.x && p[1].abs() <= self.y && p[2].abs() <= self.z
    }

    /// Half-extents as an array
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Dark palette: white, blue-white and yellow-white stars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarBands {
    /// Lowest brightness
    pub brightness_floor: f32,
    /// Highest brightness
    pub brightness_ceiling: f32,
    /// Share of pure white stars
    pub white_share: f32,
    /// Share of blue-white stars; the remainder is yellow-white
    pub blue_share: f32,
}

impl Default for StarBands {
    fn default() -> Self {
        Self {
            brightness_floor: 0.7,
            brightness_ceiling: 1.0,
            white_share: 0.7,
            blue_share: 0.15,
        }
    }
}

/// Light palette: hue shifts with distance from the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueGradient {
    /// Hue at the origin, degrees
    pub base_hue: f32,
    /// Hue added per `distance_scale` units of distance
    pub hue_span: f32,
    /// Distance normalizer
    pub distance_scale: f32,
    /// Saturation range
    pub saturation: (f32, f32),
    /// Lightness range
    pub lightness: (f32, f32),
}

impl Default for HueGradient {
    fn default() -> Self {
        Self {
            base_hue: 240.0,
            hue_span: 60.0,
            distance_scale: 40.0,
            saturation: (0.6, 0.9),
            lightness: (0.4, 0.8),
        }
    }
}

/// Colour assignment rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    /// Categorical star colours
    StarBands(StarBands),
    /// Continuous distance-based hue
    HueGradient(HueGradient),
}

/// Everything needed to generate and animate one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Number of points
    pub count: usize,
    /// Sampling volume
    pub bounds: Bounds,
    /// Colour rule
    pub palette: Palette,
    /// Per-frame motion
    pub motion: MotionProfile,
}

impl FieldConfig {
    /// Preset for a theme
    #[must_use]
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Dense, wide star field
    #[must_use]
    pub fn dark() -> Self {
        Self {
            count: 5000,
            bounds: Bounds::new(60.0, 50.0, 50.0),
            palette: Palette::StarBands(StarBands::default()),
            motion: MotionProfile::dark(),
        }
    }

    /// Sparser, tighter pastel field
    #[must_use]
    pub fn light() -> Self {
        Self {
            count: 3000,
            bounds: Bounds::new(30.0, 25.0, 25.0),
            palette: Palette::HueGradient(HueGradient::default()),
            motion: MotionProfile::light(),
        }
    }

    /// Builder: point count (capped at [`MAX_PARTICLES`])
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.min(MAX_PARTICLES);
        self
    }

    /// Builder: point count from an untrusted number
    #[must_use]
    pub fn with_raw_count(self, raw: f64) -> Self {
        self.with_count(sanitize_count(raw))
    }

    /// Builder: sampling volume
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// Turn an untrusted count into a usable one
///
/// Negative, NaN and infinite values become zero; fractions are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn sanitize_count(raw: f64) -> usize {
    if !raw.is_finite() || raw <= 0.0 {
        if raw != 0.0 {
            tracing::warn!("Invalid particle count {}, using 0", raw);
        }
        return 0;
    }

    if raw > MAX_PARTICLES as f64 {
        tracing::warn!("Particle count {} capped at {}", raw, MAX_PARTICLES);
        return MAX_PARTICLES;
    }

    raw.trunc() as usize
}

/// Partial override of a theme preset, as read from configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Point count; clamped, never rejected
    pub count: Option<f64>,
    /// Half-extents `[x, y, z]`
    pub bounds: Option<[f32; 3]>,
}

impl FieldSettings {
    /// Apply over the preset for `theme`
    #[must_use]
    pub fn resolve(&self, theme: Theme) -> FieldConfig {
        let mut config = FieldConfig::for_theme(theme);
        if let Some(raw) = self.count {
            config = config.with_raw_count(raw);
        }
        if let Some([x, y, z]) = self.bounds {
            config = config.with_bounds(Bounds::new(x, y, z));
        }
        config
    }
}
