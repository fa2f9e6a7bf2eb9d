//! Per-theme render setup
//!
//! Values a renderer needs besides the point cloud itself. Colours are
//! linear RGB in `[0, 1]`.

use crate::color::rgb_from_hex;
use folio_theme::Theme;
use serde::{Deserialize, Serialize};

/// How points combine with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blending {
    /// Standard alpha blending
    Normal,
    /// Colours add up, so dense regions glow
    Additive,
}

/// Point material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    /// Point size in pixels
    pub size: f32,
    /// Whether size shrinks with distance
    pub size_attenuation: bool,
    /// Blend mode
    pub blending: Blending,
    /// Material opacity
    pub opacity: f32,
}

/// Perspective camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position
    pub position: [f32; 3],
    /// Vertical field of view, degrees
    pub fov: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 15.0],
            fov: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Light source kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LightKind {
    /// Uniform light from everywhere
    Ambient,
    /// Omnidirectional light with falloff
    Point {
        /// Light position
        position: [f32; 3],
        /// Range; zero means unlimited
        distance: f32,
        /// Falloff exponent
        decay: f32,
    },
}

/// One light in the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Kind and placement
    #[serde(flatten)]
    pub kind: LightKind,
    /// Colour
    pub color: [f32; 3],
    /// Intensity
    pub intensity: f32,
}

impl Light {
    fn ambient(hex: u32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: rgb_from_hex(hex),
            intensity,
        }
    }

    fn point(hex: u32, intensity: f32, position: [f32; 3], distance: f32, decay: f32) -> Self {
        Self {
            kind: LightKind::Point {
                position,
                distance,
                decay,
            },
            color: rgb_from_hex(hex),
            intensity,
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    /// Fog colour
    pub color: [f32; 3],
    /// Distance where fog starts
    pub near: f32,
    /// Distance where fog is opaque
    pub far: f32,
}

/// Complete render setup for a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneStyle {
    /// Point material
    pub points: PointStyle,
    /// Camera
    pub camera: Camera,
    /// Lights, in draw order
    pub lights: Vec<Light>,
    /// Optional fog
    pub fog: Option<Fog>,
}

impl SceneStyle {
    /// Style for a theme
    #[must_use]
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Glowing stars on black, barely lit
    #[must_use]
    pub fn dark() -> Self {
        Self {
            points: PointStyle {
                size: 3.0,
                size_attenuation: false,
                blending: Blending::Additive,
                opacity: 0.8,
            },
            camera: Camera::default(),
            lights: vec![
                Light::ambient(0xff_ff_ff, 0.1),
                Light::point(0xff_ff_ff, 0.2, [0.0, 0.0, 10.0], 50.0, 1.0),
            ],
            fog: None,
        }
    }

    /// Pastel points under three coloured lights with a soft fog
    #[must_use]
    pub fn light() -> Self {
        Self {
            points: PointStyle {
                size: 3.0,
                size_attenuation: false,
                blending: Blending::Normal,
                opacity: 0.6,
            },
            camera: Camera::default(),
            lights: vec![
                Light::ambient(0xf0_f4_ff, 0.2),
                Light::point(0x8b_5c_f6, 0.3, [10.0, 5.0, 10.0], 25.0, 1.5),
                Light::point(0x06_b6_d4, 0.2, [-10.0, -5.0, 5.0], 20.0, 1.5),
                Light::point(0xec_48_99, 0.15, [0.0, 10.0, -10.0], 30.0, 2.0),
            ],
            fog: Some(Fog {
                color: rgb_from_hex(0xf8_fa_fc),
                near: 20.0,
                far: 60.0,
            }),
        }
    }

    /// Number of point lights
    #[must_use]
    pub fn point_lights(&self) -> usize {
        self.lights
            .iter()
            .filter(|l| matches!(l.kind, LightKind::Point { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_glows_without_fog() {
        let style = SceneStyle::for_theme(Theme::Dark);
        assert_eq!(style.points.blending, Blending::Additive);
        assert!(style.fog.is_none());
        assert_eq!(style.point_lights(), 1);
    }

    #[test]
    fn light_has_fog_and_three_point_lights() {
        let style = SceneStyle::for_theme(Theme::Light);
        assert_eq!(style.points.blending, Blending::Normal);
        assert_eq!(style.point_lights(), 3);
        let fog = style.fog.unwrap();
        assert!(fog.near < fog.far);
    }

    #[test]
    fn both_themes_share_camera() {
        assert_eq!(SceneStyle::dark().camera, SceneStyle::light().camera);
        assert_eq!(SceneStyle::dark().camera.position, [0.0, 0.0, 15.0]);
    }
}
