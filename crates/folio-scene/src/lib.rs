//! Folio Scene
//!
//! The decorative 3D backdrop behind the hero section: a procedurally
//! generated point cloud whose density, palette and motion depend on the
//! active [`Theme`](folio_theme::Theme), plus the frame loop that animates it.
//!
//! # Core Concepts
//!
//! - [`FieldConfig`]: per-theme count, bounds, palette and motion profile
//! - [`generate`]: the one random step, driven by an injected [`rand::Rng`]
//! - [`ParticleField`]: owns a [`ParticleSet`] and applies the per-frame rule
//! - [`FrameScheduler`]: explicit game loop with cancellable registrations
//! - [`SceneStyle`]: camera, lights, fog and point material per theme
//!
//! # Example
//!
//! ```rust
//! use folio_scene::{FrameInput, ParticleField, Pointer};
//! use folio_theme::Theme;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut field = ParticleField::for_theme(Theme::Light, &mut rng);
//! assert_eq!(field.particles().len(), 3000);
//!
//! field.update(&FrameInput::new(1.0, 1, Pointer::CENTER));
//! assert!(field.orientation().y > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod color;
mod config;
mod error;
mod field;
mod frame;
mod motion;
mod particles;
mod style;

// Re-exports
pub use color::{hsl_to_rgb, rgb_from_hex};
pub use config::{
    sanitize_count, Bounds, FieldConfig, FieldSettings, HueGradient, Palette, StarBands,
    MAX_PARTICLES,
};
pub use error::SceneError;
pub use field::{Orientation, ParticleField};
pub use frame::{FrameHandle, FrameInput, FrameScheduler, Pointer};
pub use motion::{Drift, MotionProfile, PointerGain, Wobble};
pub use particles::{generate, ParticleSet};
pub use style::{Blending, Camera, Fog, Light, LightKind, PointStyle, SceneStyle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
