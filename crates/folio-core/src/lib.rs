//! Folio Core - runtime for the portfolio page
//!
//! Ties together the three page subsystems:
//! - the persisted dark-mode preference ([`folio_theme`])
//! - scroll-reveal visibility tracking ([`folio_reveal`])
//! - the animated particle backdrop ([`folio_scene`])
//!
//! and supplies the ambient pieces a host needs: TOML configuration,
//! error types and tracing setup.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{FolioConfig, PortfolioRuntime};
//! use folio_reveal::{GeometryObserver, NodeHandle, Rect};
//! use folio_theme::{MemoryStore, Theme};
//!
//! let config = FolioConfig::new().with_seed(1);
//! let mut runtime = PortfolioRuntime::new(config, MemoryStore::new(), GeometryObserver::connect);
//!
//! let hero = NodeHandle::new(1);
//! if let Some(observer) = runtime.tracker_mut().facility_mut() {
//!     observer.set_bounds(hero, Rect::new(0.0, 0.0, 1280.0, 600.0));
//!     observer.set_viewport(Rect::new(0.0, 0.0, 1280.0, 800.0));
//! }
//! runtime.register("hero", hero);
//! runtime.tick(1.0 / 60.0);
//! assert!(runtime.is_visible("hero"));
//!
//! assert_eq!(runtime.toggle_theme(), Theme::Light);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports for convenience
pub use config::{FolioConfig, FrameSettings, ParticleSettings, ThemeSettings, CONFIG_ENV};
pub use error::{FolioError, Result};
pub use logging::LogFormat;
pub use runtime::{PortfolioRuntime, RuntimeStatus, TickSummary};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for hosting the runtime
    pub use crate::{FolioConfig, FolioError, PortfolioRuntime, RuntimeStatus};
    pub use folio_reveal::{ElementId, GeometryObserver, NodeHandle, Rect, RevealTransition};
    pub use folio_scene::{Pointer, SceneStyle};
    pub use folio_theme::{JsonFileStore, MemoryStore, Theme};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
