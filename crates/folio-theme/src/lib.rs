//! Folio Theme
//!
//! Owns the dark/light display mode and keeps it in sync with persistent
//! storage and the document root class list.
//!
//! # Overview
//!
//! - [`Theme`]: the dark/light selector
//! - [`PreferenceStore`]: key-value persistence seam (browser storage, files, memory)
//! - [`DarkModeController`]: loads the flag once, toggles and persists it
//! - [`RootClassList`]: the marker classes applied to the document root
//!
//! # Example
//!
//! ```rust
//! use folio_theme::{DarkModeController, MemoryStore, Theme, DARK_CLASS};
//!
//! let mut controller = DarkModeController::load(MemoryStore::new());
//! assert_eq!(controller.theme(), Theme::Dark);
//!
//! controller.toggle();
//! assert_eq!(controller.theme(), Theme::Light);
//! assert!(!controller.root_classes().contains(DARK_CLASS));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod controller;
pub mod store;
pub mod theme;

// Re-exports
pub use controller::{DarkModeController, RootClassList, DARK_CLASS, STORAGE_KEY};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore, StoreError};
pub use theme::{Theme, ThemeParseError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
