//! Folio Reveal
//!
//! Tracks which registered page elements currently intersect the viewport and
//! turns that into presentational class selection for scroll-reveal effects.
//!
//! # Core Concepts
//!
//! - [`VisibilityTracker`]: owns the visibility map, registers nodes with a facility
//! - [`IntersectionFacility`]: the host's viewport-intersection detector
//! - [`GeometryObserver`]: a facility driven by explicit viewport/element rectangles
//! - [`VisibilityMap`]: copy-on-write snapshot, a new identity per applied batch
//! - [`RevealTransition`]: shown/hidden class pairs with timing
//!
//! # Example
//!
//! ```rust
//! use folio_reveal::{GeometryObserver, NodeHandle, ObserverOptions, Rect, VisibilityTracker};
//!
//! let options = ObserverOptions::default();
//! let mut tracker = VisibilityTracker::mount(options, |opts| {
//!     let mut observer = GeometryObserver::connect(opts)?;
//!     observer.set_viewport(Rect::new(0.0, 0.0, 1280.0, 800.0));
//!     observer.set_bounds(NodeHandle::new(1), Rect::new(0.0, 100.0, 1280.0, 400.0));
//!     Ok(observer)
//! });
//!
//! tracker.register("header", NodeHandle::new(1));
//! assert!(!tracker.is_visible("header"));
//!
//! tracker.pump();
//! assert!(tracker.is_visible("header"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod element;
mod facility;
mod geometry;
mod map;
mod tracker;
mod transition;

// Re-exports
pub use element::{ElementId, NodeHandle, Rect};
pub use facility::{FacilityError, IntersectionEntry, IntersectionFacility, ObserverOptions};
pub use geometry::GeometryObserver;
pub use map::VisibilityMap;
pub use tracker::{TrackerMode, VisibilityTracker};
pub use transition::RevealTransition;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
