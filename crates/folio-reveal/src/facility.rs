//! Viewport intersection facility seam

use crate::element::NodeHandle;
use serde::{Deserialize, Serialize};

/// Errors raised by an intersection facility
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FacilityError {
    /// The host has no intersection detection
    #[error("intersection detection unsupported: {0}")]
    Unsupported(String),

    /// Node is not part of the rendered tree
    #[error("{0} is not a rendered element")]
    DetachedNode(NodeHandle),

    /// Facility was already disconnected
    #[error("facility disconnected")]
    Disconnected,
}

/// One intersection change reported by the facility
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Observed node
    pub target: NodeHandle,
    /// Whether the node now intersects by at least the threshold
    pub is_intersecting: bool,
    /// Fraction of the node's area inside the (margin-expanded) viewport
    pub intersection_ratio: f32,
}

impl IntersectionEntry {
    /// Create entry
    #[inline]
    #[must_use]
    pub fn new(target: NodeHandle, is_intersecting: bool, intersection_ratio: f32) -> Self {
        Self {
            target,
            is_intersecting,
            intersection_ratio,
        }
    }
}

/// Observer tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Fraction of element area that must be inside the viewport, in `[0, 1]`
    pub threshold: f32,
    /// Pixels added around the viewport on every side
    pub root_margin: f32,
}

impl ObserverOptions {
    /// Create options, clamping the threshold into `[0, 1]`
    #[must_use]
    pub fn new(threshold: f32, root_margin: f32) -> Self {
        Self {
            threshold,
            root_margin,
        }
        .sanitized()
    }

    /// Clamp out-of-range values
    #[must_use]
    pub fn sanitized(self) -> Self {
        let threshold = if self.threshold.is_finite() {
            self.threshold.clamp(0.0, 1.0)
        } else {
            Self::default().threshold
        };
        let root_margin = if self.root_margin.is_finite() {
            self.root_margin
        } else {
            0.0
        };
        Self {
            threshold,
            root_margin,
        }
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: 0.0,
        }
    }
}

/// Host-provided viewport intersection detector
///
/// A single facility instance watches every registered node. Records are
/// buffered until drained with [`take_records`](Self::take_records); browser
/// hosts that push callbacks instead hand their batches straight to
/// [`VisibilityTracker::handle_batch`](crate::VisibilityTracker::handle_batch).
pub trait IntersectionFacility {
    /// Start watching a node
    ///
    /// # Errors
    /// Returns error if the node is not rendered or the facility is gone
    fn observe(&mut self, node: NodeHandle) -> Result<(), FacilityError>;

    /// Stop watching a node
    fn unobserve(&mut self, node: NodeHandle);

    /// Stop watching everything and release resources
    fn disconnect(&mut self);

    /// Drain buffered intersection changes
    fn take_records(&mut self) -> Vec<IntersectionEntry>;
}

impl<F: IntersectionFacility + ?Sized> IntersectionFacility for Box<F> {
    fn observe(&mut self, node: NodeHandle) -> Result<(), FacilityError> {
        (**self).observe(node)
    }

    fn unobserve(&mut self, node: NodeHandle) {
        (**self).unobserve(node);
    }

    fn disconnect(&mut self) {
        (**self).disconnect();
    }

    fn take_records(&mut self) -> Vec<IntersectionEntry> {
        (**self).take_records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = ObserverOptions::default();
        assert!((opts.threshold - 0.1).abs() < f32::EPSILON);
        assert_eq!(opts.root_margin, 0.0);
    }

    #[test]
    fn options_clamp_threshold() {
        assert_eq!(ObserverOptions::new(4.0, 0.0).threshold, 1.0);
        assert_eq!(ObserverOptions::new(-1.0, 0.0).threshold, 0.0);
        assert!((ObserverOptions::new(f32::NAN, 0.0).threshold - 0.1).abs() < f32::EPSILON);
        assert_eq!(ObserverOptions::new(0.5, f32::INFINITY).root_margin, 0.0);
    }
}
