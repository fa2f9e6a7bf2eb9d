//! Geometry-driven intersection facility
//!
//! For hosts without a native intersection observer. The host forwards its
//! scroll/resize events as rectangles; the observer compares each observed
//! element against the margin-expanded viewport and queues a record whenever
//! an element crosses the threshold, the same way a browser would call back.

use crate::element::{NodeHandle, Rect};
use crate::facility::{FacilityError, IntersectionEntry, IntersectionFacility, ObserverOptions};
use std::collections::HashMap;

/// Intersection facility computed from explicit rectangles
#[derive(Debug, Clone)]
pub struct GeometryObserver {
    options: ObserverOptions,
    viewport: Option<Rect>,
    bounds: HashMap<NodeHandle, Rect>,
    /// Observed nodes with their last reported state (`None` until first report)
    observed: HashMap<NodeHandle, Option<bool>>,
    pending: Vec<IntersectionEntry>,
    connected: bool,
}

impl GeometryObserver {
    /// Connect a new observer
    ///
    /// # Errors
    /// Never fails today; the signature matches other facility connectors
    pub fn connect(options: &ObserverOptions) -> Result<Self, FacilityError> {
        Ok(Self {
            options: options.sanitized(),
            viewport: None,
            bounds: HashMap::new(),
            observed: HashMap::new(),
            pending: Vec::new(),
            connected: true,
        })
    }

    /// Update the visible scrolling region
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);

        let mut nodes: Vec<NodeHandle> = self.observed.keys().copied().collect();
        nodes.sort();
        for node in nodes {
            self.evaluate(node);
        }
    }

    /// Scroll the viewport vertically, keeping its size
    pub fn scroll_to(&mut self, y: f32) {
        if let Some(viewport) = self.viewport {
            self.set_viewport(Rect::new(viewport.x, y, viewport.width, viewport.height));
        }
    }

    /// Update a rendered element's bounding box
    pub fn set_bounds(&mut self, node: NodeHandle, bounds: Rect) {
        self.bounds.insert(node, bounds);
        if self.observed.contains_key(&node) {
            self.evaluate(node);
        }
    }

    /// Remove an element from the rendered tree
    pub fn remove_node(&mut self, node: NodeHandle) {
        self.bounds.remove(&node);
        self.observed.remove(&node);
    }

    /// Current viewport
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// Check if the observer is still connected
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of observed nodes
    #[inline]
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Fraction of `bounds` inside the margin-expanded viewport
    #[must_use]
    pub fn intersection_ratio(&self, bounds: &Rect) -> f32 {
        let Some(viewport) = self.viewport else {
            return 0.0;
        };
        let root = viewport.expand(self.options.root_margin);

        if bounds.area() <= 0.0 {
            // Zero-area elements count as fully inside when their origin is
            return if root.contains_point(bounds.x, bounds.y) { 1.0 } else { 0.0 };
        }

        root.intersection(bounds)
            .map_or(0.0, |overlap| (overlap.area() / bounds.area()).clamp(0.0, 1.0))
    }

    /// Whether `bounds` overlaps or touches the margin-expanded viewport
    ///
    /// An element sharing only an edge with the root intersects with ratio 0,
    /// so a threshold of 0 reports it as intersecting.
    #[must_use]
    pub fn touches_root(&self, bounds: &Rect) -> bool {
        self.viewport.is_some_and(|viewport| {
            viewport
                .expand(self.options.root_margin)
                .intersection(bounds)
                .is_some()
        })
    }

    fn evaluate(&mut self, node: NodeHandle) {
        if self.viewport.is_none() {
            return;
        }
        let Some(bounds) = self.bounds.get(&node).copied() else {
            return;
        };

        let ratio = self.intersection_ratio(&bounds);
        let intersecting = self.touches_root(&bounds) && ratio >= self.options.threshold;

        let Some(last) = self.observed.get_mut(&node) else {
            return;
        };

        if *last != Some(intersecting) {
            *last = Some(intersecting);
            self.pending
                .push(IntersectionEntry::new(node, intersecting, ratio));
        }
    }
}

impl IntersectionFacility for GeometryObserver {
    fn observe(&mut self, node: NodeHandle) -> Result<(), FacilityError> {
        if !self.connected {
            return Err(FacilityError::Disconnected);
        }
        if !self.bounds.contains_key(&node) {
            return Err(FacilityError::DetachedNode(node));
        }

        // Observing again forces a fresh initial report
        self.observed.insert(node, None);
        self.evaluate(node);
        Ok(())
    }

    fn unobserve(&mut self, node: NodeHandle) {
        self.observed.remove(&node);
        self.pending.retain(|entry| entry.target != node);
    }

    fn disconnect(&mut self) {
        self.connected = false;
        self.observed.clear();
        self.pending.clear();
    }

    fn take_records(&mut self) -> Vec<IntersectionEntry> {
        std::mem::take(&mut self.pending)
    }
}
