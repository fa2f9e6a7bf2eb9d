//! Visibility tracker
//!
//! Registers elements with a single shared [`IntersectionFacility`] and keeps
//! a [`VisibilityMap`] reflecting the latest reported state of each one.
//!
//! Lifecycle:
//! 1. **Mount**: connect the facility (or fall back to fail-open mode)
//! 2. **Observe**: `register` elements, apply batches via `handle_batch`/`pump`
//! 3. **Teardown**: disconnect once, freeze the map, ignore late batches

use crate::element::{ElementId, NodeHandle};
use crate::facility::{FacilityError, IntersectionEntry, IntersectionFacility, ObserverOptions};
use crate::map::VisibilityMap;
use crate::transition::RevealTransition;
use serde::Serialize;
use std::collections::HashMap;

/// Operating mode of a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerMode {
    /// Facility connected, visibility follows reported intersections
    Observing,
    /// No facility: every registered element is shown
    FailOpen,
    /// Torn down: map frozen, further input ignored
    TornDown,
}

/// Scroll-reveal visibility tracker
#[derive(Debug)]
pub struct VisibilityTracker<F: IntersectionFacility> {
    facility: Option<F>,
    options: ObserverOptions,
    nodes: HashMap<ElementId, NodeHandle>,
    owners: HashMap<NodeHandle, ElementId>,
    map: VisibilityMap,
    mode: TrackerMode,
}

impl<F: IntersectionFacility> VisibilityTracker<F> {
    /// Mount a tracker, connecting its facility
    ///
    /// If `connect` fails the tracker degrades to [`TrackerMode::FailOpen`].
    pub fn mount<C>(options: ObserverOptions, connect: C) -> Self
    where
        C: FnOnce(&ObserverOptions) -> Result<F, FacilityError>,
    {
        let options = options.sanitized();

        match connect(&options) {
            Ok(facility) => {
                tracing::debug!(
                    "Visibility tracker mounted (threshold {}, root margin {})",
                    options.threshold,
                    options.root_margin
                );
                Self::with_parts(Some(facility), options, TrackerMode::Observing)
            }
            Err(e) => {
                tracing::warn!("Intersection facility unavailable, revealing all content: {}", e);
                Self::with_parts(None, options, TrackerMode::FailOpen)
            }
        }
    }

    /// Tracker for hosts without any intersection facility
    #[must_use]
    pub fn fail_open(options: ObserverOptions) -> Self {
        Self::with_parts(None, options.sanitized(), TrackerMode::FailOpen)
    }

    fn with_parts(facility: Option<F>, options: ObserverOptions, mode: TrackerMode) -> Self {
        Self {
            facility,
            options,
            nodes: HashMap::new(),
            owners: HashMap::new(),
            map: VisibilityMap::new(),
            mode,
        }
    }

    /// Begin observing `node` under `id`
    ///
    /// Re-registering an id replaces its node; the entry is never duplicated.
    pub fn register(&mut self, id: impl Into<ElementId>, node: NodeHandle) {
        let id = id.into();

        if self.mode == TrackerMode::TornDown {
            tracing::debug!("Ignoring registration of {} after teardown", id);
            return;
        }

        let previous = self.nodes.insert(id.clone(), node);
        let node_changed = previous != Some(node);

        if let Some(old) = previous.filter(|old| *old != node) {
            self.owners.remove(&old);
            if let Some(facility) = self.facility.as_mut() {
                facility.unobserve(old);
            }
        }

        // A node belongs to exactly one id
        if let Some(other) = self.owners.insert(node, id.clone()) {
            if other != id {
                self.nodes.remove(&other);
                if self.map.contains(other.as_str()) {
                    self.map = self.map.without(other.as_str());
                }
            }
        }

        match self.mode {
            TrackerMode::FailOpen => {
                self.publish([(id, true)]);
            }
            TrackerMode::Observing => {
                if node_changed || !self.map.contains(id.as_str()) {
                    self.publish([(id.clone(), false)]);
                }
                self.observe(&id, node);
            }
            TrackerMode::TornDown => {}
        }
    }

    fn observe(&mut self, id: &ElementId, node: NodeHandle) {
        let Some(facility) = self.facility.as_mut() else {
            return;
        };

        if let Err(e) = facility.observe(node) {
            tracing::warn!("Cannot observe {} ({}), revealing it: {}", id, node, e);
            self.publish([(id.clone(), true)]);
        }
    }

    /// Stop observing `id` and drop its entry
    pub fn unregister(&mut self, id: &str) {
        if self.mode == TrackerMode::TornDown {
            return;
        }

        if let Some(node) = self.nodes.remove(id) {
            self.owners.remove(&node);
            if let Some(facility) = self.facility.as_mut() {
                facility.unobserve(node);
            }
        }

        if self.map.contains(id) {
            self.map = self.map.without(id);
        }
    }

    /// Visibility of `id`; `false` for unknown or unreported ids
    #[inline]
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.map.is_visible(id)
    }

    /// Apply one batch of intersection changes
    ///
    /// Returns `true` if a new map was published. Entries for nodes that are
    /// no longer registered are ignored, and after teardown the whole batch is
    /// dropped.
    pub fn handle_batch(&mut self, entries: &[IntersectionEntry]) -> bool {
        if self.mode == TrackerMode::TornDown {
            tracing::debug!("Dropping late batch of {} entries after teardown", entries.len());
            return false;
        }

        let changes: Vec<(ElementId, bool)> = entries
            .iter()
            .filter_map(|entry| {
                self.owners
                    .get(&entry.target)
                    .map(|id| (id.clone(), entry.is_intersecting))
            })
            .collect();

        if changes.is_empty() {
            return false;
        }

        tracing::trace!("Applying {} visibility changes", changes.len());
        self.publish(changes);
        true
    }

    /// Drain pending records from the facility and apply them as one batch
    pub fn pump(&mut self) -> bool {
        if self.mode != TrackerMode::Observing {
            return false;
        }

        let records = match self.facility.as_mut() {
            Some(facility) => facility.take_records(),
            None => return false,
        };

        if records.is_empty() {
            return false;
        }

        self.handle_batch(&records)
    }

    /// Stop all observation and release the facility
    ///
    /// Safe to call more than once; the map keeps its last published state.
    pub fn teardown(&mut self) {
        if self.mode == TrackerMode::TornDown {
            return;
        }

        if let Some(mut facility) = self.facility.take() {
            facility.disconnect();
        }

        self.nodes.clear();
        self.owners.clear();
        self.mode = TrackerMode::TornDown;

        tracing::debug!("Visibility tracker torn down with {} entries", self.map.len());
    }

    /// Current snapshot (O(1) clone)
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> VisibilityMap {
        self.map.clone()
    }

    /// Number of tracked ids
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if nothing is tracked
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Operating mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> TrackerMode {
        self.mode
    }

    /// Observer options in effect
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Node currently registered for `id`
    #[inline]
    #[must_use]
    pub fn node_of(&self, id: &str) -> Option<NodeHandle> {
        self.nodes.get(id).copied()
    }

    /// Facility, while connected
    #[inline]
    #[must_use]
    pub fn facility(&self) -> Option<&F> {
        self.facility.as_ref()
    }

    /// Mutable facility access for hosts that feed geometry into it
    #[inline]
    pub fn facility_mut(&mut self) -> Option<&mut F> {
        self.facility.as_mut()
    }

    /// Class string for `id` under `transition`
    #[must_use]
    pub fn class_for<'t>(&self, id: &str, transition: &'t RevealTransition) -> &'t str {
        transition.class_for(self.is_visible(id))
    }

    fn publish<I>(&mut self, changes: I)
    where
        I: IntoIterator<Item = (ElementId, bool)>,
    {
        self.map = self.map.updated(changes);
    }
}

impl<F: IntersectionFacility> Drop for VisibilityTracker<F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
