//! Testing utilities for Folio workspace
//!
//! Shared fakes for the host seams (intersection facility, preference
//! store), seeded randomness and page layouts.

#![allow(missing_docs)]

use folio_reveal::{
    FacilityError, GeometryObserver, IntersectionEntry, IntersectionFacility, NodeHandle,
    ObserverOptions, Rect,
};
use folio_scene::{FrameInput, ParticleField, Pointer};
use folio_theme::{MemoryStore, PreferenceStore, StoreError};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;

pub fn node(raw: u64) -> NodeHandle {
    NodeHandle::new(raw)
}

pub fn entry(raw: u64, is_intersecting: bool) -> IntersectionEntry {
    let ratio = if is_intersecting { 1.0 } else { 0.0 };
    IntersectionEntry::new(node(raw), is_intersecting, ratio)
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// One call made against a [`ScriptedFacility`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilityCall {
    Observe(NodeHandle),
    Unobserve(NodeHandle),
    Disconnect,
}

/// Call log that outlives the facility it was taken from
#[derive(Debug, Clone, Default)]
pub struct FacilityLog(Arc<Mutex<Vec<FacilityCall>>>);

impl FacilityLog {
    pub fn calls(&self) -> Vec<FacilityCall> {
        self.0.lock().clone()
    }

    pub fn count(&self, call: FacilityCall) -> usize {
        self.0.lock().iter().filter(|c| **c == call).count()
    }

    pub fn disconnects(&self) -> usize {
        self.count(FacilityCall::Disconnect)
    }

    fn push(&self, call: FacilityCall) {
        self.0.lock().push(call);
    }
}

/// Facility whose records are queued by the test
#[derive(Debug, Default)]
pub struct ScriptedFacility {
    log: FacilityLog,
    rejected: HashSet<NodeHandle>,
    queued: Vec<IntersectionEntry>,
}

impl ScriptedFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `observe` fail for this node
    pub fn reject(mut self, raw: u64) -> Self {
        self.rejected.insert(node(raw));
        self
    }

    pub fn log(&self) -> FacilityLog {
        self.log.clone()
    }

    pub fn queue(&mut self, entry: IntersectionEntry) {
        self.queued.push(entry);
    }

    /// Connector for `VisibilityTracker::mount`
    pub fn connector(self) -> impl FnOnce(&ObserverOptions) -> Result<Self, FacilityError> {
        move |_| Ok(self)
    }
}

impl IntersectionFacility for ScriptedFacility {
    fn observe(&mut self, node: NodeHandle) -> Result<(), FacilityError> {
        self.log.push(FacilityCall::Observe(node));
        if self.rejected.contains(&node) {
            return Err(FacilityError::DetachedNode(node));
        }
        Ok(())
    }

    fn unobserve(&mut self, node: NodeHandle) {
        self.log.push(FacilityCall::Unobserve(node));
    }

    fn disconnect(&mut self) {
        self.log.push(FacilityCall::Disconnect);
        self.queued.clear();
    }

    fn take_records(&mut self) -> Vec<IntersectionEntry> {
        std::mem::take(&mut self.queued)
    }
}

/// Connector for hosts with no intersection detection at all
pub fn unsupported(_: &ObserverOptions) -> Result<ScriptedFacility, FacilityError> {
    Err(FacilityError::Unsupported("no IntersectionObserver".into()))
}

/// Geometry observer with sections stacked vertically, one per height
///
/// Section `i` gets node `i`; the viewport starts at the top of the page.
pub fn stacked_page(
    options: &ObserverOptions,
    viewport: (f32, f32),
    heights: &[f32],
) -> GeometryObserver {
    let mut observer = GeometryObserver::connect(options).expect("geometry observer connects");
    let mut top = 0.0;
    for (i, height) in heights.iter().enumerate() {
        observer.set_bounds(node(i as u64), Rect::new(0.0, top, viewport.0, *height));
        top += height;
    }
    observer.set_viewport(Rect::new(0.0, 0.0, viewport.0, viewport.1));
    observer
}

/// Preference store with switchable read and write failures
#[derive(Debug, Default)]
pub struct FailingStore {
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub inner: MemoryStore,
}

impl FailingStore {
    pub fn reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl PreferenceStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("storage disabled".into()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("quota exceeded".into()));
        }
        self.inner.set(key, value)
    }
}

/// Drive `field` for `frames` frames of `dt` seconds with a fixed pointer
pub fn run_frames(field: &mut ParticleField, frames: u64, dt: f32, pointer: Pointer) -> f32 {
    let mut elapsed = 0.0;
    for frame in 1..=frames {
        elapsed += dt;
        field.update(&FrameInput::new(elapsed, frame, pointer));
    }
    elapsed
}
