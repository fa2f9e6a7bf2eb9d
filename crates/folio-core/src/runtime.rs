//! Portfolio runtime
//!
//! Wires the independent pieces together the way the page does:
//! - the dark-mode controller decides the theme
//! - the theme picks the particle field preset; a toggle regenerates it
//! - the frame scheduler animates the field each tick
//! - the visibility tracker is drained after every tick

use crate::config::FolioConfig;
use folio_reveal::{
    ElementId, FacilityError, IntersectionFacility, NodeHandle, ObserverOptions, TrackerMode,
    VisibilityTracker,
};
use folio_scene::{FrameHandle, FrameScheduler, Orientation, ParticleField, Pointer, SceneStyle};
use folio_theme::{DarkModeController, PreferenceStore, Theme};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one [`PortfolioRuntime::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// Frame number after the tick
    pub frame: u64,
    /// Frame callbacks invoked
    pub callbacks: usize,
    /// Whether a new visibility map was published
    pub visibility_changed: bool,
}

/// Point-in-time view of the runtime, for reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeStatus {
    /// Active theme
    pub theme: Theme,
    /// Frames ticked so far
    pub frame: u64,
    /// Seconds of animation time
    pub elapsed: f64,
    /// Points in the current field
    pub particles: usize,
    /// Current field rotation
    pub orientation: Orientation,
    /// Tracker mode
    pub tracker: TrackerMode,
    /// Ids currently revealed, sorted
    pub visible: Vec<String>,
}

/// Theme, reveal tracking and particle backdrop for one page
pub struct PortfolioRuntime<S: PreferenceStore, F: IntersectionFacility> {
    config: FolioConfig,
    dark_mode: DarkModeController<S>,
    tracker: VisibilityTracker<F>,
    field: Arc<Mutex<ParticleField>>,
    scheduler: FrameScheduler,
    frame_handle: Option<FrameHandle>,
    rng: StdRng,
    pointer: Pointer,
}

impl<S: PreferenceStore, F: IntersectionFacility> PortfolioRuntime<S, F> {
    /// Mount the runtime
    ///
    /// Reads the stored theme, generates the matching field, starts the frame
    /// registration and connects the intersection facility (failing open if
    /// it is unavailable).
    pub fn new<C>(config: FolioConfig, store: S, connect: C) -> Self
    where
        C: FnOnce(&ObserverOptions) -> Result<F, FacilityError>,
    {
        let mut rng = match config.frame.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let dark_mode = DarkModeController::load_with_default(store, config.theme.default);
        let theme = dark_mode.theme();

        let field = Arc::new(Mutex::new(ParticleField::generate(
            theme,
            config.field_config(theme),
            &mut rng,
        )));

        let mut scheduler = FrameScheduler::new();
        let frame_handle = {
            let field = Arc::clone(&field);
            scheduler.on_frame(move |input| field.lock().update(input))
        };

        let tracker = VisibilityTracker::mount(config.reveal, connect);

        tracing::info!(
            "Runtime mounted: {} theme, tracker {:?}",
            theme,
            tracker.mode()
        );

        Self {
            config,
            dark_mode,
            tracker,
            field,
            scheduler,
            frame_handle: Some(frame_handle),
            rng,
            pointer: Pointer::CENTER,
        }
    }

    /// Flip the theme and regenerate the particle field for it
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.dark_mode.toggle();
        self.regenerate(theme);
        theme
    }

    /// Switch to `theme`, regenerating only if it changed
    pub fn set_theme(&mut self, theme: Theme) {
        if self.dark_mode.theme() == theme {
            return;
        }
        self.dark_mode.set(theme);
        self.regenerate(theme);
    }

    fn regenerate(&mut self, theme: Theme) {
        let config = self.config.field_config(theme);
        self.field.lock().regenerate(theme, config, &mut self.rng);
    }

    /// Record the latest pointer position
    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    /// Advance one frame of `dt` seconds, then apply pending visibility changes
    pub fn tick(&mut self, dt: f32) -> TickSummary {
        let callbacks = self.scheduler.tick(dt, self.pointer);
        let visibility_changed = self.tracker.pump();

        TickSummary {
            frame: self.scheduler.frame(),
            callbacks,
            visibility_changed,
        }
    }

    /// Register a revealable section
    pub fn register(&mut self, id: impl Into<ElementId>, node: NodeHandle) {
        self.tracker.register(id, node);
    }

    /// Visibility of a section
    #[inline]
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.tracker.is_visible(id)
    }

    /// Stop animating and observing
    ///
    /// Idempotent. The theme stays usable; the visibility map is frozen.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            handle.cancel();
            self.tracker.teardown();
            tracing::info!("Runtime shut down after {} frames", self.scheduler.frame());
        }
    }

    /// Check if the runtime is still animating
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frame_handle.is_some()
    }

    /// Active theme
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.dark_mode.theme()
    }

    /// Render style for the active theme
    #[must_use]
    pub fn style(&self) -> SceneStyle {
        SceneStyle::for_theme(self.theme())
    }

    /// Dark-mode controller
    #[inline]
    #[must_use]
    pub fn dark_mode(&self) -> &DarkModeController<S> {
        &self.dark_mode
    }

    /// Visibility tracker
    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &VisibilityTracker<F> {
        &self.tracker
    }

    /// Mutable tracker, for hosts feeding geometry into its facility
    #[inline]
    pub fn tracker_mut(&mut self) -> &mut VisibilityTracker<F> {
        &mut self.tracker
    }

    /// Shared particle field
    #[must_use]
    pub fn field(&self) -> Arc<Mutex<ParticleField>> {
        Arc::clone(&self.field)
    }

    /// Frame scheduler
    #[inline]
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Snapshot for reporting
    #[must_use]
    pub fn status(&self) -> RuntimeStatus {
        let field = self.field.lock();
        let snapshot = self.tracker.snapshot();

        RuntimeStatus {
            theme: self.theme(),
            frame: self.scheduler.frame(),
            elapsed: self.scheduler.elapsed(),
            particles: field.particles().len(),
            orientation: field.orientation(),
            tracker: self.tracker.mode(),
            visible: snapshot
                .visible_ids()
                .into_iter()
                .map(|id| id.as_str().to_string())
                .collect(),
        }
    }
}

impl<S: PreferenceStore, F: IntersectionFacility> Drop for PortfolioRuntime<S, F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
