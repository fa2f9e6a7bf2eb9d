//! Frame loop
//!
//! [`FrameScheduler`] stands in for the host's per-frame callback facility.
//! Each `tick` advances a monotonic clock and hands the same [`FrameInput`]
//! to every live registration. Registrations end when their [`FrameHandle`]
//! is cancelled or dropped; a cancelled callback never runs again.

use crate::error::SceneError;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Normalized pointer position, both axes in `[-1, 1]`, Y up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    /// Horizontal, -1 left to 1 right
    pub x: f32,
    /// Vertical, -1 bottom to 1 top
    pub y: f32,
}

impl Pointer {
    /// Pointer resting at the centre of the canvas
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    /// Create pointer, clamping both axes
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        let fix = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Self { x: fix(x), y: fix(y) }
    }

    /// Normalize a pixel position inside a `width × height` canvas
    ///
    /// Pixel Y grows downwards; the result has Y growing upwards. A zero-sized
    /// canvas maps to the centre.
    #[must_use]
    pub fn from_pixels(px: f32, py: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::CENTER;
        }
        Self::new((px / width) * 2.0 - 1.0, -((py / height) * 2.0 - 1.0))
    }
}

impl FromStr for Pointer {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SceneError::InvalidPointer(s.to_string());

        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f32 = x.trim().parse().map_err(|_| invalid())?;
        let y: f32 = y.trim().parse().map_err(|_| invalid())?;

        if !(-1.0..=1.0).contains(&x) || !(-1.0..=1.0).contains(&y) {
            return Err(invalid());
        }

        Ok(Self { x, y })
    }
}

/// Input to one frame update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Seconds since the loop started
    pub elapsed: f32,
    /// Frame counter, starting at 1 for the first tick
    pub frame: u64,
    /// Pointer position for this frame
    pub pointer: Pointer,
}

impl FrameInput {
    /// Create frame input
    #[inline]
    #[must_use]
    pub fn new(elapsed: f32, frame: u64, pointer: Pointer) -> Self {
        Self {
            elapsed,
            frame,
            pointer,
        }
    }
}

type FrameCallback = Box<dyn FnMut(&FrameInput) + Send>;

struct Registration {
    active: Arc<AtomicBool>,
    callback: FrameCallback,
}

/// Cancellation handle for a frame registration
///
/// Dropping the handle cancels the registration.
#[derive(Debug)]
#[must_use = "dropping a FrameHandle cancels the registration"]
pub struct FrameHandle {
    active: Arc<AtomicBool>,
}

impl FrameHandle {
    /// Stop receiving frames
    pub fn cancel(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Check if the registration is still live
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Explicit per-frame callback loop
#[derive(Default)]
pub struct FrameScheduler {
    elapsed: f64,
    frame: u64,
    registrations: Vec<Registration>,
}

impl FrameScheduler {
    /// Create idle scheduler
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run once per tick
    pub fn on_frame<F>(&mut self, callback: F) -> FrameHandle
    where
        F: FnMut(&FrameInput) + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        self.registrations.push(Registration {
            active: Arc::clone(&active),
            callback: Box::new(callback),
        });
        FrameHandle { active }
    }

    /// Advance the clock by `dt` seconds and run every live callback
    ///
    /// Negative or non-finite `dt` counts as zero so time never runs
    /// backwards. Returns the number of callbacks invoked.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick(&mut self, dt: f32, pointer: Pointer) -> usize {
        let dt = if dt.is_finite() && dt > 0.0 { f64::from(dt) } else { 0.0 };
        self.elapsed += dt;
        self.frame += 1;

        let input = FrameInput::new(self.elapsed as f32, self.frame, pointer);

        self.registrations
            .retain(|r| r.active.load(Ordering::Acquire));

        let mut invoked = 0;
        for registration in &mut self.registrations {
            if registration.active.load(Ordering::Acquire) {
                (registration.callback)(&input);
                invoked += 1;
            }
        }

        tracing::trace!("Frame {} at {:.3}s ran {} callbacks", self.frame, self.elapsed, invoked);
        invoked
    }

    /// Seconds elapsed since the first tick
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of ticks so far
    #[inline]
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of live registrations
    #[must_use]
    pub fn active_callbacks(&self) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.active.load(Ordering::Acquire))
            .count()
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("elapsed", &self.elapsed)
            .field("frame", &self.frame)
            .field("active_callbacks", &self.active_callbacks())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    #[test]
    fn pointer_from_pixels() {
        assert_eq!(Pointer::from_pixels(0.0, 0.0, 200.0, 100.0), Pointer::new(-1.0, 1.0));
        assert_eq!(Pointer::from_pixels(100.0, 50.0, 200.0, 100.0), Pointer::CENTER);
        assert_eq!(Pointer::from_pixels(5.0, 5.0, 0.0, 100.0), Pointer::CENTER);
        assert_eq!(Pointer::from_pixels(900.0, 0.0, 200.0, 100.0).x, 1.0);
    }

    #[test]
    fn pointer_parse() {
        assert_eq!("0.5, -0.25".parse::<Pointer>().unwrap(), Pointer::new(0.5, -0.25));
        assert!("2,0".parse::<Pointer>().is_err());
        assert!("0.5".parse::<Pointer>().is_err());
        assert!("a,b".parse::<Pointer>().is_err());
    }

    #[test]
    fn tick_runs_callbacks_with_monotonic_time() {
        let mut scheduler = FrameScheduler::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let _handle = scheduler.on_frame(move |input| log.lock().unwrap().push(input.elapsed));

        scheduler.tick(0.5, Pointer::CENTER);
        scheduler.tick(-3.0, Pointer::CENTER);
        scheduler.tick(f32::NAN, Pointer::CENTER);
        scheduler.tick(0.25, Pointer::CENTER);

        assert_eq!(*seen.lock().unwrap(), vec![0.5, 0.5, 0.5, 0.75]);
        assert_eq!(scheduler.frame(), 4);
    }

    #[test]
    fn cancelled_callback_never_runs() {
        let mut scheduler = FrameScheduler::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = scheduler.on_frame(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        scheduler.tick(0.016, Pointer::CENTER);
        handle.cancel();
        assert!(!handle.is_active());
        assert_eq!(scheduler.tick(0.016, Pointer::CENTER), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.active_callbacks(), 0);
    }

    #[test]
    fn dropping_handle_cancels() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.on_frame(|_| {});
        assert_eq!(scheduler.active_callbacks(), 1);
        drop(handle);
        assert_eq!(scheduler.tick(0.016, Pointer::CENTER), 0);
    }
}
