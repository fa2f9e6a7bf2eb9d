//! Reveal transition presets
//!
//! Class pairs used by the portfolio sections. Hidden states always combine
//! `opacity-0` with an offset or scale so elements slide or grow into place.

use std::borrow::Cow;

/// Shown/hidden class pair with timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTransition {
    shown: Cow<'static, str>,
    hidden: Cow<'static, str>,
    duration_ms: u32,
    delay_ms: u32,
}

impl RevealTransition {
    /// Custom transition
    #[must_use]
    pub fn new(shown: impl Into<Cow<'static, str>>, hidden: impl Into<Cow<'static, str>>) -> Self {
        Self {
            shown: shown.into(),
            hidden: hidden.into(),
            duration_ms: 1000,
            delay_ms: 0,
        }
    }

    /// Rise into place from below
    #[must_use]
    pub fn fade_up() -> Self {
        Self::new("opacity-100 translate-y-0", "opacity-0 translate-y-10")
    }

    /// Grow from slightly smaller
    #[must_use]
    pub fn scale_in() -> Self {
        Self::new("opacity-100 scale-100", "opacity-0 scale-95")
    }

    /// Slide in from the left edge
    #[must_use]
    pub fn slide_left() -> Self {
        Self::new("opacity-100 translate-x-0", "opacity-0 -translate-x-10")
    }

    /// Slide in from the right edge
    #[must_use]
    pub fn slide_right() -> Self {
        Self::new("opacity-100 translate-x-0", "opacity-0 translate-x-20")
    }

    /// Builder: transition duration
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builder: delay before the transition starts
    #[must_use]
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Classes while visible
    #[inline]
    #[must_use]
    pub fn shown(&self) -> &str {
        &self.shown
    }

    /// Classes while hidden
    #[inline]
    #[must_use]
    pub fn hidden(&self) -> &str {
        &self.hidden
    }

    /// Pick the class string for a visibility state
    #[inline]
    #[must_use]
    pub fn class_for(&self, visible: bool) -> &str {
        if visible {
            &self.shown
        } else {
            &self.hidden
        }
    }

    /// Duration in milliseconds
    #[inline]
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Base delay in milliseconds
    #[inline]
    #[must_use]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Delay for the `index`-th item of a staggered list
    #[must_use]
    pub fn stagger_delay(&self, index: u32, step_ms: u32) -> u32 {
        self.delay_ms
            .saturating_add(index.saturating_mul(step_ms))
    }
}
