//! Per-frame motion rules

/// Slow sinusoidal tilt about the X axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wobble {
    /// Radians of phase per second
    pub frequency: f32,
    /// Peak tilt in radians
    pub amplitude: f32,
}

/// Bounded wave-like nudge applied to every point each frame
///
/// Axis X and Z follow a sine, Y a cosine; each axis has its own time and
/// index frequency so neighbouring points move out of phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Maximum displacement per frame on any axis
    pub amplitude: f32,
    /// Phase per second, per axis
    pub time_frequency: [f32; 3],
    /// Phase per point index, per axis
    pub index_frequency: [f32; 3],
}

impl Drift {
    /// Displacement of point `index` at `elapsed` seconds
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn offset(&self, elapsed: f32, index: usize) -> [f32; 3] {
        let i = index as f32;
        let phase =
            |axis: usize| elapsed * self.time_frequency[axis] + i * self.index_frequency[axis];
        [
            phase(0).sin() * self.amplitude,
            phase(1).cos() * self.amplitude,
            phase(2).sin() * self.amplitude,
        ]
    }
}

impl Default for Drift {
    fn default() -> Self {
        Self {
            amplitude: 0.0008,
            time_frequency: [0.4, 0.3, 0.35],
            index_frequency: [0.008, 0.015, 0.012],
        }
    }
}

/// Rotation gain from the normalized pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerGain {
    /// Added to X rotation per unit of pointer Y
    pub pitch: f32,
    /// Z rotation per unit of pointer X
    pub roll: f32,
}

impl Default for PointerGain {
    fn default() -> Self {
        Self {
            pitch: 0.015,
            roll: 0.008,
        }
    }
}

/// How a field moves over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Y rotation in radians per second of elapsed time
    pub spin_rate: f32,
    /// Optional X tilt
    pub wobble: Option<Wobble>,
    /// Optional positional drift
    pub drift: Option<Drift>,
    /// Pointer influence, the same for every theme
    pub pointer: PointerGain,
}

impl MotionProfile {
    /// Distant, slowly turning star field
    #[must_use]
    pub fn dark() -> Self {
        Self {
            spin_rate: 0.008,
            wobble: Some(Wobble {
                frequency: 0.003,
                amplitude: 0.02,
            }),
            drift: None,
            pointer: PointerGain::default(),
        }
    }

    /// Faster spin with gentle per-point drift
    #[must_use]
    pub fn light() -> Self {
        Self {
            spin_rate: 0.025,
            wobble: None,
            drift: Some(Drift::default()),
            pointer: PointerGain::default(),
        }
    }

    /// Motionless profile, handy for static renders
    #[must_use]
    pub fn still() -> Self {
        Self {
            spin_rate: 0.0,
            wobble: None,
            drift: None,
            pointer: PointerGain { pitch: 0.0, roll: 0.0 },
        }
    }
}
