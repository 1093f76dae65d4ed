use serde::{Deserialize, Serialize};

/// Per-tick smoothing factor of the default filter.
pub const DEFAULT_ALPHA: f32 = 0.05;

/// Rate of [`Smoothing::TimeNormalized`] that matches [`DEFAULT_ALPHA`] at 60 Hz.
pub const DEFAULT_RATE: f32 = 3.077_6;

/// First-order low-pass filter applied to the head rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoothing {
    /// Fixed factor per tick. Convergence speed in wall-clock time depends on
    /// the frame rate.
    PerTick { alpha: f32 },
    /// Factor `1 - exp(-rate * dt)`, frame-rate independent.
    TimeNormalized { rate: f32 },
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::PerTick { alpha: DEFAULT_ALPHA }
    }
}

impl Smoothing {
    /// Fraction of the remaining error removed in a tick of `dt` seconds.
    #[must_use]
    pub fn factor(&self, dt: f32) -> f32 {
        match *self {
            Smoothing::PerTick { alpha } => alpha,
            Smoothing::TimeNormalized { rate } => 1.0 - (-rate * dt.max(0.0)).exp(),
        }
    }
}

/// Tunables of the pointer-look and idle animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    /// Target yaw (radians) per unit of horizontal pointer signal.
    pub yaw_scale: f32,
    /// Target pitch (radians) per unit of vertical pointer signal.
    pub pitch_scale: f32,
    pub smoothing: Smoothing,
    /// Neck yaw as a fraction of the head yaw.
    pub neck_follow: f32,
    pub idle_amplitude: f32,
    /// Angular frequency of the idle bob, in radians per second.
    pub idle_frequency: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            yaw_scale: 0.6,
            pitch_scale: 0.4,
            smoothing: Smoothing::default(),
            neck_follow: 0.5,
            idle_amplitude: 0.1,
            idle_frequency: 1.5,
        }
    }
}

impl AnimationParams {
    /// Vertical offset of the whole rig at `elapsed` seconds.
    #[inline]
    #[must_use]
    pub fn idle_offset(&self, elapsed: f32) -> f32 {
        (elapsed * self.idle_frequency).sin() * self.idle_amplitude
    }
}

/// Vertical idle bob with the default parameters: `sin(t * 1.5) * 0.1`.
#[inline]
#[must_use]
pub fn idle_offset(elapsed: f32) -> f32 {
    (elapsed * 1.5).sin() * 0.1
}

/// Head rotation state carried from one tick to the next.
///
/// All angles are radians. Starts at rest, looking straight ahead.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    pub yaw: f32,
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    /// Idle offset computed on the last tick.
    pub idle_offset: f32,
}

impl AnimationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
