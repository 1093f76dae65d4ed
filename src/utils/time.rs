#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Where a [`Timer`] gets its time from.
#[derive(Debug, Clone, Copy)]
enum Clock {
    /// Wall clock, sampled on every tick.
    Wall { start: Instant, last: Instant },
    /// Fixed step, advanced by the same amount on every tick.
    Fixed { step: Duration },
}

/// Frame clock: elapsed time since start and time since the previous tick.
#[derive(Debug, Clone)]
pub struct Timer {
    clock: Clock,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a wall-clock timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            clock: Clock::Wall { start: now, last: now },
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Creates a timer advancing by exactly `step` per tick, independent of
    /// real time. Used for deterministic playback.
    #[must_use]
    pub fn fixed(step: Duration) -> Self {
        Self {
            clock: Clock::Fixed { step },
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances the timer; called once per frame.
    pub fn tick(&mut self) {
        match &mut self.clock {
            Clock::Wall { start, last } => {
                let now = Instant::now();
                self.delta = now - *last;
                self.elapsed = now - *start;
                *last = now;
            }
            Clock::Fixed { step } => {
                self.delta = *step;
                self.elapsed += *step;
            }
        }
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}
