//! Pointer Input
//!
//! Converts raw pointer coordinates (pixels, origin top-left, Y down) into a
//! normalized signal centered on the viewport:
//!
//! ```text
//! x =  (raw_x / width)  * 2 - 1
//! y = -(raw_y / height) * 2 + 1
//! ```
//!
//! The tracker keeps only the latest sample. There is no smoothing here; the
//! animation driver filters the signal.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Normalized pointer position. Inside the viewport both components lie in
/// `[-1, 1]`, +Y up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSignal {
    pub x: f32,
    pub y: f32,
}

impl PointerSignal {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How samples outside the viewport are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMode {
    /// Samples outside the viewport map past `[-1, 1]`.
    #[default]
    Unclamped,
    /// Both components are clamped to `[-1, 1]`.
    Clamped,
}

/// Normalizes a raw sample against the given extent.
///
/// Returns `None` when either extent component is zero.
#[must_use]
pub fn normalize(raw: Vec2, extent: Vec2, mode: PointerMode) -> Option<PointerSignal> {
    if extent.x <= 0.0 || extent.y <= 0.0 {
        return None;
    }
    let x = (raw.x / extent.x) * 2.0 - 1.0;
    let y = -(raw.y / extent.y) * 2.0 + 1.0;
    Some(match mode {
        PointerMode::Unclamped => PointerSignal { x, y },
        PointerMode::Clamped => PointerSignal {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        },
    })
}

/// Holds the latest pointer signal and the extent used to normalize it.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    signal: PointerSignal,
    extent: Vec2,
    mode: PointerMode,
}

impl PointerTracker {
    #[must_use]
    pub fn new(width: f32, height: f32, mode: PointerMode) -> Self {
        Self {
            signal: PointerSignal::default(),
            extent: Vec2::new(width, height),
            mode,
        }
    }

    /// Records a raw pointer sample and returns the new signal.
    ///
    /// With a zero extent the previous signal is kept.
    pub fn on_pointer_move(&mut self, raw_x: f32, raw_y: f32) -> PointerSignal {
        self.on_sample(PointerSample {
            position: Vec2::new(raw_x, raw_y),
            extent: self.extent,
        })
    }

    /// Records a sample normalized against its own extent instead of the
    /// tracker's. The stored extent is left untouched.
    pub fn on_sample(&mut self, sample: PointerSample) -> PointerSignal {
        match normalize(sample.position, sample.extent, self.mode) {
            Some(signal) => self.signal = signal,
            None => log::warn!("Pointer sample ignored: zero extent {:?}", sample.extent),
        }
        self.signal
    }

    pub fn set_extent(&mut self, width: f32, height: f32) {
        self.extent = Vec2::new(width, height);
    }

    #[inline]
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    #[inline]
    #[must_use]
    pub fn signal(&self) -> PointerSignal {
        self.signal
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> PointerMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PointerMode) {
        self.mode = mode;
    }
}

/// A raw pointer sample together with the extent it should be normalized
/// against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub extent: Vec2,
}

/// Single-slot, last-write-wins handoff for raw pointer samples.
///
/// Listeners that cannot borrow the mascot (a DOM closure, for instance)
/// post into a clone of the mailbox; the frame loop drains it before
/// animating. Intermediate samples between two drains are dropped.
#[derive(Debug, Clone, Default)]
pub struct PointerMailbox {
    slot: Rc<Cell<Option<PointerSample>>>,
}

impl PointerMailbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a sample at `(raw_x, raw_y)` inside a `width` x `height` extent.
    pub fn post(&self, raw_x: f32, raw_y: f32, width: f32, height: f32) {
        self.slot.set(Some(PointerSample {
            position: Vec2::new(raw_x, raw_y),
            extent: Vec2::new(width, height),
        }));
    }

    /// Takes the latest sample, leaving the slot empty.
    #[must_use]
    pub fn take(&self) -> Option<PointerSample> {
        self.slot.take()
    }
}
