//! Head-look animation: idle bob, pointer-driven target and smoothing.

pub mod driver;
pub mod state;

pub use driver::AnimationDriver;
pub use state::{idle_offset, AnimationParams, AnimationState, Smoothing, DEFAULT_ALPHA, DEFAULT_RATE};
