//! Core GPU context.

pub mod context;

pub use context::WgpuContext;
