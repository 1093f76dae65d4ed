//! Utility Module
//!
//! - [`time`]: frame clock used by the mascot loop

pub mod time;
