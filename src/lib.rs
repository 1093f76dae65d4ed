#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Howl: a procedurally built low-poly wolf head that follows the pointer.
//!
//! The crate is split into a pure core and its collaborators:
//!
//! - [`rig`] assembles the wolf hierarchy from primitive shapes
//! - [`input`], [`animation`] and [`viewport`] turn pointer and resize
//!   events into transform updates
//! - [`scene`] and [`resources`] hold the transform hierarchy and mesh data
//! - [`renderer`] draws the scene; [`app`] ties everything into a
//!   [`Mascot`](app::Mascot) mounted into a host

pub mod animation;
pub mod app;
pub mod config;
pub mod errors;
pub mod input;
pub mod renderer;
pub mod resources;
pub mod rig;
pub mod scene;
pub mod utils;
pub mod viewport;

#[cfg(all(target_arch = "wasm32", feature = "winit"))]
pub mod web;

pub use animation::{AnimationDriver, AnimationParams, AnimationState, Smoothing};
pub use app::{FrameScheduler, Host, LoopHandle, Mascot};
pub use config::MascotSettings;
pub use errors::{HowlError, Result};
pub use input::{PointerMailbox, PointerMode, PointerSignal, PointerTracker};
pub use renderer::{NullBackend, RenderBackend, RendererSettings, WgpuRenderer};
pub use resources::{Geometry, Material, Mesh};
pub use rig::{build_wolf, WolfParams, WolfRig};
pub use scene::{Camera, Light, Node, NodeHandle, Scene};
pub use viewport::{ViewportConfig, ViewportManager};

/// Installs the platform logger: `env_logger` on native targets (honours
/// `RUST_LOG`), the browser console on the web. Safe to call more than once.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
