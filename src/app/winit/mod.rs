//! Winit Runner
//!
//! Hosts a [`Mascot`] on top of a winit event loop. On native targets the
//! mascot lives in its own window; on the web it mounts into the page
//! element named by [`MascotSettings::container_id`] and does nothing when
//! that element is absent.
//!
//! # Example
//!
//! ```rust,ignore
//! use howl::app::winit::App;
//! use howl::config::MascotSettings;
//!
//! fn main() -> howl::errors::Result<()> {
//!     App::new(MascotSettings::default()).run()
//! }
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
pub use winit::window::{Window, WindowId};

use crate::app::{LoopHandle, Mascot};
use crate::config::MascotSettings;
use crate::errors::{HowlError, Result};

mod host;
pub mod input_adapter;

use self::host::{RedrawScheduler, WinitHost};

/// Launches the mascot on a winit event loop.
pub struct App {
    settings: MascotSettings,
    handle: LoopHandle,
}

impl App {
    #[must_use]
    pub fn new(settings: MascotSettings) -> Self {
        Self {
            settings,
            handle: LoopHandle::new(),
        }
    }

    /// Token that stops the frame loop and the event loop once cancelled.
    #[must_use]
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Runs until the window is closed or the handle is cancelled.
    ///
    /// A window or renderer that cannot be created ends the loop and is
    /// returned as the error.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut runner = AppRunner::new(self.settings, self.handle);
        event_loop.run_app(&mut runner)?;

        match runner.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Starts the event loop and returns immediately; frames are driven by
    /// the browser.
    #[cfg(target_arch = "wasm32")]
    pub fn run(self) -> Result<()> {
        use winit::platform::web::EventLoopExtWebSys;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        event_loop.spawn_app(AppRunner::new(self.settings, self.handle));
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(MascotSettings::default())
    }
}

struct AppRunner {
    settings: MascotSettings,
    handle: LoopHandle,

    window: Option<Arc<Window>>,
    mascot: Option<Mascot>,
    mount_attempted: bool,
    /// Startup failure, reported once the event loop has exited.
    error: Option<HowlError>,
}

impl AppRunner {
    fn new(settings: MascotSettings, handle: LoopHandle) -> Self {
        Self {
            settings,
            handle,
            window: None,
            mascot: None,
            mount_attempted: false,
            error: None,
        }
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) {
        let mut host = WinitHost {
            event_loop,
            title: &self.settings.title,
            window: None,
        };

        match Mascot::mount(&mut host, &self.settings) {
            Ok(Some(mascot)) => {
                if let Some(window) = &host.window {
                    window.request_redraw();
                }
                self.window = host.window.take();
                self.mascot = Some(mascot.with_handle(self.handle.clone()));
            }
            // Nothing to drive without a container
            Ok(None) => event_loop.exit(),
            Err(e) => {
                log::error!("Fatal startup error: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for AppRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.mount_attempted {
            return;
        }
        self.mount_attempted = true;
        self.mount(event_loop);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let (Some(window), Some(mascot)) = (&self.window, &mut self.mascot) else {
            return;
        };

        if input_adapter::process_window_event(mascot, &event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.handle.cancel();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                mascot.frame(&mut RedrawScheduler(window));
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.mascot.is_some() && self.handle.is_cancelled() {
            event_loop.exit();
        }
    }
}
