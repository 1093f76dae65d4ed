//! Winit-backed [`Host`].
//!
//! Native: the container is a new top-level window, so it always exists.
//! Web: the container is the DOM element with the configured id; a canvas is
//! appended to it and wrapped in a winit window. Pointer movement is taken
//! from a document-wide listener so the head follows the cursor anywhere on
//! the page.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::app::{FrameScheduler, Host};
use crate::errors::Result;
use crate::input::PointerMailbox;
use crate::renderer::{RenderBackend, RendererSettings, WgpuRenderer};

pub(crate) struct WinitHost<'a> {
    pub(crate) event_loop: &'a ActiveEventLoop,
    pub(crate) title: &'a str,
    /// Window created by the last successful `find_container`.
    pub(crate) window: Option<Arc<Window>>,
}

impl WinitHost<'_> {
    fn open_window(&mut self, attributes: winit::window::WindowAttributes) -> Result<Arc<Window>> {
        let window = Arc::new(self.event_loop.create_window(attributes)?);
        self.window = Some(window.clone());
        Ok(window)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Host for WinitHost<'_> {
    type Container = Arc<Window>;

    fn find_container(&mut self, _id: &str) -> Result<Option<Arc<Window>>> {
        let attributes = Window::default_attributes()
            .with_title(self.title)
            .with_transparent(true)
            .with_inner_size(winit::dpi::LogicalSize::new(800.0, 600.0));

        self.open_window(attributes).map(Some)
    }

    fn container_size(&self, window: &Arc<Window>) -> (u32, u32) {
        let size = window.inner_size();
        (size.width, size.height)
    }

    fn create_backend(
        &mut self,
        window: &Arc<Window>,
        settings: &RendererSettings,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn RenderBackend>> {
        let renderer = WgpuRenderer::new(window.clone(), settings, width, height)?;
        Ok(Box::new(renderer))
    }

    fn register_listeners(&mut self, _window: &Arc<Window>, _mailbox: &PointerMailbox) {
        // Window events reach the mascot through the runner.
        log::debug!("Using window events for pointer and resize input");
    }
}

#[cfg(target_arch = "wasm32")]
impl Host for WinitHost<'_> {
    type Container = Arc<Window>;

    fn find_container(&mut self, id: &str) -> Result<Option<Arc<Window>>> {
        use wasm_bindgen::JsCast;
        use winit::platform::web::WindowAttributesExtWebSys;

        use crate::errors::HowlError;
        use crate::web::{find_element, window_and_document};

        let Some(container) = find_element(id) else {
            return Ok(None);
        };
        let (web_window, document) = window_and_document()
            .ok_or_else(|| HowlError::ContainerUnavailable("no window or document".into()))?;

        let canvas = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            .ok_or_else(|| HowlError::ContainerUnavailable("failed to create canvas element".into()))?;

        let style = canvas.style();
        style.set_property("width", "100%").ok();
        style.set_property("height", "100%").ok();
        style.set_property("display", "block").ok();

        container
            .append_child(&canvas)
            .map_err(|e| HowlError::ContainerUnavailable(format!("failed to append canvas to '{id}': {e:?}")))?;

        let dpr = web_window.device_pixel_ratio();
        canvas.set_width((f64::from(container.client_width()) * dpr) as u32);
        canvas.set_height((f64::from(container.client_height()) * dpr) as u32);

        let attributes = Window::default_attributes()
            .with_title(self.title)
            .with_transparent(true)
            .with_canvas(Some(canvas));

        self.open_window(attributes).map(Some)
    }

    fn container_size(&self, window: &Arc<Window>) -> (u32, u32) {
        let size = window.inner_size();
        (size.width, size.height)
    }

    fn create_backend(
        &mut self,
        window: &Arc<Window>,
        settings: &RendererSettings,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn RenderBackend>> {
        Ok(Box::new(WgpuRenderer::new_deferred(window.clone(), settings, width, height)))
    }

    fn register_listeners(&mut self, _window: &Arc<Window>, mailbox: &PointerMailbox) {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let Some((_, document)) = crate::web::window_and_document() else {
            return;
        };

        let mailbox = mailbox.clone();
        let on_move = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |event: web_sys::PointerEvent| {
            let (width, height) = web_sys::window()
                .map(|w| {
                    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
                    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
                    (width, height)
                })
                .unwrap_or((0.0, 0.0));
            mailbox.post(event.client_x() as f32, event.client_y() as f32, width as f32, height as f32);
        });

        if let Err(e) = document.add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref()) {
            log::error!("Failed to register pointer listener: {e:?}");
            return;
        }
        // Lives as long as the page
        on_move.forget();
    }
}

/// Schedules frames through `Window::request_redraw`.
pub(crate) struct RedrawScheduler<'a>(pub(crate) &'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}
