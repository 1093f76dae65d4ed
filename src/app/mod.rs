//! Mascot Lifecycle
//!
//! [`Mascot`] is the single state object of a running mascot: the scene with
//! the wolf rig, the camera, pointer tracking, the animation driver, the
//! viewport manager and the render backend. Hosts own it and pass it by
//! `&mut` into their pointer, resize and frame callbacks; nothing here is
//! global.
//!
//! Hosts plug in through two traits:
//!
//! - [`Host`]: container lookup, backend creation and listener registration
//! - [`FrameScheduler`]: requests the next frame (e.g. `requestAnimationFrame`)
//!
//! ```rust,ignore
//! let Some(mut mascot) = Mascot::mount(&mut host, &MascotSettings::default())? else {
//!     return Ok(()); // no container on this page
//! };
//! mascot.on_pointer_move(640.0, 360.0);
//! mascot.frame(&mut scheduler);
//! ```

#[cfg(feature = "winit")]
pub mod winit;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec3;

use crate::animation::{AnimationDriver, AnimationState};
use crate::config::MascotSettings;
use crate::errors::Result;
use crate::input::{PointerMailbox, PointerSignal, PointerTracker};
use crate::renderer::{RenderBackend, RendererSettings};
use crate::resources::color_from_hex;
use crate::rig::{build_wolf, WolfRig};
use crate::scene::{Camera, Light, NodeHandle, Scene};
use crate::utils::time::Timer;
use crate::viewport::{ViewportConfig, ViewportManager};

/// Requests that the host call [`Mascot::frame`] again.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// The environment a mascot is mounted into.
pub trait Host {
    /// Whatever the host renders into (a DOM element, a window).
    type Container;

    /// Looks up the container by id. `Ok(None)` means the mascot is not
    /// wanted here; `Err` means a container exists (or must exist, as a
    /// native window does) but could not be prepared.
    fn find_container(&mut self, id: &str) -> Result<Option<Self::Container>>;

    /// Container size in pixels.
    fn container_size(&self, container: &Self::Container) -> (u32, u32);

    /// Creates the render surface inside the container.
    fn create_backend(
        &mut self,
        container: &Self::Container,
        settings: &RendererSettings,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn RenderBackend>>;

    /// Hooks pointer and resize events up. Listeners that cannot reach the
    /// mascot directly post pointer samples into `mailbox`.
    fn register_listeners(&mut self, container: &Self::Container, mailbox: &PointerMailbox);
}

/// Cancellation token of the frame loop.
///
/// Clones share the same flag; once cancelled, [`Mascot::frame`] stops
/// rendering and stops requesting frames.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    cancelled: Arc<AtomicBool>,
}

impl LoopHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A mounted, running wolf mascot.
pub struct Mascot {
    scene: Scene,
    rig: WolfRig,
    camera_node: NodeHandle,

    pointer: PointerTracker,
    mailbox: PointerMailbox,
    driver: AnimationDriver,
    viewport: ViewportManager,
    backend: Box<dyn RenderBackend>,

    timer: Timer,
    handle: LoopHandle,
}

impl Mascot {
    /// Mounts the mascot into `host`.
    ///
    /// Returns `Ok(None)` without creating anything when the container
    /// named by `settings.container_id` does not exist. A container or
    /// backend that cannot be created is a fatal `Err`.
    pub fn mount<H: Host>(host: &mut H, settings: &MascotSettings) -> Result<Option<Self>> {
        let Some(container) = host.find_container(&settings.container_id)? else {
            log::info!("Container '{}' not found, mascot not mounted", settings.container_id);
            return Ok(None);
        };

        let (width, height) = host.container_size(&container);
        let backend = host.create_backend(&container, &settings.renderer_settings(), width, height)?;

        let mascot = Self::new(settings, backend, width, height);
        host.register_listeners(&container, &mascot.mailbox);

        log::info!("Wolf 3D system online");
        Ok(Some(mascot))
    }

    /// Builds the scene around an existing backend of size `width` x `height`.
    #[must_use]
    pub fn new(settings: &MascotSettings, backend: Box<dyn RenderBackend>, width: u32, height: u32) -> Self {
        let mut scene = Scene::new();

        // Camera
        let cam = &settings.camera;
        let aspect = ViewportConfig::new(width, height).aspect().unwrap_or(1.0);
        let camera_node = scene.add_camera(Camera::new_perspective(cam.fov, aspect, cam.near, cam.far));
        if let Some(node) = scene.get_node_mut(camera_node) {
            node.transform.position = cam.position;
        }
        scene.active_camera = Some(camera_node);

        // Lights
        let lights = &settings.lights;
        scene.add_light(
            "ambientLight",
            Light::new_ambient(color_from_hex(lights.ambient.color), lights.ambient.intensity),
            Vec3::ZERO,
        );
        scene.add_light(
            "keyLight",
            Light::new_directional(color_from_hex(lights.key.color), lights.key.intensity),
            lights.key.position,
        );
        scene.add_light(
            "rimLight",
            Light::new_directional(color_from_hex(lights.rim.color), lights.rim.intensity),
            lights.rim.position,
        );

        let rig = build_wolf(&mut scene, &settings.wolf);
        scene.update_matrix_world();

        Self {
            scene,
            rig,
            camera_node,
            pointer: PointerTracker::new(width as f32, height as f32, settings.pointer_mode),
            mailbox: PointerMailbox::new(),
            driver: AnimationDriver::new(settings.animation),
            viewport: ViewportManager::new(ViewportConfig::new(width, height)),
            backend,
            timer: Timer::new(),
            handle: LoopHandle::new(),
        }
    }

    /// Replaces the frame clock, e.g. with [`Timer::fixed`].
    #[must_use]
    pub fn with_timer(mut self, timer: Timer) -> Self {
        self.timer = timer;
        self
    }

    /// Shares an externally created cancellation token.
    #[must_use]
    pub fn with_handle(mut self, handle: LoopHandle) -> Self {
        self.handle = handle;
        self
    }

    // ========================================================================
    // Host callbacks
    // ========================================================================

    /// Pointer moved to `(x, y)` pixels within the current viewport.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> PointerSignal {
        self.pointer.on_pointer_move(x, y)
    }

    /// Container resized to `width` x `height` pixels.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let Some(camera) = self.scene.main_camera_mut() else {
            return;
        };
        if self.viewport.apply(width, height, camera, self.backend.as_mut()) {
            self.pointer.set_extent(width as f32, height as f32);
        }
    }

    /// Runs one tick of the loop and schedules the next one.
    ///
    /// Does nothing once the [`LoopHandle`] is cancelled.
    pub fn frame(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.handle.is_cancelled() {
            return;
        }

        self.timer.tick();
        self.step(self.timer.elapsed_seconds(), self.timer.dt_seconds());

        if !self.handle.is_cancelled() {
            scheduler.request_frame();
        }
    }

    /// Animates to `elapsed` seconds (with a step of `dt`) and renders.
    pub fn step(&mut self, elapsed: f32, dt: f32) {
        if let Some(sample) = self.mailbox.take() {
            self.pointer.on_sample(sample);
        }

        self.driver
            .update(self.pointer.signal(), elapsed, dt, &mut self.scene, &self.rig);
        self.scene.update_matrix_world();

        let Some(camera) = self.scene.main_camera() else {
            log::warn!("No active camera, frame skipped");
            return;
        };
        if let Err(e) = self.backend.render(&self.scene, camera) {
            log::error!("Render error: {e}");
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Mailbox for out-of-band pointer listeners.
    #[must_use]
    pub fn mailbox(&self) -> &PointerMailbox {
        &self.mailbox
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn rig(&self) -> &WolfRig {
        &self.rig
    }

    #[must_use]
    pub fn camera(&self) -> Option<&Camera> {
        self.scene.main_camera()
    }

    #[must_use]
    pub fn camera_node(&self) -> NodeHandle {
        self.camera_node
    }

    #[must_use]
    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    #[must_use]
    pub fn animation(&self) -> &AnimationState {
        self.driver.state()
    }

    #[must_use]
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportConfig {
        self.viewport.current()
    }

    #[must_use]
    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }
}
