//! Rendering Backends
//!
//! The mascot talks to its renderer only through [`RenderBackend`]:
//!
//! - [`WgpuRenderer`]: forward renderer over wgpu (WebGPU/WebGL on the web,
//!   native backends elsewhere)
//! - [`NullBackend`]: draws nothing; for headless hosts and tests

pub mod core;
pub mod forward;
pub mod settings;
pub mod uniforms;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

use crate::errors::{HowlError, Result};
use crate::scene::{Camera, Scene};

pub use self::core::WgpuContext;
pub use forward::ForwardPass;
pub use settings::RendererSettings;

/// Draws a scene through a camera onto some surface.
pub trait RenderBackend {
    /// Renders one frame.
    ///
    /// World matrices must already be up to date. Errors are per-frame; the
    /// caller may skip the frame and keep going.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()>;

    /// Resizes the output surface to exactly `width` x `height` pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Current output size in pixels.
    fn size(&self) -> (u32, u32);
}

// ============================================================================
// Null backend
// ============================================================================

/// Backend that only records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct NullBackend {
    width: u32,
    height: u32,
    /// Number of `render` calls so far.
    pub frames: u64,
    /// Visible mesh count seen by the last `render` call.
    pub last_mesh_count: usize,
}

impl NullBackend {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl RenderBackend for NullBackend {
    fn render(&mut self, scene: &Scene, _camera: &Camera) -> Result<()> {
        self.frames += 1;
        self.last_mesh_count = scene.visible_meshes().len();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// ============================================================================
// wgpu backend
// ============================================================================

struct GpuState {
    ctx: WgpuContext,
    forward: ForwardPass,
}

impl GpuState {
    async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        settings: &RendererSettings,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let ctx = WgpuContext::new(target, settings, width, height).await?;
        let forward = ForwardPass::new(&ctx.device, ctx.view_format, ctx.depth_format, ctx.sample_count);
        Ok(Self { ctx, forward })
    }
}

/// Forward renderer over wgpu.
///
/// On native targets the GPU is initialized synchronously in
/// [`new`](Self::new). On the web adapter and device requests are async, so
/// [`new_deferred`](Self::new_deferred) spawns the initialization and frames
/// are skipped until it completes.
pub struct WgpuRenderer {
    gpu: Option<GpuState>,
    #[cfg(target_arch = "wasm32")]
    pending: Rc<RefCell<Option<GpuState>>>,
    size: (u32, u32),
}

impl WgpuRenderer {
    /// Creates the renderer, blocking on GPU initialization.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        settings: &RendererSettings,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let gpu = pollster::block_on(GpuState::new(target, settings, width, height))?;
        log::info!("WGPU renderer ready ({width}x{height})");
        Ok(Self {
            gpu: Some(gpu),
            size: (width, height),
        })
    }

    /// Creates the renderer and initializes the GPU in the background.
    #[cfg(target_arch = "wasm32")]
    pub fn new_deferred(
        target: impl Into<wgpu::SurfaceTarget<'static>> + 'static,
        settings: &RendererSettings,
        width: u32,
        height: u32,
    ) -> Self {
        let pending = Rc::new(RefCell::new(None));
        let slot = pending.clone();
        let settings = settings.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match GpuState::new(target, &settings, width, height).await {
                Ok(gpu) => {
                    log::info!("WGPU renderer ready ({width}x{height})");
                    *slot.borrow_mut() = Some(gpu);
                }
                Err(e) => log::error!("Failed to initialize WGPU renderer: {e}"),
            }
        });

        Self {
            gpu: None,
            pending,
            size: (width, height),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn poll_ready(&mut self) {
        if self.gpu.is_some() {
            return;
        }
        let Some(mut gpu) = self.pending.borrow_mut().take() else {
            return;
        };
        // The host may have resized while the device was being created
        if gpu.ctx.size() != self.size {
            gpu.ctx.resize(self.size.0, self.size.1);
        }
        self.gpu = Some(gpu);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn poll_ready(&mut self) {}
}

/// What to do with a frame for which the surface handed out no texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SurfaceRecovery {
    Reconfigure,
    SkipFrame,
}

fn recovery_for(status: &wgpu::CurrentSurfaceTexture) -> Result<SurfaceRecovery> {
    use wgpu::CurrentSurfaceTexture as Status;

    match status {
        Status::Outdated | Status::Lost => Ok(SurfaceRecovery::Reconfigure),
        Status::Timeout | Status::Occluded => Ok(SurfaceRecovery::SkipFrame),
        Status::Validation => Err(HowlError::SurfaceAcquireFailed("validation error")),
        // Handled by the caller; nothing to recover from
        Status::Success(_) | Status::Suboptimal(_) => Ok(SurfaceRecovery::SkipFrame),
    }
}

impl RenderBackend for WgpuRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()> {
        self.poll_ready();
        let Some(gpu) = self.gpu.as_mut() else {
            return Ok(());
        };

        gpu.forward.prepare(&gpu.ctx.device, &gpu.ctx.queue, scene, camera);

        let (output, suboptimal) = match gpu.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output) => (output, false),
            wgpu::CurrentSurfaceTexture::Suboptimal(output) => (output, true),
            status => {
                if recovery_for(&status)? == SurfaceRecovery::Reconfigure {
                    gpu.ctx.reconfigure();
                }
                return Ok(());
            }
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(gpu.ctx.view_format),
            ..Default::default()
        });

        let mut encoder = gpu
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Frame Encoder") });

        gpu.forward.run(
            &mut encoder,
            &view,
            gpu.ctx.msaa_view(),
            gpu.ctx.depth_view(),
            gpu.ctx.clear_color,
        );

        gpu.ctx.queue.submit(Some(encoder.finish()));
        output.present();

        if suboptimal {
            gpu.ctx.reconfigure();
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.ctx.resize(width, height);
        }
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}
