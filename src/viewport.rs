//! Viewport Management
//!
//! Keeps the camera projection and the render surface in step with the host
//! container size.

use crate::renderer::RenderBackend;
use crate::scene::Camera;

/// Host container size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl ViewportConfig {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`, or `None` for a zero height.
    #[must_use]
    pub fn aspect(&self) -> Option<f32> {
        (self.height > 0).then(|| self.width as f32 / self.height as f32)
    }
}

/// Applies container resizes to the camera and the render surface.
#[derive(Debug, Clone, Default)]
pub struct ViewportManager {
    current: ViewportConfig,
}

impl ViewportManager {
    #[must_use]
    pub fn new(initial: ViewportConfig) -> Self {
        Self { current: initial }
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> ViewportConfig {
        self.current
    }

    /// Sets the camera aspect to `width / height`, rebuilds its projection
    /// and resizes the surface to exactly `(width, height)`.
    ///
    /// Idempotent. A zero height is ignored and `false` returned.
    pub fn apply(
        &mut self,
        width: u32,
        height: u32,
        camera: &mut Camera,
        surface: &mut dyn RenderBackend,
    ) -> bool {
        let config = ViewportConfig::new(width, height);
        let Some(aspect) = config.aspect() else {
            log::debug!("Ignoring resize to zero height ({width}x{height})");
            return false;
        };

        camera.set_aspect(aspect);
        surface.resize(width, height);
        self.current = config;

        log::debug!("Viewport resized to {width}x{height} (aspect {aspect:.3})");
        true
    }
}
