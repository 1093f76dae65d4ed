//! Renderer Settings
//!
//! Consumed once when the GPU context is created.

/// Configuration for [`WgpuRenderer`](crate::renderer::WgpuRenderer) initialization.
///
/// | Field              | Description                         | Default            |
/// |--------------------|-------------------------------------|--------------------|
/// | `vsync`            | Vertical sync enabled               | `true`             |
/// | `power_preference` | GPU adapter selection strategy      | `LowPower`         |
/// | `clear_color`      | Framebuffer clear color             | Transparent black  |
/// | `depth_format`     | Depth buffer texture format         | `Depth32Float`     |
/// | `msaa_samples`     | Samples per pixel, 1 disables MSAA  | `4`                |
///
/// A clear color with alpha below 1 asks the surface for a premultiplied
/// alpha mode so the page behind the canvas shows through. A sample count
/// the adapter cannot do for the surface format falls back to 1.
#[derive(Debug, Clone)]
pub struct RendererSettings {
    pub vsync: bool,
    pub power_preference: wgpu::PowerPreference,
    pub clear_color: wgpu::Color,
    pub depth_format: wgpu::TextureFormat,
    pub msaa_samples: u32,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            power_preference: wgpu::PowerPreference::LowPower,
            clear_color: wgpu::Color::TRANSPARENT,
            depth_format: wgpu::TextureFormat::Depth32Float,
            msaa_samples: 4,
        }
    }
}

impl RendererSettings {
    /// Whether the surface should be composited with transparency.
    #[inline]
    #[must_use]
    pub fn wants_transparency(&self) -> bool {
        self.clear_color.a < 1.0
    }

    /// Requested sample count, with 0 treated as 1.
    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> u32 {
        self.msaa_samples.max(1)
    }

    /// Whether frames go through a multisampled target and get resolved.
    #[inline]
    #[must_use]
    pub fn is_multisampled(&self) -> bool {
        self.sample_count() > 1
    }
}
