//! Mascot Settings
//!
//! Everything a host can tune without touching code. All fields default to
//! the reference look, so a JSON override only needs the keys it changes:
//!
//! ```rust,ignore
//! let settings = MascotSettings::from_json(r#"{ "container_id": "hero", "pointer_mode": "clamped" }"#)?;
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationParams;
use crate::errors::Result;
use crate::input::PointerMode;
use crate::renderer::RendererSettings;
use crate::rig::WolfParams;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 50.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.5, 5.0),
        }
    }
}

/// Color (`0xRRGGBB`) and intensity of a light. `position` is unused for
/// ambient lights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightParams {
    pub color: u32,
    pub intensity: f32,
    #[serde(default)]
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    pub ambient: LightParams,
    pub key: LightParams,
    /// Orange back light that outlines the silhouette.
    pub rim: LightParams,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            ambient: LightParams {
                color: 0xffffff,
                intensity: 0.6,
                position: Vec3::ZERO,
            },
            key: LightParams {
                color: 0xffffff,
                intensity: 1.0,
                position: Vec3::new(5.0, 5.0, 5.0),
            },
            rim: LightParams {
                color: 0xff5722,
                intensity: 0.8,
                position: Vec3::new(-5.0, 5.0, 0.0),
            },
        }
    }
}

/// Top-level configuration of a mascot instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MascotSettings {
    /// Id of the host element the canvas is appended to (web only).
    pub container_id: String,
    /// Window title (native only).
    pub title: String,
    pub camera: CameraSettings,
    pub lights: LightSettings,
    pub animation: AnimationParams,
    pub pointer_mode: PointerMode,
    pub wolf: WolfParams,
    /// Linear RGBA clear color. Transparent by default so the page shows
    /// through.
    pub clear_color: [f64; 4],
    pub vsync: bool,
    /// Anti-aliasing samples per pixel; 1 turns MSAA off.
    pub msaa_samples: u32,
}

impl Default for MascotSettings {
    fn default() -> Self {
        Self {
            container_id: "canvas-container".to_owned(),
            title: "Howl".to_owned(),
            camera: CameraSettings::default(),
            lights: LightSettings::default(),
            animation: AnimationParams::default(),
            pointer_mode: PointerMode::default(),
            wolf: WolfParams::default(),
            clear_color: [0.0, 0.0, 0.0, 0.0],
            vsync: true,
            msaa_samples: 4,
        }
    }
}

impl MascotSettings {
    /// Parses settings from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn renderer_settings(&self) -> RendererSettings {
        let [r, g, b, a] = self.clear_color;
        RendererSettings {
            vsync: self.vsync,
            clear_color: wgpu::Color { r, g, b, a },
            msaa_samples: self.msaa_samples,
            ..RendererSettings::default()
        }
    }
}
