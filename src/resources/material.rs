use std::borrow::Cow;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Converts a `0xRRGGBB` sRGB color into linear RGB.
#[must_use]
pub fn color_from_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.040_45 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Lit surface description used by the forward renderer.
///
/// Colors are linear RGB. `flat_shading` makes the renderer derive one
/// normal per triangle instead of interpolating vertex normals.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Cow<'static, str>,
    pub color: Vec3,
    pub roughness: f32,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub flat_shading: bool,
}

impl Material {
    #[must_use]
    pub fn new(color: Vec3) -> Self {
        Self {
            name: Cow::Borrowed("Material"),
            color,
            roughness: 1.0,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            flat_shading: false,
        }
    }

    #[must_use]
    pub fn builder() -> MaterialBuilder {
        MaterialBuilder::new()
    }

    /// Emitted radiance (`emissive * emissive_intensity`).
    #[inline]
    #[must_use]
    pub fn emission(&self) -> Vec3 {
        self.emissive * self.emissive_intensity
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}

pub struct MaterialBuilder {
    material: Material,
}

impl Default for MaterialBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { material: Material::default() }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self { self.material.name = name.into(); self }
    #[must_use]
    pub fn color(mut self, color: Vec3) -> Self { self.material.color = color; self }
    #[must_use]
    pub fn roughness(mut self, roughness: f32) -> Self { self.material.roughness = roughness; self }
    #[must_use]
    pub fn emissive(mut self, emissive: Vec3) -> Self { self.material.emissive = emissive; self }
    #[must_use]
    pub fn emissive_intensity(mut self, intensity: f32) -> Self { self.material.emissive_intensity = intensity; self }
    #[must_use]
    pub fn flat_shading(mut self, enabled: bool) -> Self { self.material.flat_shading = enabled; self }

    #[must_use]
    pub fn build(self) -> Material {
        self.material
    }
}

/// Serializable material parameters (`0xRRGGBB` sRGB colors).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    pub color: u32,
    pub roughness: f32,
    pub emissive: u32,
    pub emissive_intensity: f32,
    pub flat_shading: bool,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            color: 0xffffff,
            roughness: 1.0,
            emissive: 0x000000,
            emissive_intensity: 1.0,
            flat_shading: false,
        }
    }
}

impl MaterialParams {
    #[must_use]
    pub fn to_material(&self, name: impl Into<Cow<'static, str>>) -> Material {
        Material::builder()
            .name(name)
            .color(color_from_hex(self.color))
            .roughness(self.roughness)
            .emissive(color_from_hex(self.emissive))
            .emissive_intensity(self.emissive_intensity)
            .flat_shading(self.flat_shading)
            .build()
    }
}
