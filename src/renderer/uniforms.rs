//! GPU uniform layouts.
//!
//! Field order and padding mirror the structs in `shaders/flat_lit.wgsl`;
//! keep both sides in sync.

use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::resources::Material;

/// Maximum number of directional lights uploaded per frame.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Per-frame uniforms (group 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_projection: Mat4,
    /// xyz: camera world position
    pub camera_position: Vec4,
    /// rgb: summed ambient radiance
    pub ambient: Vec4,
    /// xyz: unit vector toward each light
    pub light_directions: [Vec4; MAX_DIRECTIONAL_LIGHTS],
    /// rgb: radiance of each light
    pub light_colors: [Vec4; MAX_DIRECTIONAL_LIGHTS],
    pub light_count: u32,
    pub(crate) _pad: [u32; 3],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_projection: Mat4::IDENTITY,
            camera_position: Vec4::ZERO,
            ambient: Vec4::ZERO,
            light_directions: [Vec4::ZERO; MAX_DIRECTIONAL_LIGHTS],
            light_colors: [Vec4::ZERO; MAX_DIRECTIONAL_LIGHTS],
            light_count: 0,
            _pad: [0; 3],
        }
    }
}

impl FrameUniforms {
    /// Appends a directional light. Lights past the limit are dropped.
    pub fn push_directional(&mut self, direction: Vec3, radiance: Vec3) -> bool {
        let i = self.light_count as usize;
        if i >= MAX_DIRECTIONAL_LIGHTS {
            return false;
        }
        self.light_directions[i] = direction.normalize_or_zero().extend(0.0);
        self.light_colors[i] = radiance.extend(0.0);
        self.light_count += 1;
        true
    }
}

/// Per-object uniforms (group 1).
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub world_matrix: Mat4,
    /// Inverse-transpose of the upper 3x3, padded to a `Mat4`.
    pub normal_matrix: Mat4,
    /// rgb: base color, a: 1
    pub color: Vec4,
    /// rgb: emitted radiance, a: roughness
    pub emissive_roughness: Vec4,
}

impl ObjectUniforms {
    #[must_use]
    pub fn new(world: Mat4, material: &Material) -> Self {
        let normal = Mat3::from_mat4(world).inverse().transpose();
        Self {
            world_matrix: world,
            normal_matrix: Mat4::from_mat3(normal),
            color: material.color.extend(1.0),
            emissive_roughness: material.emission().extend(material.roughness),
        }
    }
}

/// Interleaved vertex: position then normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 240);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 160);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn light_limit_is_enforced() {
        let mut u = FrameUniforms::default();
        for _ in 0..MAX_DIRECTIONAL_LIGHTS {
            assert!(u.push_directional(Vec3::Y, Vec3::ONE));
        }
        assert!(!u.push_directional(Vec3::Y, Vec3::ONE));
        assert_eq!(u.light_count as usize, MAX_DIRECTIONAL_LIGHTS);
    }
}
