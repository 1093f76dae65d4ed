use crate::resources::geometry::Geometry;
use crate::resources::primitives::cylinder::{create_cylinder, CylinderOptions};

/// Cone aligned with the Y axis, tip at `+height / 2`.
#[derive(Debug, Clone, Copy)]
pub struct ConeOptions {
    pub radius: f32,
    pub height: f32,
    pub radial_segments: u32,
}

impl Default for ConeOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 1.0,
            radial_segments: 32,
        }
    }
}

#[must_use]
pub fn create_cone(options: &ConeOptions) -> Geometry {
    create_cylinder(&CylinderOptions {
        radius_top: 0.0,
        radius_bottom: options.radius,
        height: options.height,
        radial_segments: options.radial_segments,
        height_segments: 1,
        open_ended: false,
    })
}
