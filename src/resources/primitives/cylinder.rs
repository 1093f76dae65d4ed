use std::f32::consts::TAU;

use crate::resources::geometry::Geometry;

/// Parameters of a (possibly truncated) cylinder aligned with the Y axis.
///
/// A radius of zero collapses that end into a point and omits its cap,
/// which is how [`create_cone`](super::create_cone) is built.
#[derive(Debug, Clone, Copy)]
pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
        }
    }
}

#[must_use]
pub fn create_cylinder(options: &CylinderOptions) -> Geometry {
    let radial_segments = options.radial_segments.max(3);
    let height_segments = options.height_segments.max(1);
    let half_height = options.height / 2.0;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // === Torso ===
    // A flat cylinder has vertical side normals
    let slope = if options.height > 0.0 {
        (options.radius_bottom - options.radius_top) / options.height
    } else {
        0.0
    };
    let mut rows: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

    for y in 0..=height_segments {
        let v = y as f32 / height_segments as f32;
        let radius = v * (options.radius_bottom - options.radius_top) + options.radius_top;

        let mut row = Vec::with_capacity(radial_segments as usize + 1);
        for x in 0..=radial_segments {
            let theta = x as f32 / radial_segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();

            row.push(positions.len() as u32);
            positions.push([radius * sin, -v * options.height + half_height, radius * cos]);

            let n = glam::Vec3::new(sin, slope, cos).normalize();
            normals.push(n.to_array());
        }
        rows.push(row);
    }

    for x in 0..radial_segments as usize {
        for y in 0..height_segments as usize {
            let a = rows[y][x];
            let b = rows[y + 1][x];
            let c = rows[y + 1][x + 1];
            let d = rows[y][x + 1];

            if options.radius_top > 0.0 || y != 0 {
                indices.extend([a, b, d]);
            }
            if options.radius_bottom > 0.0 || y != height_segments as usize - 1 {
                indices.extend([b, c, d]);
            }
        }
    }

    // === Caps ===
    if !options.open_ended {
        if options.radius_top > 0.0 {
            push_cap(&mut positions, &mut normals, &mut indices, options.radius_top, half_height, radial_segments, true);
        }
        if options.radius_bottom > 0.0 {
            push_cap(&mut positions, &mut normals, &mut indices, options.radius_bottom, half_height, radial_segments, false);
        }
    }

    Geometry::new(positions, normals, indices)
}

fn push_cap(
    positions: &mut Vec<[f32; 3]>,
    normals: &mut Vec<[f32; 3]>,
    indices: &mut Vec<u32>,
    radius: f32,
    half_height: f32,
    radial_segments: u32,
    top: bool,
) {
    let sign = if top { 1.0 } else { -1.0 };
    let y = half_height * sign;

    // One center vertex per segment
    let center_start = positions.len() as u32;
    for _ in 0..radial_segments {
        positions.push([0.0, y, 0.0]);
        normals.push([0.0, sign, 0.0]);
    }

    let ring_start = positions.len() as u32;
    for x in 0..=radial_segments {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        positions.push([radius * sin, y, radius * cos]);
        normals.push([0.0, sign, 0.0]);
    }

    for x in 0..radial_segments {
        let c = center_start + x;
        let i = ring_start + x;
        if top {
            indices.extend([i, i + 1, c]);
        } else {
            indices.extend([i + 1, i, c]);
        }
    }
}
