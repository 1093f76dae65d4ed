use crate::resources::geometry::Geometry;

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 1.0 / PHI;

// Corners of a cube, then the three golden rectangles
#[rustfmt::skip]
const DODECAHEDRON_VERTICES: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
    [0.0, -INV_PHI, -PHI], [0.0, -INV_PHI, PHI], [0.0, INV_PHI, -PHI], [0.0, INV_PHI, PHI],
    [-INV_PHI, -PHI, 0.0], [-INV_PHI, PHI, 0.0], [INV_PHI, -PHI, 0.0], [INV_PHI, PHI, 0.0],
    [-PHI, 0.0, -INV_PHI], [PHI, 0.0, -INV_PHI], [-PHI, 0.0, INV_PHI], [PHI, 0.0, INV_PHI],
];

// 12 pentagons, 3 triangles each, counter-clockwise seen from outside
#[rustfmt::skip]
const DODECAHEDRON_INDICES: [u32; 108] = [
    3, 11, 7, 3, 7, 15, 3, 15, 13,
    7, 19, 17, 7, 17, 6, 7, 6, 15,
    17, 4, 8, 17, 8, 10, 17, 10, 6,
    8, 0, 16, 8, 16, 2, 8, 2, 10,
    0, 12, 1, 0, 1, 18, 0, 18, 16,
    6, 10, 2, 6, 2, 13, 6, 13, 15,
    2, 16, 18, 2, 18, 3, 2, 3, 13,
    18, 1, 9, 18, 9, 11, 18, 11, 3,
    4, 14, 12, 4, 12, 0, 4, 0, 8,
    11, 9, 5, 11, 5, 19, 11, 19, 7,
    19, 5, 14, 19, 14, 4, 19, 4, 17,
    1, 12, 14, 1, 14, 5, 1, 5, 9,
];

/// Regular dodecahedron inscribed in a sphere of `radius`.
///
/// Only the base solid (no subdivision) is generated. Normals point radially;
/// the faceted look comes from flat-shaded materials.
#[must_use]
pub fn create_dodecahedron(radius: f32) -> Geometry {
    let mut positions = Vec::with_capacity(DODECAHEDRON_VERTICES.len());
    let mut normals = Vec::with_capacity(DODECAHEDRON_VERTICES.len());

    for v in DODECAHEDRON_VERTICES {
        let n = glam::Vec3::from_array(v).normalize();
        positions.push((n * radius).to_array());
        normals.push(n.to_array());
    }

    Geometry::new(positions, normals, DODECAHEDRON_INDICES.to_vec())
}
