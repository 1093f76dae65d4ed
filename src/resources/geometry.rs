use glam::{Affine3A, Mat3, Quat, Vec3};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// CPU-side triangle mesh data.
///
/// Positions and normals are stored planar (one array per attribute) and
/// indexed by a `u32` triangle list with counter-clockwise front faces. The
/// bounding volumes are kept in sync by every mutating method.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,

    bounding_box: BoundingBox,
    bounding_sphere: BoundingSphere,
}

impl Geometry {
    /// Builds a geometry from planar attributes.
    ///
    /// `positions` and `normals` must have the same length; every index must
    /// address a vertex.
    #[must_use]
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert!(indices.iter().all(|&i| (i as usize) < positions.len()));

        let mut geo = Self {
            positions,
            normals,
            indices,
            bounding_box: BoundingBox::default(),
            bounding_sphere: BoundingSphere::default(),
        };
        geo.compute_bounding_volume();
        geo
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    #[must_use]
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    #[must_use]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    #[inline]
    #[must_use]
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    // ========================================================================
    // In-place transforms (baked into the vertex data)
    // ========================================================================

    /// Applies an affine transform to every vertex.
    ///
    /// Normals are transformed by the inverse-transpose and renormalized, so
    /// non-uniform scales keep them perpendicular to the surface.
    pub fn apply_matrix(&mut self, matrix: &Affine3A) -> &mut Self {
        let normal_matrix = Mat3::from(matrix.matrix3).inverse().transpose();

        for p in &mut self.positions {
            *p = matrix.transform_point3(Vec3::from_array(*p)).to_array();
        }
        for n in &mut self.normals {
            *n = (normal_matrix * Vec3::from_array(*n))
                .normalize_or_zero()
                .to_array();
        }

        self.compute_bounding_volume();
        self
    }

    /// Scales the vertex data non-uniformly.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.apply_matrix(&Affine3A::from_scale(Vec3::new(x, y, z)))
    }

    /// Rotates the vertex data about the X axis by `angle` radians.
    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.apply_matrix(&Affine3A::from_quat(Quat::from_rotation_x(angle)))
    }

    /// Unshares every vertex so each triangle carries its own face normal.
    ///
    /// Used for the faceted low-poly look: interpolation across a triangle
    /// then yields a constant normal.
    #[must_use]
    pub fn to_flat_shaded(&self) -> Geometry {
        let mut positions = Vec::with_capacity(self.indices.len());
        let mut normals = Vec::with_capacity(self.indices.len());

        for tri in self.indices.chunks_exact(3) {
            let a = Vec3::from_array(self.positions[tri[0] as usize]);
            let b = Vec3::from_array(self.positions[tri[1] as usize]);
            let c = Vec3::from_array(self.positions[tri[2] as usize]);
            let n = (b - a).cross(c - a).normalize_or_zero().to_array();

            positions.extend([a.to_array(), b.to_array(), c.to_array()]);
            normals.extend([n, n, n]);
        }

        let indices = (0..positions.len() as u32).collect();
        Geometry::new(positions, normals, indices)
    }

    pub fn compute_bounding_volume(&mut self) {
        if self.positions.is_empty() {
            self.bounding_box = BoundingBox::default();
            self.bounding_sphere = BoundingSphere::default();
            return;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            let v = Vec3::from_array(*p);
            min = min.min(v);
            max = max.max(v);
        }
        self.bounding_box = BoundingBox { min, max };

        // Sphere centered on the box; radius reaches the farthest vertex.
        let center = self.bounding_box.center();
        let radius_sq = self
            .positions
            .iter()
            .map(|p| center.distance_squared(Vec3::from_array(*p)))
            .fold(0.0_f32, f32::max);

        self.bounding_sphere = BoundingSphere {
            center,
            radius: radius_sq.sqrt(),
        };
    }
}
