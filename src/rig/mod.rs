//! Procedural Wolf Rig
//!
//! Assembles the low-poly wolf head from primitive shapes into a fixed
//! hierarchy:
//!
//! ```text
//! root
//! ├── headPivot
//! │   ├── head
//! │   ├── snout
//! │   ├── noseTip
//! │   ├── leftEar
//! │   ├── rightEar
//! │   ├── leftEye
//! │   └── rightEye
//! └── neck
//! ```
//!
//! `headPivot` carries no mesh; it is the joint the animation rotates. Every
//! other part is a static offset under its parent. Each part gets its own
//! geometry and material, so removing or editing one never affects another.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::resources::primitives::{
    create_cone, create_cylinder, create_dodecahedron, create_sphere, ConeOptions, CylinderOptions,
    SphereOptions,
};
use crate::resources::{Geometry, MaterialParams};
use crate::scene::{NodeHandle, Scene};

pub const ROOT: &str = "root";
pub const HEAD_PIVOT: &str = "headPivot";
pub const HEAD: &str = "head";
pub const SNOUT: &str = "snout";
pub const NOSE_TIP: &str = "noseTip";
pub const LEFT_EAR: &str = "leftEar";
pub const RIGHT_EAR: &str = "rightEar";
pub const LEFT_EYE: &str = "leftEye";
pub const RIGHT_EYE: &str = "rightEye";
pub const NECK: &str = "neck";

/// Cone dimensions (`radius`, `height`, `segments`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeParams {
    pub radius: f32,
    pub height: f32,
    pub segments: u32,
}

/// Truncated cone used for the neck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeckParams {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub segments: u32,
}

/// Shape, placement and material parameters of the wolf.
///
/// Left-side placements are given; the right side mirrors them across the
/// YZ plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WolfParams {
    pub head_radius: f32,
    /// Non-uniform scale baked into the head geometry.
    pub head_stretch: Vec3,

    pub snout: ConeParams,
    pub snout_position: Vec3,

    pub nose_radius: f32,
    pub nose_position: Vec3,

    pub ear: ConeParams,
    pub ear_position: Vec3,
    /// Euler angles (XYZ) of the left ear.
    pub ear_rotation: Vec3,

    pub eye_radius: f32,
    pub eye_segments: u32,
    pub eye_position: Vec3,
    /// Node scale of each eye (the squint).
    pub eye_scale: Vec3,

    pub neck: NeckParams,
    pub neck_position: Vec3,

    pub fur: MaterialParams,
    pub white_fur: MaterialParams,
    pub eye_glow: MaterialParams,
    pub nose: MaterialParams,
}

impl Default for WolfParams {
    fn default() -> Self {
        Self {
            head_radius: 1.2,
            head_stretch: Vec3::new(0.9, 1.0, 1.1),

            snout: ConeParams {
                radius: 0.5,
                height: 1.2,
                segments: 4,
            },
            snout_position: Vec3::new(0.0, -0.2, 1.1),

            nose_radius: 0.2,
            nose_position: Vec3::new(0.0, -0.2, 1.7),

            ear: ConeParams {
                radius: 0.4,
                height: 0.8,
                segments: 4,
            },
            ear_position: Vec3::new(0.6, 1.0, -0.2),
            ear_rotation: Vec3::new(-0.2, 0.0, -0.3),

            eye_radius: 0.25,
            eye_segments: 16,
            eye_position: Vec3::new(0.4, 0.3, 0.8),
            eye_scale: Vec3::new(1.0, 0.6, 1.0),

            neck: NeckParams {
                radius_top: 0.5,
                radius_bottom: 0.8,
                height: 1.0,
                segments: 6,
            },
            neck_position: Vec3::new(0.0, -1.2, 0.0),

            fur: MaterialParams {
                color: 0x333333,
                roughness: 0.7,
                flat_shading: true,
                ..MaterialParams::default()
            },
            white_fur: MaterialParams {
                color: 0xeeeeee,
                roughness: 0.9,
                flat_shading: true,
                ..MaterialParams::default()
            },
            eye_glow: MaterialParams {
                color: 0xff5722,
                roughness: 0.2,
                emissive: 0xaa2200,
                emissive_intensity: 0.2,
                flat_shading: false,
            },
            nose: MaterialParams {
                color: 0x111111,
                ..MaterialParams::default()
            },
        }
    }
}

/// Handles of every named node of a built wolf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WolfRig {
    pub root: NodeHandle,
    pub head_pivot: NodeHandle,
    pub head: NodeHandle,
    pub snout: NodeHandle,
    pub nose_tip: NodeHandle,
    pub left_ear: NodeHandle,
    pub right_ear: NodeHandle,
    pub left_eye: NodeHandle,
    pub right_eye: NodeHandle,
    pub neck: NodeHandle,
}

impl WolfRig {
    /// Looks up a part by its node name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<NodeHandle> {
        self.parts()
            .into_iter()
            .find_map(|(part, handle)| (part == name).then_some(handle))
    }

    /// All parts as `(name, handle)` pairs, parents first.
    #[must_use]
    pub fn parts(&self) -> [(&'static str, NodeHandle); 10] {
        [
            (ROOT, self.root),
            (HEAD_PIVOT, self.head_pivot),
            (HEAD, self.head),
            (SNOUT, self.snout),
            (NOSE_TIP, self.nose_tip),
            (LEFT_EAR, self.left_ear),
            (RIGHT_EAR, self.right_ear),
            (LEFT_EYE, self.left_eye),
            (RIGHT_EYE, self.right_eye),
            (NECK, self.neck),
        ]
    }
}

/// Builds the wolf into `scene` under a new root node.
///
/// The result is fully parented and positioned but world matrices are only
/// valid after the next [`Scene::update_matrix_world`].
pub fn build_wolf(scene: &mut Scene, params: &WolfParams) -> WolfRig {
    let root = scene.create_node(ROOT);
    let head_pivot = scene.build_node(HEAD_PIVOT).with_parent(root).build();

    // Head
    let mut head_geo = create_dodecahedron(params.head_radius);
    head_geo.scale(params.head_stretch.x, params.head_stretch.y, params.head_stretch.z);
    let head_mesh = add_part_mesh(scene, HEAD, head_geo, &params.fur);
    let head = scene.build_node(HEAD).with_parent(head_pivot).with_mesh(head_mesh).build();

    // Snout: the cone points up +Y, tilt it forward to +Z
    let mut snout_geo = create_cone(&ConeOptions {
        radius: params.snout.radius,
        height: params.snout.height,
        radial_segments: params.snout.segments,
    });
    snout_geo.rotate_x(FRAC_PI_2);
    let snout_mesh = add_part_mesh(scene, SNOUT, snout_geo, &params.white_fur);
    let snout = scene
        .build_node(SNOUT)
        .with_parent(head_pivot)
        .with_position(params.snout_position)
        .with_mesh(snout_mesh)
        .build();

    let nose_mesh = add_part_mesh(scene, NOSE_TIP, create_dodecahedron(params.nose_radius), &params.nose);
    let nose_tip = scene
        .build_node(NOSE_TIP)
        .with_parent(head_pivot)
        .with_position(params.nose_position)
        .with_mesh(nose_mesh)
        .build();

    // Ears
    let ear_options = ConeOptions {
        radius: params.ear.radius,
        height: params.ear.height,
        radial_segments: params.ear.segments,
    };
    let left_ear_mesh = add_part_mesh(scene, LEFT_EAR, create_cone(&ear_options), &params.fur);
    let left_ear = scene
        .build_node(LEFT_EAR)
        .with_parent(head_pivot)
        .with_position(params.ear_position)
        .with_rotation_euler(params.ear_rotation)
        .with_mesh(left_ear_mesh)
        .build();

    let right_ear_mesh = add_part_mesh(scene, RIGHT_EAR, create_cone(&ear_options), &params.fur);
    let right_ear = scene
        .build_node(RIGHT_EAR)
        .with_parent(head_pivot)
        .with_position(mirror_position(params.ear_position))
        .with_rotation_euler(mirror_rotation(params.ear_rotation))
        .with_mesh(right_ear_mesh)
        .build();

    // Eyes
    let eye_options = SphereOptions {
        radius: params.eye_radius,
        width_segments: params.eye_segments,
        height_segments: params.eye_segments,
    };
    let left_eye_mesh = add_part_mesh(scene, LEFT_EYE, create_sphere(&eye_options), &params.eye_glow);
    let left_eye = scene
        .build_node(LEFT_EYE)
        .with_parent(head_pivot)
        .with_position(params.eye_position)
        .with_scale(params.eye_scale)
        .with_mesh(left_eye_mesh)
        .build();

    let right_eye_mesh = add_part_mesh(scene, RIGHT_EYE, create_sphere(&eye_options), &params.eye_glow);
    let right_eye = scene
        .build_node(RIGHT_EYE)
        .with_parent(head_pivot)
        .with_position(mirror_position(params.eye_position))
        .with_scale(params.eye_scale)
        .with_mesh(right_eye_mesh)
        .build();

    // Neck hangs off the root so it does not inherit the head rotation
    let neck_geo = create_cylinder(&CylinderOptions {
        radius_top: params.neck.radius_top,
        radius_bottom: params.neck.radius_bottom,
        height: params.neck.height,
        radial_segments: params.neck.segments,
        ..CylinderOptions::default()
    });
    let neck_mesh = add_part_mesh(scene, NECK, neck_geo, &params.fur);
    let neck = scene
        .build_node(NECK)
        .with_parent(root)
        .with_position(params.neck_position)
        .with_mesh(neck_mesh)
        .build();

    log::debug!("Wolf rig built: {} meshes", scene.meshes.len());

    WolfRig {
        root,
        head_pivot,
        head,
        snout,
        nose_tip,
        left_ear,
        right_ear,
        left_eye,
        right_eye,
        neck,
    }
}

fn add_part_mesh(
    scene: &mut Scene,
    name: &'static str,
    geometry: Geometry,
    material: &MaterialParams,
) -> crate::scene::MeshKey {
    let geometry = if material.flat_shading {
        geometry.to_flat_shaded()
    } else {
        geometry
    };
    scene.add_mesh(name, geometry, material.to_material(name))
}

#[inline]
fn mirror_position(p: Vec3) -> Vec3 {
    Vec3::new(-p.x, p.y, p.z)
}

// Mirroring across YZ keeps the X rotation and flips Y and Z.
#[inline]
fn mirror_rotation(r: Vec3) -> Vec3 {
    Vec3::new(r.x, -r.y, -r.z)
}
