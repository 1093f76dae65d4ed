use std::borrow::Cow;

use crate::scene::{GeometryKey, MaterialKey, NodeHandle};

/// A renderable shape: one geometry drawn with one material.
///
/// A mesh owns its geometry and material entries in the scene pools; they
/// are released together with the mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: Cow<'static, str>,

    /// Node the mesh is attached to, set by the scene on attachment.
    pub node_id: Option<NodeHandle>,

    pub geometry: GeometryKey,
    pub material: MaterialKey,

    pub visible: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryKey, material: MaterialKey) -> Self {
        Self {
            name: Cow::Borrowed("Mesh"),
            node_id: None,
            geometry,
            material,
            visible: true,
        }
    }
}
