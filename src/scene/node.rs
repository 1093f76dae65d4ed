use std::borrow::Cow;

use glam::Affine3A;

use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

/// A scene node: a name, its place in the hierarchy, a transform and
/// optional component references.
///
/// # Hierarchy
///
/// Nodes form a strict tree:
/// - `parent`: handle to the parent node (`None` for root nodes)
/// - `children`: handles of the owned child nodes
///
/// A child has exactly one parent. Removing a node through
/// [`Scene::remove_node`](crate::scene::Scene::remove_node) removes its whole
/// subtree.
///
/// # Components
///
/// `mesh`, `camera` and `light` point into the [`Scene`](crate::scene::Scene)
/// component pools. A node with none of them is a pure group (a pivot).
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Cow<'static, str>,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Components ===
    pub mesh: Option<MeshKey>,
    pub camera: Option<CameraKey>,
    pub light: Option<LightKey>,

    pub visible: bool,
}

impl Node {
    /// Creates a new node with an identity transform.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            camera: None,
            light: None,
            visible: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the world transformation matrix.
    ///
    /// Updated by the transform system each frame.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
