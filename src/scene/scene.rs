use std::borrow::Cow;

use glam::{Affine3A, Vec3};
use slotmap::SlotMap;

use crate::resources::{Geometry, Material, Mesh};
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform_system;
use crate::scene::{CameraKey, GeometryKey, LightKey, MaterialKey, MeshKey, NodeHandle};

/// Scene graph storage.
///
/// `Scene` is a pure data layer: a node arena forming a forest, plus the
/// component pools nodes refer to. Ownership follows the tree: removing a
/// node removes its descendants and every component they reference.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Component pools ====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub geometries: SlotMap<GeometryKey, Geometry>,
    pub materials: SlotMap<MaterialKey, Material>,
    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,

    pub active_camera: Option<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            active_camera: None,
        }
    }

    /// Starts building a node.
    pub fn build_node(&mut self, name: impl Into<Cow<'static, str>>) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Creates an empty root node.
    pub fn create_node(&mut self, name: impl Into<Cow<'static, str>>) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// Adds a node as a root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node directly under `parent`. Falls back to a root node if the
    /// parent does not exist.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
            self.nodes[handle].parent = Some(parent);
        } else {
            log::warn!("Parent node not found, adding '{}' as root", self.nodes[handle].name);
            self.root_nodes.push(handle);
        }
        handle
    }

    /// Re-parents `child` under `parent`.
    ///
    /// Refuses (and returns `false`) when the move would create a cycle, i.e.
    /// when `parent` is `child` itself or one of its descendants.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> bool {
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Attach called with a missing node");
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            log::warn!("Cannot attach a node to itself or to one of its descendants");
            return false;
        }

        // 1. Detach from the old parent (or the root list)
        self.detach_from_parent(child);

        // 2. Attach to the new one
        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.transform.mark_dirty();
        true
    }

    /// Removes a node together with its whole subtree and all components the
    /// subtree references.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        if !self.nodes.contains_key(handle) {
            return;
        }

        self.detach_from_parent(handle);

        for h in self.subtree(handle) {
            let Some(node) = self.nodes.remove(h) else {
                continue;
            };
            if let Some(mesh_key) = node.mesh {
                self.remove_mesh(mesh_key);
            }
            if let Some(camera_key) = node.camera {
                self.cameras.remove(camera_key);
            }
            if let Some(light_key) = node.light {
                self.lights.remove(light_key);
            }
            if self.active_camera == Some(h) {
                self.active_camera = None;
            }
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Finds the first node with the given name (linear scan).
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find_map(|(handle, node)| (node.name == name).then_some(handle))
    }

    /// Collects `root` and all its descendants in depth-first pre-order.
    #[must_use]
    pub fn subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            out.push(handle);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Inserts a geometry/material pair as a new mesh. The mesh owns both.
    pub fn add_mesh(&mut self, name: impl Into<Cow<'static, str>>, geometry: Geometry, material: Material) -> MeshKey {
        let geometry = self.geometries.insert(geometry);
        let material = self.materials.insert(material);
        let mut mesh = Mesh::new(geometry, material);
        mesh.name = name.into();
        self.meshes.insert(mesh)
    }

    fn remove_mesh(&mut self, key: MeshKey) {
        if let Some(mesh) = self.meshes.remove(key) {
            self.geometries.remove(mesh.geometry);
            self.materials.remove(mesh.material);
        }
    }

    /// Adds a camera on a new root node and returns that node.
    pub fn add_camera(&mut self, camera: Camera) -> NodeHandle {
        let mut node = Node::new(camera.name.clone());
        node.camera = Some(self.cameras.insert(camera));
        self.add_node(node)
    }

    /// Adds a light on a new root node and returns that node.
    pub fn add_light(&mut self, name: impl Into<Cow<'static, str>>, light: Light, position: Vec3) -> NodeHandle {
        let mut node = Node::new(name);
        node.transform.position = position;
        node.light = Some(self.lights.insert(light));
        self.add_node(node)
    }

    /// Returns the camera attached to [`active_camera`](Self::active_camera).
    #[must_use]
    pub fn main_camera(&self) -> Option<&Camera> {
        let key = self.nodes.get(self.active_camera?)?.camera?;
        self.cameras.get(key)
    }

    pub fn main_camera_mut(&mut self) -> Option<&mut Camera> {
        let key = self.nodes.get(self.active_camera?)?.camera?;
        self.cameras.get_mut(key)
    }

    /// Iterates over lights with the world matrix of their node.
    pub fn iter_lights(&self) -> impl Iterator<Item = (&Light, &Affine3A)> {
        self.nodes.values().filter_map(|node| {
            let light = self.lights.get(node.light?)?;
            Some((light, &node.transform.world_matrix))
        })
    }

    /// Collects the meshes to draw this frame.
    ///
    /// A hidden node hides its whole subtree.
    #[must_use]
    pub fn visible_meshes(&self) -> Vec<(NodeHandle, &Mesh)> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            if let Some(mesh) = node.mesh.and_then(|k| self.meshes.get(k))
                && mesh.visible
            {
                out.push((handle, mesh));
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Updates the world matrix of every node. Call once per frame before
    /// rendering.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, &mut self.cameras, &self.root_nodes);
    }

    /// Updates the world matrices of one subtree.
    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, &mut self.cameras, root);
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn detach_from_parent(&mut self, handle: NodeHandle) {
        let old_parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(parent) = self.nodes.get_mut(p)
                && let Some(i) = parent.children.iter().position(|&x| x == handle)
            {
                parent.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(i);
        }
        if let Some(node) = self.nodes.get_mut(handle) {
            node.parent = None;
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeHandle, mut node: NodeHandle) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(node).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }
}

// ============================================================================
// Node builder
// ============================================================================

/// Chained node construction.
///
/// ```rust,ignore
/// let ear = scene
///     .build_node("leftEar")
///     .with_position(Vec3::new(0.6, 1.0, -0.2))
///     .with_parent(head_pivot)
///     .with_mesh(ear_mesh)
///     .build();
/// ```
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<NodeHandle>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            scene,
            node: Node::new(name),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.node.transform.position = position;
        self
    }

    /// Euler angles in [`DEFAULT_EULER_ORDER`](crate::scene::transform::DEFAULT_EULER_ORDER).
    #[must_use]
    pub fn with_rotation_euler(mut self, rotation: Vec3) -> Self {
        self.node.transform.set_rotation_euler(rotation.x, rotation.y, rotation.z);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.node.transform.scale = scale;
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: MeshKey) -> Self {
        self.node.mesh = Some(mesh);
        self
    }

    /// Inserts the node and returns its handle. Without a parent the node
    /// becomes a root.
    pub fn build(self) -> NodeHandle {
        let mesh = self.node.mesh;
        let handle = match self.parent {
            Some(parent) => self.scene.add_to_parent(self.node, parent),
            None => self.scene.add_node(self.node),
        };

        if let Some(mesh) = mesh.and_then(|k| self.scene.meshes.get_mut(k)) {
            mesh.node_id = Some(handle);
        }

        handle
    }
}
