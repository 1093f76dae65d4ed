//! Transform System
//!
//! Propagates local transforms down the hierarchy into world matrices.
//! Kept apart from [`Scene`](crate::scene::Scene) so it only borrows the node
//! and camera pools, not the whole scene.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::camera::Camera;
use crate::scene::node::Node;
use crate::scene::{CameraKey, NodeHandle};

/// Updates the world matrices of every node reachable from `roots`.
///
/// Uses an explicit stack instead of recursion. A node's world matrix is only
/// recomputed when its local transform or an ancestor changed. Camera
/// components get their view matrices refreshed alongside.
pub fn update_hierarchy_iterative(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    roots: &[NodeHandle],
) {
    // (node, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(32);

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        update_node(nodes, cameras, handle, parent_world, parent_changed, &mut stack);
    }
}

/// Updates `root_handle` and its descendants, reading the parent's current
/// world matrix as the starting point. The subtree is always recomputed.
pub fn update_subtree(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    root_handle: NodeHandle,
) {
    let Some(node) = nodes.get(root_handle) else {
        return;
    };
    let parent_world = node
        .parent
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    let mut stack = vec![(root_handle, parent_world, true)];
    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        update_node(nodes, cameras, handle, parent_world, parent_changed, &mut stack);
    }
}

fn update_node(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    handle: NodeHandle,
    parent_world: Affine3A,
    parent_changed: bool,
    stack: &mut Vec<(NodeHandle, Affine3A, bool)>,
) {
    let Some(node) = nodes.get_mut(handle) else {
        return;
    };

    let local_changed = node.transform.update_local_matrix();
    let world_needs_update = local_changed || parent_changed;

    if world_needs_update {
        let new_world = parent_world * *node.transform.local_matrix();
        node.transform.set_world_matrix(new_world);

        if let Some(camera_key) = node.camera
            && let Some(camera) = cameras.get_mut(camera_key)
        {
            camera.update_view_projection(&new_world);
        }
    }

    // Reverse order keeps siblings processed front to back.
    let current_world = node.transform.world_matrix;
    for &child in node.children.iter().rev() {
        stack.push((child, current_world, world_needs_update));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn child_inherits_parent_translation() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let mut cameras: SlotMap<CameraKey, Camera> = SlotMap::with_key();

        let mut parent = Node::new("parent");
        parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
        let parent_handle = nodes.insert(parent);

        let mut child = Node::new("child");
        child.transform.position = Vec3::new(0.0, 1.0, 0.0);
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);
        nodes[parent_handle].children.push(child_handle);

        update_hierarchy_iterative(&mut nodes, &mut cameras, &[parent_handle]);

        let pos = nodes[child_handle].transform.world_matrix.translation;
        assert!((pos.x - 1.0).abs() < 1e-5);
        assert!((pos.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn parent_change_propagates_on_next_update() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let mut cameras: SlotMap<CameraKey, Camera> = SlotMap::with_key();

        let parent_handle = nodes.insert(Node::new("parent"));
        let mut child = Node::new("child");
        child.parent = Some(parent_handle);
        child.transform.position = Vec3::Z;
        let child_handle = nodes.insert(child);
        nodes[parent_handle].children.push(child_handle);

        update_hierarchy_iterative(&mut nodes, &mut cameras, &[parent_handle]);
        nodes[parent_handle].transform.position.y = 0.5;
        update_hierarchy_iterative(&mut nodes, &mut cameras, &[parent_handle]);

        let pos = nodes[child_handle].transform.world_matrix.translation;
        assert!((pos.y - 0.5).abs() < 1e-6);
        assert!((pos.z - 1.0).abs() < 1e-6);
    }
}
