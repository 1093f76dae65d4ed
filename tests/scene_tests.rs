//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: create/remove nodes, attach hierarchy, cycle refusal
//! - Component ownership: meshes, cameras and lights released with their node
//! - Visibility: hidden nodes hide their subtree
//! - World matrix propagation and Euler order

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use howl::resources::{Geometry, Material};
use howl::scene::transform::Transform;
use howl::scene::{Camera, Light, Node, Scene};

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn triangle() -> Geometry {
    Geometry::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[0.0, 0.0, 1.0]; 3],
        vec![0, 1, 2],
    )
}

// ============================================================================
// Node Creation & Removal
// ============================================================================

#[test]
fn create_node_is_a_root() {
    let mut scene = Scene::new();
    let handle = scene.create_node("a");
    assert!(scene.root_nodes.contains(&handle));
    assert_eq!(scene.get_node(handle).map(|n| n.name.as_ref()), Some("a"));
}

#[test]
fn add_to_parent_links_both_sides() {
    let mut scene = Scene::new();
    let parent = scene.create_node("parent");
    let child = scene.add_to_parent(Node::new("child"), parent);

    assert_eq!(scene.get_node(child).and_then(Node::parent), Some(parent));
    assert_eq!(scene.get_node(parent).map(Node::children), Some(&[child][..]));
    assert!(!scene.root_nodes.contains(&child));
}

#[test]
fn remove_node_removes_subtree_and_components() {
    let mut scene = Scene::new();
    let root = scene.create_node("root");
    let mesh = scene.add_mesh("part", triangle(), Material::default());
    let child = scene.build_node("child").with_parent(root).with_mesh(mesh).build();
    let grandchild = scene.build_node("grandchild").with_parent(child).build();

    scene.remove_node(root);

    assert!(scene.get_node(root).is_none());
    assert!(scene.get_node(child).is_none());
    assert!(scene.get_node(grandchild).is_none());
    assert!(scene.root_nodes.is_empty());
    assert!(scene.meshes.is_empty());
    assert!(scene.geometries.is_empty());
    assert!(scene.materials.is_empty());
}

#[test]
fn remove_node_detaches_from_parent() {
    let mut scene = Scene::new();
    let parent = scene.create_node("parent");
    let child = scene.build_node("child").with_parent(parent).build();

    scene.remove_node(child);

    assert!(scene.get_node(parent).is_some_and(|n| n.children().is_empty()));
}

#[test]
fn removing_active_camera_clears_it() {
    let mut scene = Scene::new();
    let cam = scene.add_camera(Camera::new_perspective(50.0, 1.0, 0.1, 100.0));
    scene.active_camera = Some(cam);

    scene.remove_node(cam);

    assert!(scene.active_camera.is_none());
    assert!(scene.cameras.is_empty());
    assert!(scene.main_camera().is_none());
}

#[test]
fn remove_missing_node_is_noop() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    scene.remove_node(a);
    scene.remove_node(a);
    assert!(scene.nodes.is_empty());
}

// ============================================================================
// Attach
// ============================================================================

#[test]
fn attach_moves_root_under_parent() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    let b = scene.create_node("b");

    assert!(scene.attach(b, a));
    assert_eq!(scene.root_nodes, vec![a]);
    assert_eq!(scene.get_node(b).and_then(Node::parent), Some(a));
}

#[test]
fn attach_reparents_between_nodes() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    let b = scene.create_node("b");
    let c = scene.build_node("c").with_parent(a).build();

    assert!(scene.attach(c, b));
    assert!(scene.get_node(a).is_some_and(|n| n.children().is_empty()));
    assert_eq!(scene.get_node(b).map(Node::children), Some(&[c][..]));
}

#[test]
fn attach_refuses_self() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    assert!(!scene.attach(a, a));
    assert!(scene.root_nodes.contains(&a));
}

#[test]
fn attach_refuses_cycle() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    let b = scene.build_node("b").with_parent(a).build();
    let c = scene.build_node("c").with_parent(b).build();

    assert!(!scene.attach(a, c));
    // Hierarchy unchanged
    assert!(scene.get_node(a).is_some_and(|n| n.parent().is_none()));
    assert_eq!(scene.get_node(c).and_then(Node::parent), Some(b));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn find_node_by_name() {
    let mut scene = Scene::new();
    let a = scene.create_node("alpha");
    scene.create_node("beta");
    assert_eq!(scene.find_node_by_name("alpha"), Some(a));
    assert_eq!(scene.find_node_by_name("gamma"), None);
}

#[test]
fn subtree_is_pre_order() {
    let mut scene = Scene::new();
    let root = scene.create_node("root");
    let a = scene.build_node("a").with_parent(root).build();
    let a1 = scene.build_node("a1").with_parent(a).build();
    let b = scene.build_node("b").with_parent(root).build();

    assert_eq!(scene.subtree(root), vec![root, a, a1, b]);
}

#[test]
fn hidden_node_hides_subtree() {
    let mut scene = Scene::new();
    let root = scene.create_node("root");
    let m1 = scene.add_mesh("m1", triangle(), Material::default());
    let m2 = scene.add_mesh("m2", triangle(), Material::default());
    let group = scene.build_node("group").with_parent(root).with_mesh(m1).build();
    scene.build_node("leaf").with_parent(group).with_mesh(m2).build();

    assert_eq!(scene.visible_meshes().len(), 2);

    if let Some(node) = scene.get_node_mut(group) {
        node.visible = false;
    }
    assert!(scene.visible_meshes().is_empty());
}

#[test]
fn build_sets_mesh_back_reference() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh("m", triangle(), Material::default());
    let node = scene.build_node("n").with_mesh(mesh).build();
    assert_eq!(scene.meshes[mesh].node_id, Some(node));
}

#[test]
fn iter_lights_reports_world_position() {
    let mut scene = Scene::new();
    scene.add_light("key", Light::new_directional(Vec3::ONE, 1.0), Vec3::new(5.0, 5.0, 5.0));
    scene.update_matrix_world();

    let (light, world) = scene.iter_lights().next().expect("one light");
    assert!((light.intensity - 1.0).abs() < EPSILON);
    assert!(vec3_approx(world.translation.into(), Vec3::new(5.0, 5.0, 5.0)));
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn world_matrix_composes_parent_chain() {
    let mut scene = Scene::new();
    let parent = scene.build_node("parent").with_position(Vec3::new(0.0, 1.0, 0.0)).build();
    let child = scene
        .build_node("child")
        .with_parent(parent)
        .with_position(Vec3::new(0.0, 0.0, 2.0))
        .build();

    if let Some(node) = scene.get_node_mut(parent) {
        node.transform.rotation = Quat::from_rotation_y(FRAC_PI_2);
    }
    scene.update_matrix_world();

    let world = scene.get_node(child).map(|n| *n.world_matrix()).expect("child");
    // +Z rotated a quarter turn about Y lands on +X
    assert!(vec3_approx(world.translation.into(), Vec3::new(2.0, 1.0, 0.0)));
}

#[test]
fn update_subtree_leaves_other_roots() {
    let mut scene = Scene::new();
    let a = scene.create_node("a");
    let b = scene.create_node("b");
    for h in [a, b] {
        if let Some(node) = scene.get_node_mut(h) {
            node.transform.position = Vec3::X;
        }
    }

    scene.update_subtree(a);

    let ta: Vec3 = scene.get_node(a).map(|n| n.world_matrix().translation.into()).expect("a");
    let tb: Vec3 = scene.get_node(b).map(|n| n.world_matrix().translation.into()).expect("b");
    assert!(vec3_approx(ta, Vec3::X));
    assert!(vec3_approx(tb, Vec3::ZERO));
}

#[test]
fn euler_order_is_xyz() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.3, 0.5, 0.0);
    let expected = Quat::from_rotation_x(0.3) * Quat::from_rotation_y(0.5);
    assert!(t.rotation.abs_diff_eq(expected, EPSILON));

    let e = t.rotation_euler();
    assert!(vec3_approx(e, Vec3::new(0.3, 0.5, 0.0)));
}

#[test]
fn camera_view_follows_node() {
    let mut scene = Scene::new();
    let cam = scene.add_camera(Camera::new_perspective(50.0, 1.0, 0.1, 100.0));
    scene.active_camera = Some(cam);
    if let Some(node) = scene.get_node_mut(cam) {
        node.transform.position = Vec3::new(0.0, 0.5, 5.0);
    }
    scene.update_matrix_world();

    let camera = scene.main_camera().expect("camera");
    assert!(vec3_approx(camera.position(), Vec3::new(0.0, 0.5, 5.0)));
    let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
    assert!(vec3_approx(origin_in_view, Vec3::new(0.0, -0.5, -5.0)));
}
