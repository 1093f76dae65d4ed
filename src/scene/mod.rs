//! Scene graph
//!
//! Manages the hierarchy and its components:
//! - Node: scene node (parent/child links and a transform)
//! - Transform: position, rotation, scale with cached matrices
//! - Scene: node arena plus component pools
//! - Camera: perspective camera component
//! - Light: ambient and directional lights
//! - transform_system: world matrix propagation, decoupled from `Scene`

pub mod camera;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use camera::Camera;
pub use light::{Light, LightKind};
pub use node::Node;
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct GeometryKey;
    pub struct MaterialKey;
    pub struct CameraKey;
    pub struct LightKey;
}
