//! Core resource definitions
//!
//! CPU-side data the renderer consumes, independent of any GPU backend:
//! - Geometry: triangle data and bounding volumes
//! - Material: surface description
//! - Mesh: geometry + material pair
//! - primitives: parametric shape generators

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;

pub use geometry::{BoundingBox, BoundingSphere, Geometry};
pub use material::{color_from_hex, Material, MaterialBuilder, MaterialParams};
pub use mesh::Mesh;
