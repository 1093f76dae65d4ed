pub mod cone;
pub mod cylinder;
pub mod polyhedron;
pub mod sphere;

pub use cone::{create_cone, ConeOptions};
pub use cylinder::{create_cylinder, CylinderOptions};
pub use polyhedron::create_dodecahedron;
pub use sphere::{create_sphere, SphereOptions};
