//! Procedural mesh generation.
//!
//! Produces interleaved `f32` vertex data plus `u32` indices for the primitive
//! shapes the scene is built from, and merges several primitive buffers into a
//! single draw-ready buffer.
//!
//! Vertex layouts:
//! - boxes: `position(3) color(3)`, stride [`BOX_STRIDE`]
//! - spheres: `position(3) color(3) normal(3)`, stride [`SPHERE_STRIDE`]

mod buffer;
mod cuboid;
mod sphere;

pub use buffer::{combine, MeshBuffer};
pub use cuboid::build_box;
pub use sphere::{build_sphere, sphere_mesh};

/// Scalars per vertex for box meshes.
pub const BOX_STRIDE: usize = 6;

/// Scalars per vertex for sphere meshes.
pub const SPHERE_STRIDE: usize = 9;
