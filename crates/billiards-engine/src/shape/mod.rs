//! GPU-resident shapes.
//!
//! A [`Shape`] owns its vertex/index buffer pair and knows, through its
//! [`ShapeKind`], how it must be drawn. Shapes are uploaded once at startup and
//! live in a [`ShapeRegistry`] until shutdown.

mod kind;
mod registry;

pub use kind::{PrimitiveKind, ShapeKind, VertexLayout};
pub use registry::{Shape, ShapeRegistry};
