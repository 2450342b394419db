//! GPU rendering subsystem.
//!
//! The mesh renderer draws every uploaded [`Shape`](crate::shape::Shape) with
//! the frame's projection and the camera model-view. It owns its GPU resources
//! (pipelines, uniform buffer, bind group) and creates them lazily.
//!
//! Convention:
//! - world space is right-handed, +Y up, camera looking down -Z
//! - clip space follows wgpu (depth `0..1`)

mod ctx;
mod mesh;
mod pass;
mod uniform;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
pub use pass::{plan_passes, ColorChannels, PassPlan};
pub use uniform::MeshUniform;
