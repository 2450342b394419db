//! Trackball camera.
//!
//! Pointer drags are projected onto a virtual hemisphere in front of the
//! canvas; the rotation between two consecutive projected points is
//! accumulated into a unit quaternion. The wheel scales the scene.

mod state;
mod trackball;

pub use state::{CameraConfig, TrackballCamera};
pub use trackball::{incremental_rotation, normalized_pointer_coord, project_to_hemisphere};
