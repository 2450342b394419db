//! Billiards engine crate.
//!
//! Procedural meshes, the trackball camera and projection math, plus the
//! platform + GPU runtime that draws them.

pub mod camera;
pub mod geometry;
pub mod projection;
pub mod shape;

pub mod core;
pub mod device;
pub mod input;
pub mod render;
pub mod window;

pub mod coords;
pub mod logging;
