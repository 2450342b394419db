//! Screen-space types shared by the runtime, input handling and the camera.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod viewport;

pub use viewport::Viewport;
