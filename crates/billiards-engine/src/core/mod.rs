//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application: lifecycle hooks plus a per-frame context that hides the
//! runtime's internals.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
