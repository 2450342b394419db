use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::FrameCtx;
use crate::device::Gpu;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Lifecycle: `init` once the window and GPU exist, `on_frame` for every
/// redraw, `shutdown` exactly once before the GPU context is dropped.
pub trait App {
    /// Creates GPU resources. An error aborts startup.
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()>;

    /// Called for raw window events, before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw. Input received since the previous frame is in
    /// `ctx.input_frame`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Releases GPU resources.
    fn shutdown(&mut self) {}
}
