use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputFrame;
use crate::render::{RenderCtx, RenderTarget};

use super::app::AppControl;

/// Window handle for the current frame.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }

    /// Logical canvas size, the space pointer coordinates live in.
    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.logical_size();
        Viewport::new(w, h)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input_frame: &'a InputFrame,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires a frame, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then presents it.
    ///
    /// `draw` is responsible for clearing. Surface errors are handled here: a
    /// lost or outdated surface is reconfigured and the frame skipped, an
    /// out-of-memory error ends the app.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let viewport = self.window.viewport();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    SurfaceErrorAction::Reconfigured => {
                        self.window.window.request_redraw();
                        AppControl::Continue
                    }
                    SurfaceErrorAction::SkipFrame => AppControl::Continue,
                };
            }
        };

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, self.gpu.depth_view());
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
