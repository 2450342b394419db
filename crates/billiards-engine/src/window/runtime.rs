use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "billiards".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initialises `app` and runs the event loop until the
    /// window closes or the app asks to exit.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.shutdown_app();
        match state.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    app_running: bool,
    init_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            app_running: false,
            init_error: None,
        }
    }

    /// Creates the window and GPU context, then initialises the app.
    ///
    /// Nothing is kept unless every step succeeds.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        entry
            .with_gpu(|gpu| self.app.init(gpu))
            .context("application initialization failed")?;

        log::info!("viewer started");
        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
        self.app_running = true;
        Ok(())
    }

    /// Runs the app's shutdown hook once, before the GPU context goes away.
    fn shutdown_app(&mut self) {
        if self.app_running {
            self.app_running = false;
            self.app.shutdown();
            log::info!("viewer shut down");
        }
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown_app();
        self.window = None;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("failed to start: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.app.on_window_event(&event) == AppControl::Exit {
            self.exit(event_loop);
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        // Every input event may change the view; redraw after it.
        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
                fields.window.request_redraw();
            }
        });

        match &event {
            WindowEvent::CloseRequested => self.exit(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let app = &mut self.app;
                let control = entry.with_mut(|fields| {
                    let control = {
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                            input_frame: fields.input_frame,
                        };
                        app.on_frame(&mut ctx)
                    };

                    // Input has been consumed by this frame.
                    fields.input_frame.clear();
                    control
                });

                if control == AppControl::Exit {
                    self.exit(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown_app();
        self.window = None;
    }
}
