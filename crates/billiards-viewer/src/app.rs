use anyhow::Result;

use billiards_engine::camera::TrackballCamera;
use billiards_engine::core::{App, AppControl, FrameCtx};
use billiards_engine::device::Gpu;
use billiards_engine::geometry::build_sphere;
use billiards_engine::input::{InputEvent, Key, KeyState};
use billiards_engine::projection::{ProjectionSystem, ViewMode};
use billiards_engine::render::MeshRenderer;
use billiards_engine::shape::{Shape, ShapeRegistry};

use crate::scene::{ball_rack, table_pieces, SceneConfig};

// ── key bindings ──────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    SetMode(ViewMode),
    CycleMode,
    Exit,
}

pub fn key_action(key: Key) -> Option<KeyAction> {
    match key {
        Key::Digit1 => Some(KeyAction::SetMode(ViewMode::Stereo)),
        Key::Digit2 => Some(KeyAction::SetMode(ViewMode::Orthographic)),
        Key::Digit3 => Some(KeyAction::SetMode(ViewMode::Perspective)),
        Key::Tab => Some(KeyAction::CycleMode),
        Key::Escape => Some(KeyAction::Exit),
        _ => None,
    }
}

// ── app ───────────────────────────────────────────────────────────────────

/// GPU-side scene: uploaded shapes plus the renderer drawing them.
struct Scene {
    shapes: ShapeRegistry,
    renderer: MeshRenderer,
}

/// The pool viewer.
///
/// Owns the camera and projection state; the GPU scene exists between
/// `init` and `shutdown`.
pub struct PoolApp {
    config: SceneConfig,
    camera: TrackballCamera,
    projection: ProjectionSystem,
    scene: Option<Scene>,
}

impl PoolApp {
    pub fn new(config: SceneConfig, camera: TrackballCamera, projection: ProjectionSystem) -> Self {
        Self {
            config,
            camera,
            projection,
            scene: None,
        }
    }

    /// Applies one key press. Returns `Exit` when the viewer should close.
    fn on_key(&mut self, key: Key) -> AppControl {
        let mode = match key_action(key) {
            Some(KeyAction::SetMode(mode)) => mode,
            Some(KeyAction::CycleMode) => self.camera.view_mode().next(),
            Some(KeyAction::Exit) => return AppControl::Exit,
            None => return AppControl::Continue,
        };

        self.camera.set_view_mode(mode);
        AppControl::Continue
    }
}

impl Default for PoolApp {
    fn default() -> Self {
        Self::new(
            SceneConfig::default(),
            TrackballCamera::default(),
            ProjectionSystem::default(),
        )
    }
}

impl App for PoolApp {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();

        let mut shapes = ShapeRegistry::new();
        shapes.insert(Shape::table(device, &table_pieces()));
        shapes.extend(ball_rack().into_iter().map(|ball| {
            build_sphere(
                device,
                ball.center,
                self.config.ball_radius,
                ball.color,
                self.config.sphere_resolution,
            )
        }));

        log::info!("uploaded {} shapes", shapes.len());

        self.scene = Some(Scene {
            shapes,
            renderer: MeshRenderer::new(),
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let canvas = ctx.window.viewport();

        // ── input ─────────────────────────────────────────────────────────
        for event in &ctx.input_frame.events {
            if let InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
            } = event
            {
                if self.on_key(*key) == AppControl::Exit {
                    return AppControl::Exit;
                }
                continue;
            }

            self.camera.handle_input(event, canvas);
        }

        // ── render ────────────────────────────────────────────────────────
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        let projection = self.projection.projection(self.camera.view_mode(), canvas.aspect());
        let model_view = self.camera.model_view(self.config.world_scale);
        let g = self.config.clear_grey;
        let clear = wgpu::Color { r: g, g, b: g, a: 1.0 };

        let shapes = &scene.shapes;
        let renderer = &mut scene.renderer;
        ctx.render(|rctx, target| {
            renderer.render(rctx, target, shapes.shapes(), &projection, model_view, clear);
        })
    }

    fn shutdown(&mut self) {
        if let Some(scene) = self.scene.take() {
            scene.shapes.shutdown();
        }
    }
}
