use glam::{Mat4, Quat, Vec2, Vec3};

use super::trackball::{incremental_rotation, normalized_pointer_coord, project_to_hemisphere};
use crate::coords::Viewport;
use crate::input::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};
use crate::projection::ViewMode;

/// Camera tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Zoom at startup.
    pub initial_zoom: f32,

    /// Factor applied per wheel notch.
    pub zoom_step: f32,

    /// Divide normalized drag coordinates by the current zoom, so a zoomed-in
    /// scene turns less for the same drag and tracks the pointer on screen.
    ///
    /// Off by default: pointer coordinates are normalized without the zoom,
    /// and a drag turns by the same angle at every zoom.
    pub scale_drag_by_zoom: bool,

    pub initial_mode: ViewMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            // Fits a scene of radius 2 into the display.
            initial_zoom: 0.7 / (0.5 * 2.0 + 1.0),
            zoom_step: 1.1,
            scale_drag_by_zoom: false,
            initial_mode: ViewMode::Perspective,
        }
    }
}

/// Orientation, zoom and view mode driven by pointer input.
///
/// Handlers mutate the state synchronously and report whether anything
/// visible changed; the caller redraws afterwards.
#[derive(Debug, Clone)]
pub struct TrackballCamera {
    config: CameraConfig,
    orientation: Quat,
    zoom: f32,
    /// Last pointer position of the current drag; `None` until known.
    pointer: Option<Vec2>,
    pressed: bool,
    view_mode: ViewMode,
}

impl TrackballCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            orientation: Quat::IDENTITY,
            zoom: config.initial_zoom,
            pointer: None,
            pressed: false,
            view_mode: config.initial_mode,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[inline]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Returns `true` when the mode actually changed.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if self.view_mode == mode {
            return false;
        }
        log::debug!("view mode {} -> {}", self.view_mode.label(), mode.label());
        self.view_mode = mode;
        true
    }

    /// Starts a drag at `pos`.
    ///
    /// With an unknown position the drag starts at the first pointer move.
    pub fn press(&mut self, pos: Option<Vec2>) {
        self.pressed = true;
        self.pointer = pos;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Rotates by the trackball motion from the last pointer position to
    /// `pos`. Ignored unless a drag is in progress; the first move of a drag
    /// without a known start position only records `pos`.
    pub fn drag_to(&mut self, pos: Vec2, canvas: Viewport) -> bool {
        if !self.pressed || !canvas.is_valid() {
            return false;
        }
        let Some(prev) = self.pointer.replace(pos) else {
            return false;
        };

        let zoom = if self.config.scale_drag_by_zoom { self.zoom } else { 1.0 };
        let from = project_to_hemisphere(normalized_pointer_coord(prev, canvas, zoom));
        let to = project_to_hemisphere(normalized_pointer_coord(pos, canvas, zoom));

        self.orientation = (incremental_rotation(from, to) * self.orientation).normalize();
        true
    }

    /// Applies one wheel notch. Positive deltas (scrolling down) multiply the
    /// zoom by the step, anything else divides by it.
    pub fn wheel(&mut self, scroll_down: f32) {
        if scroll_down > 0.0 {
            self.zoom *= self.config.zoom_step;
        } else {
            self.zoom /= self.config.zoom_step;
        }
        log::debug!("zoom {:.4}", self.zoom);
    }

    /// Routes a pointer/wheel event to the matching handler.
    ///
    /// Returns `true` when the camera changed and a redraw is due.
    pub fn handle_input(&mut self, event: &InputEvent, canvas: Viewport) -> bool {
        match event {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                position,
            }) => {
                match state {
                    MouseButtonState::Pressed => self.press(position.map(Vec2::from)),
                    MouseButtonState::Released => self.release(),
                }
                false
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.drag_to(Vec2::new(*x, *y), canvas)
            }

            InputEvent::MouseWheel { delta } => {
                self.wheel(delta.scroll_down());
                true
            }

            InputEvent::Focused(false) => {
                self.release();
                false
            }

            _ => false,
        }
    }

    /// Rotation followed by a uniform scale of `zoom * world_scale`.
    pub fn model_view(&self, world_scale: f32) -> Mat4 {
        Mat4::from_quat(self.orientation) * Mat4::from_scale(Vec3::splat(self.zoom * world_scale))
    }
}

impl Default for TrackballCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::input::MouseWheelDelta;

    const CANVAS: Viewport = Viewport::new(1280.0, 720.0);

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            position: Some((x, y)),
        })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn no_rotation_without_press() {
        let mut cam = TrackballCamera::default();
        assert!(!cam.handle_input(&moved(100.0, 100.0), CANVAS));
        assert!(!cam.handle_input(&moved(900.0, 300.0), CANVAS));
        assert_eq!(cam.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn drag_rotates_and_tracks_pointer() {
        let mut cam = TrackballCamera::default();
        cam.handle_input(&left(MouseButtonState::Pressed, 640.0, 360.0), CANVAS);
        assert!(cam.handle_input(&moved(700.0, 360.0), CANVAS));

        assert_ne!(cam.orientation(), Quat::IDENTITY);
        assert_eq!(cam.pointer(), Some(Vec2::new(700.0, 360.0)));

        // A horizontal drag turns about the vertical axis.
        let axis = cam.orientation().to_axis_angle().0;
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-4));
    }

    #[test]
    fn release_stops_rotation() {
        let mut cam = TrackballCamera::default();
        cam.handle_input(&left(MouseButtonState::Pressed, 640.0, 360.0), CANVAS);
        cam.handle_input(&left(MouseButtonState::Released, 640.0, 360.0), CANVAS);
        cam.handle_input(&moved(10.0, 10.0), CANVAS);

        assert!(!cam.is_pressed());
        assert_eq!(cam.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn orientation_stays_unit_over_long_drags() {
        let mut cam = TrackballCamera::default();
        cam.press(Some(Vec2::new(640.0, 360.0)));

        for i in 0..5000 {
            let t = i as f32 * 0.037;
            let pos = Vec2::new(640.0 + 900.0 * t.sin(), 360.0 + 500.0 * (1.3 * t).cos());
            cam.drag_to(pos, CANVAS);
            assert!((cam.orientation().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn wheel_round_trip_restores_zoom() {
        let mut cam = TrackballCamera::default();
        let start = cam.zoom();

        cam.handle_input(&InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y: -1.0 } }, CANVAS);
        assert_relative_eq!(cam.zoom(), start * 1.1, epsilon = 1e-6);

        cam.handle_input(&InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 } }, CANVAS);
        assert_relative_eq!(cam.zoom(), start, epsilon = 1e-6);
    }

    #[test]
    fn wheel_leaves_orientation_alone() {
        let mut cam = TrackballCamera::default();
        cam.press(Some(Vec2::new(640.0, 360.0)));
        cam.drag_to(Vec2::new(500.0, 200.0), CANVAS);
        let q = cam.orientation();

        cam.wheel(1.0);
        cam.wheel(-1.0);
        cam.wheel(0.0);
        assert_eq!(cam.orientation(), q);
    }

    #[test]
    fn view_mode_does_not_touch_model_view() {
        let mut cam = TrackballCamera::default();
        cam.press(Some(Vec2::new(640.0, 360.0)));
        cam.drag_to(Vec2::new(800.0, 420.0), CANVAS);
        let before = cam.model_view(15.0);

        assert!(cam.set_view_mode(ViewMode::Stereo));
        assert!(!cam.set_view_mode(ViewMode::Stereo));
        assert_eq!(cam.model_view(15.0), before);
    }

    #[test]
    fn model_view_scales_by_zoom_and_world_scale() {
        let cam = TrackballCamera::default();
        let mv = cam.model_view(15.0);
        let expected = cam.zoom() * 15.0;
        assert!(mv.transform_vector3(Vec3::X).abs_diff_eq(Vec3::X * expected, 1e-5));
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut cam = TrackballCamera::default();
        cam.press(Some(Vec2::ZERO));
        cam.handle_input(&InputEvent::Focused(false), CANVAS);
        assert!(!cam.is_pressed());
    }

    #[test]
    fn press_without_position_starts_at_first_move() {
        let mut cam = TrackballCamera::default();
        let press = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            position: None,
        });
        cam.handle_input(&press, CANVAS);
        assert!(cam.is_pressed());
        assert_eq!(cam.pointer(), None);

        // Seeds the drag; no jump from a position the user never pointed at.
        assert!(!cam.handle_input(&moved(641.0, 360.0), CANVAS));
        assert_eq!(cam.orientation(), Quat::IDENTITY);
        assert_eq!(cam.pointer(), Some(Vec2::new(641.0, 360.0)));

        assert!(cam.handle_input(&moved(642.0, 360.0), CANVAS));
        let (_, angle) = cam.orientation().to_axis_angle();
        assert!(angle < 0.01);
    }

    #[test]
    fn zoom_scaled_drag_turns_less_when_zoomed_in() {
        let drag_angle = |scale_drag_by_zoom: bool| {
            let mut cam = TrackballCamera::new(CameraConfig { scale_drag_by_zoom, ..CameraConfig::default() });
            for _ in 0..20 {
                cam.wheel(1.0);
            }
            assert!(cam.zoom() > 1.0);
            cam.press(Some(Vec2::new(640.0, 360.0)));
            cam.drag_to(Vec2::new(760.0, 360.0), CANVAS);
            cam.orientation().to_axis_angle().1
        };

        assert!(drag_angle(true) < drag_angle(false));
    }
}
