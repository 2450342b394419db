//! Projection matrices for the three view modes.
//!
//! All modes look through a virtual display of fixed height placed
//! `camera_distance` in front of the eye. Its width follows the canvas
//! aspect. Matrices target wgpu clip space (right-handed, depth `0..1`).

use glam::{Mat4, Vec3, Vec4};

/// Selectable projection mode.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum ViewMode {
    /// Red/cyan anaglyph from two horizontally offset eyes.
    Stereo,
    Orthographic,
    #[default]
    Perspective,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Stereo, ViewMode::Orthographic, ViewMode::Perspective];

    /// Next mode in `ALL` order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Stereo => ViewMode::Orthographic,
            ViewMode::Orthographic => ViewMode::Perspective,
            ViewMode::Perspective => ViewMode::Stereo,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Stereo => "stereo",
            ViewMode::Orthographic => "orthographic",
            ViewMode::Perspective => "perspective",
        }
    }
}

/// Virtual display and clip planes shared by all modes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Height of the virtual display in world units.
    pub display_height: f32,
    /// Eye to display distance.
    pub camera_distance: f32,
    pub near: f32,
    pub far: f32,
    /// Lateral offset of each eye in stereo mode.
    pub eye_offset: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            display_height: 30.0,
            camera_distance: 50.0,
            near: 10.0,
            far: 100.0,
            eye_offset: 3.0,
        }
    }
}

/// Projection for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Mono(Mat4),
    Stereo { left: Mat4, right: Mat4 },
}

/// Derives projection matrices from the view mode and canvas aspect.
///
/// Stateless apart from its configuration; call it for every frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ProjectionSystem {
    config: ProjectionConfig,
}

impl ProjectionSystem {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// `(width, height)` of the virtual display for the given aspect.
    #[inline]
    pub fn display_size(&self, aspect: f32) -> (f32, f32) {
        let h = self.config.display_height;
        (h * aspect, h)
    }

    pub fn projection(&self, mode: ViewMode, aspect: f32) -> Projection {
        match mode {
            ViewMode::Perspective => Projection::Mono(self.perspective(aspect)),
            ViewMode::Orthographic => Projection::Mono(self.orthographic(aspect)),
            ViewMode::Stereo => {
                let (left, right) = self.stereo(aspect);
                Projection::Stereo { left, right }
            }
        }
    }

    pub fn perspective(&self, aspect: f32) -> Mat4 {
        self.eye(0.0, aspect)
    }

    /// Box projection over the display, viewed from the centred eye.
    pub fn orthographic(&self, aspect: f32) -> Mat4 {
        let c = &self.config;
        let (w, h) = self.display_size(aspect);
        Mat4::orthographic_rh(-w / 2.0, w / 2.0, -h / 2.0, h / 2.0, c.near, c.far)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -c.camera_distance))
    }

    /// Left and right eye matrices with parallel view axes.
    pub fn stereo(&self, aspect: f32) -> (Mat4, Mat4) {
        let d = self.config.eye_offset;
        (self.eye(-d, aspect), self.eye(d, aspect))
    }

    fn eye(&self, cam_x: f32, aspect: f32) -> Mat4 {
        let c = &self.config;
        let (w, h) = self.display_size(aspect);
        off_axis(Vec3::new(cam_x, 0.0, c.camera_distance), w, h, c.near, c.far)
    }
}

/// Off-axis perspective through a `display_w × display_h` display centred on
/// the origin, seen from `camera`.
///
/// The frustum bounds at the near plane are `near * (edge - cam) / cam.z`;
/// the frustum is followed by a translation moving the eye to the origin.
pub fn off_axis(camera: Vec3, display_w: f32, display_h: f32, near: f32, far: f32) -> Mat4 {
    let scale = near / camera.z;
    let left = scale * (-display_w / 2.0 - camera.x);
    let right = scale * (display_w / 2.0 - camera.x);
    let bottom = scale * (-display_h / 2.0 - camera.y);
    let top = scale * (display_h / 2.0 - camera.y);

    frustum(left, right, bottom, top, near, far) * Mat4::from_translation(-camera)
}

/// Right-handed frustum with depth mapped to `0..1`.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rl = right - left;
    let tb = top - bottom;
    let nf = near - far;

    Mat4::from_cols(
        Vec4::new(2.0 * near / rl, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / tb, 0.0, 0.0),
        Vec4::new((right + left) / rl, (top + bottom) / tb, far / nf, -1.0),
        Vec4::new(0.0, 0.0, near * far / nf, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn ndc(m: Mat4, p: Vec3) -> Vec3 {
        m.project_point3(p)
    }

    #[test]
    fn frustum_maps_near_and_far_to_depth_range() {
        let m = frustum(-1.0, 1.0, -1.0, 1.0, 10.0, 100.0);
        assert_relative_eq!(ndc(m, Vec3::new(0.0, 0.0, -10.0)).z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc(m, Vec3::new(0.0, 0.0, -100.0)).z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_maps_display_corners_to_clip_corners() {
        let sys = ProjectionSystem::default();
        let aspect = 16.0 / 9.0;
        let (w, h) = sys.display_size(aspect);
        let m = sys.perspective(aspect);

        let corner = ndc(m, Vec3::new(w / 2.0, h / 2.0, 0.0));
        assert_relative_eq!(corner.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(corner.y, 1.0, epsilon = 1e-5);

        let other = ndc(m, Vec3::new(-w / 2.0, -h / 2.0, 0.0));
        assert_relative_eq!(other.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(other.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn stereo_eyes_share_the_display_rectangle() {
        let sys = ProjectionSystem::default();
        let (left, right) = sys.stereo(1.5);
        let (w, h) = sys.display_size(1.5);

        for m in [left, right] {
            let c = ndc(m, Vec3::new(w / 2.0, -h / 2.0, 0.0));
            assert_relative_eq!(c.x, 1.0, epsilon = 1e-5);
            assert_relative_eq!(c.y, -1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn stereo_eyes_see_depth_with_opposite_parallax() {
        let sys = ProjectionSystem::default();
        let (left, right) = sys.stereo(1.0);
        let behind = Vec3::new(0.0, 0.0, -20.0);

        let xl = ndc(left, behind).x;
        let xr = ndc(right, behind).x;
        assert!(xl < 0.0 && xr > 0.0 || xl > 0.0 && xr < 0.0);
        assert_relative_eq!(xl, -xr, epsilon = 1e-5);
    }

    #[test]
    fn stereo_matches_perspective_without_offset() {
        let sys = ProjectionSystem::new(ProjectionConfig { eye_offset: 0.0, ..Default::default() });
        let (left, right) = sys.stereo(1.25);
        assert!(left.abs_diff_eq(sys.perspective(1.25), 1e-6));
        assert!(right.abs_diff_eq(sys.perspective(1.25), 1e-6));
    }

    #[test]
    fn orthographic_spans_half_display() {
        let sys = ProjectionSystem::default();
        let m = sys.orthographic(2.0);

        let p = ndc(m, Vec3::new(30.0, 15.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);

        // Same x/y regardless of depth.
        let q = ndc(m, Vec3::new(30.0, 15.0, -30.0));
        assert_relative_eq!(q.x, 1.0, epsilon = 1e-5);
        assert!(q.z > p.z);
    }

    #[test]
    fn projection_variant_follows_mode() {
        let sys = ProjectionSystem::default();
        assert!(matches!(sys.projection(ViewMode::Perspective, 1.0), Projection::Mono(_)));
        assert!(matches!(sys.projection(ViewMode::Orthographic, 1.0), Projection::Mono(_)));
        assert!(matches!(sys.projection(ViewMode::Stereo, 1.0), Projection::Stereo { .. }));
    }

    #[test]
    fn modes_cycle_through_all() {
        let mut mode = ViewMode::default();
        assert_eq!(mode, ViewMode::Perspective);
        for _ in 0..ViewMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, ViewMode::Perspective);
    }
}
