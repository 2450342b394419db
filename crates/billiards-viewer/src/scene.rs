//! Pool scene layout.
//!
//! World units are metres with +Y up; the table top sits at `y = 1.1` and
//! spans `x ∈ [0, 4]`, `z ∈ [0, 2]`.

use glam::Vec3;

use billiards_engine::geometry::{build_box, MeshBuffer};

/// Scene tuning.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneConfig {
    /// Uniform scale from scene units to display units.
    pub world_scale: f32,
    pub ball_radius: f32,
    pub sphere_resolution: u32,
    /// Grey level the frame is cleared to.
    pub clear_grey: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            world_scale: 15.0,
            ball_radius: 0.05,
            sphere_resolution: 16,
            clear_grey: 0.5,
        }
    }
}

/// Ball placement before upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BallSpec {
    pub center: Vec3,
    pub color: Vec3,
}

const FELT: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const POCKET: Vec3 = Vec3::ZERO;
const LAMP_LIGHT: Vec3 = Vec3::new(1.0, 1.0, 0.0);
const FLOOR: Vec3 = Vec3::ONE;

// 0..255 triples are scaled into 0..1. Passed unscaled they would clamp to
// saturated yellow/white and lose the wood tones.
fn rgb8(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f32, g as f32, b as f32) / 255.0
}

fn wood() -> Vec3 {
    rgb8(153, 51, 0)
}

fn cue_wood() -> Vec3 {
    rgb8(153, 102, 51)
}

/// Boxes making up the table, its furniture and the floor.
pub fn table_pieces() -> Vec<MeshBuffer> {
    let b = |o: [f32; 3], e: [f32; 3], c: Vec3| build_box(Vec3::from(o), Vec3::from(e), c);
    let pocket = [0.15, 0.1, 0.15];

    vec![
        // felt
        b([0.0, 1.0, 0.0], [4.0, 0.1, 2.0], FELT),
        // pockets
        b([0.0, 1.001, 0.0], pocket, POCKET),
        b([0.0, 1.001, 1.85], pocket, POCKET),
        b([3.85, 1.001, 0.0], pocket, POCKET),
        b([3.85, 1.001, 1.85], pocket, POCKET),
        b([3.85 / 2.0, 1.001, 0.0], pocket, POCKET),
        b([3.85 / 2.0, 1.001, 1.85], pocket, POCKET),
        // rails
        b([-0.2, 1.0, -0.2], [0.2, 0.2, 2.4], wood()),
        b([4.0, 1.0, -0.2], [0.2, 0.2, 2.4], wood()),
        b([4.0, 1.0, -0.2], [-4.2, 0.2, 0.2], wood()),
        b([4.0, 1.0, 2.0], [-4.2, 0.2, 0.2], wood()),
        // legs
        b([0.0, 0.0, 0.0], [-0.2, 1.0, -0.2], wood()),
        b([4.0, 0.0, 0.0], [0.2, 1.0, -0.2], wood()),
        b([0.0, 0.0, 2.0], [-0.2, 1.0, 0.2], wood()),
        b([4.0, 0.0, 2.0], [0.2, 1.0, 0.2], wood()),
        // lamp
        b([1.0, 3.0, 1.0], [2.0, 0.2, 0.2], wood()),
        b([1.0, 2.9, 1.0], [2.0, 0.1, 0.2], LAMP_LIGHT),
        // cue
        b([3.85, 2.0, 1.0], [4.2, 0.05, 0.05], cue_wood()),
        // floor
        b([-8.0, 0.0, -9.0], [20.0, -0.2, 20.0], FLOOR),
    ]
}

/// The 15-ball rack plus the cue ball.
///
/// The rack is a triangle of rows five, four, three, two and one ball wide,
/// rows spaced `√3/20` apart along +X.
pub fn ball_rack() -> Vec<BallSpec> {
    const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    const BLACK: Vec3 = Vec3::ZERO;
    const WHITE: Vec3 = Vec3::ONE;

    let delta = 1.732 / 20.0;
    let y = 1.15;
    let row = |k: f32, z: f32, color: Vec3| BallSpec {
        center: Vec3::new(1.1 + k * delta, y, z),
        color,
    };

    vec![
        row(0.0, 1.0, RED),
        row(0.0, 1.1, BLUE),
        row(0.0, 1.2, RED),
        row(0.0, 0.9, BLUE),
        row(0.0, 0.8, RED),
        row(1.0, 1.15, BLUE),
        row(1.0, 1.05, RED),
        row(1.0, 0.95, BLUE),
        row(1.0, 0.85, BLUE),
        row(2.0, 1.10, RED),
        row(2.0, 1.00, BLACK),
        row(2.0, 0.90, RED),
        row(3.0, 1.05, RED),
        row(3.0, 0.95, BLUE),
        row(4.0, 1.0, BLUE),
        BallSpec {
            center: Vec3::new(3.3, y, 1.0),
            color: WHITE,
        },
    ]
}
