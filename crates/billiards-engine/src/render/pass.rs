use glam::Mat4;

use crate::projection::Projection;

/// Colour channels a pass writes to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorChannels {
    All,
    /// Left eye of the anaglyph.
    Red,
    /// Right eye of the anaglyph (green + blue).
    Cyan,
}

impl ColorChannels {
    pub fn writes(self) -> wgpu::ColorWrites {
        match self {
            ColorChannels::All => wgpu::ColorWrites::ALL,
            ColorChannels::Red => wgpu::ColorWrites::RED,
            ColorChannels::Cyan => wgpu::ColorWrites::GREEN | wgpu::ColorWrites::BLUE,
        }
    }
}

/// One render pass over every shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassPlan {
    pub projection: Mat4,
    pub channels: ColorChannels,
    /// Clear colour before drawing; otherwise the previous pass is kept.
    /// Depth is cleared by every pass.
    pub clear_color: bool,
}

/// Passes needed to draw one frame with `projection`.
///
/// Stereo draws the left eye into red over a cleared target, then the right
/// eye into green and blue on top of it.
pub fn plan_passes(projection: &Projection) -> Vec<PassPlan> {
    match *projection {
        Projection::Mono(m) => vec![PassPlan {
            projection: m,
            channels: ColorChannels::All,
            clear_color: true,
        }],
        Projection::Stereo { left, right } => vec![
            PassPlan {
                projection: left,
                channels: ColorChannels::Red,
                clear_color: true,
            },
            PassPlan {
                projection: right,
                channels: ColorChannels::Cyan,
                clear_color: false,
            },
        ],
    }
}
