use glam::Vec3;

use crate::geometry::{BOX_STRIDE, SPHERE_STRIDE};

/// How the index buffer of a shape is assembled into triangles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    TriangleList,
    TriangleStrip,
}

/// Interleaved vertex format of a shape's vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexLayout {
    /// `position(3) color(3)`
    PositionColor,
    /// `position(3) color(3) normal(3)`
    PositionColorNormal,
}

impl VertexLayout {
    /// Scalars per vertex.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            VertexLayout::PositionColor => BOX_STRIDE,
            VertexLayout::PositionColorNormal => SPHERE_STRIDE,
        }
    }
}

/// Closed set of shapes the scene is made of.
///
/// Everything that differs per kind at draw time is derived from here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    /// The table and its furniture, merged from boxes.
    Table,
    /// A single ball.
    Ball,
}

impl ShapeKind {
    #[inline]
    pub const fn primitive(self) -> PrimitiveKind {
        match self {
            ShapeKind::Table => PrimitiveKind::TriangleList,
            ShapeKind::Ball => PrimitiveKind::TriangleStrip,
        }
    }

    #[inline]
    pub const fn layout(self) -> VertexLayout {
        match self {
            ShapeKind::Table => VertexLayout::PositionColor,
            ShapeKind::Ball => VertexLayout::PositionColorNormal,
        }
    }

    /// Model-space translation applied before the shared model-view.
    ///
    /// Balls are shifted half a unit along -X relative to the table origin.
    #[inline]
    pub fn model_offset(self) -> Option<Vec3> {
        match self {
            ShapeKind::Table => None,
            ShapeKind::Ball => Some(Vec3::new(-0.5, 0.0, 0.0)),
        }
    }
}
