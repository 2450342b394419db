use wgpu::util::DeviceExt;

use super::{PrimitiveKind, ShapeKind, VertexLayout};
use crate::geometry::{combine, MeshBuffer, BOX_STRIDE};

/// Uploaded mesh plus the information needed to draw it.
///
/// Buffers are destroyed when the shape is dropped.
pub struct Shape {
    kind: ShapeKind,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Shape {
    /// Uploads `mesh` as a shape of the given kind.
    ///
    /// The mesh must use the vertex layout of `kind`.
    pub fn upload(device: &wgpu::Device, kind: ShapeKind, mesh: &MeshBuffer) -> Self {
        debug_assert_eq!(mesh.vertices.len() % kind.layout().stride(), 0);

        let label = match kind {
            ShapeKind::Table => "billiards table",
            ShapeKind::Ball => "billiards ball",
        };

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            kind,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Merges box pieces into one table shape and uploads it.
    pub fn table(device: &wgpu::Device, pieces: &[MeshBuffer]) -> Self {
        let merged = combine(pieces, BOX_STRIDE);
        Self::upload(device, ShapeKind::Table, &merged)
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn primitive(&self) -> PrimitiveKind {
        self.kind.primitive()
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.kind.layout()
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    #[inline]
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    #[inline]
    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }
}

impl Drop for Shape {
    fn drop(&mut self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

/// Owns every shape of the scene for the lifetime of the GPU context.
#[derive(Default)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn extend(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.shapes.extend(shapes);
    }

    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Releases all GPU buffers.
    pub fn shutdown(self) {
        log::info!("releasing {} shapes", self.shapes.len());
        drop(self);
    }
}
