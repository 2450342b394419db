/// CPU-side mesh data awaiting upload.
///
/// `vertices` is interleaved; the stride is implied by whoever produced the
/// buffer (see [`super::BOX_STRIDE`] / [`super::SPHERE_STRIDE`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    #[inline]
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of whole vertices for the given stride; `0` for a zero stride.
    #[inline]
    pub fn vertex_count(&self, stride: usize) -> usize {
        self.vertices.len().checked_div(stride).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Concatenates `buffers` into one, rebasing every index onto the merged
/// vertex array.
///
/// Each buffer's indices are shifted by the number of vertices that precede
/// it. `vertex_stride` must be the stride shared by all inputs; buffers with a
/// different layout produce wrong offsets and are not detected here. A zero
/// stride leaves every index unshifted.
pub fn combine(buffers: &[MeshBuffer], vertex_stride: usize) -> MeshBuffer {
    let total_vertices = buffers.iter().map(|b| b.vertices.len()).sum();
    let total_indices = buffers.iter().map(|b| b.indices.len()).sum();

    let mut out = MeshBuffer {
        vertices: Vec::with_capacity(total_vertices),
        indices: Vec::with_capacity(total_indices),
    };

    for buffer in buffers {
        let offset = out.vertices.len().checked_div(vertex_stride).unwrap_or(0) as u32;
        out.vertices.extend_from_slice(&buffer.vertices);
        out.indices.extend(buffer.indices.iter().map(|i| i + offset));
    }

    out
}
