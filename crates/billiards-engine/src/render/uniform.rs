use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use crate::shape::ShapeKind;

/// Per-draw uniform block, laid out like `Uniforms` in `mesh.wgsl`.
///
/// `mat3x3<f32>` columns are padded to 16 bytes, and so is the trailing
/// `vec3<f32>`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MeshUniform {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
    pub color: [f32; 3],
    pub _pad: f32,
}

impl MeshUniform {
    pub const SIZE: u64 = std::mem::size_of::<MeshUniform>() as u64;

    pub fn new(projection: Mat4, model_view: Mat4, tint: Vec3) -> Self {
        let n = normal_matrix(model_view);
        Self {
            projection: projection.to_cols_array_2d(),
            model_view: model_view.to_cols_array_2d(),
            normal: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
            color: tint.to_array(),
            _pad: 0.0,
        }
    }
}

/// Inverse-transpose of the upper 3x3 of `model_view`.
pub(crate) fn normal_matrix(model_view: Mat4) -> Mat3 {
    Mat3::from_mat4(model_view).inverse().transpose()
}

/// Camera model-view composed with the shape kind's model-space offset.
pub(crate) fn shape_model_view(kind: ShapeKind, model_view: Mat4) -> Mat4 {
    match kind.model_offset() {
        Some(offset) => model_view * Mat4::from_translation(offset),
        None => model_view,
    }
}

/// Distance between consecutive uniform slots.
pub(crate) fn slot_stride(min_offset_alignment: u32) -> u64 {
    let align = u64::from(min_offset_alignment.max(1));
    MeshUniform::SIZE.div_ceil(align) * align
}

/// Slot count to allocate for `needed` draws.
pub(crate) fn slot_capacity(needed: usize) -> usize {
    needed.max(1).next_power_of_two()
}
