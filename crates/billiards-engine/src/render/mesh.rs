use std::collections::HashMap;
use std::num::NonZeroU64;

use glam::{Mat4, Vec3};

use crate::device::DEPTH_FORMAT;
use crate::projection::Projection;
use crate::render::{RenderCtx, RenderTarget};
use crate::shape::{PrimitiveKind, Shape, VertexLayout};

use super::pass::{plan_passes, ColorChannels};
use super::uniform::{shape_model_view, slot_capacity, slot_stride, MeshUniform};

// ── vertex layouts ────────────────────────────────────────────────────────

const FLAT_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const SHADED_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

fn vertex_buffer_layout(layout: VertexLayout) -> wgpu::VertexBufferLayout<'static> {
    let attributes: &'static [wgpu::VertexAttribute] = match layout {
        VertexLayout::PositionColor => &FLAT_ATTRS,
        VertexLayout::PositionColorNormal => &SHADED_ATTRS,
    };
    wgpu::VertexBufferLayout {
        array_stride: (layout.stride() * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

fn vertex_entry(layout: VertexLayout) -> &'static str {
    match layout {
        VertexLayout::PositionColor => "vs_flat",
        VertexLayout::PositionColorNormal => "vs_shaded",
    }
}

fn primitive_state(kind: PrimitiveKind) -> wgpu::PrimitiveState {
    let (topology, strip_index_format) = match kind {
        PrimitiveKind::TriangleList => (wgpu::PrimitiveTopology::TriangleList, None),
        PrimitiveKind::TriangleStrip => (
            wgpu::PrimitiveTopology::TriangleStrip,
            Some(wgpu::IndexFormat::Uint32),
        ),
    };
    wgpu::PrimitiveState {
        topology,
        strip_index_format,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        unclipped_depth: false,
        polygon_mode: wgpu::PolygonMode::Fill,
        conservative: false,
    }
}

/// Global colour multiplier applied in the fragment stage (`uColor`).
const TINT: Vec3 = Vec3::ONE;

// ── renderer ──────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
struct PipelineKey {
    layout: VertexLayout,
    primitive: PrimitiveKind,
    channels: ColorChannels,
    format: wgpu::TextureFormat,
}

/// Draws uploaded shapes with depth testing, in one or two passes.
///
/// Every (pass, shape) pair gets its own slot in a dynamic-offset uniform
/// buffer, so all uniforms are written with a single `write_buffer` before the
/// passes are recorded.
pub struct MeshRenderer {
    shader: Option<wgpu::ShaderModule>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    pipeline_layout: Option<wgpu::PipelineLayout>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    uniform_buffer: Option<wgpu::Buffer>,
    uniform_capacity: usize,
    uniform_stride: u64,
    bind_group: Option<wgpu::BindGroup>,
}

impl Default for MeshRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self {
            shader: None,
            bind_group_layout: None,
            pipeline_layout: None,
            pipelines: HashMap::new(),
            uniform_buffer: None,
            uniform_capacity: 0,
            uniform_stride: 0,
            bind_group: None,
        }
    }

    /// Clears the target and draws `shapes`.
    ///
    /// `model_view` is the camera transform; each shape adds its kind's
    /// model-space offset on top.
    pub fn render<'s>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        shapes: impl IntoIterator<Item = &'s Shape>,
        projection: &Projection,
        model_view: Mat4,
        clear: wgpu::Color,
    ) {
        let shapes: Vec<&Shape> = shapes.into_iter().collect();
        let passes = plan_passes(projection);

        self.ensure_shared(ctx);
        self.ensure_uniform_capacity(ctx, passes.len() * shapes.len());
        for pass in &passes {
            for shape in &shapes {
                self.ensure_pipeline(ctx, shape.layout(), shape.primitive(), pass.channels);
            }
        }

        let projections: Vec<Mat4> = passes.iter().map(|p| p.projection).collect();
        self.write_uniforms(ctx, &projections, &shapes, model_view);

        let Some(bind_group) = self.bind_group.as_ref() else { return };

        for (pass_index, pass) in passes.iter().enumerate() {
            let load = if pass.clear_color {
                wgpu::LoadOp::Clear(clear)
            } else {
                wgpu::LoadOp::Load
            };

            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("billiards mesh pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: target.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for (shape_index, shape) in shapes.iter().enumerate() {
                let key = PipelineKey {
                    layout: shape.layout(),
                    primitive: shape.primitive(),
                    channels: pass.channels,
                    format: ctx.surface_format,
                };
                let Some(pipeline) = self.pipelines.get(&key) else { continue };

                let slot = pass_index * shapes.len() + shape_index;
                let offset = (slot as u64 * self.uniform_stride) as u32;

                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(0, bind_group, &[offset]);
                rpass.set_vertex_buffer(0, shape.vertex_buffer().slice(..));
                rpass.set_index_buffer(shape.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..shape.index_count(), 0, 0..1);
            }
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_shared(&mut self, ctx: &RenderCtx<'_>) {
        if self.shader.is_some() && self.pipeline_layout.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("billiards mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("billiards mesh bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: NonZeroU64::new(MeshUniform::SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("billiards mesh pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        self.shader = Some(shader);
        self.bind_group_layout = Some(bind_group_layout);
        self.pipeline_layout = Some(pipeline_layout);
        self.pipelines.clear();
        self.bind_group = None;
        self.uniform_buffer = None;
        self.uniform_capacity = 0;
    }

    fn ensure_pipeline(
        &mut self,
        ctx: &RenderCtx<'_>,
        layout: VertexLayout,
        primitive: PrimitiveKind,
        channels: ColorChannels,
    ) {
        let key = PipelineKey {
            layout,
            primitive,
            channels,
            format: ctx.surface_format,
        };
        if self.pipelines.contains_key(&key) {
            return;
        }

        let Some(shader) = self.shader.as_ref() else { return };
        let Some(pipeline_layout) = self.pipeline_layout.as_ref() else { return };

        log::debug!("creating mesh pipeline {key:?}");

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("billiards mesh pipeline"),
            layout: Some(pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vertex_entry(layout)),
                compilation_options: Default::default(),
                buffers: &[vertex_buffer_layout(layout)],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: channels.writes(),
                })],
            }),
            primitive: primitive_state(primitive),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipelines.insert(key, pipeline);
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, needed: usize) {
        let stride = slot_stride(ctx.limits.min_uniform_buffer_offset_alignment);
        if self.uniform_buffer.is_some() && self.uniform_capacity >= needed && self.uniform_stride == stride {
            return;
        }
        let Some(bind_group_layout) = self.bind_group_layout.as_ref() else { return };

        let capacity = slot_capacity(needed);
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("billiards mesh uniforms"),
            size: capacity as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("billiards mesh bind group"),
            layout: bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(MeshUniform::SIZE),
                }),
            }],
        });

        log::debug!("mesh uniform buffer grown to {capacity} slots");

        if let Some(old) = self.uniform_buffer.replace(buffer) {
            old.destroy();
        }
        self.bind_group = Some(bind_group);
        self.uniform_capacity = capacity;
        self.uniform_stride = stride;
    }

    fn write_uniforms(
        &self,
        ctx: &RenderCtx<'_>,
        projections: &[Mat4],
        shapes: &[&Shape],
        model_view: Mat4,
    ) {
        let Some(buffer) = self.uniform_buffer.as_ref() else { return };
        if shapes.is_empty() {
            return;
        }

        let stride = self.uniform_stride as usize;
        let mut bytes = vec![0u8; projections.len() * shapes.len() * stride];

        for (pass_index, projection) in projections.iter().enumerate() {
            for (shape_index, shape) in shapes.iter().enumerate() {
                let mv = shape_model_view(shape.kind(), model_view);
                let uniform = MeshUniform::new(*projection, mv, TINT);
                let at = (pass_index * shapes.len() + shape_index) * stride;
                bytes[at..at + MeshUniform::SIZE as usize]
                    .copy_from_slice(bytemuck::bytes_of(&uniform));
            }
        }

        ctx.queue.write_buffer(buffer, 0, &bytes);
    }
}

impl Drop for MeshRenderer {
    fn drop(&mut self) {
        if let Some(buffer) = self.uniform_buffer.take() {
            buffer.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layouts_match_strides() {
        let flat = vertex_buffer_layout(VertexLayout::PositionColor);
        assert_eq!(flat.array_stride, 24);
        assert_eq!(flat.attributes.len(), 2);
        assert_eq!(flat.attributes[1].offset, 12);

        let shaded = vertex_buffer_layout(VertexLayout::PositionColorNormal);
        assert_eq!(shaded.array_stride, 36);
        assert_eq!(shaded.attributes[2].shader_location, 2);
        assert_eq!(shaded.attributes[2].offset, 24);
    }

    #[test]
    fn strips_restart_on_u32_indices() {
        let strip = primitive_state(PrimitiveKind::TriangleStrip);
        assert_eq!(strip.topology, wgpu::PrimitiveTopology::TriangleStrip);
        assert_eq!(strip.strip_index_format, Some(wgpu::IndexFormat::Uint32));

        let list = primitive_state(PrimitiveKind::TriangleList);
        assert_eq!(list.strip_index_format, None);
        assert_eq!(list.cull_mode, None);
    }

    #[test]
    fn entry_point_follows_layout() {
        assert_eq!(vertex_entry(VertexLayout::PositionColor), "vs_flat");
        assert_eq!(vertex_entry(VertexLayout::PositionColorNormal), "vs_shaded");
    }
}
