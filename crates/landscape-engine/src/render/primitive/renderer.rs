use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::render::program::{LinkedProgram, ProgramLayout, FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::render::{RenderCtx, RenderTarget};

use super::{FrameBatch, Topology};

/// Draws a [`FrameBatch`] with a linked solid-colour program.
///
/// GPU objects are created lazily on first use and rebuilt if the surface
/// format changes. Each recorded submission becomes one `draw` call, issued in
/// record order; the colour uniform is selected with a dynamic offset.
pub struct PrimitiveRenderer {
    program: LinkedProgram,

    pipeline_format: Option<wgpu::TextureFormat>,
    triangles: Option<wgpu::RenderPipeline>,
    lines: Option<wgpu::RenderPipeline>,

    resolution_bgl: Option<wgpu::BindGroupLayout>,
    color_bgl: Option<wgpu::BindGroupLayout>,

    resolution_ubo: Option<wgpu::Buffer>,
    resolution_bind_group: Option<wgpu::BindGroup>,

    color_ubo: Option<wgpu::Buffer>,
    color_bind_group: Option<wgpu::BindGroup>,
    color_capacity: usize,
    color_stride: u64,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    color_scratch: Vec<u8>,
}

impl PrimitiveRenderer {
    pub fn new(program: LinkedProgram) -> Self {
        Self {
            program,
            pipeline_format: None,
            triangles: None,
            lines: None,
            resolution_bgl: None,
            color_bgl: None,
            resolution_ubo: None,
            resolution_bind_group: None,
            color_ubo: None,
            color_bind_group: None,
            color_capacity: 0,
            color_stride: 0,
            vertex_vbo: None,
            vertex_capacity: 0,
            color_scratch: Vec::new(),
        }
    }

    pub fn program(&self) -> &LinkedProgram {
        &self.program
    }

    /// Renders `batch` into `target` on top of whatever it already holds.
    ///
    /// The batch resolution is used when valid, else the context viewport.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, batch: &FrameBatch) {
        if batch.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_resolution_binding(ctx);
        self.ensure_color_capacity(ctx, batch.colors().len());
        self.ensure_vertex_capacity(ctx, batch.vertices().len());

        self.write_resolution_uniform(ctx, batch);
        self.write_color_uniforms(ctx, batch);
        let Some(vbo) = self.vertex_vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(batch.vertices()));

        let Some(triangles) = self.triangles.as_ref() else { return };
        let Some(lines) = self.lines.as_ref() else { return };
        let Some(resolution_bg) = self.resolution_bind_group.as_ref() else { return };
        let Some(color_bg) = self.color_bind_group.as_ref() else { return };

        let layout = self.program.layout();

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("landscape primitive pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(layout.resolution.group, resolution_bg, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        let mut bound: Option<Topology> = None;
        for op in batch.ops() {
            if bound != Some(op.topology) {
                rpass.set_pipeline(match op.topology {
                    Topology::Triangles => triangles,
                    Topology::Lines => lines,
                });
                bound = Some(op.topology);
            }

            let offset = (op.color_slot as u64 * self.color_stride) as u32;
            rpass.set_bind_group(layout.color.group, color_bg, &[offset]);
            rpass.draw(op.first_vertex..op.first_vertex + op.vertex_count, 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.triangles.is_some() {
            return;
        }

        let layout = self.program.layout();

        let vertex_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("landscape vertex shader"),
            source: wgpu::ShaderSource::Wgsl(self.program.vertex().source().into()),
        });
        let fragment_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("landscape fragment shader"),
            source: wgpu::ShaderSource::Wgsl(self.program.fragment().source().into()),
        });

        let resolution_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("landscape resolution bgl"),
            entries: &[uniform_entry(layout.resolution.binding, false, ResolutionUniform::SIZE)],
        });
        let color_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("landscape color bgl"),
            entries: &[uniform_entry(layout.color.binding, true, ColorUniform::SIZE)],
        });

        // Bind group layouts are positional; the linker guarantees groups {0, 1}.
        let groups: [&wgpu::BindGroupLayout; 2] = if layout.resolution.group == 0 {
            [&resolution_bgl, &color_bgl]
        } else {
            [&color_bgl, &resolution_bgl]
        };

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("landscape pipeline layout"),
            bind_group_layouts: &groups,
            immediate_size: 0,
        });

        let build = |topology: Topology, label: &str| {
            create_pipeline(
                ctx,
                &pipeline_layout,
                &vertex_module,
                &fragment_module,
                layout,
                topology,
                label,
            )
        };
        let triangles = build(Topology::Triangles, "landscape triangle pipeline");
        let lines = build(Topology::Lines, "landscape line pipeline");

        self.pipeline_format = Some(ctx.surface_format);
        self.triangles = Some(triangles);
        self.lines = Some(lines);
        self.resolution_bgl = Some(resolution_bgl);
        self.color_bgl = Some(color_bgl);

        // Bind groups belong to the old layouts.
        self.resolution_ubo = None;
        self.resolution_bind_group = None;
        self.color_ubo = None;
        self.color_bind_group = None;
        self.color_capacity = 0;
    }

    fn ensure_resolution_binding(&mut self, ctx: &RenderCtx<'_>) {
        if self.resolution_bind_group.is_some() && self.resolution_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.resolution_bgl.as_ref() else { return };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("landscape resolution ubo"),
            size: ResolutionUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("landscape resolution bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: self.program.layout().resolution.binding,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.resolution_ubo = Some(ubo);
        self.resolution_bind_group = Some(bind_group);
    }

    fn ensure_color_capacity(&mut self, ctx: &RenderCtx<'_>, required_slots: usize) {
        if required_slots <= self.color_capacity && self.color_bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.color_bgl.as_ref() else { return };

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        self.color_stride = ColorUniform::SIZE.div_ceil(alignment) * alignment;

        let new_cap = required_slots.next_power_of_two().max(64);
        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("landscape color ubo"),
            size: new_cap as u64 * self.color_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("landscape color bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: self.program.layout().color.binding,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: NonZeroU64::new(ColorUniform::SIZE),
                }),
            }],
        });

        log::debug!("color ubo grown to {new_cap} slots ({} B stride)", self.color_stride);

        self.color_ubo = Some(ubo);
        self.color_bind_group = Some(bind_group);
        self.color_capacity = new_cap;
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required_vertices: usize) {
        if required_vertices <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }

        let new_cap = required_vertices.next_power_of_two().max(1024);
        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("landscape vertex vbo"),
            size: (new_cap * std::mem::size_of::<[f32; 2]>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }

    fn write_resolution_uniform(&self, ctx: &RenderCtx<'_>, batch: &FrameBatch) {
        let Some(ubo) = self.resolution_ubo.as_ref() else { return };
        let viewport = if batch.resolution().is_valid() {
            batch.resolution()
        } else {
            ctx.viewport
        };
        let u = ResolutionUniform {
            size: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn write_color_uniforms(&mut self, ctx: &RenderCtx<'_>, batch: &FrameBatch) {
        let Some(ubo) = self.color_ubo.as_ref() else { return };
        let stride = self.color_stride as usize;

        self.color_scratch.clear();
        self.color_scratch.resize(batch.colors().len() * stride, 0);
        for (slot, color) in batch.colors().iter().enumerate() {
            let u = ColorUniform { rgba: color.to_array() };
            let start = slot * stride;
            self.color_scratch[start..start + ColorUniform::SIZE as usize]
                .copy_from_slice(bytemuck::bytes_of(&u));
        }
        ctx.queue.write_buffer(ubo, 0, &self.color_scratch);
    }
}

fn uniform_entry(binding: u32, dynamic: bool, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    pipeline_layout: &wgpu::PipelineLayout,
    vertex_module: &wgpu::ShaderModule,
    fragment_module: &wgpu::ShaderModule,
    layout: ProgramLayout,
    topology: Topology,
    label: &str,
) -> wgpu::RenderPipeline {
    let attributes = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: layout.position,
    }];

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(pipeline_layout),

        vertex: wgpu::VertexState {
            module: vertex_module,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &attributes,
            }],
        },

        fragment: Some(wgpu::FragmentState {
            module: fragment_module,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                // No blending: later draws overwrite earlier ones.
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: topology.to_wgpu(),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ResolutionUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

impl ResolutionUniform {
    const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ColorUniform {
    rgba: [f32; 4],
}

impl ColorUniform {
    const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}
