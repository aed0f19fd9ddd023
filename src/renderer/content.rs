//! Pane content render strategies.
//!
//! Content selection is dispatched on each region's [`ContentKind`] through
//! the [`PaneContent`] trait, keeping region identity decoupled from
//! rendering behavior. The contract with a strategy is minimal: when
//! `encode` runs, the region's offscreen target is bound and the viewport
//! already covers it.

use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

use crate::error::MullionError;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::target::DEPTH_FORMAT;
use crate::layout::{ContentKind, Region};

/// A render strategy for pane content.
pub trait PaneContent {
    /// Record draw commands for `region` into the already-bound pane pass.
    ///
    /// `elapsed` is the workspace clock in seconds, for animated content.
    fn encode(
        &mut self,
        context: &RenderContext,
        pass: &mut wgpu::RenderPass<'_>,
        region: &Region,
        elapsed: f32,
    );
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct TriangleParams {
    color: [f32; 4],
    phase: f32,
    _pad: [f32; 3],
}

struct PaneUniform {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Placeholder pane content: one spinning triangle per region, colored and
/// phased by the region's [`ContentKind::Triangle`] style.
pub struct TrianglePane {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniforms: FxHashMap<String, PaneUniform>,
}

impl TrianglePane {
    /// Create the triangle pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::ShaderCompose`] if the triangle shader fails
    /// to compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
    ) -> Result<Self, MullionError> {
        let shader = composer.compose(
            &context.device,
            "Pane Triangle",
            "raster/pane_triangle.wgsl",
        )?;

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Pane Triangle Layout"),
                entries: &[uniform_buffer(0)],
            },
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Pane Triangle Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            },
        );
        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Pane Triangle Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
            uniforms: FxHashMap::default(),
        })
    }

    /// Make sure a uniform buffer and bind group exist for the region.
    fn ensure_uniform(&mut self, context: &RenderContext, name: &str) {
        if self.uniforms.contains_key(name) {
            return;
        }
        let params = TriangleParams {
            color: [1.0, 1.0, 1.0, 1.0],
            phase: 0.0,
            _pad: [0.0; 3],
        };
        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Pane Triangle Params '{name}'")),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );
        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("Pane Triangle Bind '{name}'")),
                    layout: &self.bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
        let _ = self
            .uniforms
            .insert(name.to_owned(), PaneUniform { buffer, bind_group });
    }
}

impl PaneContent for TrianglePane {
    fn encode(
        &mut self,
        context: &RenderContext,
        pass: &mut wgpu::RenderPass<'_>,
        region: &Region,
        elapsed: f32,
    ) {
        let ContentKind::Triangle(style) = region.kind else {
            return;
        };
        let params = TriangleParams {
            color: [style.color[0], style.color[1], style.color[2], 1.0],
            phase: style.phase + elapsed * style.spin,
            _pad: [0.0; 3],
        };
        self.ensure_uniform(context, &region.name);
        let Some(uniform) = self.uniforms.get(&region.name) else {
            return;
        };
        context.queue.write_buffer(
            &uniform.buffer,
            0,
            bytemuck::cast_slice(&[params]),
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &uniform.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
