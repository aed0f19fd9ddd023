//! Boundary separator bars.
//!
//! Each boundary is drawn as a screen-space quad of the configured pixel
//! width (wgpu has no line-width state), recomputed every frame from the
//! boundary engine's cached positions. Pure visual drag affordance.

use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::error::MullionError;
use crate::gpu::pipeline_helpers::uniform_buffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::BoundaryLineOptions;

/// Two quads, six vertices each: vertical bar first, horizontal second.
const VERTEX_COUNT: usize = 12;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct LineParams {
    color: [f32; 4],
}

/// NDC vertices for both boundary bars.
///
/// `vertical` / `horizontal` are normalized boundary positions, `width_px`
/// the bar thickness in physical pixels.
#[must_use]
pub fn boundary_quads(
    vertical: f32,
    horizontal: f32,
    screen: (u32, u32),
    width_px: f32,
) -> [Vec2; VERTEX_COUNT] {
    let sw = screen.0 as f32;
    let sh = screen.1 as f32;
    let half = (width_px * 0.5).max(0.5);

    let to_ndc_x = |px: f32| px / sw * 2.0 - 1.0;
    let to_ndc_y = |py: f32| 1.0 - py / sh * 2.0;

    let vx = vertical * sw;
    let x0 = to_ndc_x(vx - half);
    let x1 = to_ndc_x(vx + half);

    let hy = horizontal * sh;
    let y0 = to_ndc_y(hy - half);
    let y1 = to_ndc_y(hy + half);

    [
        // Vertical bar, full height
        Vec2::new(x0, -1.0),
        Vec2::new(x1, -1.0),
        Vec2::new(x1, 1.0),
        Vec2::new(x0, -1.0),
        Vec2::new(x1, 1.0),
        Vec2::new(x0, 1.0),
        // Horizontal bar, full width
        Vec2::new(-1.0, y1),
        Vec2::new(1.0, y1),
        Vec2::new(1.0, y0),
        Vec2::new(-1.0, y1),
        Vec2::new(1.0, y0),
        Vec2::new(-1.0, y0),
    ]
}

/// Draws the two separator bars at the cached boundary positions.
pub struct BoundaryLineRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    params_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
}

impl BoundaryLineRenderer {
    /// Create the bar pipeline and its buffers.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::ShaderCompose`] if the bar shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
    ) -> Result<Self, MullionError> {
        let shader = composer.compose(
            &context.device,
            "Boundary Lines",
            "raster/boundary_lines.wgsl",
        )?;

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Boundary Lines Layout"),
                entries: &[uniform_buffer(0)],
            },
        );

        let params = LineParams {
            color: [0.4, 0.4, 0.4, 1.0],
        };
        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Boundary Lines Params"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Boundary Lines Bind Group"),
                    layout: &bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: params_buffer.as_entire_binding(),
                    }],
                });

        let vertex_buffer =
            context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Boundary Lines Vertices"),
                size: (VERTEX_COUNT * std::mem::size_of::<Vec2>())
                    as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::VERTEX
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Boundary Lines Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            },
        );
        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Boundary Lines Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vec2>()
                            as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        }],
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Ok(Self {
            pipeline,
            bind_group,
            params_buffer,
            vertex_buffer,
        })
    }

    /// Draw both bars into the active surface pass.
    ///
    /// The caller is expected to have gated on
    /// [`BoundaryLineOptions::show`]; this resets the viewport to the full
    /// surface before drawing.
    pub fn draw(
        &self,
        context: &RenderContext,
        pass: &mut wgpu::RenderPass<'_>,
        boundaries: (f32, f32),
        screen: (u32, u32),
        options: &BoundaryLineOptions,
    ) {
        let vertices =
            boundary_quads(boundaries.0, boundaries.1, screen, options.width);
        context.queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&vertices),
        );
        let params = LineParams {
            color: [
                options.color[0],
                options.color[1],
                options.color[2],
                1.0,
            ],
        };
        context.queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[params]),
        );

        pass.set_viewport(
            0.0,
            0.0,
            screen.0 as f32,
            screen.1 as f32,
            0.0,
            1.0,
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..VERTEX_COUNT as u32, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn vertical_bar_is_centered_on_the_boundary() {
        let quads = boundary_quads(0.5, 0.5, (1000, 1000), 2.0);
        // Quad spans 499..501 px around the 500 px boundary.
        assert!((quads[0].x - (-0.002)).abs() < EPS);
        assert!((quads[1].x - 0.002).abs() < EPS);
        // Full height in NDC.
        assert!((quads[0].y - (-1.0)).abs() < EPS);
        assert!((quads[2].y - 1.0).abs() < EPS);
    }

    #[test]
    fn horizontal_bar_flips_into_ndc() {
        let quads = boundary_quads(0.5, 0.25, (1000, 1000), 2.0);
        // 0.25 normalized is 250 px from the top, NDC y = +0.5.
        let ys: Vec<f32> = quads[6..].iter().map(|v| v.y).collect();
        let center = (ys.iter().copied().fold(f32::MIN, f32::max)
            + ys.iter().copied().fold(f32::MAX, f32::min))
            / 2.0;
        assert!((center - 0.5).abs() < 1e-3);
    }

    #[test]
    fn hairline_bars_keep_a_minimum_width() {
        let quads = boundary_quads(0.5, 0.5, (1000, 1000), 0.0);
        assert!(quads[1].x > quads[0].x);
    }
}
