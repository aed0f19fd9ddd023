//! Composite pass — draws each region's offscreen color target into its
//! screen-space rectangle on the surface.
//!
//! Region space and the wgpu framebuffer convention are both
//! top-left-origin, so a region rect maps straight onto a viewport; the
//! only axis flip left over is NDC-to-UV inside the shared fullscreen
//! vertex helper.

use crate::error::MullionError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::target::RegionTarget;
use crate::layout::NormRect;

/// A region's screen-space viewport in physical pixels, clamped inside the
/// surface so a rounding overshoot can never trip viewport validation.
#[must_use]
pub fn region_viewport(
    rect: NormRect,
    screen_width: u32,
    screen_height: u32,
) -> (f32, f32, f32, f32) {
    let sw = screen_width as f32;
    let sh = screen_height as f32;
    let x = (rect.x * sw).clamp(0.0, sw);
    let y = (rect.y * sh).clamp(0.0, sh);
    let width = (rect.width * sw).max(1.0).min(sw - x);
    let height = (rect.height * sh).max(1.0).min(sh - y);
    (x, y, width, height)
}

/// Blits pane color targets onto the surface, one viewport-sized
/// fullscreen triangle per region.
pub struct Compositor {
    pipeline: wgpu::RenderPipeline,
    blit_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl Compositor {
    /// Create the blit pipeline and shared sampler.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::ShaderCompose`] if the blit shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
    ) -> Result<Self, MullionError> {
        let blit_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Pane Blit Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            },
        );
        let sampler = linear_sampler(&context.device, "Pane Blit Sampler");
        let shader =
            composer.compose(&context.device, "Pane Blit", "screen/blit.wgsl")?;
        let pipeline = create_screen_space_pipeline(
            &context.device,
            "Pane Blit",
            &shader,
            context.format(),
            None,
            &[&blit_layout],
        );
        Ok(Self {
            pipeline,
            blit_layout,
            sampler,
        })
    }

    /// Layout the target pool builds its blit bind groups against.
    #[must_use]
    pub fn blit_layout(&self) -> &wgpu::BindGroupLayout {
        &self.blit_layout
    }

    /// Sampler the target pool builds its blit bind groups with.
    #[must_use]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Draw one region's target into the given viewport of the active pass.
    pub fn draw_pane(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        target: &RegionTarget,
        viewport: (f32, f32, f32, f32),
    ) {
        let (x, y, width, height) = viewport;
        pass.set_viewport(x, y, width, height, 0.0, 1.0);
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &target.blit_bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_maps_region_directly() {
        let rect = NormRect::new(0.5, 0.25, 0.5, 0.5);
        assert_eq!(
            region_viewport(rect, 1200, 900),
            (600.0, 225.0, 600.0, 450.0)
        );
    }

    #[test]
    fn viewport_is_clamped_inside_the_surface() {
        // Rounding at odd sizes can push x + width past the surface edge.
        let rect = NormRect::new(0.6667, 0.0, 0.3333, 1.0);
        let (x, _, width, _) = region_viewport(rect, 999, 500);
        assert!(x + width <= 999.0);
    }

    #[test]
    fn viewport_never_collapses() {
        let rect = NormRect::new(0.0, 0.0, 0.0001, 0.0001);
        let (_, _, width, height) = region_viewport(rect, 1200, 900);
        assert!(width >= 1.0);
        assert!(height >= 1.0);
    }
}
