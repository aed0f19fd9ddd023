//! Workspace engine: ties the layout core, GPU targets, renderers, and frame
//! timing together behind [`WorkspaceEngine`], driving per-frame input,
//! compositing, and presentation.

mod input;
mod timing;

use std::f32::consts::TAU;

use self::timing::FrameTiming;
use crate::error::MullionError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::target::TargetPool;
use crate::layout::{
    BoundaryEngine, ContentKind, LayoutError, NormRect, Region, RegionStore,
    TriangleStyle,
};
use crate::options::Options;
use crate::renderer::compositor::{region_viewport, Compositor};
use crate::renderer::content::{PaneContent, TrianglePane};
use crate::renderer::lines::BoundaryLineRenderer;

/// One region to register at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    /// Unique region name.
    pub name: String,
    /// Content tag, fixed for the region's lifetime.
    pub kind: ContentKind,
    /// Initial normalized geometry.
    pub rect: NormRect,
}

impl RegionSpec {
    /// Convenience constructor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: ContentKind,
        rect: NormRect,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            rect,
        }
    }
}

/// Startup description of the workspace, owned by the application root.
///
/// Replaces the fixed region list (and assorted globals) of earlier
/// revisions with explicit configuration passed to initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceConfig {
    /// Regions to register, in display order.
    pub regions: Vec<RegionSpec>,
}

impl Default for WorkspaceConfig {
    /// Four content quadrants plus a reserved status strip along the bottom
    /// for the overlay to align to.
    fn default() -> Self {
        let triangle = |color: [f32; 3], phase: f32, spin: f32| {
            ContentKind::Triangle(TriangleStyle { color, phase, spin })
        };
        Self {
            regions: vec![
                RegionSpec::new(
                    "quad_tl",
                    triangle([0.0, 0.8, 0.2], 0.0, 0.4),
                    NormRect::new(0.0, 0.0, 0.5, 0.475),
                ),
                RegionSpec::new(
                    "quad_tr",
                    triangle([0.9, 0.1, 0.1], -TAU / 4.0, -0.3),
                    NormRect::new(0.5, 0.0, 0.5, 0.475),
                ),
                RegionSpec::new(
                    "quad_bl",
                    triangle([0.1, 0.3, 0.9], TAU / 2.0, 0.5),
                    NormRect::new(0.0, 0.475, 0.5, 0.475),
                ),
                RegionSpec::new(
                    "quad_br",
                    triangle([0.9, 0.9, 0.1], TAU / 4.0, -0.6),
                    NormRect::new(0.5, 0.475, 0.5, 0.475),
                ),
                RegionSpec::new(
                    "status",
                    ContentKind::Reserved,
                    NormRect::new(0.0, 0.95, 1.0, 0.05),
                ),
            ],
        }
    }
}

/// The application root: owns the GPU context, the region layout, the
/// offscreen target pool, and every renderer.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to draw panes, composite, and
/// present. Call [`resize`](Self::resize) when the window size changes.
/// Pointer input is forwarded through
/// [`handle_input`](Self::handle_input), which answers with the cursor
/// shape the window system should show.
///
/// # Resource lifecycle
///
/// All GPU resources are created during construction (render targets are
/// also re-created as region geometry changes) and released together when
/// the engine drops — the single teardown path.
pub struct WorkspaceEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    _composer: ShaderComposer,

    store: RegionStore,
    boundaries: BoundaryEngine,
    targets: TargetPool,
    compositor: Compositor,
    lines: BoundaryLineRenderer,
    triangle_pane: TrianglePane,

    options: Options,
    frame_timing: FrameTiming,
    cursor: (f32, f32),
    clock: f32,
}

impl WorkspaceEngine {
    /// Build an engine for the given window and workspace description.
    ///
    /// `size` is the initial surface size in physical pixels. Targets for
    /// every content region are pre-warmed before the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError`] if GPU bring-up, shader composition, or
    /// region registration fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        config: WorkspaceConfig,
        options: Options,
    ) -> Result<Self, MullionError> {
        let context = RenderContext::new(window, size).await?;
        let mut composer = ShaderComposer::new()?;
        let compositor = Compositor::new(&context, &mut composer)?;
        let lines = BoundaryLineRenderer::new(&context, &mut composer)?;
        let triangle_pane = TrianglePane::new(&context, &mut composer)?;
        let targets = TargetPool::new(context.format());

        let mut store = RegionStore::new(size.0, size.1);
        for spec in config.regions {
            store.add_region(spec.name, spec.kind, spec.rect)?;
        }
        let mut boundaries = BoundaryEngine::new(&options.layout);
        boundaries.recompute(&store);

        let mut engine = Self {
            context,
            _composer: composer,
            store,
            boundaries,
            targets,
            compositor,
            lines,
            triangle_pane,
            options,
            frame_timing: FrameTiming::new(),
            cursor: (0.0, 0.0),
            clock: 0.0,
        };
        engine.sync_all_targets();
        Ok(engine)
    }

    /// Execute one frame: pane passes, composite, boundary bars, overlay,
    /// present.
    ///
    /// `overlay` runs after compositing with the frame's encoder and surface
    /// view, so the immediate-mode UI always paints last. Pass a no-op for
    /// overlay-less hosts.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render<F>(
        &mut self,
        dt: f32,
        overlay: F,
    ) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&RenderContext, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        self.clock += dt;
        // Lazy-create plus resize in one place; a no-op when geometry is
        // stable.
        self.sync_all_targets();

        let mut encoder = self.context.create_encoder();
        let clear = self.options.appearance.clear_color();

        for region in self.store.regions() {
            if !region.kind.wants_target() {
                continue;
            }
            let Some(mut pass) =
                self.targets.pane_pass(&mut encoder, &region.name, clear)
            else {
                // Target incomplete or missing; skip this region's content.
                continue;
            };
            self.triangle_pane.encode(
                &self.context,
                &mut pass,
                region,
                self.clock,
            );
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Composite Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(clear),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

            let screen = self.store.screen_size();
            for region in self.store.regions() {
                if !region.kind.wants_target() {
                    continue;
                }
                if let Some(target) = self.targets.target(&region.name) {
                    let viewport =
                        region_viewport(region.rect, screen.0, screen.1);
                    self.compositor.draw_pane(&mut pass, target, viewport);
                }
            }

            if self.options.boundary_lines.show {
                self.lines.draw(
                    &self.context,
                    &mut pass,
                    self.boundaries.positions(),
                    screen,
                    &self.options.boundary_lines,
                );
            }
        }

        overlay(&self.context, &mut encoder, &view);

        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize the surface and re-sync every region target to the new pixel
    /// dimensions. Normalized region geometry is untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.store.update_screen_size(width, height);
            self.sync_all_targets();
        }
    }

    /// Explicitly resize one region (the non-drag mutation path).
    ///
    /// Recomputes the cached boundary positions and re-syncs targets.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the region is unknown or the new geometry
    /// is invalid; nothing changes on error.
    pub fn set_region_rect(
        &mut self,
        name: &str,
        rect: NormRect,
    ) -> Result<(), LayoutError> {
        let index = self.store.region_index(name)?;
        self.store.update_region(index, rect)?;
        self.boundaries.recompute(&self.store);
        self.sync_all_targets();
        Ok(())
    }

    /// Current runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the runtime options; layout tuning propagates to the
    /// boundary engine immediately.
    pub fn set_options(&mut self, options: Options) {
        self.boundaries.set_config(&options.layout);
        self.options = options;
    }

    /// All regions in display order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        self.store.regions()
    }

    /// Read access to the region store.
    #[must_use]
    pub fn layout(&self) -> &RegionStore {
        &self.store
    }

    /// Cached `(vertical, horizontal)` boundary positions.
    #[must_use]
    pub fn boundary_positions(&self) -> (f32, f32) {
        self.boundaries.positions()
    }

    /// Whether a boundary drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.boundaries.is_dragging()
    }

    /// A region's screen rectangle `(x, y, width, height)` in physical
    /// pixels, for overlay panels that align to reserved regions.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NameNotFound`] for an unknown region.
    pub fn region_screen_rect(
        &self,
        name: &str,
    ) -> Result<(f32, f32, f32, f32), LayoutError> {
        let region = self.store.region(name)?;
        let (width, height) = self.store.screen_size();
        Ok(region_viewport(region.rect, width, height))
    }

    /// Pixel size of a region's live render target, if any.
    #[must_use]
    pub fn target_size(&self, name: &str) -> Option<(u32, u32)> {
        self.targets.target(name).map(|t| (t.width, t.height))
    }

    /// Smoothed frames-per-second estimate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    fn sync_all_targets(&mut self) {
        let screen = self.store.screen_size();
        for region in self.store.regions() {
            let result = self.targets.sync(
                &self.context,
                self.compositor.blit_layout(),
                self.compositor.sampler(),
                region,
                screen,
            );
            if let Err(e) = result {
                log::error!("{e}");
            }
        }
    }
}

impl Drop for WorkspaceEngine {
    fn drop(&mut self) {
        self.targets.destroy_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_workspace_is_well_formed() {
        let config = WorkspaceConfig::default();
        let mut store = RegionStore::new(1200, 900);
        for spec in config.regions {
            store.add_region(spec.name, spec.kind, spec.rect).unwrap();
        }
        assert_eq!(store.len(), 5);
        assert!(matches!(
            store.region("status").unwrap().kind,
            ContentKind::Reserved
        ));

        // The quadrants share clean interior edges for the boundary engine.
        let mut boundaries =
            BoundaryEngine::new(&crate::options::LayoutOptions::default());
        boundaries.recompute(&store);
        let (vertical, horizontal) = boundaries.positions();
        assert!((vertical - 0.5).abs() < 1e-6);
        assert!((horizontal - 0.475).abs() < 1e-6);
    }
}
