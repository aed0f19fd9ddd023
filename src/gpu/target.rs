use std::fmt;

use rustc_hash::FxHashMap;

use super::render_context::RenderContext;
use crate::layout::{NormRect, Region};

/// Depth attachment format shared by every region target.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Render-target allocation failure. Reported and degraded gracefully —
/// rendering for the region is skipped, the application keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The requested extent cannot be realized on this device.
    Incomplete {
        /// Region the target belongs to.
        name: String,
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete {
                name,
                width,
                height,
            } => write!(
                f,
                "render target for region '{name}' is incomplete at \
                 {width}x{height}"
            ),
        }
    }
}

impl std::error::Error for TargetError {}

/// Pixel extent of a region's render target in the given window.
///
/// Normalized size times window size, rounded, never below one pixel.
#[must_use]
pub fn target_extent(rect: NormRect, screen: (u32, u32)) -> (u32, u32) {
    let width = (rect.width * screen.0 as f32).round().max(1.0) as u32;
    let height = (rect.height * screen.1 as f32).round().max(1.0) as u32;
    (width, height)
}

/// One region's offscreen color+depth target and its compositing bind group.
pub struct RegionTarget {
    /// Color attachment texture.
    pub color: wgpu::Texture,
    /// Default view into the color attachment.
    pub color_view: wgpu::TextureView,
    /// Depth attachment texture.
    pub depth: wgpu::Texture,
    /// Default view into the depth attachment.
    pub depth_view: wgpu::TextureView,
    /// Bind group the compositor samples the color attachment with.
    pub blit_bind_group: wgpu::BindGroup,
    /// Current width in pixels.
    pub width: u32,
    /// Current height in pixels.
    pub height: u32,
}

/// Owns every region's offscreen render target, keyed by region name.
///
/// Targets are created on first sync (or pre-warmed at startup), dropped and
/// reallocated whenever the backing region's pixel size changes, and all
/// released together in [`destroy_all`] — the single teardown path.
///
/// [`destroy_all`]: Self::destroy_all
pub struct TargetPool {
    targets: FxHashMap<String, RegionTarget>,
    color_format: wgpu::TextureFormat,
}

impl TargetPool {
    /// Create an empty pool allocating color attachments in `color_format`.
    #[must_use]
    pub fn new(color_format: wgpu::TextureFormat) -> Self {
        Self {
            targets: FxHashMap::default(),
            color_format,
        }
    }

    /// Bring the region's target in line with its current pixel size.
    ///
    /// Reserved regions are skipped. If a target exists at the right size
    /// this is a no-op; otherwise the old attachments are dropped and new
    /// ones allocated (every drag update changes region geometry, so this
    /// runs hot — the no-op path is the common one outside a drag).
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::Incomplete`] when the extent exceeds the
    /// device's 2D texture limit; no target is left registered for the
    /// region, so its rendering is skipped.
    pub fn sync(
        &mut self,
        context: &RenderContext,
        blit_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        region: &Region,
        screen: (u32, u32),
    ) -> Result<(), TargetError> {
        if !region.kind.wants_target() {
            return Ok(());
        }
        let (width, height) = target_extent(region.rect, screen);
        if let Some(existing) = self.targets.get(&region.name) {
            if existing.width == width && existing.height == height {
                return Ok(());
            }
        }

        let limit = context.device.limits().max_texture_dimension_2d;
        if width > limit || height > limit {
            let _ = self.targets.remove(&region.name);
            return Err(TargetError::Incomplete {
                name: region.name.clone(),
                width,
                height,
            });
        }

        let recreated = self.targets.contains_key(&region.name);
        let target = self.allocate(
            context,
            blit_layout,
            sampler,
            &region.name,
            width,
            height,
        );
        let _ = self.targets.insert(region.name.clone(), target);

        if recreated {
            log::debug!(
                "resized render target for region '{}' to {width}x{height}",
                region.name
            );
        } else {
            log::info!(
                "created render target for region '{}' ({width}x{height})",
                region.name
            );
        }
        Ok(())
    }

    /// The region's current target, if one is live.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&RegionTarget> {
        self.targets.get(name)
    }

    /// Begin a render pass targeting the region's offscreen attachments.
    ///
    /// The pass comes back with color and depth cleared and the viewport set
    /// to the full target; dropping it restores the encoder for the next
    /// pass on every exit path. Returns `None` when the region has no live
    /// target (reserved, or its last allocation failed), in which case the
    /// caller skips the region.
    pub fn pane_pass<'a>(
        &'a self,
        encoder: &'a mut wgpu::CommandEncoder,
        name: &str,
        clear: wgpu::Color,
    ) -> Option<wgpu::RenderPass<'a>> {
        let target = self.targets.get(name)?;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Pane Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &target.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });
        pass.set_viewport(
            0.0,
            0.0,
            target.width as f32,
            target.height as f32,
            0.0,
            1.0,
        );
        Some(pass)
    }

    /// Number of live targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the pool holds no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Release every target. The single teardown path, called once at
    /// shutdown by the engine.
    pub fn destroy_all(&mut self) {
        self.targets.clear();
    }

    fn allocate(
        &self,
        context: &RenderContext,
        blit_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        name: &str,
        width: u32,
        height: u32,
    ) -> RegionTarget {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let color = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("Pane Color '{name}'")),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.color_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color_view =
            color.create_view(&wgpu::TextureViewDescriptor::default());

        let depth = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("Pane Depth '{name}'")),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view =
            depth.create_view(&wgpu::TextureViewDescriptor::default());

        let blit_bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("Pane Blit '{name}'")),
                    layout: blit_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                &color_view,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(sampler),
                        },
                    ],
                });

        RegionTarget {
            color,
            color_view,
            depth,
            depth_view,
            blit_bind_group,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_scales_with_the_window() {
        let rect = NormRect::new(0.0, 0.0, 0.5, 0.5);
        assert_eq!(target_extent(rect, (1200, 900)), (600, 450));
        assert_eq!(target_extent(rect, (2400, 1800)), (1200, 900));
    }

    #[test]
    fn extent_rounds_to_nearest_pixel() {
        let rect = NormRect::new(0.0, 0.0, 0.333, 0.667);
        assert_eq!(target_extent(rect, (1000, 1000)), (333, 667));
    }

    #[test]
    fn extent_never_collapses_to_zero() {
        let rect = NormRect::new(0.0, 0.0, 0.001, 0.001);
        assert_eq!(target_extent(rect, (100, 100)), (1, 1));
    }
}
