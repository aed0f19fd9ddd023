//! Immediate-mode UI overlay built on egui.
//!
//! The overlay is a collaborator of the layout core, not part of it: it gets
//! first refusal on every window event via [`Overlay::on_window_event`], and
//! it reads named-region geometry so its panels can align with reserved
//! regions (the status bar sits on the reserved `status` strip).

use std::collections::VecDeque;

use crate::gpu::render_context::RenderContext;
use crate::layout::NormRect;
use crate::options::Options;

/// Samples kept for the frame-rate sparkline.
const FPS_HISTORY: usize = 120;

/// One region's row in the workspace panel.
#[derive(Debug, Clone)]
pub struct RegionRow {
    /// Region name.
    pub name: String,
    /// Whether the region is reserved overlay space.
    pub reserved: bool,
    /// Current normalized geometry.
    pub rect: NormRect,
    /// Pixel size of the region's live render target, if any.
    pub target: Option<(u32, u32)>,
}

/// Everything the overlay panels read and edit for one frame.
pub struct OverlayModel<'a> {
    /// Options the controls edit in place; the host diffs and applies them.
    pub options: &'a mut Options,
    /// Region table rows.
    pub rows: &'a [RegionRow],
    /// Cached `(vertical, horizontal)` boundary positions.
    pub boundaries: (f32, f32),
    /// Smoothed frames per second.
    pub fps: f32,
    /// Whether a boundary drag is in progress.
    pub dragging: bool,
    /// Screen rect of the reserved status region in physical pixels, if the
    /// workspace has one.
    pub status_rect: Option<(f32, f32, f32, f32)>,
}

/// egui state, renderer, and panel definitions.
pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    primitives: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
    fps_history: VecDeque<f32>,
    status: String,
}

impl Overlay {
    /// Create the overlay for a window and GPU context.
    #[must_use]
    pub fn new(
        window: &winit::window::Window,
        context: &RenderContext,
    ) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            Some(context.device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = egui_wgpu::Renderer::new(
            &context.device,
            context.format(),
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: false,
                ..Default::default()
            },
        );
        Self {
            ctx,
            state,
            renderer,
            primitives: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
            pixels_per_point: window.scale_factor() as f32,
            fps_history: VecDeque::with_capacity(FPS_HISTORY),
            status: "Ready".to_owned(),
        }
    }

    /// Offer a window event to the overlay.
    ///
    /// When the returned response has `consumed` set, the host must not
    /// forward the event to the workspace engine.
    pub fn on_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.state.on_window_event(window, event)
    }

    /// Replace the status bar text.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Run the panel UI for this frame and stage its paint data.
    ///
    /// Call once per frame before [`paint`](Self::paint). Edits made by the
    /// controls land in `model.options`.
    pub fn run_ui(
        &mut self,
        window: &winit::window::Window,
        model: &mut OverlayModel<'_>,
    ) {
        self.fps_history.push_back(model.fps);
        while self.fps_history.len() > FPS_HISTORY {
            let _ = self.fps_history.pop_front();
        }

        let raw_input = self.state.take_egui_input(window);
        let ctx = self.ctx.clone();
        let full_output =
            ctx.run(raw_input, |ctx| self.draw_panels(ctx, model));

        self.state
            .handle_platform_output(window, full_output.platform_output);
        self.primitives = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        self.textures_delta = full_output.textures_delta;
        self.pixels_per_point = full_output.pixels_per_point;
    }

    /// Paint the staged UI over the composited frame.
    ///
    /// Runs as the engine's overlay hook, after panes and boundary bars, so
    /// the UI is always on top.
    pub fn paint(
        &mut self,
        context: &RenderContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen: (u32, u32),
    ) {
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [screen.0, screen.1],
            pixels_per_point: self.pixels_per_point,
        };

        let textures_delta = std::mem::take(&mut self.textures_delta);
        for (id, delta) in &textures_delta.set {
            self.renderer.update_texture(
                &context.device,
                &context.queue,
                *id,
                delta,
            );
        }
        let _ = self.renderer.update_buffers(
            &context.device,
            &context.queue,
            encoder,
            &self.primitives,
            &screen_descriptor,
        );

        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            let mut pass = pass.forget_lifetime();
            self.renderer
                .render(&mut pass, &self.primitives, &screen_descriptor);
        }

        for id in &textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn draw_panels(&mut self, ctx: &egui::Context, model: &mut OverlayModel<'_>) {
        self.draw_status_bar(ctx, model);
        self.draw_workspace_window(ctx, model);
    }

    fn draw_status_bar(
        &mut self,
        ctx: &egui::Context,
        model: &OverlayModel<'_>,
    ) {
        let ppp = ctx.pixels_per_point();
        // Fill the reserved status region exactly, when the workspace has
        // one.
        let height = model
            .status_rect
            .map_or(24.0, |(_, _, _, h)| h / ppp);

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(height)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(&self.status);
                    ui.separator();
                    ui.label(format!("{:.0} fps", model.fps));
                    ui.separator();
                    let (vertical, horizontal) = model.boundaries;
                    ui.label(format!(
                        "boundaries {vertical:.3} | {horizontal:.3}"
                    ));
                    if model.dragging {
                        ui.separator();
                        ui.label("dragging");
                    }
                });
            });
    }

    fn draw_workspace_window(
        &mut self,
        ctx: &egui::Context,
        model: &mut OverlayModel<'_>,
    ) {
        egui::Window::new("Workspace")
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::CollapsingHeader::new("Regions")
                    .default_open(true)
                    .show(ui, |ui| {
                        egui::Grid::new("region_grid").striped(true).show(
                            ui,
                            |ui| {
                                for row in model.rows {
                                    ui.label(&row.name);
                                    ui.label(format!(
                                        "{:.2},{:.2} {:.2}x{:.2}",
                                        row.rect.x,
                                        row.rect.y,
                                        row.rect.width,
                                        row.rect.height
                                    ));
                                    match row.target {
                                        Some((w, h)) => {
                                            ui.label(format!("{w}x{h} px"));
                                        }
                                        None if row.reserved => {
                                            ui.label("reserved");
                                        }
                                        None => {
                                            ui.label("no target");
                                        }
                                    }
                                    ui.end_row();
                                }
                            },
                        );
                    });

                egui::CollapsingHeader::new("Boundary bars")
                    .default_open(true)
                    .show(ui, |ui| {
                        let lines = &mut model.options.boundary_lines;
                        ui.checkbox(&mut lines.show, "Show");
                        ui.add(
                            egui::Slider::new(&mut lines.width, 1.0..=8.0)
                                .text("Width (px)"),
                        );
                        ui.horizontal(|ui| {
                            ui.label("Color");
                            ui.color_edit_button_rgb(&mut lines.color);
                        });
                        ui.add(
                            egui::Slider::new(
                                &mut model.options.layout.hit_threshold,
                                0.005..=0.05,
                            )
                            .text("Grab threshold"),
                        );
                    });

                egui::CollapsingHeader::new("Frame rate")
                    .default_open(false)
                    .show(ui, |ui| {
                        self.draw_fps_sparkline(ui);
                    });

                egui::CollapsingHeader::new("Presets")
                    .default_open(false)
                    .show(ui, |ui| {
                        if ui.button("Save current options").clicked() {
                            let path =
                                std::path::Path::new("presets/workspace.toml");
                            self.status = match model.options.save(path) {
                                Ok(()) => {
                                    format!("Saved {}", path.display())
                                }
                                Err(e) => format!("Preset save failed: {e}"),
                            };
                        }
                    });
            });
    }

    fn draw_fps_sparkline(&self, ui: &mut egui::Ui) {
        let desired =
            egui::vec2(ui.available_width().max(120.0), 40.0);
        let (rect, _) =
            ui.allocate_exact_size(desired, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(
            rect,
            egui::CornerRadius::same(2),
            ui.visuals().extreme_bg_color,
        );

        if self.fps_history.len() < 2 {
            return;
        }
        let max_fps = self
            .fps_history
            .iter()
            .copied()
            .fold(60.0_f32, f32::max);
        let n = self.fps_history.len();
        let points: Vec<egui::Pos2> = self
            .fps_history
            .iter()
            .enumerate()
            .map(|(i, fps)| {
                let t = i as f32 / (n - 1) as f32;
                egui::pos2(
                    rect.left() + t * rect.width(),
                    rect.bottom()
                        - (fps / max_fps).clamp(0.0, 1.0) * rect.height(),
                )
            })
            .collect();
        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(1.5, ui.visuals().hyperlink_color),
        ));
    }
}
