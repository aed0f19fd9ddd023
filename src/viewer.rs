//! Standalone workspace window backed by winit.
//!
//! ```no_run
//! # use mullion::Viewer;
//! Viewer::builder()
//!     .with_title("Workspace")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    engine::{WorkspaceConfig, WorkspaceEngine},
    error::MullionError,
    input::InputEvent,
    options::Options,
    overlay::{Overlay, OverlayModel, RegionRow},
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    title: String,
    config: WorkspaceConfig,
    options: Options,
}

impl ViewerBuilder {
    /// Create a builder with the default quadrant workspace and options.
    fn new() -> Self {
        Self {
            title: "Mullion".into(),
            config: WorkspaceConfig::default(),
            options: Options::default(),
        }
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the workspace region layout.
    #[must_use]
    pub fn with_config(mut self, config: WorkspaceConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            title: self.title,
            config: self.config,
            options: self.options,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window hosting a split-pane workspace.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to enter
/// the event loop.
pub struct Viewer {
    title: String,
    config: WorkspaceConfig,
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`MullionError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), MullionError> {
        let event_loop =
            EventLoop::new().map_err(|e| MullionError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            overlay: None,
            last_frame_time: Instant::now(),
            title: self.title,
            config: Some(self.config),
            options: Some(self.options),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MullionError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<WorkspaceEngine>,
    overlay: Option<Overlay>,
    last_frame_time: Instant,
    title: String,
    config: Option<WorkspaceConfig>,
    options: Option<Options>,
}

impl ViewerApp {
    /// Snapshot the engine state the overlay panels read.
    fn region_rows(engine: &WorkspaceEngine) -> Vec<RegionRow> {
        engine
            .regions()
            .iter()
            .map(|region| RegionRow {
                name: region.name.clone(),
                reserved: !region.kind.wants_target(),
                rect: region.rect,
                target: engine.target_size(&region.name),
            })
            .collect()
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine), Some(overlay)) =
            (&self.window, &mut self.engine, &mut self.overlay)
        else {
            return;
        };

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        // Run the panel UI, then apply any option edits it made.
        let rows = Self::region_rows(engine);
        let mut options = engine.options().clone();
        let mut model = OverlayModel {
            options: &mut options,
            rows: &rows,
            boundaries: engine.boundary_positions(),
            fps: engine.fps(),
            dragging: engine.is_dragging(),
            status_rect: engine.region_screen_rect("status").ok(),
        };
        overlay.run_ui(window, &mut model);
        if options != *engine.options() {
            engine.set_options(options);
        }

        let screen = engine.context.surface_size();
        match engine.render(dt, |context, encoder, view| {
            overlay.paint(context, encoder, view, screen);
        }) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let inner = window.inner_size();
                engine.resize(inner.width, inner.height);
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let options = self.options.take().unwrap_or_default();
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                options.window.width,
                options.window.height,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));
        let config = self.config.take().unwrap_or_default();

        let engine = match pollster::block_on(WorkspaceEngine::new(
            window.clone(),
            size,
            config,
            options,
        )) {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut overlay = Overlay::new(&window, &engine.context);
        overlay.set_status("Ready");

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.overlay = Some(overlay);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // The overlay gets first refusal on every event; pointer events it
        // claims never reach the engine.
        let mut consumed = false;
        if let (Some(window), Some(overlay)) =
            (&self.window, &mut self.overlay)
        {
            consumed = overlay.on_window_event(window, &event).consumed;
        }

        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && event.physical_key
                        == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
            }

            WindowEvent::CursorMoved { position, .. } if !consumed => {
                let request = self.engine.as_mut().map(|engine| {
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    })
                });
                if let (Some(window), Some(request)) =
                    (&self.window, request)
                {
                    if let Some(icon) = request.icon() {
                        window.set_cursor(icon);
                    }
                    window.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } if !consumed => {
                let request = self.engine.as_mut().map(|engine| {
                    engine.handle_input(InputEvent::MouseButton {
                        button: button.into(),
                        pressed: state == ElementState::Pressed,
                    })
                });
                if let (Some(window), Some(request)) =
                    (&self.window, request)
                {
                    if let Some(icon) = request.icon() {
                        window.set_cursor(icon);
                    }
                }
            }

            _ => (),
        }
    }
}
