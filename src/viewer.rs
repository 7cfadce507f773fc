//! Standalone showcase window backed by winit.
//!
//! The viewer owns the event loop and per-frame timing; drawing is
//! delegated to a [`RenderBackend`] built by an embedder-supplied factory
//! once the window exists.
//!
//! ```no_run
//! # use lustre::{Viewer, RenderBackend, RenderFrame};
//! # struct NoopBackend;
//! # impl RenderBackend for NoopBackend {
//! #     fn resize(&mut self, _w: u32, _h: u32) {}
//! #     fn submit(&mut self, _frame: &RenderFrame<'_>) {}
//! # }
//! Viewer::builder()
//!     .with_model("assets/models/dflat.obj")
//!     .with_model("assets/models/gem2.obj")
//!     .with_model("assets/models/golden_ring.obj")
//!     .with_backend(|_window, _size, _scale| Box::new(NoopBackend))
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{path::PathBuf, sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    engine::ShowcaseCommand, error::LustreError, input::InputProcessor,
    input::InputEvent, options::Options, render::RenderBackend,
    scene::MeshLibrary, util::FrameTiming, ShowcaseEngine,
};

/// Builds a render backend once the window exists.
pub type BackendFactory =
    Box<dyn FnOnce(Arc<Window>, (u32, u32), f64) -> Box<dyn RenderBackend>>;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    models: Vec<PathBuf>,
    options: Option<Options>,
    title: String,
    backend: Option<BackendFactory>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            models: Vec::new(),
            options: None,
            title: "Lustre".into(),
            backend: None,
        }
    }

    /// Add a model file to load into the mesh library.
    #[must_use]
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.models.push(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Supply the render-backend factory, invoked once the window exists.
    #[must_use]
    pub fn with_backend<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(Arc<Window>, (u32, u32), f64) -> Box<dyn RenderBackend>
            + 'static,
    {
        self.backend = Some(Box::new(factory));
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            models: self.models,
            options: self.options,
            title: self.title,
            backend: self.backend,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that runs the showcase.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to enter
/// the event loop.
pub struct Viewer {
    models: Vec<PathBuf>,
    options: Option<Options>,
    title: String,
    backend: Option<BackendFactory>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), LustreError> {
        let _ = env_logger::try_init();

        let Some(backend) = self.backend else {
            return Err(LustreError::Viewer(
                "no render backend factory supplied".into(),
            ));
        };

        let event_loop =
            EventLoop::new().map_err(|e| LustreError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            backend_factory: Some(backend),
            backend: None,
            input: InputProcessor::new(),
            timing: FrameTiming::new(),
            models: self.models,
            options: self.options,
            title: self.title,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| LustreError::Viewer(e.to_string()))
    }
}

// ── ApplicationHandler ───────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ShowcaseEngine>,
    backend_factory: Option<BackendFactory>,
    backend: Option<Box<dyn RenderBackend>>,
    input: InputProcessor,
    timing: FrameTiming,
    models: Vec<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl ViewerApp {
    fn dispatch(&mut self, command: Option<ShowcaseCommand>) {
        if let (Some(engine), Some(command)) = (&mut self.engine, command) {
            engine.execute(command);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut library = MeshLibrary::new();
        for path in &self.models {
            // A failed model leaves its nodes missing; the affected
            // composition reports that and renders nothing.
            if let Err(e) = library.load_obj(path) {
                log::error!("{e}");
            }
        }

        let size = window.inner_size();
        let scale = window.scale_factor();
        let viewport = (size.width, size.height);

        let options = self.options.take().unwrap_or_default();
        let engine = ShowcaseEngine::new(library, options, viewport);

        if let Some(factory) = self.backend_factory.take() {
            self.backend = Some(factory(window.clone(), viewport, scale));
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.execute(ShowcaseCommand::Resize {
                        width: size.width,
                        height: size.height,
                    });
                }
                if let Some(backend) = &mut self.backend {
                    backend.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                {
                    let dt = self.timing.tick();
                    engine.update(Instant::now(), dt);
                    if let Some(backend) = &mut self.backend {
                        backend.submit(&engine.frame());
                    }
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let command = self.input.handle_event(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
                self.dispatch(command);
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let command = self.input.handle_event(InputEvent::MouseButton {
                    button: button.into(),
                    pressed: state == ElementState::Pressed,
                });
                self.dispatch(command);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                let command =
                    self.input.handle_event(InputEvent::Scroll { delta });
                self.dispatch(command);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    use winit::keyboard::PhysicalKey;
                    if let PhysicalKey::Code(code) = event.physical_key {
                        let key = format!("{code:?}");
                        let command = self.input.handle_key_press(&key);
                        self.dispatch(command);
                    }
                }
            }

            _ => (),
        }
    }
}
