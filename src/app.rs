//! Windowed shape viewer.
//!
//! [`ShapeViewer`] owns the window, the render pipeline and a [`ViewerState`]
//! holding everything the frame depends on: the selected shape, its mesh and
//! the rotation. Input events update the state; every change requests a redraw,
//! and each redraw runs one full draw of the current mesh.

use std::collections::HashMap;
use std::sync::Arc;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::error::{RenderError, ShapeError, ViewerError};
use crate::gfx::camera::{ControlAction, RotationController, RotationState};
use crate::gfx::geometry::{Mesh, ShapeKind};
use crate::gfx::rendering::{RenderPipeline, WgpuBackend};

/// What the viewer should do after an input was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ignored,
    Redraw,
    Quit,
}

/// Window-independent viewer state.
pub struct ViewerState {
    shape: ShapeKind,
    mesh: Mesh,
    rotation: RotationState,
    controller: RotationController,
    cache: Option<HashMap<ShapeKind, Mesh>>,
}

impl ViewerState {
    pub fn new(config: &ViewerConfig) -> Result<Self, ShapeError> {
        let mut controller = RotationController::new(config.drag_sensitivity, config.spin_step);
        controller.set_spinning(config.animate);

        let mut cache = config.cache_meshes.then(HashMap::new);
        let mesh = fetch_mesh(&mut cache, config.initial_shape)?;

        Ok(Self {
            shape: config.initial_shape,
            mesh,
            rotation: RotationState::default(),
            controller,
            cache,
        })
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.controller.is_spinning()
    }

    /// Number of meshes held by the cache, `None` when caching is off.
    pub fn cached_meshes(&self) -> Option<usize> {
        self.cache.as_ref().map(HashMap::len)
    }

    /// Switches to `shape`, generating (or fetching) its mesh. The rotation is kept.
    pub fn select_shape(&mut self, shape: ShapeKind) -> Result<Response, ShapeError> {
        if shape == self.shape {
            return Ok(Response::Ignored);
        }
        self.mesh = fetch_mesh(&mut self.cache, shape)?;
        self.shape = shape;
        info!(
            "showing {shape}: {} vertices, {} triangles",
            self.mesh.vertex_count(),
            self.mesh.triangle_count()
        );
        Ok(Response::Redraw)
    }

    pub fn apply_action(&mut self, action: ControlAction) -> Result<Response, ShapeError> {
        match action {
            ControlAction::SelectShape(shape) => self.select_shape(shape),
            ControlAction::ResetRotation => {
                self.rotation.reset();
                Ok(Response::Redraw)
            }
            ControlAction::ToggleSpin => {
                info!(
                    "auto-spin {}",
                    if self.controller.is_spinning() { "on" } else { "off" }
                );
                Ok(Response::Redraw)
            }
            ControlAction::Quit => Ok(Response::Quit),
        }
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.controller.process_mouse_button(button, state);
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Response {
        redraw_if(
            self.controller
                .process_cursor_moved(position, &mut self.rotation),
        )
    }

    pub fn touch(&mut self, id: u64, phase: TouchPhase, location: PhysicalPosition<f64>) -> Response {
        redraw_if(
            self.controller
                .process_touch(id, phase, location, &mut self.rotation),
        )
    }

    pub fn key(&mut self, key: KeyCode, state: ElementState) -> Result<Response, ShapeError> {
        match self.controller.process_key(key, state) {
            Some(action) => self.apply_action(action),
            None => Ok(Response::Ignored),
        }
    }

    /// Advances auto-spin by one frame.
    pub fn tick(&mut self) -> Response {
        redraw_if(self.controller.tick(&mut self.rotation))
    }
}

/// Generates `shape`, going through `cache` when caching is enabled.
fn fetch_mesh(
    cache: &mut Option<HashMap<ShapeKind, Mesh>>,
    shape: ShapeKind,
) -> Result<Mesh, ShapeError> {
    let Some(cache) = cache.as_mut() else {
        return shape.generate();
    };
    if let Some(mesh) = cache.get(&shape) {
        return Ok(mesh.clone());
    }
    let mesh = shape.generate()?;
    cache.insert(shape, mesh.clone());
    Ok(mesh)
}

fn redraw_if(changed: bool) -> Response {
    if changed {
        Response::Redraw
    } else {
        Response::Ignored
    }
}

/// The interactive viewer application.
pub struct ShapeViewer {
    config: ViewerConfig,
    state: ViewerState,
    window: Option<Arc<Window>>,
    pipeline: Option<RenderPipeline<WgpuBackend>>,
    error: Option<ViewerError>,
}

impl ShapeViewer {
    /// Generates the initial mesh. No window is opened until [`ShapeViewer::run`].
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        let state = ViewerState::new(&config)?;
        Ok(Self {
            config,
            state,
            window: None,
            pipeline: None,
            error: None,
        })
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Runs the event loop until the window closes or a fatal error occurs.
    pub fn run(mut self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self)?;

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: impl Into<ViewerError>) {
        let err = err.into();
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn respond(&mut self, event_loop: &ActiveEventLoop, response: Result<Response, ShapeError>) {
        match response {
            Ok(Response::Redraw) => self.request_redraw(),
            Ok(Response::Quit) => event_loop.exit(),
            Ok(Response::Ignored) => (),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let (width, height) = self.config.window_size;
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let PhysicalSize { width, height } = window.inner_size();
        let backend = pollster::block_on(WgpuBackend::new(
            window.clone(),
            width,
            height,
            self.config.backend_options(),
        ))?;

        self.pipeline = Some(
            RenderPipeline::new(backend)
                .with_clear_color(self.config.clear_color)
                .with_upload_policy(self.config.upload_policy),
        );
        info!(
            "showing {}: {} vertices, {} triangles",
            self.state.shape(),
            self.state.mesh().vertex_count(),
            self.state.mesh().triangle_count()
        );
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(pipeline) = self.pipeline.as_mut() else {
            return;
        };
        let rotation = self.state.rotation();

        match pipeline.draw_shape(self.state.mesh(), rotation.angle_x, rotation.angle_y) {
            Ok(()) => (),
            Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                self.fail(event_loop, RenderError::Surface(wgpu::SurfaceError::OutOfMemory))
            }
            Err(RenderError::Surface(err)) => {
                warn!("frame skipped: {err}");
                self.request_redraw();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }
}

impl ApplicationHandler for ShapeViewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(pipeline) = self.pipeline.as_mut() {
                    pipeline.resize(width, height);
                }
                self.request_redraw();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.state.mouse_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let response = self.state.cursor_moved(position);
                self.respond(event_loop, Ok(response));
            }
            WindowEvent::Touch(Touch {
                id,
                phase,
                location,
                ..
            }) => {
                let response = self.state.touch(id, phase, location);
                self.respond(event_loop, Ok(response));
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let response = self.state.key(key_code, state);
                self.respond(event_loop, response);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.pipeline.is_none() {
            return;
        }
        if self.state.tick() == Response::Redraw {
            event_loop.set_control_flow(ControlFlow::Poll);
            self.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(config: ViewerConfig) -> ViewerState {
        ViewerState::new(&config).unwrap()
    }

    #[test]
    fn starts_with_configured_shape() {
        let viewer = state(ViewerConfig::default());
        assert_eq!(viewer.shape(), ShapeKind::Cylinder);
        assert_eq!(viewer.mesh(), &ShapeKind::Cylinder.generate().unwrap());
        assert_eq!(viewer.cached_meshes(), None);

        let toroid = state(ViewerConfig::default().with_initial_shape(ShapeKind::Toroid));
        assert_eq!(toroid.mesh().vertex_count(), 41 * 31);
    }

    #[test]
    fn digit_keys_switch_shape_and_keep_rotation() {
        let mut viewer = state(ViewerConfig::default());
        viewer.mouse_button(MouseButton::Left, ElementState::Pressed);
        viewer.cursor_moved(PhysicalPosition::new(0.0, 0.0));
        assert_eq!(
            viewer.cursor_moved(PhysicalPosition::new(30.0, 10.0)),
            Response::Redraw
        );
        let rotation = viewer.rotation();

        let response = viewer.key(KeyCode::Digit3, ElementState::Pressed).unwrap();
        assert_eq!(response, Response::Redraw);
        assert_eq!(viewer.shape(), ShapeKind::Sphere);
        assert_eq!(viewer.mesh().vertex_count(), 31 * 31);
        assert_eq!(viewer.rotation(), rotation);

        let again = viewer.key(KeyCode::Digit3, ElementState::Pressed).unwrap();
        assert_eq!(again, Response::Ignored);
    }

    #[test]
    fn reset_and_quit() {
        let mut viewer = state(ViewerConfig::default());
        viewer.touch(7, TouchPhase::Started, PhysicalPosition::new(0.0, 0.0));
        viewer.touch(7, TouchPhase::Moved, PhysicalPosition::new(10.0, 10.0));
        assert_ne!(viewer.rotation(), RotationState::default());

        assert_eq!(
            viewer.key(KeyCode::KeyR, ElementState::Pressed).unwrap(),
            Response::Redraw
        );
        assert_eq!(viewer.rotation(), RotationState::default());
        assert_eq!(
            viewer.key(KeyCode::Escape, ElementState::Pressed).unwrap(),
            Response::Quit
        );
    }

    #[test]
    fn animate_spins_every_tick() {
        let mut viewer = state(ViewerConfig::default().with_animate(true).with_spin_step(0.5));
        assert!(viewer.is_spinning());
        assert_eq!(viewer.tick(), Response::Redraw);
        assert_eq!(viewer.tick(), Response::Redraw);
        assert_eq!(viewer.rotation(), RotationState::new(0.0, 1.0));

        viewer.key(KeyCode::Space, ElementState::Pressed).unwrap();
        assert_eq!(viewer.tick(), Response::Ignored);
    }

    #[test]
    fn cache_keeps_one_mesh_per_shape() {
        let mut viewer = state(ViewerConfig::default().with_cache_meshes(true));
        assert_eq!(viewer.cached_meshes(), Some(1));

        for shape in ShapeKind::ALL {
            viewer.select_shape(shape).unwrap();
        }
        viewer.select_shape(ShapeKind::Cone).unwrap();
        assert_eq!(viewer.cached_meshes(), Some(6));
        assert_eq!(viewer.mesh(), &ShapeKind::Cone.generate().unwrap());
    }
}
