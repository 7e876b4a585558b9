//! Error types for mesh generation, rendering and the viewer application.
//!
//! Generation and pipeline construction are the only places anything can fail.
//! Once a [`RenderPipeline`](crate::gfx::rendering::RenderPipeline) exists and is
//! fed meshes that hold their invariants, drawing only surfaces transient
//! surface errors.

use thiserror::Error;

/// Failures raised while generating or assembling a [`Mesh`](crate::gfx::geometry::Mesh).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// A shape parameter was rejected before any vertex was generated.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Caller-supplied mesh arrays break the mesh invariants.
    #[error("malformed mesh: {0}")]
    MalformedMesh(String),
}

impl ShapeError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ShapeError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Failures raised by the render pipeline and its graphics backend.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No usable surface, adapter or device.
    #[error("graphics context unavailable: {0}")]
    UnsupportedContext(String),

    /// The shader module failed to compile.
    #[error("shader `{label}` failed to compile: {message}")]
    ShaderCompile { label: String, message: String },

    /// The render pipeline (vertex + fragment stage linkage) failed validation.
    #[error("pipeline `{label}` failed to link: {message}")]
    ShaderLink { label: String, message: String },

    /// The mesh has more indices than one indexed draw can address.
    #[error("mesh has {0} indices, more than a single draw call can address")]
    MeshTooLarge(usize),

    /// The swapchain texture could not be acquired for this frame.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Top-level failures of [`ShapeViewer::run`](crate::app::ShapeViewer::run).
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_the_parameter() {
        let err = ShapeError::invalid("slices", "must be at least 1, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `slices`: must be at least 1, got 0"
        );
    }

    #[test]
    fn shader_errors_are_distinct_from_surface_errors() {
        let compile = RenderError::ShaderCompile {
            label: "shape".into(),
            message: "unknown identifier".into(),
        };
        assert!(matches!(compile, RenderError::ShaderCompile { .. }));
        let surface: RenderError = wgpu::SurfaceError::Timeout.into();
        assert!(matches!(surface, RenderError::Surface(_)));
    }
}
