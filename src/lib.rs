// src/lib.rs
//! Shapes3D
//!
//! Procedural triangle meshes for six parametric surfaces (cylinder, cone,
//! sphere, ellipsoid, hyperboloid, toroid) and a wgpu/winit viewer that draws
//! them with per-vertex color under an interactive rotation.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ShapeViewer;
pub use config::ViewerConfig;
pub use error::{RenderError, ShapeError, ViewerError};
pub use gfx::geometry::{Mesh, ShapeKind, ShapeParams};

/// Opens a viewer with the default configuration plus environment overrides
/// and blocks until it closes.
pub fn run() -> Result<(), ViewerError> {
    ShapeViewer::new(ViewerConfig::from_env())?.run()
}
