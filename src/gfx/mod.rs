//! # Graphics Module
//!
//! Everything between a shape name and pixels on screen.
//!
//! - **Geometry** ([`geometry`]) - the six mesh generators and the [`Mesh`] type
//! - **Camera** ([`camera`]) - rotation state, input handling, model-view and projection
//! - **Rendering** ([`rendering`]) - the draw contract and its wgpu backend
//! - **Resources** ([`resources`]) - render-target textures
//!
//! ## Usage
//!
//! ```no_run
//! use shapes3d::gfx::geometry::ShapeKind;
//!
//! let mesh = ShapeKind::Toroid.generate().unwrap();
//! assert_eq!(mesh.indices().len() % 3, 0);
//!
//! // With a backend available:
//! // let mut pipeline = RenderPipeline::new(backend);
//! // pipeline.draw_shape(&mesh, 0.0, 0.0)?;
//! ```
//!
//! [`Mesh`]: geometry::Mesh

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;

// Re-export commonly used types
pub use camera::RotationState;
pub use geometry::{Mesh, ShapeKind};
pub use rendering::{GraphicsBackend, RenderPipeline, WgpuBackend};
