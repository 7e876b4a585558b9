// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! [`RenderPipeline`] implements the per-frame draw contract on top of any
//! [`GraphicsBackend`]; [`WgpuBackend`] is the GPU implementation.

pub mod backend;
pub mod render_pipeline;
pub mod shape_pipeline;
pub mod vertex;
pub mod wgpu_backend;

// Re-export main types
pub use backend::{BufferSlot, GraphicsBackend};
pub use render_pipeline::{RenderPipeline, UploadPolicy, DEFAULT_CLEAR_COLOR};
pub use shape_pipeline::{PipelineConfig, ShapePipeline};
pub use wgpu_backend::{BackendOptions, WgpuBackend};
