// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Thin typed wrappers around the buffers the shape renderer uploads each frame.

pub mod array_buffer;
pub mod uniform_buffer;

// Re-export main types
pub use array_buffer::ArrayBuffer;
pub use uniform_buffer::{MatrixUniform, UniformBuffer};
