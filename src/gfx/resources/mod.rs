// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Render-target textures owned by the backend.

pub mod depth_texture;

// Re-export main types
pub use depth_texture::DepthTexture;
