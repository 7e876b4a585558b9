//! The graphics-context seam the shape renderer draws through.

use cgmath::Matrix4;

use crate::error::RenderError;

/// One of the three GPU buffers a frame uploads into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferSlot {
    /// `f32` xyz triples, vertex attribute location 0.
    Position,
    /// `f32` rgb triples, vertex attribute location 1.
    Color,
    /// `u32` triangle-list indices.
    Index,
}

/// Capabilities [`RenderPipeline`](super::RenderPipeline) needs from a graphics API.
///
/// Calls arrive in frame order: `clear`, zero or more `upload`s, `set_transforms`,
/// then `draw_indexed`, which submits and presents everything recorded since
/// `clear`. Each `upload` fully replaces the contents of its slot.
pub trait GraphicsBackend {
    /// Begins a frame that clears color to `color` (RGBA) and depth to 1.0.
    fn clear(&mut self, color: [f32; 4]);

    fn upload(&mut self, slot: BufferSlot, contents: &[u8]);

    /// `projection` uses OpenGL clip-space depth; backends convert as needed.
    fn set_transforms(&mut self, model_view: Matrix4<f32>, projection: Matrix4<f32>);

    /// Draws `index_count` indices from the index slot as a triangle list.
    fn draw_indexed(&mut self, index_count: u32) -> Result<(), RenderError>;

    fn resize(&mut self, width: u32, height: u32);

    /// Current viewport size in physical pixels.
    fn viewport_size(&self) -> (u32, u32);
}
