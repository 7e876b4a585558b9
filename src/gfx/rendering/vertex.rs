//! Vertex buffer layouts for the shape shader.
//!
//! Positions and colors live in separate, tightly packed buffers, one
//! attribute each.

/// Shader location of the position attribute.
pub const POSITION_LOCATION: u32 = 0;
/// Shader location of the color attribute.
pub const COLOR_LOCATION: u32 = 1;

const FLOAT3_STRIDE: wgpu::BufferAddress = std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![POSITION_LOCATION => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![COLOR_LOCATION => Float32x3];

pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: FLOAT3_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRIBUTES,
    }
}

pub fn color_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: FLOAT3_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &COLOR_ATTRIBUTES,
    }
}

/// Both layouts, indexed by vertex buffer slot.
pub fn buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [position_layout(), color_layout()]
}
