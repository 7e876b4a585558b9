// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

use cgmath::Matrix4;

/// A single column-major 4×4 matrix as laid out in a WGSL `mat4x4<f32>`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MatrixUniform {
    pub matrix: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for MatrixUniform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self {
            matrix: matrix.into(),
        }
    }
}

/// Typed wrapper around a `UNIFORM | COPY_DST` buffer holding one `Content`.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    fn name() -> &'static str {
        let type_name = std::any::type_name::<Content>();
        match type_name.rfind(':') {
            Some(pos) => &type_name[(pos + 1)..],
            None => type_name,
        }
    }

    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} ({})", Self::name())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Writes `content`, skipping the queue write if it is unchanged.
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }

    /// Layout entry for a vertex-stage uniform at `binding`.
    pub fn layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
            },
            count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    #[test]
    fn matrix_uniform_is_column_major() {
        let m = Matrix4::from_translation(cgmath::Vector3::new(1.0, 2.0, 3.0));
        let uniform = MatrixUniform::from(m);
        assert_eq!(uniform.matrix[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(MatrixUniform::from(Matrix4::identity()).matrix[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(std::mem::size_of::<MatrixUniform>(), 64);
    }

    #[test]
    fn type_name_is_trimmed() {
        assert_eq!(UniformBuffer::<MatrixUniform>::name(), "MatrixUniform");
    }
}
