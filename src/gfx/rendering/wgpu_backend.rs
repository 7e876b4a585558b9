//! wgpu implementation of [`GraphicsBackend`].
//!
//! Owns the surface, device and queue together with every GPU resource the
//! shape pass touches: the depth texture, the position/color/index buffers,
//! the two transform uniforms and their bind group, and the render pipeline.
//! Everything is released when the backend is dropped.

use cgmath::Matrix4;
use log::{debug, info, warn};

use super::backend::{BufferSlot, GraphicsBackend};
use super::shape_pipeline::{PipelineConfig, ShapePipeline, MODEL_VIEW_BINDING, PROJECTION_BINDING};
use crate::error::RenderError;
use crate::gfx::camera::transform::OPENGL_TO_WGPU_MATRIX;
use crate::gfx::resources::DepthTexture;
use crate::wgpu_utils::{ArrayBuffer, MatrixUniform, UniformBuffer};

/// Surface and pipeline options chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendOptions {
    pub cull_back_faces: bool,
    pub vsync: bool,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            cull_back_faces: false,
            vsync: true,
        }
    }
}

pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_texture: DepthTexture,
    pipeline: ShapePipeline,

    position_buffer: ArrayBuffer,
    color_buffer: ArrayBuffer,
    index_buffer: ArrayBuffer,

    model_view: UniformBuffer<MatrixUniform>,
    projection: UniformBuffer<MatrixUniform>,
    bind_group: wgpu::BindGroup,

    clear_color: wgpu::Color,
}

impl WgpuBackend {
    /// Creates a backend rendering into `window`.
    ///
    /// Fails with [`RenderError::UnsupportedContext`] when no surface, adapter or
    /// device is available, and with a shader error if the pipeline does not
    /// build. Both are fatal.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        options: BackendOptions,
    ) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::UnsupportedContext(format!("surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::UnsupportedContext(format!("adapter: {e}")))?;

        let adapter_info = adapter.get_info();
        info!(
            "using adapter '{}' ({:?})",
            adapter_info.name, adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Shape Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| RenderError::UnsupportedContext(format!("device: {e}")))?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| {
                RenderError::UnsupportedContext("surface has no supported formats".into())
            })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(options.vsync),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = DepthTexture::new(&device, &config, "Depth Texture");

        let pipeline_config = PipelineConfig::default()
            .with_color_format(format)
            .with_back_face_culling(options.cull_back_faces);
        let pipeline = ShapePipeline::new(&device, &pipeline_config).await?;

        let position_buffer =
            ArrayBuffer::new(&device, "Position Buffer", wgpu::BufferUsages::VERTEX);
        let color_buffer = ArrayBuffer::new(&device, "Color Buffer", wgpu::BufferUsages::VERTEX);
        let index_buffer = ArrayBuffer::new(&device, "Index Buffer", wgpu::BufferUsages::INDEX);

        let model_view = UniformBuffer::<MatrixUniform>::new(&device, "Model View");
        let projection = UniformBuffer::<MatrixUniform>::new(&device, "Projection");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: MODEL_VIEW_BINDING,
                    resource: model_view.binding_resource(),
                },
                wgpu::BindGroupEntry {
                    binding: PROJECTION_BINDING,
                    resource: projection.binding_resource(),
                },
            ],
        });

        info!(
            "backend ready: {}x{} {:?}, vsync {}",
            config.width, config.height, format, options.vsync
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline,
            position_buffer,
            color_buffer,
            index_buffer,
            model_view,
            projection,
            bind_group,
            clear_color: wgpu::Color::BLACK,
        })
    }

    fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                warn!("surface {error}, reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                Err(error.into())
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl GraphicsBackend for WgpuBackend {
    fn clear(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color.map(f64::from);
        self.clear_color = wgpu::Color { r, g, b, a };
    }

    fn upload(&mut self, slot: BufferSlot, contents: &[u8]) {
        let buffer = match slot {
            BufferSlot::Position => &mut self.position_buffer,
            BufferSlot::Color => &mut self.color_buffer,
            BufferSlot::Index => &mut self.index_buffer,
        };
        buffer.write(&self.device, &self.queue, contents);
    }

    fn set_transforms(&mut self, model_view: Matrix4<f32>, projection: Matrix4<f32>) {
        self.model_view
            .update_content(&self.queue, MatrixUniform::from(model_view));
        self.projection.update_content(
            &self.queue,
            MatrixUniform::from(OPENGL_TO_WGPU_MATRIX * projection),
        );
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<(), RenderError> {
        let frame = self.acquire_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Shape Encoder"),
            });

        let available = (self.index_buffer.byte_len() / std::mem::size_of::<u32>() as u64) as u32;
        let index_count = index_count.min(available);

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shape Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(self.depth_texture.attachment()),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let (Some(positions), Some(colors), Some(indices)) = (
                self.position_buffer.slice(),
                self.color_buffer.slice(),
                self.index_buffer.slice(),
            ) {
                if index_count > 0 {
                    pass.set_pipeline(&self.pipeline.pipeline);
                    pass.set_bind_group(0, &self.bind_group, &[]);
                    pass.set_vertex_buffer(0, positions);
                    pass.set_vertex_buffer(1, colors);
                    pass.set_index_buffer(indices, wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        debug!("presented frame with {index_count} indices");
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = DepthTexture::new(&self.device, &self.config, "Depth Texture");
        debug!("surface resized to {width}x{height}");
    }

    fn viewport_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_present_mode() {
        assert_eq!(present_mode(true), wgpu::PresentMode::AutoVsync);
        assert_eq!(present_mode(false), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn default_options_keep_both_faces() {
        let options = BackendOptions::default();
        assert!(!options.cull_back_faces);
        assert!(options.vsync);
    }
}
