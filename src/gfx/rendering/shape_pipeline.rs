//! Shader compilation and render pipeline creation for colored shapes.
//!
//! Validation failures are captured with error scopes and turned into
//! [`RenderError::ShaderCompile`] (shader module) or [`RenderError::ShaderLink`]
//! (pipeline), instead of reaching wgpu's uncaptured-error handler.

use log::info;
use wgpu::*;

use super::vertex;
use crate::error::RenderError;
use crate::gfx::resources::DepthTexture;
use crate::wgpu_utils::{MatrixUniform, UniformBuffer};

/// WGSL source for the shape shader.
pub const SHAPE_SHADER: &str = include_str!("shape.wgsl");

/// Bind group slot of the model-view matrix.
pub const MODEL_VIEW_BINDING: u32 = 0;
/// Bind group slot of the projection matrix.
pub const PROJECTION_BINDING: u32 = 1;

/// Parameters for [`ShapePipeline::new`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub color_format: TextureFormat,
    pub cull_mode: Option<Face>,
    pub depth_compare: CompareFunction,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Shape Pipeline".to_string(),
            shader: SHAPE_SHADER.to_string(),
            color_format: TextureFormat::Bgra8Unorm,
            cull_mode: None,
            depth_compare: CompareFunction::Less,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    /// Replaces the WGSL source. It must provide `vs_main` and `fs_main`.
    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_string();
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Culls back faces (counter-clockwise front) when `enabled`.
    ///
    /// The generated meshes are not uniformly outward-wound: sphere grids face
    /// inward and alternate cylinder side triangles face opposite ways, so
    /// culling hides parts of the surface.
    pub fn with_back_face_culling(self, enabled: bool) -> Self {
        self.with_cull_mode(enabled.then_some(Face::Back))
    }
}

/// A compiled shape pipeline and the layout of its transform bind group.
pub struct ShapePipeline {
    pub pipeline: RenderPipeline,
    pub bind_group_layout: BindGroupLayout,
}

impl ShapePipeline {
    pub async fn new(device: &Device, config: &PipelineConfig) -> Result<Self, RenderError> {
        let shader = compile_shader(device, &config.label, &config.shader).await?;

        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Transform Bind Group Layout"),
            entries: &[
                UniformBuffer::<MatrixUniform>::layout_entry(MODEL_VIEW_BINDING),
                UniformBuffer::<MatrixUniform>::layout_entry(PROJECTION_BINDING),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some(&format!("{} Layout", config.label)),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let buffers = vertex::buffer_layouts();
        let color_targets = [Some(ColorTargetState {
            format: config.color_format,
            blend: Some(BlendState::REPLACE),
            write_mask: ColorWrites::ALL,
        })];

        device.push_error_scope(ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(&config.label),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &buffers,
                compilation_options: PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &color_targets,
                compilation_options: PipelineCompilationOptions::default(),
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                cull_mode: config.cull_mode,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(DepthStencilState {
                format: DepthTexture::FORMAT,
                depth_write_enabled: true,
                depth_compare: config.depth_compare,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        if let Some(error) = device.pop_error_scope().await {
            return Err(RenderError::ShaderLink {
                label: config.label.clone(),
                message: error.to_string(),
            });
        }

        info!(
            "created pipeline '{}' (cull: {:?}, depth: {:?})",
            config.label, config.cull_mode, config.depth_compare
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
        })
    }
}

/// Compiles WGSL `source`, reporting validation errors as [`RenderError::ShaderCompile`].
pub async fn compile_shader(
    device: &Device,
    label: &str,
    source: &str,
) -> Result<ShaderModule, RenderError> {
    device.push_error_scope(ErrorFilter::Validation);
    let module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some(label),
        source: ShaderSource::Wgsl(source.into()),
    });
    match device.pop_error_scope().await {
        Some(error) => Err(RenderError::ShaderCompile {
            label: label.to_owned(),
            message: error.to_string(),
        }),
        None => Ok(module),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_draws_both_faces_with_less_depth() {
        let config = PipelineConfig::default();
        assert_eq!(config.cull_mode, None);
        assert_eq!(config.depth_compare, CompareFunction::Less);
        assert!(config.shader.contains("fn vs_main"));
        assert!(config.shader.contains("fn fs_main"));
    }

    #[test]
    fn back_face_culling_toggle() {
        let culled = PipelineConfig::default().with_back_face_culling(true);
        assert_eq!(culled.cull_mode, Some(Face::Back));
        let open = culled.with_back_face_culling(false);
        assert_eq!(open.cull_mode, None);
    }

    #[test]
    fn shader_declares_both_transform_bindings() {
        assert!(SHAPE_SHADER.contains("@binding(0)"));
        assert!(SHAPE_SHADER.contains("@binding(1)"));
        assert!(SHAPE_SHADER.contains("@location(0) position"));
        assert!(SHAPE_SHADER.contains("@location(1) color"));
    }
}
