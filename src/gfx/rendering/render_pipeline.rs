//! Per-frame draw contract for a single shape.

use cgmath::Matrix4;
use log::debug;

use super::backend::{BufferSlot, GraphicsBackend};
use crate::error::RenderError;
use crate::gfx::camera::transform::{aspect_ratio, model_view, projection};
use crate::gfx::geometry::Mesh;

/// Light gray used when no clear color is configured.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.95, 0.95, 0.95, 1.0];

/// When [`RenderPipeline::draw_shape`] re-uploads mesh data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadPolicy {
    /// Upload positions, colors and indices on every draw.
    #[default]
    EveryFrame,
    /// Skip the upload when the mesh equals the one uploaded last.
    OnChange,
}

/// Draws one [`Mesh`] per frame through a [`GraphicsBackend`].
///
/// Takes `&mut self` for every draw, so frames are serialized by the borrow
/// checker; sharing a pipeline across threads requires wrapping it in a lock.
pub struct RenderPipeline<B: GraphicsBackend> {
    backend: B,
    clear_color: [f32; 4],
    upload_policy: UploadPolicy,
    uploaded: Option<Mesh>,
    frames_drawn: u64,
}

impl<B: GraphicsBackend> RenderPipeline<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            clear_color: DEFAULT_CLEAR_COLOR,
            upload_policy: UploadPolicy::default(),
            uploaded: None,
            frames_drawn: 0,
        }
    }

    pub fn with_clear_color(mut self, clear_color: [f32; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_upload_policy(mut self, upload_policy: UploadPolicy) -> Self {
        self.upload_policy = upload_policy;
        self
    }

    /// Clears, uploads `mesh`, binds the transforms for the given angles and
    /// issues one indexed draw over all of `mesh`'s indices.
    ///
    /// Fails with [`RenderError::MeshTooLarge`] before touching the backend
    /// when the index count does not fit in `u32`.
    pub fn draw_shape(
        &mut self,
        mesh: &Mesh,
        angle_x: f32,
        angle_y: f32,
    ) -> Result<(), RenderError> {
        let index_count = draw_count(mesh.indices().len())?;
        self.backend.clear(self.clear_color);

        if self.needs_upload(mesh) {
            debug!(
                "uploading mesh: {} vertices, {} indices",
                mesh.vertex_count(),
                mesh.indices().len()
            );
            self.backend
                .upload(BufferSlot::Position, bytemuck::cast_slice(mesh.vertices()));
            self.backend
                .upload(BufferSlot::Color, bytemuck::cast_slice(mesh.colors()));
            self.backend
                .upload(BufferSlot::Index, bytemuck::cast_slice(mesh.indices()));
            if self.upload_policy == UploadPolicy::OnChange {
                self.uploaded = Some(mesh.clone());
            }
        }

        let (model_view, projection) = self.transforms(angle_x, angle_y);
        self.backend.set_transforms(model_view, projection);

        self.backend.draw_indexed(index_count)?;
        self.frames_drawn += 1;
        Ok(())
    }

    fn needs_upload(&self, mesh: &Mesh) -> bool {
        match self.upload_policy {
            UploadPolicy::EveryFrame => true,
            UploadPolicy::OnChange => self.uploaded.as_ref() != Some(mesh),
        }
    }

    /// Model-view and projection for the current viewport.
    pub fn transforms(&self, angle_x: f32, angle_y: f32) -> (Matrix4<f32>, Matrix4<f32>) {
        let (width, height) = self.backend.viewport_size();
        (
            model_view(angle_x, angle_y),
            projection(aspect_ratio(width, height)),
        )
    }

    /// Matches the viewport to a new surface size. Takes effect on the next draw.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.backend.viewport_size()
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        self.upload_policy
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn draw_count(indices: usize) -> Result<u32, RenderError> {
    u32::try_from(indices).map_err(|_| RenderError::MeshTooLarge(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_cone, generate_sphere, CylinderParams, SphereParams};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear([f32; 4]),
        Upload(BufferSlot, usize),
        SetTransforms,
        Draw(u32),
        Resize(u32, u32),
    }

    struct RecordingBackend {
        calls: Vec<Call>,
        size: (u32, u32),
        last_model_view: Option<Matrix4<f32>>,
        last_projection: Option<Matrix4<f32>>,
        fail_draw: bool,
    }

    impl RecordingBackend {
        fn new(width: u32, height: u32) -> Self {
            Self {
                calls: Vec::new(),
                size: (width, height),
                last_model_view: None,
                last_projection: None,
                fail_draw: false,
            }
        }
    }

    impl GraphicsBackend for RecordingBackend {
        fn clear(&mut self, color: [f32; 4]) {
            self.calls.push(Call::Clear(color));
        }

        fn upload(&mut self, slot: BufferSlot, contents: &[u8]) {
            self.calls.push(Call::Upload(slot, contents.len()));
        }

        fn set_transforms(&mut self, model_view: Matrix4<f32>, projection: Matrix4<f32>) {
            self.last_model_view = Some(model_view);
            self.last_projection = Some(projection);
            self.calls.push(Call::SetTransforms);
        }

        fn draw_indexed(&mut self, index_count: u32) -> Result<(), RenderError> {
            if self.fail_draw {
                return Err(RenderError::Surface(wgpu::SurfaceError::Timeout));
            }
            self.calls.push(Call::Draw(index_count));
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
            self.calls.push(Call::Resize(width, height));
        }

        fn viewport_size(&self) -> (u32, u32) {
            self.size
        }
    }

    fn small_sphere() -> Mesh {
        generate_sphere(&SphereParams {
            radius: 1.0,
            lat_bands: 2,
            long_bands: 2,
        })
        .unwrap()
    }

    #[test]
    fn draw_follows_frame_contract() {
        let mesh = small_sphere();
        let mut pipeline = RenderPipeline::new(RecordingBackend::new(800, 600));

        pipeline.draw_shape(&mesh, 0.3, -0.2).unwrap();

        assert_eq!(
            pipeline.backend().calls,
            vec![
                Call::Clear(DEFAULT_CLEAR_COLOR),
                Call::Upload(BufferSlot::Position, 9 * 12),
                Call::Upload(BufferSlot::Color, 9 * 12),
                Call::Upload(BufferSlot::Index, 24 * 4),
                Call::SetTransforms,
                Call::Draw(24),
            ]
        );
        assert_eq!(pipeline.frames_drawn(), 1);
    }

    #[test]
    fn transforms_match_composer_and_viewport() {
        let mesh = small_sphere();
        let mut pipeline = RenderPipeline::new(RecordingBackend::new(1200, 800));

        pipeline.draw_shape(&mesh, 0.5, 1.25).unwrap();
        assert_eq!(pipeline.backend().last_model_view, Some(model_view(0.5, 1.25)));
        assert_eq!(pipeline.backend().last_projection, Some(projection(1.5)));

        pipeline.resize(400, 800);
        pipeline.draw_shape(&mesh, 0.5, 1.25).unwrap();
        assert_eq!(pipeline.backend().last_projection, Some(projection(0.5)));
    }

    #[test]
    fn resize_reaches_backend_before_next_draw() {
        let mesh = small_sphere();
        let mut pipeline = RenderPipeline::new(RecordingBackend::new(100, 100));

        pipeline.resize(640, 480);
        pipeline.draw_shape(&mesh, 0.0, 0.0).unwrap();

        assert_eq!(pipeline.backend().calls[0], Call::Resize(640, 480));
        assert_eq!(pipeline.viewport_size(), (640, 480));
    }

    #[test]
    fn every_frame_policy_always_uploads() {
        let mesh = small_sphere();
        let mut pipeline = RenderPipeline::new(RecordingBackend::new(100, 100));

        for _ in 0..3 {
            pipeline.draw_shape(&mesh, 0.0, 0.0).unwrap();
        }

        let uploads = pipeline
            .backend()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Upload(..)))
            .count();
        assert_eq!(uploads, 9);
    }

    #[test]
    fn on_change_policy_skips_identical_mesh() {
        let sphere = small_sphere();
        let cone = generate_cone(&CylinderParams::default()).unwrap();
        let mut pipeline = RenderPipeline::new(RecordingBackend::new(100, 100))
            .with_upload_policy(UploadPolicy::OnChange);

        pipeline.draw_shape(&sphere, 0.0, 0.0).unwrap();
        pipeline.draw_shape(&sphere, 0.1, 0.2).unwrap();
        pipeline.draw_shape(&cone, 0.1, 0.2).unwrap();

        let calls = &pipeline.backend().calls;
        let uploads = calls
            .iter()
            .filter(|call| matches!(call, Call::Upload(..)))
            .count();
        assert_eq!(uploads, 6);
        assert_eq!(calls.iter().filter(|c| **c == Call::SetTransforms).count(), 3);
        assert_eq!(calls.last(), Some(&Call::Draw(cone.indices().len() as u32)));
    }

    #[test]
    fn custom_clear_color_is_used() {
        let color = [0.0, 0.0, 0.0, 1.0];
        let mut pipeline =
            RenderPipeline::new(RecordingBackend::new(10, 10)).with_clear_color(color);

        pipeline.draw_shape(&small_sphere(), 0.0, 0.0).unwrap();
        assert_eq!(pipeline.backend().calls[0], Call::Clear(color));
    }

    #[test]
    fn draw_errors_propagate() {
        let mut backend = RecordingBackend::new(10, 10);
        backend.fail_draw = true;
        let mut pipeline = RenderPipeline::new(backend);

        let err = pipeline.draw_shape(&small_sphere(), 0.0, 0.0).unwrap_err();
        assert!(matches!(err, RenderError::Surface(wgpu::SurfaceError::Timeout)));
        assert_eq!(pipeline.frames_drawn(), 0);
    }

    #[test]
    fn index_count_must_fit_one_draw() {
        assert_eq!(draw_count(36).unwrap(), 36);
        assert_eq!(draw_count(u32::MAX as usize).unwrap(), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            draw_count(u32::MAX as usize + 1),
            Err(RenderError::MeshTooLarge(n)) if n == u32::MAX as usize + 1
        ));
    }
}
