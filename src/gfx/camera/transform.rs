//! Model-view and projection matrices for the fixed viewing setup.
//!
//! The camera sits on the +Z axis looking at the origin from
//! [`CAMERA_DISTANCE`] units away; the shape is turned by two angles instead of
//! moving the camera.

use cgmath::{perspective, Matrix4, Rad, Vector3};

/// Camera pull-back along -Z applied before the rotations.
pub const CAMERA_DISTANCE: f32 = 6.0;
/// Vertical field of view.
pub const FIELD_OF_VIEW: Rad<f32> = Rad(std::f32::consts::FRAC_PI_4);
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Remaps OpenGL clip-space depth (`[-1, 1]`) to the `[0, 1]` range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Translation by `(0, 0, -CAMERA_DISTANCE)`, then rotation about X by
/// `angle_x`, then about Y by `angle_y`.
///
/// Points are therefore spun about Y first and X second before being pushed
/// away from the camera. Angles are in radians and unbounded.
pub fn model_view(angle_x: f32, angle_y: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.0, 0.0, -CAMERA_DISTANCE))
        * Matrix4::from_angle_x(Rad(angle_x))
        * Matrix4::from_angle_y(Rad(angle_y))
}

/// Right-handed perspective projection with OpenGL depth conventions.
///
/// A degenerate aspect ratio (zero, negative or non-finite, e.g. from a
/// minimized window) falls back to `1.0`.
pub fn projection(aspect_ratio: f32) -> Matrix4<f32> {
    let aspect = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    };
    perspective(FIELD_OF_VIEW, aspect, Z_NEAR, Z_FAR)
}

/// Width over height, as used by [`projection`].
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}
