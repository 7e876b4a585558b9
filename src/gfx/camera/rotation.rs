use cgmath::Matrix4;

use super::transform::model_view;

/// Two unbounded rotation angles in radians, about X and about Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub angle_x: f32,
    pub angle_y: f32,
}

impl RotationState {
    pub fn new(angle_x: f32, angle_y: f32) -> Self {
        Self { angle_x, angle_y }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn rotate_by(&mut self, delta_x: f32, delta_y: f32) {
        self.angle_x += delta_x;
        self.angle_y += delta_y;
    }

    pub fn model_view(&self) -> Matrix4<f32> {
        model_view(self.angle_x, self.angle_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_then_reset() {
        let mut rotation = RotationState::default();
        rotation.rotate_by(0.5, -1.25);
        rotation.rotate_by(0.5, 0.25);
        assert_eq!(rotation, RotationState::new(1.0, -1.0));
        assert_eq!(rotation.model_view(), model_view(1.0, -1.0));

        rotation.reset();
        assert_eq!(rotation, RotationState::new(0.0, 0.0));
    }
}
