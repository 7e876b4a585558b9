use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, TouchPhase},
    keyboard::KeyCode,
};

use super::rotation::RotationState;
use crate::gfx::geometry::ShapeKind;

/// Discrete commands produced by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    SelectShape(ShapeKind),
    ResetRotation,
    ToggleSpin,
    Quit,
}

/// Turns pointer drags into rotation deltas and keys into [`ControlAction`]s.
///
/// Horizontal movement turns the shape about Y, vertical movement about X,
/// both scaled by `rotate_speed` radians per pixel.
pub struct RotationController {
    pub rotate_speed: f32,
    pub spin_step: f32,
    is_dragging: bool,
    last_position: Option<PhysicalPosition<f64>>,
    active_touch: Option<u64>,
    is_spinning: bool,
}

impl RotationController {
    pub fn new(rotate_speed: f32, spin_step: f32) -> Self {
        Self {
            rotate_speed,
            spin_step,
            is_dragging: false,
            last_position: None,
            active_touch: None,
            is_spinning: false,
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        self.is_dragging = state == ElementState::Pressed;
        if !self.is_dragging {
            self.last_position = None;
        }
    }

    /// Returns `true` if the rotation changed.
    pub fn process_cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        rotation: &mut RotationState,
    ) -> bool {
        let previous = self.last_position.replace(position);
        match previous {
            Some(last) if self.is_dragging => {
                self.apply_drag(position.x - last.x, position.y - last.y, rotation)
            }
            _ => false,
        }
    }

    /// Single-finger drags rotate like the mouse; other fingers are ignored.
    ///
    /// Returns `true` if the rotation changed.
    pub fn process_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
        rotation: &mut RotationState,
    ) -> bool {
        match phase {
            TouchPhase::Started => {
                if self.active_touch.is_none() {
                    self.active_touch = Some(id);
                    self.last_position = Some(location);
                }
                false
            }
            TouchPhase::Moved if self.active_touch == Some(id) => {
                let previous = self.last_position.replace(location);
                match previous {
                    Some(last) => self.apply_drag(location.x - last.x, location.y - last.y, rotation),
                    None => false,
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(id) => {
                self.active_touch = None;
                self.last_position = None;
                false
            }
            _ => false,
        }
    }

    fn apply_drag(&self, dx: f64, dy: f64, rotation: &mut RotationState) -> bool {
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        rotation.rotate_by(dy as f32 * self.rotate_speed, dx as f32 * self.rotate_speed);
        true
    }

    pub fn process_key(&mut self, key: KeyCode, state: ElementState) -> Option<ControlAction> {
        if state != ElementState::Pressed {
            return None;
        }

        if let Some(digit) = shape_digit(key) {
            return ShapeKind::from_digit(digit).map(ControlAction::SelectShape);
        }

        let action = match key {
            KeyCode::KeyR => ControlAction::ResetRotation,
            KeyCode::Space => {
                self.is_spinning = !self.is_spinning;
                ControlAction::ToggleSpin
            }
            KeyCode::Escape => ControlAction::Quit,
            _ => return None,
        };
        Some(action)
    }

    pub fn set_spinning(&mut self, spinning: bool) {
        self.is_spinning = spinning;
    }

    pub fn is_spinning(&self) -> bool {
        self.is_spinning
    }

    /// Returns true if currently rotating
    pub fn is_dragging(&self) -> bool {
        self.is_dragging || self.active_touch.is_some()
    }

    /// Advances the auto-spin by one frame. Returns `true` if the rotation changed.
    pub fn tick(&self, rotation: &mut RotationState) -> bool {
        if !self.is_spinning {
            return false;
        }
        rotation.rotate_by(0.0, self.spin_step);
        true
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(0.01, 0.01)
    }
}

/// Number keys, top row or keypad, that select a shape.
fn shape_digit(key: KeyCode) -> Option<u8> {
    let digit = match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => 1,
        KeyCode::Digit2 | KeyCode::Numpad2 => 2,
        KeyCode::Digit3 | KeyCode::Numpad3 => 3,
        KeyCode::Digit4 | KeyCode::Numpad4 => 4,
        KeyCode::Digit5 | KeyCode::Numpad5 => 5,
        KeyCode::Digit6 | KeyCode::Numpad6 => 6,
        _ => return None,
    };
    Some(digit)
}
