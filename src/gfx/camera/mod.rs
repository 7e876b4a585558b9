pub mod rotation;
pub mod rotation_controller;
pub mod transform;

// Re-export main types
pub use rotation::RotationState;
pub use rotation_controller::{ControlAction, RotationController};
pub use transform::{model_view, projection};
