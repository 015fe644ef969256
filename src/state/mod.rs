pub mod camera;
pub mod dom_input;
pub mod input;

pub use camera::CameraController;
pub use dom_input::InputListeners;
pub use input::InputState;
