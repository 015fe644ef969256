//! Pan/zoom camera for an immediate-mode 2D canvas, plus the polled input state
//! and the small yew front end that drive it.

pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod util;
pub mod viewport;

pub use config::ViewportConfig;
pub use error::{Result, ViewportError};
pub use state::{CameraController, InputState};
pub use viewport::{AffineTransform2D, CanvasSurface, RecordingSurface, Surface, Viewport};
