pub mod app;
pub mod camera_controls;
pub mod canvas_view;

pub use app::App;
