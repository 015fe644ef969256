use pan_zoom_canvas::components::App;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).ok();
    }
    yew::Renderer::<App>::new().render();
}
