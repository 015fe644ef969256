use super::canvas_view::CanvasView;
use crate::config::ViewportConfig;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Controls config only; camera position always starts fresh
    let config = use_state(ViewportConfig::load_from_storage);

    html! { <CanvasView config={(*config).clone()} /> }
}
