use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, Window};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use crate::config::ViewportConfig;
use crate::error::{Result, ViewportError};
use crate::model::Scene;
use crate::state::{CameraController, InputListeners, InputState};
use crate::viewport::{CanvasSurface, Viewport};

type SharedViewport = Rc<RefCell<Option<Viewport<CanvasSurface>>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct CanvasViewProps {
    pub config: ViewportConfig,
}

#[function_component(CanvasView)]
pub fn canvas_view(props: &CanvasViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let viewport: SharedViewport = use_mut_ref(|| None);
    let input = use_mut_ref(InputState::new);
    let scene = use_mut_ref(Scene::new);
    let controller = use_mut_ref({
        let config = props.config.clone();
        move || CameraController::new(config)
    });

    // Mount: surface, listeners, frame loop
    {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let input = input.clone();
        let scene = scene.clone();
        let controller = controller.clone();
        use_effect_with((), move |_| {
            let teardown: Box<dyn FnOnce()> =
                match mount(canvas_ref, viewport, input, scene, controller) {
                    Ok(teardown) => Box::new(teardown),
                    Err(err) => {
                        log::error!("canvas view failed to start: {err}");
                        Box::new(|| ())
                    }
                };
            teardown
        });
    }

    type CameraAction = fn(&CameraController, &mut Viewport<CanvasSurface>) -> Result<()>;
    let camera_cb = |action: CameraAction| {
        let viewport = viewport.clone();
        let controller = controller.clone();
        Callback::from(move |()| {
            if let Some(vp) = viewport.borrow_mut().as_mut() {
                if let Err(err) = action(&controller.borrow(), vp) {
                    log::warn!("camera control failed: {err}");
                }
            }
        })
    };
    let pan_cb = |dx: f64, dy: f64| {
        let viewport = viewport.clone();
        let controller = controller.clone();
        Callback::from(move |()| {
            let step = controller.borrow().config.pan_step * 4.0;
            if let Some(vp) = viewport.borrow_mut().as_mut() {
                if let Err(err) = vp.pan(dx * step, dy * step) {
                    log::warn!("camera pan failed: {err}");
                }
            }
        })
    };
    let on_clear_markers = {
        let scene = scene.clone();
        Callback::from(move |()| scene.borrow_mut().clear_markers())
    };

    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden;">
        <canvas ref={canvas_ref} id="viewport-canvas" style="display:block;"></canvas>
        <CameraControls
            on_zoom_in={camera_cb(CameraController::zoom_in_at_center)}
            on_zoom_out={camera_cb(CameraController::zoom_out_at_center)}
            on_pan_left={pan_cb(1.0, 0.0)}
            on_pan_right={pan_cb(-1.0, 0.0)}
            on_pan_up={pan_cb(0.0, 1.0)}
            on_pan_down={pan_cb(0.0, -1.0)}
            on_center={camera_cb(CameraController::recenter)}
            on_clear_markers={on_clear_markers}
        />
    </div>}
}

fn mount(
    canvas_ref: NodeRef,
    viewport: SharedViewport,
    input: Rc<RefCell<InputState>>,
    scene: Rc<RefCell<Scene>>,
    controller: Rc<RefCell<CameraController>>,
) -> Result<impl FnOnce()> {
    let window = web_sys::window()
        .ok_or_else(|| ViewportError::SurfaceCreation("no global window".into()))?;
    let canvas = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or_else(|| ViewportError::SurfaceCreation("canvas not mounted".into()))?;

    let (width, height) = window_size(&window);
    let surface = CanvasSurface::from_canvas(canvas.clone())?;
    let mut vp = Viewport::initialize(surface, width, height);
    controller.borrow().recenter(&mut vp)?;
    *viewport.borrow_mut() = Some(vp);

    let listeners = InputListeners::attach(&window, &canvas, input.clone()).map_err(|err| {
        ViewportError::SurfaceCreation(format!("could not attach input: {err:?}"))
    })?;

    let resize_cb = {
        let viewport = viewport.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let (width, height) = window_size(&window);
            if let Some(vp) = viewport.borrow_mut().as_mut() {
                vp.resize(width, height);
            }
        }) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
        .ok();

    // Frame loop
    let raf_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
    let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let raf_id = raf_id.clone();
        let frame_cell_loop = frame_cell.clone();
        let window_loop = window.clone();
        let viewport = viewport.clone();
        *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(vp) = viewport.borrow_mut().as_mut() {
                draw_frame(vp, &input, &scene, &controller.borrow());
            }
            if let Some(frame) = frame_cell_loop.borrow().as_ref() {
                let next = window_loop.request_animation_frame(frame.as_ref().unchecked_ref());
                if let Ok(id) = next {
                    *raf_id.borrow_mut() = Some(id);
                }
            }
        }) as Box<dyn FnMut()>));
    }
    if let Some(frame) = frame_cell.borrow().as_ref() {
        if let Ok(id) = window.request_animation_frame(frame.as_ref().unchecked_ref()) {
            *raf_id.borrow_mut() = Some(id);
        }
    }
    log::info!("canvas view mounted at {width}x{height}");

    Ok(move || {
        let _ = window.remove_event_listener_with_callback(
            "resize",
            resize_cb.as_ref().unchecked_ref(),
        );
        if let Some(id) = raf_id.borrow_mut().take() {
            let _ = window.cancel_animation_frame(id);
        }
        // the frame closure holds its own cell; dropping it breaks the cycle
        frame_cell.borrow_mut().take();
        drop(listeners);
        viewport.borrow_mut().take();
    })
}

fn draw_frame(
    vp: &mut Viewport<CanvasSurface>,
    input: &RefCell<InputState>,
    scene: &RefCell<Scene>,
    controller: &CameraController,
) {
    {
        let mut input = input.borrow_mut();
        if let Err(err) = controller.update(&mut input, vp) {
            log::warn!("camera update failed: {err}");
        }
        scene.borrow_mut().place_marker_at_pointer(&input, vp);
    }
    vp.clear(&controller.config.clear_color);
    if let Err(err) = scene.borrow().draw(vp) {
        log::warn!("scene draw failed: {err}");
    }
}

fn window_size(window: &Window) -> (u32, u32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    (width.max(0.0) as u32, height.max(0.0) as u32)
}
