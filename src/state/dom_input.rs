use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window};

use super::InputState;

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// DOM event listeners feeding an [`InputState`]. Every listener is removed
/// again when this is dropped.
pub struct InputListeners {
    attached: Vec<(EventTarget, &'static str, Listener)>,
}

impl InputListeners {
    /// Keyboard, mouse-up and blur go on the window so they are not lost when
    /// the pointer leaves the canvas; pointer position, mouse-down and wheel go
    /// on the canvas and use canvas-relative offsets.
    pub fn attach(
        window: &Window,
        canvas: &HtmlCanvasElement,
        input: Rc<RefCell<InputState>>,
    ) -> Result<Self, JsValue> {
        let mut listeners = Self {
            attached: Vec::new(),
        };
        let win: &EventTarget = window.as_ref();
        let cvs: &EventTarget = canvas.as_ref();

        listeners.listen(win, "keydown", {
            let input = input.clone();
            move |e| {
                if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
                    input.borrow_mut().press_key(e.key());
                }
            }
        })?;
        listeners.listen(win, "keyup", {
            let input = input.clone();
            move |e| {
                if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
                    input.borrow_mut().release_key(e.key());
                }
            }
        })?;
        listeners.listen(win, "blur", {
            let input = input.clone();
            move |_| input.borrow_mut().release_all()
        })?;
        listeners.listen(cvs, "mousemove", {
            let input = input.clone();
            move |e| {
                if let Some(e) = e.dyn_ref::<MouseEvent>() {
                    input
                        .borrow_mut()
                        .move_pointer(e.offset_x() as f64, e.offset_y() as f64);
                }
            }
        })?;
        listeners.listen(cvs, "mousedown", {
            let input = input.clone();
            move |e| {
                if let Some(e) = e.dyn_ref::<MouseEvent>() {
                    if e.button() == 0 {
                        let mut input = input.borrow_mut();
                        input.move_pointer(e.offset_x() as f64, e.offset_y() as f64);
                        input.press_pointer();
                    }
                }
            }
        })?;
        listeners.listen(win, "mouseup", {
            let input = input.clone();
            move |e| {
                if let Some(e) = e.dyn_ref::<MouseEvent>() {
                    if e.button() == 0 {
                        input.borrow_mut().release_pointer();
                    }
                }
            }
        })?;
        listeners.listen(cvs, "wheel", move |e| {
            if let Some(e) = e.dyn_ref::<WheelEvent>() {
                e.prevent_default();
                input.borrow_mut().add_wheel_delta(e.delta_y());
            }
        })?;

        Ok(listeners)
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), JsValue> {
        let cb: Listener = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
        let function = cb.as_ref().unchecked_ref::<js_sys::Function>();
        target.add_event_listener_with_callback(event, function)?;
        self.attached.push((target.clone(), event, cb));
        Ok(())
    }
}

impl Drop for InputListeners {
    fn drop(&mut self) {
        for (target, event, cb) in self.attached.drain(..) {
            let _ = target.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
        }
    }
}
