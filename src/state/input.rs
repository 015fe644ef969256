use std::collections::HashMap;

/// Polled keyboard/pointer/wheel state.
///
/// Event handlers only call the writer methods; the frame loop reads. The wheel
/// delta accumulates between frames and is drained by
/// [`consume_wheel_delta`](Self::consume_wheel_delta), so exactly one consumer
/// per frame should read it.
#[derive(Default, Debug, Clone)]
pub struct InputState {
    keys: HashMap<String, bool>,
    pointer_x: f64,
    pointer_y: f64,
    pointer_down: bool,
    wheel_delta: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unknown keys read as released.
    pub fn is_key_down(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn pointer_x(&self) -> f64 {
        self.pointer_x
    }

    pub fn pointer_y(&self) -> f64 {
        self.pointer_y
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Returns the wheel delta accumulated since the last call and resets it.
    pub fn consume_wheel_delta(&mut self) -> f64 {
        std::mem::take(&mut self.wheel_delta)
    }

    pub fn press_key(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into(), true);
    }

    pub fn release_key(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into(), false);
    }

    pub fn move_pointer(&mut self, x: f64, y: f64) {
        self.pointer_x = x;
        self.pointer_y = y;
    }

    pub fn press_pointer(&mut self) {
        self.pointer_down = true;
    }

    pub fn release_pointer(&mut self) {
        self.pointer_down = false;
    }

    pub fn add_wheel_delta(&mut self, delta: f64) {
        if delta.is_finite() {
            self.wheel_delta += delta;
        }
    }

    /// Forget held keys and the pointer button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys.values_mut().for_each(|down| *down = false);
        self.pointer_down = false;
    }
}
