// Per-frame camera policy: turns polled input into viewport pan/zoom calls.
use crate::config::ViewportConfig;
use crate::error::Result;
use crate::state::InputState;
use crate::viewport::{Surface, Viewport};

/// Keys panning the camera, with the direction the *world* moves on screen.
const PAN_KEYS: [(&str, &str, f64, f64); 4] = [
    ("w", "ArrowUp", 0.0, 1.0),
    ("s", "ArrowDown", 0.0, -1.0),
    ("a", "ArrowLeft", 1.0, 0.0),
    ("d", "ArrowRight", -1.0, 0.0),
];

#[derive(Debug, Clone, Default)]
pub struct CameraController {
    pub config: ViewportConfig,
}

impl CameraController {
    pub fn new(config: ViewportConfig) -> Self {
        Self { config }
    }

    /// Applies one frame of input. Drains the wheel delta, so call once per frame.
    pub fn update<S: Surface>(
        &self,
        input: &mut InputState,
        viewport: &mut Viewport<S>,
    ) -> Result<()> {
        let (dx, dy) = PAN_KEYS
            .iter()
            .filter(|(key, alt, _, _)| input.is_key_down(key) || input.is_key_down(alt))
            .fold((0.0_f64, 0.0_f64), |(x, y), &(_, _, kx, ky)| (x + kx, y + ky));
        if dx != 0.0 || dy != 0.0 {
            viewport.pan(dx * self.config.pan_step, dy * self.config.pan_step)?;
        }

        let wheel = input.consume_wheel_delta();
        let factor = if wheel > 0.0 {
            self.config.zoom_out_factor
        } else if wheel < 0.0 {
            self.config.zoom_in_factor
        } else {
            return Ok(());
        };
        self.zoom_clamped(viewport, factor, input.pointer_x(), input.pointer_y())
    }

    pub fn zoom_in_at_center<S: Surface>(&self, viewport: &mut Viewport<S>) -> Result<()> {
        let (cx, cy) = center(viewport);
        self.zoom_clamped(viewport, self.config.zoom_in_factor, cx, cy)
    }

    pub fn zoom_out_at_center<S: Surface>(&self, viewport: &mut Viewport<S>) -> Result<()> {
        let (cx, cy) = center(viewport);
        self.zoom_clamped(viewport, self.config.zoom_out_factor, cx, cy)
    }

    /// Puts the world origin in the middle of the surface at scale 1.
    pub fn recenter<S: Surface>(&self, viewport: &mut Viewport<S>) -> Result<()> {
        viewport.reset();
        let (cx, cy) = center(viewport);
        viewport.pan(cx, cy)
    }

    /// Skips the step when it would leave `[min_scale, max_scale]`; a zoom that
    /// is already moving back towards the range is still allowed.
    fn zoom_clamped<S: Surface>(
        &self,
        viewport: &mut Viewport<S>,
        factor: f64,
        screen_x: f64,
        screen_y: f64,
    ) -> Result<()> {
        let next = viewport.scale() * factor;
        let too_far_in = factor > 1.0 && next > self.config.max_scale;
        let too_far_out = factor < 1.0 && next < self.config.min_scale;
        if too_far_in || too_far_out {
            log::trace!("zoom step to {next} ignored");
            return Ok(());
        }
        viewport.zoom_at(factor, screen_x, screen_y)
    }
}

fn center<S: Surface>(viewport: &Viewport<S>) -> (f64, f64) {
    (
        viewport.width() as f64 / 2.0,
        viewport.height() as f64 / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::RecordingSurface;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn setup() -> (CameraController, InputState, Viewport<RecordingSurface>) {
        (
            CameraController::default(),
            InputState::new(),
            Viewport::initialize(RecordingSurface::new(), 800, 600),
        )
    }

    #[test]
    fn idle_frame_changes_nothing() {
        let (ctrl, mut input, mut vp) = setup();
        ctrl.update(&mut input, &mut vp).unwrap();
        assert_eq!(vp.scale(), 1.0);
        assert_eq!((vp.offset_x(), vp.offset_y()), (0.0, 0.0));
    }

    #[test]
    fn movement_keys_pan_the_world() {
        let (ctrl, mut input, mut vp) = setup();
        input.press_key("w");
        input.press_key("d");
        ctrl.update(&mut input, &mut vp).unwrap();
        assert_eq!(vp.offset_x(), -15.0);
        assert_eq!(vp.offset_y(), 15.0);
    }

    #[test]
    fn opposite_keys_cancel_out() {
        let (ctrl, mut input, mut vp) = setup();
        input.press_key("a");
        input.press_key("ArrowRight");
        ctrl.update(&mut input, &mut vp).unwrap();
        assert_eq!(vp.offset_x(), 0.0);
    }

    #[test]
    fn wheel_down_zooms_out_at_pointer() {
        let (ctrl, mut input, mut vp) = setup();
        input.move_pointer(200.0, 150.0);
        input.add_wheel_delta(120.0);
        let anchor = vp.to_world(200.0, 150.0);

        ctrl.update(&mut input, &mut vp).unwrap();

        assert!(approx_eq(vp.scale(), 0.9));
        let after = vp.to_world(200.0, 150.0);
        assert!(approx_eq(anchor.0, after.0));
        assert!(approx_eq(anchor.1, after.1));
        // delta was consumed, next frame does not zoom again
        ctrl.update(&mut input, &mut vp).unwrap();
        assert!(approx_eq(vp.scale(), 0.9));
    }

    #[test]
    fn wheel_up_zooms_in() {
        let (ctrl, mut input, mut vp) = setup();
        input.add_wheel_delta(-3.0);
        ctrl.update(&mut input, &mut vp).unwrap();
        assert!(approx_eq(vp.scale(), 1.1));
    }

    #[test]
    fn zoom_stops_at_configured_limits() {
        let config = ViewportConfig {
            max_scale: 1.5,
            min_scale: 0.8,
            ..Default::default()
        };
        let ctrl = CameraController::new(config);
        let mut vp = Viewport::initialize(RecordingSurface::new(), 100, 100);
        for _ in 0..20 {
            ctrl.zoom_in_at_center(&mut vp).unwrap();
        }
        assert!(vp.scale() <= 1.5);
        assert!(vp.scale() * 1.1 > 1.5);
        for _ in 0..20 {
            ctrl.zoom_out_at_center(&mut vp).unwrap();
        }
        assert!(vp.scale() >= 0.8);
        assert!(vp.scale() * 0.9 < 0.8);
    }

    #[test]
    fn center_zoom_keeps_center_fixed() {
        let (ctrl, _, mut vp) = setup();
        vp.pan(-40.0, 25.0).unwrap();
        let before = vp.to_world(400.0, 300.0);
        ctrl.zoom_in_at_center(&mut vp).unwrap();
        let after = vp.to_world(400.0, 300.0);
        assert!(approx_eq(before.0, after.0));
        assert!(approx_eq(before.1, after.1));
    }

    #[test]
    fn recenter_puts_origin_mid_surface() {
        let (ctrl, _, mut vp) = setup();
        vp.zoom_at(3.0, 10.0, 10.0).unwrap();
        ctrl.recenter(&mut vp).unwrap();
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.to_screen(0.0, 0.0), (400.0, 300.0));
    }
}
