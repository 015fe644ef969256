//! Camera/viewport over an immediate-mode drawing surface.
//!
//! [`Viewport`] owns exactly one [`Surface`] and one [`AffineTransform2D`]. Pan and
//! zoom compose onto the transform in its local frame, every mutation is pushed
//! to the surface straight away, and the drawing primitives are expressed in
//! world space so they follow the camera.

mod canvas;
mod surface;
mod transform;

pub use canvas::CanvasSurface;
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use transform::AffineTransform2D;

use crate::error::{Result, ViewportError, ensure_finite};

/// Outline colour of [`Viewport::draw_circle`].
pub const OUTLINE_COLOR: &str = "white";

pub struct Viewport<S: Surface> {
    surface: S,
    transform: AffineTransform2D,
}

impl Viewport<CanvasSurface> {
    /// Creates a canvas in the document body and sizes it to `width × height`.
    pub fn create(width: u32, height: u32) -> Result<Self> {
        Ok(Self::initialize(CanvasSurface::create()?, width, height))
    }
}

impl<S: Surface> Viewport<S> {
    /// Takes ownership of `surface`, sizes it and starts from the identity transform.
    pub fn initialize(mut surface: S, width: u32, height: u32) -> Self {
        surface.resize(width, height);
        let mut viewport = Self {
            surface,
            transform: AffineTransform2D::IDENTITY,
        };
        viewport.sync();
        log::debug!("viewport initialized at {width}x{height}");
        viewport
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Resizes the surface and re-applies the working transform, which some
    /// backends (HTML canvas included) drop on resize. Camera state is kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.sync();
    }

    /// Back to identity: scale 1, no offset.
    pub fn reset(&mut self) {
        self.transform = AffineTransform2D::IDENTITY;
        self.sync();
    }

    /// Translates the camera by `(dx, dy)` in world units. The on-screen shift is
    /// `(dx, dy)` times the current scale.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<()> {
        let dx = ensure_finite("dx", dx)?;
        let dy = ensure_finite("dy", dy)?;
        self.transform.translate(dx, dy);
        self.sync();
        Ok(())
    }

    /// Multiplies the scale by `factor` while the screen point `(screen_x,
    /// screen_y)` keeps showing the same world point.
    ///
    /// `factor > 1` zooms in, `0 < factor < 1` zooms out. Anything else is
    /// rejected with [`ViewportError::InvalidZoomFactor`] and the transform is
    /// left as it was.
    pub fn zoom_at(&mut self, factor: f64, screen_x: f64, screen_y: f64) -> Result<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ViewportError::InvalidZoomFactor(factor));
        }
        let screen_x = ensure_finite("screen_x", screen_x)?;
        let screen_y = ensure_finite("screen_y", screen_y)?;

        let (local_x, local_y) = self.to_world(screen_x, screen_y);
        let mut next = self.transform;
        next.translate(local_x, local_y);
        next.scale(factor, factor);
        next.translate(-local_x, -local_y);

        // repeated tiny factors can still underflow to zero
        if !next.is_invertible() || !next.e.is_finite() || !next.f.is_finite() {
            return Err(ViewportError::InvalidZoomFactor(factor));
        }
        self.transform = next;
        self.sync();
        Ok(())
    }

    pub fn scale(&self) -> f64 {
        self.transform.a
    }

    pub fn offset_x(&self) -> f64 {
        self.transform.e
    }

    pub fn offset_y(&self) -> f64 {
        self.transform.f
    }

    pub fn transform(&self) -> AffineTransform2D {
        self.transform
    }

    /// Screen (pixel) coordinates to world coordinates. This is the only inverse
    /// map in the crate; it relies on `b` and `c` staying zero.
    pub fn to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        let t = &self.transform;
        ((screen_x - t.e) / t.a, (screen_y - t.f) / t.d)
    }

    /// World coordinates to screen (pixel) coordinates.
    pub fn to_screen(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        self.transform.apply(world_x, world_y)
    }

    /// Fills the whole surface with `color`, ignoring the camera. The working
    /// transform is restored before returning.
    pub fn clear(&mut self, color: &str) {
        let (w, h) = (self.surface.width() as f64, self.surface.height() as f64);
        self.surface.set_transform(&AffineTransform2D::IDENTITY);
        self.surface.fill_rect(0.0, 0.0, w, h, color);
        self.sync();
    }

    /// Filled, outlined circle in world space; its on-screen radius follows the zoom.
    pub fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str) -> Result<()> {
        let x = ensure_finite("x", x)?;
        let y = ensure_finite("y", y)?;
        let radius = ensure_finite("radius", radius)?;
        if radius < 0.0 {
            return Err(ViewportError::InvalidArgument {
                name: "radius",
                value: radius,
            });
        }
        self.surface.circle(x, y, radius, fill, OUTLINE_COLOR);
        Ok(())
    }

    /// Filled rectangle in world space, centred on `(x, y)`.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) -> Result<()> {
        let x = ensure_finite("x", x)?;
        let y = ensure_finite("y", y)?;
        let width = ensure_finite("width", width)?;
        let height = ensure_finite("height", height)?;
        self.surface
            .fill_rect(x - width / 2.0, y - height / 2.0, width, height, fill);
        Ok(())
    }

    fn sync(&mut self) {
        self.surface.set_transform(&self.transform);
    }
}

// `CanvasSurface` needs a browser document and 2D context, so its
// `SurfaceCreation` failures are only exercised in the browser. Everything
// here runs against `RecordingSurface`.
#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn viewport() -> Viewport<RecordingSurface> {
        Viewport::initialize(RecordingSurface::new(), 800, 600)
    }

    #[test]
    fn starts_at_identity() {
        let vp = viewport();
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset_x(), 0.0);
        assert_eq!(vp.offset_y(), 0.0);
        assert_eq!(vp.transform(), AffineTransform2D::IDENTITY);
        assert_eq!((vp.width(), vp.height()), (800, 600));
        assert_eq!(
            vp.surface().commands(),
            &[
                DrawCommand::Resize {
                    width: 800,
                    height: 600
                },
                DrawCommand::SetTransform(AffineTransform2D::IDENTITY),
            ]
        );
    }

    #[test]
    fn pan_is_scaled_by_current_zoom() {
        let mut vp = viewport();
        vp.zoom_at(2.0, 0.0, 0.0).unwrap();
        vp.pan(15.0, -10.0).unwrap();
        assert_eq!(vp.offset_x(), 30.0);
        assert_eq!(vp.offset_y(), -20.0);
    }

    #[test]
    fn pan_then_opposite_pan_restores_transform() {
        let mut vp = viewport();
        vp.zoom_at(1.5, 120.0, 80.0).unwrap();
        let before = vp.transform();
        vp.pan(37.25, -12.5).unwrap();
        vp.pan(-37.25, 12.5).unwrap();
        let after = vp.transform();
        assert!(approx_eq(before.e, after.e));
        assert!(approx_eq(before.f, after.f));
        assert_eq!(before.a, after.a);
    }

    #[test]
    fn zoom_keeps_anchor_on_the_same_world_point() {
        let mut vp = viewport();
        vp.pan(-130.0, 45.0).unwrap();
        vp.zoom_at(0.75, 10.0, 500.0).unwrap();

        for &(factor, sx, sy) in &[(2.0, 400.0, 300.0), (0.3, 17.0, 590.0), (1.1, 799.0, 0.0)] {
            let before = vp.to_world(sx, sy);
            vp.zoom_at(factor, sx, sy).unwrap();
            let after = vp.to_world(sx, sy);
            assert!(approx_eq(before.0, after.0), "{before:?} vs {after:?}");
            assert!(approx_eq(before.1, after.1), "{before:?} vs {after:?}");
        }
    }

    #[test]
    fn zoom_in_then_out_restores_scale() {
        let mut vp = viewport();
        vp.zoom_at(2.0, 250.0, 125.0).unwrap();
        vp.zoom_at(0.5, 250.0, 125.0).unwrap();
        assert!(approx_eq(vp.scale(), 1.0));
        assert!(approx_eq(vp.offset_x(), 0.0));
        assert!(approx_eq(vp.offset_y(), 0.0));
    }

    #[test]
    fn scale_stays_uniform_without_shear() {
        let mut vp = viewport();
        vp.zoom_at(1.3, 5.0, 9.0).unwrap();
        vp.pan(3.0, 4.0).unwrap();
        vp.zoom_at(0.6, 700.0, 20.0).unwrap();
        let t = vp.transform();
        assert_eq!(t.a, t.d);
        assert_eq!(t.b, 0.0);
        assert_eq!(t.c, 0.0);
    }

    #[test]
    fn zero_zoom_is_rejected_and_changes_nothing() {
        let mut vp = viewport();
        vp.zoom_at(1.5, 30.0, 40.0).unwrap();
        let before = vp.transform();
        let recorded = vp.surface().commands().len();

        let err = vp.zoom_at(0.0, 400.0, 300.0).unwrap_err();
        assert!(matches!(err, ViewportError::InvalidZoomFactor(f) if f == 0.0));
        assert_eq!(vp.transform(), before);
        assert_eq!(vp.surface().commands().len(), recorded);
    }

    #[test]
    fn negative_and_non_finite_zoom_factors_are_rejected() {
        let mut vp = viewport();
        for factor in [-2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                vp.zoom_at(factor, 0.0, 0.0),
                Err(ViewportError::InvalidZoomFactor(_))
            ));
        }
        assert_eq!(vp.transform(), AffineTransform2D::IDENTITY);
    }

    #[test]
    fn non_finite_arguments_are_rejected() {
        let mut vp = viewport();
        assert!(matches!(
            vp.pan(f64::NAN, 0.0),
            Err(ViewportError::InvalidArgument { name: "dx", .. })
        ));
        assert!(matches!(
            vp.zoom_at(2.0, 0.0, f64::INFINITY),
            Err(ViewportError::InvalidArgument { name: "screen_y", .. })
        ));
        assert!(vp.draw_rect(0.0, 0.0, f64::NAN, 1.0, "red").is_err());
        assert!(vp.draw_circle(f64::NEG_INFINITY, 0.0, 1.0, "red").is_err());
        assert_eq!(vp.transform(), AffineTransform2D::IDENTITY);
    }

    #[test]
    fn to_screen_inverts_to_world() {
        let mut vp = viewport();
        vp.pan(12.0, -8.0).unwrap();
        vp.zoom_at(3.0, 200.0, 100.0).unwrap();
        let (wx, wy) = vp.to_world(345.0, 210.0);
        let (sx, sy) = vp.to_screen(wx, wy);
        assert!(approx_eq(sx, 345.0));
        assert!(approx_eq(sy, 210.0));
    }

    #[test]
    fn clear_fills_in_screen_space_and_restores_transform() {
        let mut vp = viewport();
        vp.zoom_at(2.0, 400.0, 300.0).unwrap();
        vp.pan(10.0, 20.0).unwrap();
        let working = vp.transform();
        let start = vp.surface().commands().len();

        vp.clear("black");

        assert_eq!(vp.transform(), working);
        assert_eq!(
            &vp.surface().commands()[start..],
            &[
                DrawCommand::SetTransform(AffineTransform2D::IDENTITY),
                DrawCommand::FillRect {
                    x: 0.0,
                    y: 0.0,
                    width: 800.0,
                    height: 600.0,
                    color: "black".into()
                },
                DrawCommand::SetTransform(working),
            ]
        );
        assert_eq!(vp.surface().current_transform(), working);
    }

    #[test]
    fn rect_is_centred_on_its_position() {
        let mut vp = viewport();
        vp.draw_rect(100.0, 50.0, 20.0, 10.0, "#004e00").unwrap();
        assert_eq!(
            vp.surface().commands().last(),
            Some(&DrawCommand::FillRect {
                x: 90.0,
                y: 45.0,
                width: 20.0,
                height: 10.0,
                color: "#004e00".into()
            })
        );
    }

    #[test]
    fn circle_uses_fixed_outline() {
        let mut vp = viewport();
        vp.draw_circle(1.0, 2.0, 3.0, "rgb(10, 20, 30)").unwrap();
        assert_eq!(
            vp.surface().commands().last(),
            Some(&DrawCommand::Circle {
                x: 1.0,
                y: 2.0,
                radius: 3.0,
                fill: "rgb(10, 20, 30)".into(),
                outline: OUTLINE_COLOR.into()
            })
        );
    }

    #[test]
    fn negative_radius_is_rejected() {
        let mut vp = viewport();
        let recorded = vp.surface().commands().len();
        assert!(matches!(
            vp.draw_circle(0.0, 0.0, -1.0, "red"),
            Err(ViewportError::InvalidArgument { name: "radius", .. })
        ));
        assert_eq!(vp.surface().commands().len(), recorded);
    }

    #[test]
    fn zero_area_rect_is_passed_through() {
        let mut vp = viewport();
        vp.draw_rect(5.0, 5.0, 0.0, 0.0, "red").unwrap();
        assert!(matches!(
            vp.surface().commands().last(),
            Some(DrawCommand::FillRect { width, height, .. }) if *width == 0.0 && *height == 0.0
        ));
    }

    #[test]
    fn resize_keeps_camera_and_reapplies_it() {
        let mut vp = viewport();
        vp.zoom_at(2.5, 100.0, 100.0).unwrap();
        let working = vp.transform();
        vp.resize(1024, 768);
        assert_eq!(vp.transform(), working);
        assert_eq!(vp.surface().current_transform(), working);
        assert_eq!((vp.width(), vp.height()), (1024, 768));
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut vp = viewport();
        vp.zoom_at(4.0, 1.0, 1.0).unwrap();
        vp.pan(5.0, 5.0).unwrap();
        vp.reset();
        assert_eq!(vp.transform(), AffineTransform2D::IDENTITY);
        assert_eq!(vp.surface().current_transform(), AffineTransform2D::IDENTITY);
    }
}
