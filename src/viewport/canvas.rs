use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{AffineTransform2D, Surface};
use crate::error::{Result, ViewportError};

/// [`Surface`] backed by an HTML canvas and its 2D rendering context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Creates a fresh `<canvas>` and appends it to the document body.
    pub fn create() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ViewportError::SurfaceCreation("no document available".into()))?;
        let canvas = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| ViewportError::SurfaceCreation("could not create canvas".into()))?;
        let body = document
            .body()
            .ok_or_else(|| ViewportError::SurfaceCreation("document has no body".into()))?;
        body.append_child(&canvas)
            .map_err(|_| ViewportError::SurfaceCreation("could not attach canvas".into()))?;
        Self::from_canvas(canvas)
    }

    /// Wraps a canvas that is already in the DOM, e.g. one mounted by a component.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| ViewportError::SurfaceCreation("could not get canvas context".into()))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_transform(&mut self, t: &AffineTransform2D) {
        self.ctx.set_transform(t.a, t.b, t.c, t.d, t.e, t.f).ok();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, outline: &str) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0)
            .is_err()
        {
            log::warn!("arc rejected at ({x}, {y}) r={radius}");
            return;
        }
        self.ctx.set_stroke_style_str(outline);
        self.ctx.set_fill_style_str(fill);
        self.ctx.stroke();
        self.ctx.fill();
    }
}
