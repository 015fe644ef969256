use super::AffineTransform2D;

/// Immediate-mode 2D drawing target the viewport renders through.
///
/// Coordinates passed to the drawing calls are interpreted through whatever
/// transform was last handed to [`Surface::set_transform`]. Colours are opaque
/// strings, forwarded to the backend as-is.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Sets the backing pixel size. Backends may drop their transform when resized.
    fn resize(&mut self, width: u32, height: u32);

    fn set_transform(&mut self, transform: &AffineTransform2D);

    /// Fills an axis-aligned rectangle anchored at its top-left corner.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);

    /// Strokes then fills a full circle.
    fn circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, outline: &str);
}

/// One call received by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize {
        width: u32,
        height: u32,
    },
    SetTransform(AffineTransform2D),
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: String,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        fill: String,
        outline: String,
    },
}

/// Surface that keeps a log of every call instead of drawing. Used headless
/// and in tests to check what reached the backend and in which order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    transform: AffineTransform2D,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Transform the backend would currently draw with.
    pub fn current_transform(&self) -> AffineTransform2D {
        self.transform
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        // like a canvas element, resizing wipes the context transform
        self.transform = AffineTransform2D::IDENTITY;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn set_transform(&mut self, transform: &AffineTransform2D) {
        self.transform = *transform;
        self.commands.push(DrawCommand::SetTransform(*transform));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color: color.to_owned(),
        });
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, outline: &str) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            fill: fill.to_owned(),
            outline: outline.to_owned(),
        });
    }
}
