/// 2D affine transform in canvas order `(a, b, c, d, e, f)`.
///
/// A point `(x, y)` maps to `(a*x + c*y + e, b*x + d*y + f)`. The viewport only
/// ever applies uniform scale and translation, so `b` and `c` stay zero and
/// `a == d`, but composition is written out in full.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform2D {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// `self ∘ other`: `other` is applied first, in this transform's local frame.
    /// Matches what `CanvasRenderingContext2D.transform()` does to the context.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        *self = self.multiply(&Self::translation(dx, dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        *self = self.multiply(&Self::scaling(sx, sy));
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det != 0.0 && det.is_finite()
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

impl Default for AffineTransform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
