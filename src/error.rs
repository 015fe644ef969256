use thiserror::Error;

/// Everything the viewport, its surfaces and its configuration can fail with.
#[derive(Debug, Error)]
pub enum ViewportError {
    /// The host could not hand out a 2D drawing context. Fatal at startup.
    #[error("could not create drawing surface: {0}")]
    SurfaceCreation(String),

    /// Zero, negative or non-finite zoom factor. The transform is left untouched.
    #[error("invalid zoom factor {0}: must be finite and greater than zero")]
    InvalidZoomFactor(f64),

    #[error("invalid argument `{name}`: {value}")]
    InvalidArgument { name: &'static str, value: f64 },

    #[error("malformed viewport config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T, E = ViewportError> = std::result::Result<T, E>;

/// Rejects NaN and infinities so they never reach the transform.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ViewportError::InvalidArgument { name, value })
    }
}
