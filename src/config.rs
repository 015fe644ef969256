//! Camera control settings. Only how the camera reacts to input is configurable;
//! the camera position itself is never stored.

use serde::Deserialize;

use crate::error::{Result, ViewportError};

/// Local storage key the app reads [`ViewportConfig`] from.
pub const STORAGE_KEY: &str = "pzc_viewport_config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// World units panned per frame while a movement key is held.
    pub pan_step: f64,
    /// Applied when the wheel scrolls up (negative delta).
    pub zoom_in_factor: f64,
    /// Applied when the wheel scrolls down (positive delta).
    pub zoom_out_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub clear_color: String,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            pan_step: 15.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            min_scale: 0.05,
            max_scale: 40.0,
            clear_color: "black".into(),
        }
    }
}

impl ViewportConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Reads the config from browser local storage, falling back to defaults when
    /// the key is missing or unreadable.
    pub fn load_from_storage() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|err| {
                log::warn!("ignoring stored viewport config: {err}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    fn validate(self) -> Result<Self> {
        for (name, value) in [
            ("zoom_in_factor", self.zoom_in_factor),
            ("zoom_out_factor", self.zoom_out_factor),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ViewportError::InvalidArgument { name, value });
            }
        }
        if !self.pan_step.is_finite() {
            return Err(ViewportError::InvalidArgument {
                name: "pan_step",
                value: self.pan_step,
            });
        }
        if self.min_scale > self.max_scale {
            return Err(ViewportError::InvalidArgument {
                name: "min_scale",
                value: self.min_scale,
            });
        }
        Ok(self)
    }
}
