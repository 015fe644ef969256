// Small colour helpers for the demo scene

pub type Rgb = [f64; 3];

pub fn lerp_rgb(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// CSS `rgb(r, g, b)` string, channels rounded and clamped to 0..=255.
pub fn rgb_css(color: Rgb) -> String {
    let [r, g, b] = color.map(|c| c.round().clamp(0.0, 255.0) as u8);
    format!("rgb({}, {}, {})", r, g, b)
}
