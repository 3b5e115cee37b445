//! Byte colors and the small numeric helpers shared by the pipeline

/// An opaque RGB color; alpha is supplied when composed into a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation, truncating toward zero
    pub fn lerp(self, other: Rgb, pct: f32) -> Rgb {
        Rgb {
            r: lerp_byte(self.r, other.r, pct),
            g: lerp_byte(self.g, other.g, pct),
            b: lerp_byte(self.b, other.b, pct),
        }
    }
}

/// Interpolate between two bytes, truncating the result
///
/// `pct` is expected in [0, 1]; the float-to-byte cast saturates outside it.
#[inline]
pub fn lerp_byte(a: u8, b: u8, pct: f32) -> u8 {
    (a as f32 + pct * (b as f32 - a as f32)) as u8
}

/// Floor a normalized value into a gradient index in [0, 255]
///
/// NaN maps to 0.
#[inline]
pub fn clamp_index(normalized: f32) -> u8 {
    if normalized.is_nan() {
        return 0;
    }
    normalized.floor().clamp(0.0, 255.0) as u8
}
