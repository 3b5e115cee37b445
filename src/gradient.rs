//! Two-color gradient ramp
//!
//! Maps an intensity index (0-255) to a color interpolated between two
//! endpoint colors. Built once at startup and never modified.

use crate::color::Rgb;

/// Number of entries in every gradient
pub const GRADIENT_SIZE: usize = 256;

/// An immutable 256-entry color ramp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    colors: [Rgb; GRADIENT_SIZE],
}

impl Gradient {
    /// Build the ramp from `start` (index 0) to `end` (index 255)
    ///
    /// Entry `i` is the per-channel interpolation at `i / 255`, truncated to
    /// bytes. At `i = 255` the fraction is exactly 1.0, and `a + (b - a)` is
    /// exact for byte-valued floats, so the last entry is always `end`.
    pub fn new(start: Rgb, end: Rgb) -> Self {
        let mut colors = [Rgb::default(); GRADIENT_SIZE];
        for (i, color) in colors.iter_mut().enumerate() {
            let pct = i as f32 / (GRADIENT_SIZE - 1) as f32;
            *color = start.lerp(end, pct);
        }
        Self { colors }
    }

    #[inline]
    pub fn get(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    pub fn len(&self) -> usize {
        GRADIENT_SIZE
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> Rgb {
        self.colors[0]
    }

    pub fn last(&self) -> Rgb {
        self.colors[GRADIENT_SIZE - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.colors.iter()
    }
}
