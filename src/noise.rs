//! Coherent noise synthesis for backgrounds
//!
//! Produces a [`ScalarField`] by summing octaves of Perlin noise, together
//! with the observed min/max the normalizer needs. Generated once at startup.

use ::noise::{NoiseFn, Perlin};

use crate::field::{FieldBounds, ScalarField};

/// Octave combination rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    /// Fractal Brownian motion: signed sum of octaves
    Fbm,
    /// Turbulence: sum of absolute octave values (billowy, never negative)
    Turbulence,
}

/// Parameters for fractal noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParams {
    pub kind: NoiseKind,
    /// Base frequency in cycles per pixel
    pub frequency: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Amplitude multiplier per octave (persistence)
    pub gain: f64,
    pub octaves: u32,
    pub seed: u32,
}

impl NoiseParams {
    /// Soft cloud preset used by the demos
    pub fn clouds() -> Self {
        Self {
            kind: NoiseKind::Fbm,
            frequency: 0.01,
            lacunarity: 2.0,
            gain: 0.5,
            octaves: 3,
            seed: 3,
        }
    }

    pub fn with_kind(mut self, kind: NoiseKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self::clouds()
    }
}

/// Sample one point of fractal noise
fn fractal(perlin: &Perlin, params: &NoiseParams, x: f64, y: f64) -> f64 {
    let mut sum = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = params.frequency;

    for _ in 0..params.octaves {
        let n = perlin.get([x * frequency, y * frequency]);
        sum += match params.kind {
            NoiseKind::Fbm => n * amplitude,
            NoiseKind::Turbulence => n.abs() * amplitude,
        };
        frequency *= params.lacunarity;
        amplitude *= params.gain;
    }
    sum
}

/// Generate a `width` x `height` field and its bounds
///
/// An empty field reports degenerate (0, 0) bounds.
pub fn generate(params: &NoiseParams, width: u32, height: u32) -> (ScalarField, FieldBounds) {
    let perlin = Perlin::new(params.seed);
    let mut values = Vec::with_capacity(width as usize * height as usize);
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;

    for y in 0..height {
        for x in 0..width {
            let v = fractal(&perlin, params, x as f64, y as f64) as f32;
            min = min.min(v);
            max = max.max(v);
            values.push(v);
        }
    }

    let bounds = if values.is_empty() {
        FieldBounds::new(0.0, 0.0)
    } else {
        FieldBounds::new(min, max)
    };

    log::debug!(
        "Generated {:?} noise {}x{} ({} octaves), bounds [{:.4}, {:.4}]",
        params.kind,
        width,
        height,
        params.octaves,
        bounds.min,
        bounds.max
    );

    let field = ScalarField {
        width,
        height,
        values,
    };
    (field, bounds)
}
