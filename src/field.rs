//! Scalar field normalization and colorization
//!
//! A raw noise field holds unbounded samples. Normalizing rescales them so the
//! observed minimum lands on 0 and the maximum on 255; colorizing looks each
//! normalized value up in a [`Gradient`] and writes an RGBA pixel buffer.
//!
//! Both operations treat the field as read-only and allocate their output.

use crate::canvas::PixelBuffer;
use crate::color::clamp_index;
use crate::error::{BounceError, Result};
use crate::gradient::{GRADIENT_SIZE, Gradient};

/// Largest normalized value (top of the gradient)
const NORMALIZED_MAX: f64 = (GRADIENT_SIZE - 1) as f64;

/// Dense 2D grid of samples, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) values: Vec<f32>,
}

impl ScalarField {
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(BounceError::SizeMismatch {
                width,
                height,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Observed (min, max) of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f32,
    pub max: f32,
}

impl FieldBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Bounds of the finite values in `values`, `None` if there are none
    pub fn of(values: &[f32]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Self::new(v, v)),
                Some(b) => Some(Self::new(b.min.min(v), b.max.max(v))),
            })
    }

    /// A flat (or malformed) range that cannot be rescaled
    pub fn is_degenerate(&self) -> bool {
        self.span().is_none()
    }

    /// `max - min` in f64, `None` when the range is flat, inverted or non-finite
    ///
    /// Widening keeps subnormal spans from overflowing the rescale factor.
    fn span(&self) -> Option<f64> {
        if !(self.max > self.min) || !(self.max - self.min).is_finite() {
            return None;
        }
        let span = self.max as f64 - self.min as f64;
        (NORMALIZED_MAX / span).is_finite().then_some(span)
    }
}

/// Rescale every sample into [0, 255] space (not clamped)
///
/// Computed as `255 * (v - min) / (max - min)`, so `min` lands on exactly 0
/// and `max` on exactly 255 whatever the magnitude of the bounds. A
/// degenerate range yields all zeros.
pub fn normalize(field: &ScalarField, bounds: FieldBounds) -> Vec<f32> {
    let Some(span) = bounds.span() else {
        log::warn!(
            "Degenerate field bounds ({}, {}), mapping to gradient start",
            bounds.min,
            bounds.max
        );
        return vec![0.0; field.values.len()];
    };
    let min = bounds.min as f64;
    field
        .values
        .iter()
        .map(|&v| (NORMALIZED_MAX * (v as f64 - min) / span) as f32)
        .collect()
}

/// Gradient index for every cell, floored and clamped to [0, 255]
pub fn gradient_indices(field: &ScalarField, bounds: FieldBounds) -> Vec<u8> {
    normalize(field, bounds)
        .into_iter()
        .map(clamp_index)
        .collect()
}

/// Map the field through `gradient` into a new RGBA pixel buffer
///
/// Only RGB is written; alpha stays 0 and is ignored by the presenter.
pub fn colorize(field: &ScalarField, bounds: FieldBounds, gradient: &Gradient) -> PixelBuffer {
    let mut pixels = PixelBuffer::new(field.width, field.height);
    for (i, index) in gradient_indices(field, bounds).into_iter().enumerate() {
        pixels.set_rgb_at(i, gradient.get(index));
    }
    pixels
}
