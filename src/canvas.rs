//! Software pixel buffer and compositing
//!
//! All drawing happens on the CPU into an RGBA byte buffer (row-major,
//! 4 bytes per pixel, stride = width * 4). The finished buffer is handed to
//! the presenter once per frame.

use glam::Vec2;

use crate::color::Rgb;
use crate::consts::BYTES_PER_PIXEL;
use crate::error::{BounceError, Result};

/// Destination rectangle in pixel coordinates (may extend past the buffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// A decoded RGBA image that can be blitted onto a [`PixelBuffer`]
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    /// Alpha-blend onto the destination instead of overwriting it
    pub blend: bool,
}

impl Texture {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
            blend: false,
        })
    }

    pub fn with_blend(mut self, blend: bool) -> Self {
        self.blend = blend;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> &[u8] {
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        &self.pixels[i..i + BYTES_PER_PIXEL]
    }
}

/// RGBA8 pixel buffer, exactly `width * height * 4` bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zeroed buffer (transparent black)
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; rgba_len(width, height)],
        }
    }

    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        check_len(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at (x, y), `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Set the RGB channels of a pixel, leaving alpha untouched
    ///
    /// Coordinates outside the buffer are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let i = self.offset(x as u32, y as u32);
        self.write_rgb(i, color);
    }

    /// Set the RGB channels of the pixel at flat (row-major) index `index`
    #[inline]
    pub(crate) fn set_rgb_at(&mut self, index: usize, color: Rgb) {
        self.write_rgb(index * BYTES_PER_PIXEL, color);
    }

    /// Overwrite this buffer with `other`, which must have the same size
    pub fn copy_from(&mut self, other: &PixelBuffer) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(BounceError::SizeMismatch {
                width: self.width,
                height: self.height,
                expected: self.pixels.len(),
                actual: other.pixels.len(),
            });
        }
        self.pixels.copy_from_slice(&other.pixels);
        Ok(())
    }

    /// Fill every pixel whose offset from `center` lies strictly inside `radius`
    pub fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgb) {
        if radius <= 0.0 {
            return;
        }
        let cx = center.x as i32;
        let cy = center.y as i32;
        let r = radius.ceil() as i32;
        let r_sq = radius * radius;

        for dy in -r..=r {
            for dx in -r..=r {
                if ((dx * dx + dy * dy) as f32) < r_sq {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw `texture` scaled (nearest neighbour) into `dest`, clipped to the buffer
    pub fn blit(&mut self, texture: &Texture, dest: Rect) {
        if dest.is_empty() || texture.width == 0 || texture.height == 0 {
            return;
        }

        let x0 = dest.x.max(0);
        let y0 = dest.y.max(0);
        let x1 = (dest.x as i64 + dest.w as i64).min(self.width as i64) as i32;
        let y1 = (dest.y as i64 + dest.h as i64).min(self.height as i64) as i32;

        for y in y0..y1 {
            let sy = ((y - dest.y) as u64 * texture.height as u64 / dest.h as u64) as u32;
            for x in x0..x1 {
                let sx = ((x - dest.x) as u64 * texture.width as u64 / dest.w as u64) as u32;
                let src = texture.texel(sx, sy);
                let i = self.offset(x as u32, y as u32);
                let dst = &mut self.pixels[i..i + BYTES_PER_PIXEL];
                if texture.blend {
                    blend_over(dst, src);
                } else {
                    dst.copy_from_slice(src);
                }
            }
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    #[inline]
    fn write_rgb(&mut self, i: usize, color: Rgb) {
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
    }
}

/// Source-over alpha blend of one RGBA pixel
#[inline]
fn blend_over(dst: &mut [u8], src: &[u8]) {
    let a = src[3] as u32;
    let inv = 255 - a;
    for c in 0..3 {
        dst[c] = ((src[c] as u32 * a + dst[c] as u32 * inv + 127) / 255) as u8;
    }
    dst[3] = (a + (dst[3] as u32 * inv + 127) / 255) as u8;
}

/// Byte length of a `width` x `height` RGBA buffer
#[inline]
pub fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

fn check_len(width: u32, height: u32, actual: usize) -> Result<()> {
    let expected = rgba_len(width, height);
    if actual != expected {
        return Err(BounceError::SizeMismatch {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}
