//! Textured sprite floating through a 3D volume
//!
//! Depth (z) only affects on-screen size: far sprites (z = 0) are drawn at a
//! third of their texture size, near ones (z = depth) at two thirds.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::collision::reflect_axis;
use crate::canvas::{PixelBuffer, Rect, Texture};
use crate::consts::*;

/// A sprite referencing one of the scene's textures by index
#[derive(Debug, Clone)]
pub struct Sprite {
    pub pos: Vec3,
    /// Pixels (or depth units) per second
    pub vel: Vec3,
    /// Unscaled texture size
    pub size: Vec2,
    pub texture: usize,
}

impl Sprite {
    pub fn new(pos: Vec3, vel: Vec3, size: Vec2, texture: usize) -> Self {
        Self {
            pos,
            vel,
            size,
            texture,
        }
    }

    /// Random position inside `bounds` with a random non-negative velocity
    pub fn random<R: Rng>(rng: &mut R, bounds: Vec3, size: Vec2, texture: usize) -> Self {
        let pos = Vec3::new(
            rng.random::<f32>() * bounds.x,
            rng.random::<f32>() * bounds.y,
            rng.random::<f32>() * bounds.z,
        );
        let vel = Vec3::new(
            rng.random::<f32>() * SPRITE_MAX_SPEED,
            rng.random::<f32>() * SPRITE_MAX_SPEED,
            rng.random::<f32>() * SPRITE_MAX_DEPTH_SPEED,
        );
        Self::new(pos, vel, size, texture)
    }

    /// Depth scale factor, linear from 1/3 (z = 0) to 2/3 (z = depth)
    #[inline]
    pub fn depth_scale(z: f32, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 1.0 / 3.0;
        }
        (z / depth + 1.0) / 3.0
    }

    /// On-screen width and height at the current depth
    pub fn scaled_size(&self, depth: f32) -> Vec2 {
        self.size * Self::depth_scale(self.pos.z, depth)
    }

    /// Advance by `dt` seconds and bounce off the volume walls
    ///
    /// `bounds` is (width, height, depth). Depth is resolved first so the
    /// X/Y tests use the size at the new depth.
    pub fn update(&mut self, dt: f32, bounds: Vec3) {
        self.pos += self.vel * dt;

        reflect_axis(&mut self.pos.z, &mut self.vel.z, 0.0, 0.0, bounds.z);

        let half = self.scaled_size(bounds.z) / 2.0;
        reflect_axis(&mut self.pos.x, &mut self.vel.x, half.x, 0.0, bounds.x);
        reflect_axis(&mut self.pos.y, &mut self.vel.y, half.y, 0.0, bounds.y);
    }

    /// Destination rectangle centered on the sprite position
    pub fn dest_rect(&self, depth: f32) -> Rect {
        let scaled = self.scaled_size(depth);
        Rect::new(
            (self.pos.x - scaled.x / 2.0) as i32,
            (self.pos.y - scaled.y / 2.0) as i32,
            scaled.x as u32,
            scaled.y as u32,
        )
    }

    /// Blit this sprite's texture; a missing texture index draws nothing
    pub fn draw(&self, pixels: &mut PixelBuffer, textures: &[Texture], depth: f32) {
        match textures.get(self.texture) {
            Some(texture) => pixels.blit(texture, self.dest_rect(depth)),
            None => log::warn!("Sprite references missing texture {}", self.texture),
        }
    }
}
