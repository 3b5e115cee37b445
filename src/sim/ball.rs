//! Flat-colored ball bouncing inside the viewport

use glam::Vec2;

use super::collision::reflect_axis;
use crate::canvas::PixelBuffer;
use crate::color::Rgb;
use crate::consts::*;

/// A filled disc with a velocity in pixels per second
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Rgb) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    /// Ball starting at the viewport center, heading down-right
    pub fn centered(viewport: Vec2) -> Self {
        Self::new(
            viewport / 2.0,
            Vec2::new(BALL_SPEED, BALL_SPEED * 0.8),
            BALL_RADIUS,
            Rgb::WHITE,
        )
    }

    /// Advance by `dt` seconds and bounce off the viewport edges
    pub fn update(&mut self, dt: f32, viewport: Vec2) {
        self.pos += self.vel * dt;
        reflect_axis(&mut self.pos.x, &mut self.vel.x, self.radius, 0.0, viewport.x);
        reflect_axis(&mut self.pos.y, &mut self.vel.y, self.radius, 0.0, viewport.y);
    }

    pub fn draw(&self, pixels: &mut PixelBuffer) {
        pixels.fill_disc(self.pos, self.radius, self.color);
    }
}
