//! The two demo scenes
//!
//! Both draw onto a static cloud background built once at startup:
//! - `BounceScene`: a single flat-colored ball
//! - `SpriteScene`: textured sprites drifting in depth, drawn back-to-front

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::canvas::{PixelBuffer, Texture, rgba_len};
use crate::color::Rgb;
use crate::error::{BounceError, Result};
use crate::field::colorize;
use crate::frame::{LoopConfig, Scene};
use crate::gradient::Gradient;
use crate::noise::{self, NoiseParams};
use crate::sim::{Ball, Sprite, sort_back_to_front};

/// Sky blue at the bottom of the cloud ramp
pub const CLOUD_SKY: Rgb = Rgb::new(50, 150, 250);

pub fn cloud_gradient() -> Gradient {
    Gradient::new(CLOUD_SKY, Rgb::WHITE)
}

/// Generate noise, normalize it and map it through `gradient`
pub fn build_background(
    params: &NoiseParams,
    gradient: &Gradient,
    width: u32,
    height: u32,
) -> PixelBuffer {
    let (field, bounds) = noise::generate(params, width, height);
    log::info!(
        "Background {}x{}: noise bounds [{:.4}, {:.4}]",
        width,
        height,
        bounds.min,
        bounds.max
    );
    colorize(&field, bounds, gradient)
}

fn check_background(config: &LoopConfig, background: &PixelBuffer) -> Result<()> {
    if background.width() != config.width || background.height() != config.height {
        return Err(BounceError::SizeMismatch {
            width: config.width,
            height: config.height,
            expected: rgba_len(config.width, config.height),
            actual: background.as_bytes().len(),
        });
    }
    Ok(())
}

/// A ball bouncing over the background
pub struct BounceScene {
    background: PixelBuffer,
    ball: Ball,
    viewport: Vec2,
}

impl BounceScene {
    pub fn new(config: &LoopConfig, background: PixelBuffer) -> Result<Self> {
        check_background(config, &background)?;
        let viewport = config.viewport();
        Ok(Self {
            background,
            ball: Ball::centered(viewport),
            viewport,
        })
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }
}

impl Scene for BounceScene {
    fn update(&mut self, dt: f32) {
        self.ball.update(dt, self.viewport);
    }

    fn render(&self, frame: &mut PixelBuffer) -> Result<()> {
        frame.copy_from(&self.background)?;
        self.ball.draw(frame);
        Ok(())
    }
}

/// Sprites floating through a width x height x depth volume
pub struct SpriteScene {
    background: PixelBuffer,
    textures: Vec<Texture>,
    sprites: Vec<Sprite>,
    volume: Vec3,
}

impl SpriteScene {
    /// Spawn `count` sprites cycling through `textures`, placed from `seed`
    pub fn new(
        config: &LoopConfig,
        background: PixelBuffer,
        textures: Vec<Texture>,
        count: usize,
        seed: u64,
    ) -> Result<Self> {
        check_background(config, &background)?;
        let volume = config.volume();
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut sprites: Vec<Sprite> = if textures.is_empty() {
            log::warn!("No sprite textures loaded, scene will only show the background");
            Vec::new()
        } else {
            (0..count)
                .map(|i| {
                    let index = i % textures.len();
                    let tex = &textures[index];
                    let size = Vec2::new(tex.width() as f32, tex.height() as f32);
                    Sprite::random(&mut rng, volume, size, index)
                })
                .collect()
        };
        sort_back_to_front(&mut sprites, |s| s.pos.z);
        log::info!("Spawned {} sprites (seed {:#x})", sprites.len(), seed);

        Ok(Self {
            background,
            textures,
            sprites,
            volume,
        })
    }

    /// Sprites in current draw order (farthest first)
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }
}

impl Scene for SpriteScene {
    fn update(&mut self, dt: f32) {
        for sprite in &mut self.sprites {
            sprite.update(dt, self.volume);
        }
        sort_back_to_front(&mut self.sprites, |s| s.pos.z);
    }

    fn render(&self, frame: &mut PixelBuffer) -> Result<()> {
        frame.copy_from(&self.background)?;
        for sprite in &self.sprites {
            sprite.draw(frame, &self.textures, self.volume.z);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> LoopConfig {
        LoopConfig {
            width: 64,
            height: 48,
            depth: 60,
            frame_budget: Duration::from_millis(1),
            ..LoopConfig::default()
        }
    }

    fn background(config: &LoopConfig) -> PixelBuffer {
        build_background(
            &NoiseParams::clouds(),
            &cloud_gradient(),
            config.width,
            config.height,
        )
    }

    fn red_texture(w: u32, h: u32) -> Texture {
        Texture::from_rgba(w, h, [255, 0, 0, 255].repeat((w * h) as usize))
            .unwrap()
            .with_blend(true)
    }

    #[test]
    fn test_background_uses_cloud_ramp() {
        let config = config();
        let bg = background(&config);
        assert_eq!(bg.as_bytes().len(), 64 * 48 * 4);

        let gradient = cloud_gradient();
        let mut saw_start = false;
        for px in bg.as_bytes().chunks(4) {
            let c = Rgb::new(px[0], px[1], px[2]);
            assert!(gradient.iter().any(|g| *g == c));
            saw_start |= c == gradient.first();
        }
        // The field minimum always lands on the sky color
        assert!(saw_start);
    }

    #[test]
    fn test_background_size_checked() {
        let config = config();
        let wrong = PixelBuffer::new(10, 10);
        match BounceScene::new(&config, wrong.clone()) {
            Err(BounceError::SizeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 64 * 48 * 4);
                assert_eq!(actual, 10 * 10 * 4);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("wrong-sized background accepted"),
        }
        assert!(SpriteScene::new(&config, wrong, vec![], 3, 1).is_err());
    }

    #[test]
    fn test_bounce_scene_draws_ball_over_background() {
        let config = config();
        let bg = background(&config);
        let mut scene = BounceScene::new(&config, bg.clone()).unwrap();
        scene.update(0.05);

        let mut frame = PixelBuffer::new(config.width, config.height);
        scene.render(&mut frame).unwrap();

        let ball = scene.ball();
        let (bx, by) = (ball.pos.x as u32, ball.pos.y as u32);
        let px = frame.pixel(bx, by).unwrap();
        assert_eq!(&px[..3], &[255, 255, 255]);
        // Far corner is untouched background
        assert_eq!(frame.pixel(0, 0), bg.pixel(0, 0));
    }

    #[test]
    fn test_render_overwrites_previous_frame() {
        let config = LoopConfig {
            width: 400,
            height: 300,
            ..config()
        };
        let bg = background(&config);
        let mut scene = BounceScene::new(&config, bg.clone()).unwrap();
        let mut frame = PixelBuffer::new(config.width, config.height);

        scene.render(&mut frame).unwrap();
        let first_pos = scene.ball().pos;
        for _ in 0..3 {
            scene.update(0.1);
        }
        scene.render(&mut frame).unwrap();

        // The old ball position shows plain background again
        let moved = scene.ball().pos.distance(first_pos);
        assert!(moved > 2.0 * scene.ball().radius);
        let (ox, oy) = (first_pos.x as u32, first_pos.y as u32);
        assert_eq!(frame.pixel(ox, oy), bg.pixel(ox, oy));
    }

    #[test]
    fn test_sprite_scene_spawn_and_order() {
        let config = config();
        let textures = vec![red_texture(6, 6), red_texture(9, 3)];
        let mut scene = SpriteScene::new(&config, background(&config), textures, 5, 42).unwrap();
        assert_eq!(scene.sprites().len(), 5);

        for _ in 0..200 {
            scene.update(0.016);
            let z: Vec<f32> = scene.sprites().iter().map(|s| s.pos.z).collect();
            for pair in z.windows(2) {
                assert!(pair[1] - pair[0] >= -crate::consts::DEPTH_TIE_TOLERANCE);
            }
        }
        let texture_ids: Vec<usize> = scene.sprites().iter().map(|s| s.texture).collect();
        assert!(texture_ids.iter().all(|&t| t < 2));
    }

    #[test]
    fn test_sprite_scene_same_seed_same_layout() {
        let config = config();
        let a = SpriteScene::new(&config, background(&config), vec![red_texture(4, 4)], 4, 7).unwrap();
        let b = SpriteScene::new(&config, background(&config), vec![red_texture(4, 4)], 4, 7).unwrap();
        let pa: Vec<Vec3> = a.sprites().iter().map(|s| s.pos).collect();
        let pb: Vec<Vec3> = b.sprites().iter().map(|s| s.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_sprite_scene_renders_sprites() {
        let config = config();
        let bg = background(&config);
        let scene = SpriteScene::new(&config, bg.clone(), vec![red_texture(30, 30)], 3, 9).unwrap();

        let mut frame = PixelBuffer::new(config.width, config.height);
        scene.render(&mut frame).unwrap();

        for sprite in scene.sprites() {
            let c = sprite.pos;
            let px = frame.pixel(c.x as u32, c.y as u32).unwrap();
            assert_eq!(&px[..3], &[255, 0, 0]);
        }
    }

    #[test]
    fn test_sprite_scene_without_textures() {
        let config = config();
        let bg = background(&config);
        let scene = SpriteScene::new(&config, bg.clone(), vec![], 10, 1).unwrap();
        assert!(scene.sprites().is_empty());

        let mut frame = PixelBuffer::new(config.width, config.height);
        scene.render(&mut frame).unwrap();
        assert_eq!(frame, bg);
    }
}
