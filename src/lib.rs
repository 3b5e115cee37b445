//! Cloud Bounce - animation demos over procedurally generated backgrounds
//!
//! Core modules:
//! - `gradient` / `field`: noise-field-to-gradient rendering pipeline
//! - `noise`: coherent noise synthesis (FBM, turbulence)
//! - `sim`: entity kinematics (balls, depth-scaled sprites)
//! - `canvas`: software pixel buffer and compositing
//! - `frame`: fixed-budget frame loop
//! - `renderer`: wgpu presentation of the finished frame

pub mod assets;
pub mod canvas;
pub mod color;
pub mod error;
pub mod field;
pub mod frame;
pub mod gradient;
pub mod noise;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod sim;

pub use canvas::{PixelBuffer, Rect, Texture};
pub use color::Rgb;
pub use error::BounceError;
pub use field::{FieldBounds, ScalarField, colorize, normalize};
pub use frame::{FrameLoop, LoopConfig, LoopState};
pub use gradient::Gradient;

/// Demo configuration constants
pub mod consts {
    use std::time::Duration;

    /// Window title
    pub const WINDOW_TITLE: &str = "Bounce";
    /// Window / pixel buffer dimensions
    pub const WIN_WIDTH: u32 = 800;
    pub const WIN_HEIGHT: u32 = 600;
    /// Depth of the sprite volume (z in 0..=WIN_DEPTH)
    pub const WIN_DEPTH: u32 = 600;

    /// Target frame budget (about 200 fps)
    pub const FRAME_BUDGET: Duration = Duration::from_millis(5);
    /// Longest elapsed time fed to a single update (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Sprites closer than this in depth keep their current draw order
    pub const DEPTH_TIE_TOLERANCE: f32 = 1.0;

    /// Bytes per pixel in every RGBA buffer
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_SPEED: f32 = 300.0;

    /// Sprite defaults
    pub const SPRITE_COUNT: usize = 10;
    pub const SPRITE_MAX_SPEED: f32 = 100.0;
    pub const SPRITE_MAX_DEPTH_SPEED: f32 = 50.0;
    pub const SPRITE_SEED: u64 = 0x0b1_0ce;
    pub const SPRITE_PATH: &str = "assets/sprite.png";
}
