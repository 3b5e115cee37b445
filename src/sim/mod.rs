//! Entity kinematics
//!
//! Plain position/velocity integration with per-axis wall reflection:
//! - Elapsed time in seconds, velocities in pixels per second
//! - No rendering or platform dependencies beyond drawing into a buffer

pub mod ball;
pub mod collision;
pub mod depth;
pub mod sprite;

pub use ball::Ball;
pub use collision::{AxisHit, reflect_axis};
pub use depth::{compare_depth, sort_back_to_front, sort_by_depth_with};
pub use sprite::Sprite;
