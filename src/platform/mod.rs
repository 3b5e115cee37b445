//! Platform abstraction layer
//!
//! Window-system-independent input vocabulary. The binary translates winit
//! events into these; the frame loop and tests only ever see these types.

pub mod input;

pub use input::{InputEvent, MouseButton, MouseState};
