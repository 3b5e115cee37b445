//! Input events and mouse state tracking

/// Input event delivered to the frame loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed or quit requested
    Quit,
    /// Cursor moved to (x, y) in window pixels
    MouseMoved { x: f32, y: f32 },
    MouseButton { button: MouseButton, pressed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Mouse position and button state as of the latest processed event
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left: bool,
    pub right: bool,
}

impl MouseState {
    /// Fold one event into the state; non-mouse events are ignored
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MouseMoved { x, y } => {
                self.x = x;
                self.y = y;
            }
            InputEvent::MouseButton { button, pressed } => match button {
                MouseButton::Left => self.left = pressed,
                MouseButton::Right => self.right = pressed,
            },
            InputEvent::Quit => {}
        }
    }

    /// Left button was down in `prev` and is up now
    pub fn left_released(&self, prev: &MouseState) -> bool {
        prev.left && !self.left
    }
}
