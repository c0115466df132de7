//! Input surface
//!
//! Discrete key events plus the held-direction state used for ship movement.

use glam::Vec2;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Scan / interact / launch
    Action,
    Confirm,
    Cancel,
    /// Answer selection (1-4)
    Digit(u8),
    TimeScaleUp,
    TimeScaleDown,
    ZoomIn,
    ZoomOut,
}

/// A key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Held directional keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Movement {
    /// Track press/release of directional keys; other keys are ignored
    pub fn apply(&mut self, event: &KeyEvent) {
        match event.key {
            Key::Up => self.up = event.pressed,
            Key::Down => self.down = event.pressed,
            Key::Left => self.left = event.pressed,
            Key::Right => self.right = event.pressed,
            _ => {}
        }
    }

    /// Unit-per-axis direction (screen coordinates, +y down)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_tracks_held_keys() {
        let mut m = Movement::default();
        m.apply(&KeyEvent::press(Key::Left));
        m.apply(&KeyEvent::press(Key::Up));
        assert_eq!(m.direction(), Vec2::new(-1.0, -1.0));

        m.apply(&KeyEvent::release(Key::Left));
        m.apply(&KeyEvent::press(Key::Action));
        assert_eq!(m.direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut m = Movement::default();
        m.apply(&KeyEvent::press(Key::Left));
        m.apply(&KeyEvent::press(Key::Right));
        assert_eq!(m.direction(), Vec2::ZERO);
    }
}
