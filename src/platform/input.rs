//! Input accumulator
//!
//! Browser events arrive between animation frames. Key state is level
//! triggered; mouse movement and fire requests are edge triggered and
//! reset when the frame drains them.

use super::InputSource;
use crate::sim::{HeldKeys, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a `KeyboardEvent.code` (layout independent)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Key::Forward),
            "KeyS" | "ArrowDown" => Some(Key::Back),
            "KeyA" | "ArrowLeft" => Some(Key::Left),
            "KeyD" | "ArrowRight" => Some(Key::Right),
            "Space" => Some(Key::Jump),
            _ => None,
        }
    }
}

/// Accumulates input events until the next frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HeldKeys,
    mouse_dx: f32,
    fire: u32,
    /// Mouse motion only counts while the pointer is captured
    pub pointer_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) -> bool {
        self.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.set_key(code, false)
    }

    /// Returns whether the code was one of ours
    fn set_key(&mut self, code: &str, down: bool) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        match key {
            Key::Forward => self.keys.forward = down,
            Key::Back => self.keys.back = down,
            Key::Left => self.keys.left = down,
            Key::Right => self.keys.right = down,
            Key::Jump => self.keys.jump = down,
        }
        true
    }

    pub fn add_mouse_delta(&mut self, dx: f32) {
        if self.pointer_locked {
            self.mouse_dx += dx;
        }
    }

    /// Queue one shot (left click or tap)
    pub fn request_fire(&mut self) {
        self.fire = self.fire.saturating_add(1);
    }

    /// Release everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.keys = HeldKeys::default();
        self.mouse_dx = 0.0;
        self.fire = 0;
    }
}

impl InputSource for InputState {
    fn drain(&mut self) -> TickInput {
        TickInput {
            keys: self.keys,
            mouse_dx: std::mem::take(&mut self.mouse_dx),
            fire: std::mem::take(&mut self.fire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_level_triggered() {
        let mut input = InputState::new();
        assert!(input.key_down("KeyW"));
        assert!(input.key_down("Space"));
        assert!(!input.key_down("KeyQ"));

        let first = input.drain();
        let second = input.drain();
        assert!(first.keys.forward && first.keys.jump);
        assert_eq!(first.keys, second.keys);

        input.key_up("KeyW");
        assert!(!input.drain().keys.forward);
    }

    #[test]
    fn test_mouse_and_fire_are_drained() {
        let mut input = InputState::new();
        input.pointer_locked = true;
        input.add_mouse_delta(12.0);
        input.add_mouse_delta(-2.0);
        input.request_fire();
        input.request_fire();

        let frame = input.drain();
        assert_eq!(frame.mouse_dx, 10.0);
        assert_eq!(frame.fire, 2);

        let next = input.drain();
        assert_eq!(next.mouse_dx, 0.0);
        assert_eq!(next.fire, 0);
    }

    #[test]
    fn test_mouse_ignored_without_pointer_lock() {
        let mut input = InputState::new();
        input.add_mouse_delta(50.0);
        assert_eq!(input.drain().mouse_dx, 0.0);
    }

    #[test]
    fn test_clear_releases_keys() {
        let mut input = InputState::new();
        input.key_down("KeyD");
        input.request_fire();
        input.clear();
        let frame = input.drain();
        assert_eq!(frame.keys, HeldKeys::default());
        assert_eq!(frame.fire, 0);
    }
}
