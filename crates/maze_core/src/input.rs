//! Directional key state and its translation into a per-step displacement.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every frame the key is
//!   down. Movement reads only this.
//! - **Edge-triggered (just_pressed / just_released):** true only for the frame
//!   the transition happened, cleared by `end_frame()`.

use glam::IVec2;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with exactly `keys` held and no pending edges.
    pub fn with_held(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    /// Replaces the held set, recording press/release edges for the difference.
    pub fn set_held(&mut self, keys: &[Key]) {
        let next: HashSet<Key> = keys.iter().copied().collect();
        let released: Vec<Key> = self.held.difference(&next).copied().collect();
        for key in released {
            self.key_up(key);
        }
        for key in next {
            self.key_down(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    /// Each held arrow contributes `speed` on its axis, y growing downward.
    /// Opposing keys cancel; diagonals are not normalized.
    pub fn displacement(&self, speed: i32) -> IVec2 {
        let mut d = IVec2::ZERO;
        if self.is_held(Key::Left) {
            d.x -= speed;
        }
        if self.is_held(Key::Right) {
            d.x += speed;
        }
        if self.is_held(Key::Up) {
            d.y -= speed;
        }
        if self.is_held(Key::Down) {
            d.y += speed;
        }
        d
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
