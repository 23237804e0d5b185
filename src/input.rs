//! Keyboard input
//!
//! Key listeners only flip bits in [`HeldKeys`]; each tick samples the held
//! set into a [`TickInput`]. Nothing is cleared by reading.

use crate::settings::GameVariant;
use crate::sim::TickInput;

/// Recognized keys, named after `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyD,
    KeyX,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Space,
        Key::ArrowUp,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::KeyW,
        Key::KeyA,
        Key::KeyD,
        Key::KeyX,
    ];

    /// Map a `KeyboardEvent.code`; unrecognized codes give `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "KeyW" => Some(Key::KeyW),
            "KeyA" => Some(Key::KeyA),
            "KeyD" => Some(Key::KeyD),
            "KeyX" => Some(Key::KeyX),
            _ => None,
        }
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << self as u16
    }

    /// Whether this key jumps in the given variant
    pub fn is_jump(self, variant: GameVariant) -> bool {
        match self {
            Key::Space | Key::ArrowUp | Key::KeyW => true,
            Key::KeyX => variant == GameVariant::Runner,
            _ => false,
        }
    }
}

/// Set of keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u16);

impl HeldKeys {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Handle a keydown code. Returns true if the key is one we use
    /// (callers suppress the browser default for those).
    pub fn key_down(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.press(key);
                true
            }
            None => false,
        }
    }

    /// Handle a keyup code
    pub fn key_up(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.release(key);
                true
            }
            None => false,
        }
    }

    /// Drop everything (window blur, restart)
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.is_held(*k))
    }
}

impl TickInput {
    /// Sample held keys with the variant's bindings
    pub fn from_keys(keys: &HeldKeys, variant: GameVariant) -> Self {
        let jump = keys.held().any(|k| k.is_jump(variant));
        match variant {
            GameVariant::Runner => TickInput {
                jump,
                left: false,
                right: false,
            },
            GameVariant::Platformer => TickInput {
                jump,
                left: keys.is_held(Key::ArrowLeft) || keys.is_held(Key::KeyA),
                right: keys.is_held(Key::ArrowRight) || keys.is_held(Key::KeyD),
            },
        }
    }
}
