//! Rendering module
//!
//! Rendering is a pure function of state: [`draw_list`] turns a game into
//! screen-space sprites and [`hud`] into HUD strings. On the web the canvas
//! painter draws the list; nothing is ever read back from the view.

pub mod hud;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use hud::{HudText, hud};
pub use shapes::draw_list;

use crate::sim::{Facing, PlatformKind, Rect};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteKind {
    Cloud,
    Platform(PlatformKind),
    Coin,
    Enemy,
    Player { grounded: bool, facing: Facing },
}

/// One screen-space drawable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Screen-space bounds (top-left anchored)
    pub rect: Rect,
    /// Uniform scale about the rect center
    pub scale: f32,
    /// Rotation about the rect center, degrees
    pub rotation_deg: f32,
}

impl Sprite {
    pub fn new(kind: SpriteKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            scale: 1.0,
            rotation_deg: 0.0,
        }
    }
}

/// CSS colors for the painter
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub sky: &'static str,
    pub ground: &'static str,
    pub floating: &'static str,
    pub text: &'static str,
}

impl Palette {
    pub const NORMAL: Palette = Palette {
        sky: "#87ceeb",
        ground: "#8b5a2b",
        floating: "#4caf50",
        text: "#ffffff",
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        sky: "#000000",
        ground: "#ffffff",
        floating: "#ffff00",
        text: "#ffffff",
    };

    pub fn for_settings(settings: &crate::Settings) -> Self {
        if settings.high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::NORMAL
        }
    }

    pub fn platform(&self, kind: PlatformKind) -> &'static str {
        match kind {
            PlatformKind::Ground => self.ground,
            PlatformKind::Floating => self.floating,
        }
    }
}
