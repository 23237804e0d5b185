//! Axis-aligned bounding boxes
//!
//! Every overlap test in the game is a strict AABB check: boxes that only
//! touch along an edge do not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle anchored at its top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_pos(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Same rectangle shifted left by a horizontal offset (world -> screen)
    #[inline]
    pub fn shifted_x(&self, dx: f32) -> Self {
        Self {
            pos: Vec2::new(self.pos.x - dx, self.pos.y),
            size: self.size,
        }
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
