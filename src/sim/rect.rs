//! Axis-aligned rectangle geometry
//!
//! Screen space: origin at the top-left corner, +y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with floating-point top-left position and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Negative sizes make a rect empty; zero-sized rects still count
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w < 0.0 || self.h < 0.0
    }

    /// Overlap test. Rectangles sharing only an edge intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        let min_x = self.left().max(other.left());
        let max_x = self.right().min(other.right());
        if max_x < min_x {
            return false;
        }

        let min_y = self.top().max(other.top());
        let max_y = self.bottom().min(other.bottom());
        max_y >= min_y
    }
}
