//! Small 2D helpers on top of `glam::Vec2`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Points closer than this on both axes count as coincident.
pub const COINCIDENT_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }
}

impl Default for Size {
    fn default() -> Self {
        // Roughly a text caret.
        Self::new(10.0, 20.0)
    }
}

/// Axis-aligned rectangle given by its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector pointing from `from` to `to`, or `fallback` when the two
/// points coincide.
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let delta = to - from;
    if delta.x.abs() < COINCIDENT_EPSILON && delta.y.abs() < COINCIDENT_EPSILON {
        return fallback;
    }
    delta / delta.length()
}

/// The point exactly `spacing` away from `anchor`, heading toward `toward`.
/// Coincident inputs resolve along +x.
pub fn point_at_spacing(anchor: Vec2, toward: Vec2, spacing: f32) -> Vec2 {
    anchor + direction_or(anchor, toward, Vec2::X) * spacing
}
