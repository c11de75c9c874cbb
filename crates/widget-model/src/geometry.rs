//! Pixel-space geometry primitives.
//!
//! Coordinates follow the usual screen convention: `(0.0, 0.0)` is the
//! viewport top-left, x grows right, y grows down.

use serde::{Deserialize, Serialize};

/// A 2D vector or point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// This vector scaled by a factor.
    pub fn scaled(&self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }

    /// Unit direction for an angle in degrees (0 degrees points +x,
    /// 90 degrees points +y, i.e. downward in screen space).
    pub fn from_angle_deg(angle_deg: f64) -> Vec2 {
        let rad = angle_deg.to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }

    /// True when both components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// Create a new rectangle; negative dimensions are clamped to zero.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Create a rectangle centered at `(cx, cy)` with the given size.
    pub fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        let w = w.max(0.0);
        let h = h.max(0.0);
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    /// The center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Check if a point is within this rectangle (edges inclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Vector from the rectangle center to a point.
    pub fn offset_from_center(&self, px: f64, py: f64) -> Vec2 {
        let c = self.center();
        Vec2::new(px - c.x, py - c.y)
    }

    /// Vector from the rectangle top-left corner to a point.
    pub fn offset_from_origin(&self, px: f64, py: f64) -> Vec2 {
        Vec2::new(px - self.x, py - self.y)
    }
}
