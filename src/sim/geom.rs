//! Axis-aligned rectangles
//!
//! Screen space: x grows right, y grows down. Used for colliders, the
//! screen fence and background field regions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Half-open containment: min edge inclusive, max edge exclusive
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// Shrink (or grow, with negative values) on every side
    pub fn inflate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            min: self.min - Vec2::new(dx, dy),
            size: (self.size + Vec2::new(dx, dy) * 2.0).max(Vec2::ZERO),
        }
    }

    /// Clamp `delta` so that this rect moved by it stays inside `fence`.
    ///
    /// A rect larger than the fence on an axis is pinned to the fence's
    /// min edge on that axis.
    pub fn clamp_move(&self, delta: Vec2, fence: &Rect) -> Vec2 {
        let lo = fence.min - self.min;
        let hi = (fence.max() - self.max()).max(lo);
        delta.clamp(lo, hi)
    }
}
