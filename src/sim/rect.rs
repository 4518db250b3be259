//! Axis-aligned rectangles and overlap tests
//!
//! Every blocking and interaction check in the game goes through
//! [`Rect::intersects`]. Edges are half-open: two rects that merely touch
//! do not overlap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer pixel rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of the given size whose top-left corner is `pos`
    pub fn at(pos: IVec2, size: i32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    /// Square rect centred on `center` (odd sizes round toward top-left)
    pub fn centered(center: IVec2, size: i32) -> Self {
        Self::new(center.x - size / 2, center.y - size / 2, size, size)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Half-open overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Anything with a bounding rectangle
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Every item whose bounds overlap `rect`
pub fn collide_all<'a, T: Bounded>(rect: &Rect, items: &'a [T]) -> Vec<&'a T> {
    items.iter().filter(|i| rect.intersects(&i.bounds())).collect()
}

/// Whether any item's bounds overlap `rect`
pub fn collide_any<T: Bounded>(rect: &Rect, items: &[T]) -> bool {
    items.iter().any(|i| rect.intersects(&i.bounds()))
}

/// Remove every item overlapping `rect`, returning how many were removed
pub fn remove_colliding<T: Bounded>(rect: &Rect, items: &mut Vec<T>) -> usize {
    let before = items.len();
    items.retain(|i| !rect.intersects(&i.bounds()));
    before - items.len()
}
