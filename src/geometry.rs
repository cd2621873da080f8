//! Axis-aligned rectangle helpers
//!
//! Everything here is pure. Coordinates are CSS pixels in viewport space
//! (origin top-left, y down).

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Padding used by `rects_overlap` callers that have no opinion
pub const DEFAULT_OVERLAP_PADDING: f64 = 6.0;

/// Uniform real in `[min, max)`. Returns `min` when the range is empty.
#[inline]
pub fn random_between<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.random::<f64>() * (max - min)
}

/// Restrict `value` to `[min, max]`. Callers guarantee `min <= max`.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A measured bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Build from edges (the `{left, top, right, bottom}` form)
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::from_ltwh(left, top, right - left, bottom - top)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Same box moved by `delta`
    pub fn translated(&self, delta: DVec2) -> Self {
        Self::from_ltwh(self.left + delta.x, self.top + delta.y, self.width, self.height)
    }
}

/// Movable element geometry with zero applied offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OriginRect {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl OriginRect {
    /// Strip the currently applied offset from a live measurement
    pub fn from_live(live: &Rect, offset: DVec2) -> Self {
        Self {
            width: live.width,
            height: live.height,
            left: live.left - offset.x,
            top: live.top - offset.y,
        }
    }
}

/// Rectangle the element would occupy with `offset` applied
pub fn rect_from_offset(origin: &OriginRect, offset: DVec2) -> Rect {
    Rect::from_ltwh(
        origin.left + offset.x,
        origin.top + offset.y,
        origin.width,
        origin.height,
    )
}

/// Padded overlap test.
///
/// Two boxes are clear of each other only when they are separated by more
/// than `padding` on at least one axis; near misses count as overlapping.
pub fn rects_overlap(a: &Rect, b: &Rect, padding: f64) -> bool {
    !(a.right + padding < b.left
        || a.left > b.right + padding
        || a.bottom + padding < b.top
        || a.top > b.bottom + padding)
}
