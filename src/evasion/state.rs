//! Evasion state and per-move derived values

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{OriginRect, Viewport};

/// Session state for the runaway button
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvasionState {
    /// Button geometry with zero offset applied
    pub origin: OriginRect,
    /// Translation currently applied to the button
    pub offset: DVec2,
    /// Timestamp (ms) of the last accepted move
    pub last_move_at: Option<f64>,
    /// Moves performed so far
    pub moves: u32,
}

impl EvasionState {
    /// True while the debounce window from the last move is still open
    pub fn is_debounced(&self, now: f64, debounce_ms: f64) -> bool {
        match self.last_move_at {
            Some(last) => now - last < debounce_ms,
            None => false,
        }
    }
}

/// Legal offset range keeping the button inside the inset viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Offsets for which `origin + offset` stays within
    /// `[inset, viewport - inset]`. An axis too small for the button is
    /// pinned to zero offset.
    pub fn compute(origin: &OriginRect, viewport: Viewport, inset: f64) -> Self {
        let (min_x, max_x) = collapse(
            inset - origin.left,
            viewport.width - inset - origin.width - origin.left,
        );
        let (min_y, max_y) = collapse(
            inset - origin.top,
            viewport.height - inset - origin.height - origin.top,
        );
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn contains(&self, offset: DVec2) -> bool {
        (self.min_x..=self.max_x).contains(&offset.x) && (self.min_y..=self.max_y).contains(&offset.y)
    }

    /// True when both axes collapsed (the button cannot move at all)
    pub fn is_pinned(&self) -> bool {
        self.min_x == self.max_x && self.min_y == self.max_y
    }
}

#[inline]
fn collapse(min: f64, max: f64) -> (f64, f64) {
    if max < min { (0.0, 0.0) } else { (min, max) }
}

/// Transform applied to the button by one move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub offset: DVec2,
    pub rotation_deg: f64,
    pub scale: f64,
    /// False when every candidate touched the accept button
    pub clear: bool,
}

impl Placement {
    /// CSS `transform` value
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg) scale({})",
            self.offset.x, self.offset.y, self.rotation_deg, self.scale
        )
    }
}
