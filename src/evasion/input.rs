//! Input routing
//!
//! Browser events are translated into `EvasionEvent`s and fed to
//! `EvasionController::dispatch`, one at a time, in arrival order.

use std::fmt;

use glam::DVec2;
use rand::Rng;

use super::engine::EvasionController;
use super::stage::Stage;
use super::state::Placement;
use crate::geometry::distance;

/// Pointer device behind a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
    /// Browser reported no pointer type
    Unspecified,
}

impl PointerKind {
    /// Map a DOM `pointerType` string
    pub fn from_pointer_type(s: &str) -> Self {
        match s {
            "" => PointerKind::Unspecified,
            "mouse" => PointerKind::Mouse,
            "pen" => PointerKind::Pen,
            "touch" => PointerKind::Touch,
            // Unknown vendor types are not mice
            _ => PointerKind::Pen,
        }
    }

    /// Hover proximity applies to mice only; touch has its own path
    pub fn tracks_hover(self) -> bool {
        matches!(self, PointerKind::Mouse | PointerKind::Unspecified)
    }
}

/// Everything that can make the button react
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvasionEvent {
    /// Pointer moved somewhere on the page
    PointerProximity { pointer: PointerKind, point: DVec2 },
    /// A touch moved; `point` is the first active touch, if any
    TouchProximity { point: Option<DVec2> },
    /// Finger landed on the button
    TapEvade,
    /// Button was clicked
    ClickDart,
    /// Window size changed
    ViewportResized,
}

/// Why a move was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReason {
    PointerProximity,
    TouchProximity,
    TapEvade,
    ClickDart,
}

impl MoveReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveReason::PointerProximity => "pointer-proximity",
            MoveReason::TouchProximity => "touch-proximity",
            MoveReason::TapEvade => "tap-evade",
            MoveReason::ClickDart => "click-dart",
        }
    }
}

impl fmt::Display for MoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one dispatched event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Event did not qualify (wrong device, too far away, no touch)
    Ignored,
    /// Qualified, but the previous move was too recent
    Debounced,
    /// Button moved
    Moved(Placement),
    /// Origin re-measured after a resize
    Remeasured,
}

impl Outcome {
    pub fn moved(&self) -> bool {
        matches!(self, Outcome::Moved(_))
    }
}

impl<R: Rng> EvasionController<R> {
    /// Single entry point for all input
    pub fn dispatch<S: Stage + ?Sized>(
        &mut self,
        event: EvasionEvent,
        now: f64,
        stage: &mut S,
    ) -> Outcome {
        match event {
            EvasionEvent::PointerProximity { pointer, point } => {
                if !pointer.tracks_hover() {
                    return Outcome::Ignored;
                }
                let radius = self.tuning().hover_radius;
                if near_button(stage, point, radius) {
                    self.move_element(MoveReason::PointerProximity, now, stage)
                } else {
                    Outcome::Ignored
                }
            }
            EvasionEvent::TouchProximity { point } => {
                let Some(point) = point else {
                    return Outcome::Ignored;
                };
                let radius = self.tuning().touch_radius;
                if near_button(stage, point, radius) {
                    self.move_element(MoveReason::TouchProximity, now, stage)
                } else {
                    Outcome::Ignored
                }
            }
            EvasionEvent::TapEvade => self.move_element(MoveReason::TapEvade, now, stage),
            EvasionEvent::ClickDart => self.move_element(MoveReason::ClickDart, now, stage),
            EvasionEvent::ViewportResized => {
                self.measure_origin(stage);
                Outcome::Remeasured
            }
        }
    }
}

/// Strictly inside `radius` of the button's live center
fn near_button<S: Stage + ?Sized>(stage: &S, point: DVec2, radius: f64) -> bool {
    distance(point, stage.movable_rect().center()) < radius
}
