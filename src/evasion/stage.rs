//! Page access seam
//!
//! The engine measures and moves the button through `Stage`. The browser
//! implementation lives in `platform::web`; `SimulatedStage` is a headless
//! stand-in with a centered card layout.

use glam::DVec2;

use super::state::Placement;
use crate::geometry::{Rect, Viewport};

/// Live view of the page the engine works against
pub trait Stage {
    /// Current viewport size (queried live)
    fn viewport(&self) -> Viewport;
    /// Live bounding box of the runaway button, transform included
    fn movable_rect(&self) -> Rect;
    /// Live bounding box of the accept button
    fn target_rect(&self) -> Rect;
    /// Apply a new transform to the runaway button
    fn apply(&mut self, placement: &Placement);
}

/// Headless stage: both buttons sit in a card centered in the viewport
#[derive(Debug, Clone)]
pub struct SimulatedStage {
    viewport: Viewport,
    /// Untransformed button box
    home: Rect,
    target: Rect,
    placement: Option<Placement>,
}

impl SimulatedStage {
    pub fn new(viewport: Viewport, home: Rect, target: Rect) -> Self {
        Self {
            viewport,
            home,
            target,
            placement: None,
        }
    }

    /// Card layout used by the demo: accept and runaway buttons side by side
    pub fn centered(viewport: Viewport) -> Self {
        let cx = viewport.width / 2.0;
        let cy = viewport.height / 2.0;
        let target = Rect::from_ltwh(cx - 140.0, cy + 40.0, 120.0, 56.0);
        let home = Rect::from_ltwh(cx + 20.0, cy + 40.0, 160.0, 56.0);
        Self::new(viewport, home, target)
    }

    /// Resize the viewport. The card stays centered, so both buttons shift
    /// by half the size change; the applied transform is kept.
    pub fn resize(&mut self, viewport: Viewport) {
        let shift = DVec2::new(
            (viewport.width - self.viewport.width) / 2.0,
            (viewport.height - self.viewport.height) / 2.0,
        );
        self.home = self.home.translated(shift);
        self.target = self.target.translated(shift);
        self.viewport = viewport;
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn offset(&self) -> DVec2 {
        self.placement.map(|p| p.offset).unwrap_or(DVec2::ZERO)
    }
}

impl Stage for SimulatedStage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn movable_rect(&self) -> Rect {
        self.home.translated(self.offset())
    }

    fn target_rect(&self) -> Rect {
        self.target
    }

    fn apply(&mut self, placement: &Placement) {
        self.placement = Some(*placement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_layout_fits() {
        let stage = SimulatedStage::centered(Viewport::new(1200.0, 800.0));
        let b = stage.movable_rect();
        let t = stage.target_rect();
        assert!(b.left > t.right);
        assert!(b.right < 1200.0 && b.bottom < 800.0);
    }

    #[test]
    fn test_resize_keeps_offset_and_recenters() {
        let mut stage = SimulatedStage::centered(Viewport::new(1200.0, 800.0));
        stage.apply(&Placement {
            offset: DVec2::new(-100.0, 50.0),
            rotation_deg: 0.0,
            scale: 1.0,
            clear: true,
        });
        let before = stage.movable_rect();
        stage.resize(Viewport::new(600.0, 800.0));
        let after = stage.movable_rect();
        assert_eq!(after.left, before.left - 300.0);
        assert_eq!(after.top, before.top);
        assert_eq!(stage.offset(), DVec2::new(-100.0, 50.0));
    }
}
