//! Placement engine
//!
//! One move: debounce, re-measure the origin, compute bounds, sample up to
//! `max_attempts` candidate offsets clear of the accept button, apply.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::{MoveReason, Outcome};
use super::stage::Stage;
use super::state::{Bounds, EvasionState, Placement};
use crate::geometry::{OriginRect, Rect, clamp, random_between, rect_from_offset, rects_overlap};
use crate::tuning::Tuning;

/// Owns the runaway button's state for the whole page session
#[derive(Debug, Clone)]
pub struct EvasionController<R: Rng = Pcg32> {
    state: EvasionState,
    tuning: Tuning,
    rng: R,
}

impl EvasionController<Pcg32> {
    /// Create a controller with a seeded PCG stream
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> EvasionController<R> {
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        Self {
            state: EvasionState::default(),
            tuning,
            rng,
        }
    }

    pub fn state(&self) -> &EvasionState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Recompute the zero-offset origin from the live button box
    pub fn measure_origin<S: Stage + ?Sized>(&mut self, stage: &S) {
        let live = stage.movable_rect();
        self.state.origin = OriginRect::from_live(&live, self.state.offset);
    }

    /// Try to move the button somewhere new
    pub fn move_element<S: Stage + ?Sized>(
        &mut self,
        reason: MoveReason,
        now: f64,
        stage: &mut S,
    ) -> Outcome {
        if self.state.is_debounced(now, self.tuning.debounce_ms) {
            return Outcome::Debounced;
        }
        self.state.last_move_at = Some(now);

        self.measure_origin(stage);
        let bounds = Bounds::compute(&self.state.origin, stage.viewport(), self.tuning.inset_padding);
        let target = stage.target_rect();

        let (offset, clear) = self.choose_offset(&bounds, &target);
        if !clear {
            log::debug!(
                "No clear spot after {} attempts, accepting overlap",
                self.tuning.max_attempts
            );
        }

        let (rot_min, rot_max) = self.tuning.rotation_deg;
        let (scale_min, scale_max) = self.tuning.scale;
        let placement = Placement {
            offset,
            rotation_deg: random_between(&mut self.rng, rot_min, rot_max),
            scale: random_between(&mut self.rng, scale_min, scale_max),
            clear,
        };

        stage.apply(&placement);
        self.state.offset = offset;
        self.state.moves += 1;

        log::debug!(
            "Button moved ({}) to ({:.1}, {:.1})",
            reason,
            offset.x,
            offset.y
        );
        Outcome::Moved(placement)
    }

    /// Sample candidates until one clears the target. Falls back to the
    /// last candidate when every attempt overlaps.
    fn choose_offset(&mut self, bounds: &Bounds, target: &Rect) -> (DVec2, bool) {
        let mut candidate = self.state.offset;
        for _ in 0..self.tuning.max_attempts.max(1) {
            candidate = DVec2::new(
                clamp(
                    random_between(&mut self.rng, bounds.min_x, bounds.max_x),
                    bounds.min_x,
                    bounds.max_x,
                ),
                clamp(
                    random_between(&mut self.rng, bounds.min_y, bounds.max_y),
                    bounds.min_y,
                    bounds.max_y,
                ),
            );
            let rect = rect_from_offset(&self.state.origin, candidate);
            if !rects_overlap(&rect, target, self.tuning.target_padding) {
                return (candidate, true);
            }
        }
        (candidate, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evasion::{EvasionEvent, SimulatedStage};
    use crate::geometry::Viewport;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn assert_in_viewport(rect: &Rect, viewport: Viewport, inset: f64) {
        assert!(rect.left >= inset - EPS, "left {} < {}", rect.left, inset);
        assert!(rect.top >= inset - EPS, "top {} < {}", rect.top, inset);
        assert!(rect.right <= viewport.width - inset + EPS, "right {}", rect.right);
        assert!(rect.bottom <= viewport.height - inset + EPS, "bottom {}", rect.bottom);
    }

    /// Viewport 1200x800, accept button at {100,100,220,140}, button 160x56
    fn reference_stage() -> SimulatedStage {
        SimulatedStage::new(
            Viewport::new(1200.0, 800.0),
            Rect::from_ltwh(520.0, 372.0, 160.0, 56.0),
            Rect::from_edges(100.0, 100.0, 220.0, 140.0),
        )
    }

    #[test]
    fn test_first_move_is_never_debounced() {
        let mut stage = reference_stage();
        let mut ctl = EvasionController::new(Tuning::default(), 1);
        let out = ctl.move_element(MoveReason::ClickDart, 0.0, &mut stage);
        assert!(out.moved());
        assert_eq!(ctl.state().last_move_at, Some(0.0));
    }

    #[test]
    fn test_spaced_moves_change_position() {
        let mut stage = reference_stage();
        let mut ctl = EvasionController::new(Tuning::default(), 2);
        let mut now = 1000.0;
        let mut last = stage.movable_rect();
        for _ in 0..50 {
            assert!(ctl.move_element(MoveReason::TapEvade, now, &mut stage).moved());
            let rect = stage.movable_rect();
            assert_ne!(rect, last);
            last = rect;
            now += 320.0;
        }
    }

    #[test]
    fn test_rapid_moves_are_debounced() {
        let mut stage = reference_stage();
        let mut ctl = EvasionController::new(Tuning::default(), 3);
        ctl.move_element(MoveReason::TapEvade, 1000.0, &mut stage);
        let settled = stage.movable_rect();
        for dt in [1.0, 50.0, 200.0, 319.0] {
            let out = ctl.move_element(MoveReason::TapEvade, 1000.0 + dt, &mut stage);
            assert_eq!(out, Outcome::Debounced);
            assert_eq!(stage.movable_rect(), settled);
        }
        assert_eq!(ctl.state().moves, 1);
    }

    #[test]
    fn test_avoids_target_with_free_space() {
        let mut stage = reference_stage();
        let mut ctl = EvasionController::new(Tuning::default(), 4);
        let target = stage.target_rect();
        let trials = 600;
        let mut clear = 0;
        for i in 0..trials {
            let out = ctl.move_element(MoveReason::ClickDart, i as f64 * 400.0, &mut stage);
            let Outcome::Moved(p) = out else {
                panic!("expected a move");
            };
            if p.clear {
                clear += 1;
                assert!(!rects_overlap(&stage.movable_rect(), &target, 10.0));
            }
        }
        assert!(clear * 12 >= trials * 11, "only {clear}/{trials} clear");
    }

    #[test]
    fn test_origin_does_not_drift() {
        let mut stage = reference_stage();
        let mut ctl = EvasionController::new(Tuning::default(), 5);
        for i in 0..20 {
            ctl.move_element(MoveReason::ClickDart, i as f64 * 1000.0, &mut stage);
            let origin = ctl.state().origin;
            assert!((origin.left - 520.0).abs() < EPS);
            assert!((origin.top - 372.0).abs() < EPS);
        }
    }

    #[test]
    fn test_exhausted_attempts_still_move() {
        // Accept button covers the whole viewport
        let mut stage = SimulatedStage::new(
            Viewport::new(800.0, 600.0),
            Rect::from_ltwh(300.0, 300.0, 160.0, 56.0),
            Rect::from_ltwh(0.0, 0.0, 800.0, 600.0),
        );
        let mut ctl = EvasionController::new(Tuning::default(), 6);
        let out = ctl.move_element(MoveReason::ClickDart, 0.0, &mut stage);
        let Outcome::Moved(p) = out else {
            panic!("expected a move");
        };
        assert!(!p.clear);
        assert_ne!(p.offset, DVec2::ZERO);
        assert_in_viewport(&stage.movable_rect(), Viewport::new(800.0, 600.0), 16.0);
    }

    #[test]
    fn test_button_wider_than_viewport_pins_axis() {
        let mut stage = SimulatedStage::new(
            Viewport::new(150.0, 800.0),
            Rect::from_ltwh(0.0, 300.0, 160.0, 56.0),
            Rect::from_ltwh(0.0, 0.0, 100.0, 40.0),
        );
        let mut ctl = EvasionController::new(Tuning::default(), 7);
        for i in 0..10 {
            let out = ctl.move_element(MoveReason::ClickDart, i as f64 * 500.0, &mut stage);
            let Outcome::Moved(p) = out else {
                panic!("expected a move");
            };
            assert_eq!(p.offset.x, 0.0);
            assert!(p.offset.x.is_finite() && p.offset.y.is_finite());
        }
    }

    #[test]
    fn test_cosmetic_ranges() {
        let mut stage = reference_stage();
        let mut ctl = EvasionController::new(Tuning::default(), 8);
        for i in 0..100 {
            if let Outcome::Moved(p) = ctl.move_element(MoveReason::TapEvade, i as f64 * 400.0, &mut stage) {
                assert!((-6.0..6.0).contains(&p.rotation_deg));
                assert!((0.97..1.04).contains(&p.scale));
            }
        }
    }

    #[test]
    fn test_resize_between_moves_stays_in_bounds() {
        let mut stage = SimulatedStage::centered(Viewport::new(1400.0, 900.0));
        let mut ctl = EvasionController::new(Tuning::default(), 9);
        let mut now = 0.0;
        for _ in 0..10 {
            ctl.move_element(MoveReason::ClickDart, now, &mut stage);
            now += 400.0;
        }
        // Shrink to a phone-sized viewport
        let small = Viewport::new(390.0, 700.0);
        stage.resize(small);
        ctl.dispatch(EvasionEvent::ViewportResized, now, &mut stage);
        for _ in 0..10 {
            now += 400.0;
            assert!(ctl.move_element(MoveReason::TapEvade, now, &mut stage).moved());
            assert_in_viewport(&stage.movable_rect(), small, 16.0);
        }
    }

    proptest! {
        #[test]
        fn prop_moves_stay_inside_inset_viewport(
            vw in 200.0..2000.0f64,
            vh in 150.0..1500.0f64,
            home_fx in 0.0..1.0f64,
            home_fy in 0.0..1.0f64,
            seed in any::<u64>(),
        ) {
            let viewport = Viewport::new(vw, vh);
            let home = Rect::from_ltwh(home_fx * (vw - 160.0), home_fy * (vh - 56.0), 160.0, 56.0);
            let target = Rect::from_ltwh(vw * 0.25, vh * 0.5, 120.0, 56.0);
            let mut stage = SimulatedStage::new(viewport, home, target);
            let mut ctl = EvasionController::new(Tuning::default(), seed);
            for i in 0..8 {
                let out = ctl.move_element(MoveReason::ClickDart, i as f64 * 400.0, &mut stage);
                prop_assert!(out.moved());
                let rect = stage.movable_rect();
                prop_assert!(rect.left >= 16.0 - EPS && rect.right <= vw - 16.0 + EPS);
                prop_assert!(rect.top >= 16.0 - EPS && rect.bottom <= vh - 16.0 + EPS);
            }
        }

        #[test]
        fn prop_resize_never_breaks_bounds(
            w0 in 400.0..2000.0f64,
            h0 in 300.0..1200.0f64,
            w1 in 200.0..2000.0f64,
            h1 in 150.0..1200.0f64,
            seed in any::<u64>(),
        ) {
            let mut stage = SimulatedStage::centered(Viewport::new(w0, h0));
            let mut ctl = EvasionController::new(Tuning::default(), seed);
            ctl.move_element(MoveReason::ClickDart, 0.0, &mut stage);
            stage.resize(Viewport::new(w1, h1));
            ctl.move_element(MoveReason::ClickDart, 1000.0, &mut stage);
            let rect = stage.movable_rect();
            prop_assert!(rect.left >= 16.0 - EPS && rect.right <= w1 - 16.0 + EPS);
            prop_assert!(rect.top >= 16.0 - EPS && rect.bottom <= h1 - 16.0 + EPS);
        }
    }
}
