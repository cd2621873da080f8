//! Accept-action orchestration
//!
//! The card goes from the question to the success view exactly once. The
//! first accept yields a plan the platform executes (view swap, chime,
//! confetti, hearts); later accepts only re-assert the success view.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which card face is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardView {
    #[default]
    Question,
    Success,
}

/// Side effects to run for the transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelebrationPlan {
    pub play_chime: bool,
    pub confetti_ms: f64,
    pub hearts_ms: f64,
}

/// One-way question → success state machine
#[derive(Debug, Clone, Default)]
pub struct Celebration {
    view: CardView,
    accepts: u32,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> CardView {
        self.view
    }

    pub fn accepts(&self) -> u32 {
        self.accepts
    }

    /// Record an accept. Only the first one returns a plan.
    pub fn accept(&mut self, tuning: &Tuning) -> Option<CelebrationPlan> {
        self.accepts += 1;
        match self.view {
            CardView::Question => {
                self.view = CardView::Success;
                log::info!("Accepted, celebrating");
                Some(CelebrationPlan {
                    play_chime: tuning.chime,
                    confetti_ms: tuning.confetti_duration_ms,
                    hearts_ms: tuning.hearts_duration_ms,
                })
            }
            CardView::Success => {
                log::debug!("Accept repeated ({}), already celebrating", self.accepts);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_accept_plans_everything() {
        let mut c = Celebration::new();
        assert_eq!(c.view(), CardView::Question);
        let plan = c.accept(&Tuning::default()).unwrap();
        assert!(plan.play_chime);
        assert_eq!(plan.confetti_ms, 7200.0);
        assert_eq!(plan.hearts_ms, 7200.0);
        assert_eq!(c.view(), CardView::Success);
    }

    #[test]
    fn test_double_accept_is_idempotent() {
        let mut c = Celebration::new();
        let tuning = Tuning::default();
        assert!(c.accept(&tuning).is_some());
        assert!(c.accept(&tuning).is_none());
        assert!(c.accept(&tuning).is_none());
        assert_eq!(c.view(), CardView::Success);
        assert_eq!(c.accepts(), 3);
    }

    #[test]
    fn test_chime_can_be_disabled() {
        let mut c = Celebration::new();
        let tuning = Tuning {
            chime: false,
            ..Default::default()
        };
        assert!(!c.accept(&tuning).unwrap().play_chime);
    }
}
