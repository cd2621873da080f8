//! Runaway Card - a greeting card whose "no" button refuses to be clicked
//!
//! Core modules:
//! - `geometry`: Rectangles, clamping, padded overlap tests
//! - `evasion`: Runaway placement engine and input routing
//! - `effects`: Confetti burst and floating hearts
//! - `celebration`: Accept-action orchestration
//! - `tuning`: Data-driven constants
//! - `platform`: Browser glue (wasm32 only)

pub mod celebration;
pub mod effects;
pub mod evasion;
pub mod geometry;
pub mod platform;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use celebration::{CardView, Celebration, CelebrationPlan};
pub use evasion::{EvasionController, EvasionEvent, Outcome, Stage};
pub use tuning::Tuning;

/// Default constants (overridable through `Tuning`)
pub mod consts {
    /// Minimum time between two moves (ms)
    pub const DEBOUNCE_MS: f64 = 320.0;
    /// Mouse proximity that triggers a move (px)
    pub const HOVER_RADIUS: f64 = 100.0;
    /// Touch proximity that triggers a move (px)
    pub const TOUCH_RADIUS: f64 = 120.0;
    /// Gap kept between the button and the viewport edge (px)
    pub const INSET_PADDING: f64 = 16.0;
    /// Exclusion padding around the accept button (px)
    pub const TARGET_PADDING: f64 = 10.0;
    /// Candidate offsets sampled per move
    pub const MAX_ATTEMPTS: u32 = 12;
    /// Cosmetic tilt range (degrees)
    pub const ROTATION_RANGE: (f64, f64) = (-6.0, 6.0);
    /// Cosmetic scale range
    pub const SCALE_RANGE: (f64, f64) = (0.97, 1.04);

    /// Confetti
    pub const PARTICLE_COUNT: usize = 120;
    pub const GRAVITY: f64 = 0.18;
    pub const DRAG: f64 = 0.98;
    /// Particles below `viewport height + margin` are recycled to the top
    pub const RECYCLE_MARGIN: f64 = 30.0;
    pub const RECYCLE_Y: f64 = -20.0;
    pub const CONFETTI_DURATION_MS: f64 = 7200.0;
    pub const PALETTE: [&str; 5] = ["#f7a8b8", "#fbd3e0", "#d6c7f7", "#c8f0df", "#ffe1c7"];

    /// Floating hearts
    pub const HEART_COUNT: usize = 18;
    pub const HEARTS_DURATION_MS: f64 = 7200.0;
}
