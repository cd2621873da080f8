//! Celebration effects
//!
//! Both effects are self-terminating: confetti by a per-frame elapsed-time
//! check, hearts by a single removal deadline.

pub mod confetti;
pub mod hearts;

pub use confetti::{BurstStatus, ConfettiBurst, Particle, SurfaceSize};
pub use hearts::{DecorationLayer, FloatingHeart};

/// DOM id of the confetti canvas
pub const CONFETTI_CANVAS_ID: &str = "confetti-canvas";
