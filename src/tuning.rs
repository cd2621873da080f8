//! Data-driven constants
//!
//! Every number the card behaves by lives here. The page may override any
//! subset through a JSON `data-tuning` attribute on the card element.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Runtime tuning for evasion and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Evasion ===
    /// Minimum time between moves (ms)
    pub debounce_ms: f64,
    /// Mouse trigger radius (px)
    pub hover_radius: f64,
    /// Touch trigger radius (px)
    pub touch_radius: f64,
    /// Viewport edge inset (px)
    pub inset_padding: f64,
    /// Exclusion padding around the accept button (px)
    pub target_padding: f64,
    /// Candidates sampled before giving up on a clear spot
    pub max_attempts: u32,
    pub rotation_deg: (f64, f64),
    pub scale: (f64, f64),

    // === Confetti ===
    pub particle_count: usize,
    /// Added to vertical velocity every frame
    pub gravity: f64,
    /// Velocity multiplier per frame
    pub drag: f64,
    pub confetti_duration_ms: f64,

    // === Hearts ===
    pub heart_count: usize,
    pub hearts_duration_ms: f64,

    // === Audio ===
    pub chime: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            hover_radius: HOVER_RADIUS,
            touch_radius: TOUCH_RADIUS,
            inset_padding: INSET_PADDING,
            target_padding: TARGET_PADDING,
            max_attempts: MAX_ATTEMPTS,
            rotation_deg: ROTATION_RANGE,
            scale: SCALE_RANGE,

            particle_count: PARTICLE_COUNT,
            gravity: GRAVITY,
            drag: DRAG,
            confetti_duration_ms: CONFETTI_DURATION_MS,

            heart_count: HEART_COUNT,
            hearts_duration_ms: HEARTS_DURATION_MS,

            chime: true,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override. Missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Parse an optional override, falling back to defaults on bad input
    pub fn from_attribute(attr: Option<&str>) -> Self {
        match attr {
            Some(json) if !json.trim().is_empty() => match Self::from_json(json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring invalid tuning JSON: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Keep overrides inside ranges the engine can work with
    fn sanitized(mut self) -> Self {
        self.max_attempts = self.max_attempts.max(1);
        self.debounce_ms = self.debounce_ms.max(0.0);
        self.inset_padding = self.inset_padding.max(0.0);
        self.target_padding = self.target_padding.max(0.0);
        if self.rotation_deg.0 > self.rotation_deg.1 {
            self.rotation_deg = (self.rotation_deg.1, self.rotation_deg.0);
        }
        if self.scale.0 > self.scale.1 {
            self.scale = (self.scale.1, self.scale.0);
        }
        self
    }
}
