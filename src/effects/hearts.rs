//! Floating hearts
//!
//! Hearts are plain DOM nodes animated by a looping CSS keyframe. Only the
//! per-heart parameters are generated here; the layer is torn down in bulk.

use rand::Rng;

use crate::geometry::random_between;
use crate::tuning::Tuning;

/// Container class
pub const LAYER_CLASS: &str = "hearts-layer";
/// Per-heart class (carries the keyframe animation)
pub const HEART_CLASS: &str = "heart-float";

/// Randomized animation parameters for one heart
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingHeart {
    /// Horizontal position, percent of the layer width
    pub left_percent: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    /// Initial downward shift (px)
    pub rise_px: f64,
    pub scale: f64,
}

impl FloatingHeart {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            left_percent: random_between(rng, 8.0, 92.0),
            delay_s: random_between(rng, 0.0, 1.6),
            duration_s: random_between(rng, 4.8, 6.5),
            rise_px: random_between(rng, 20.0, 60.0),
            scale: random_between(rng, 0.7, 1.15),
        }
    }

    /// Inline style declarations as `(property, value)` pairs
    pub fn style(&self) -> [(&'static str, String); 4] {
        [
            ("left", format!("{}%", self.left_percent)),
            ("animation-delay", format!("{}s", self.delay_s)),
            ("animation-duration", format!("{}s", self.duration_s)),
            (
                "transform",
                format!("translateY({}px) scale({})", self.rise_px, self.scale),
            ),
        ]
    }
}

/// One batch of hearts with its removal deadline
#[derive(Debug, Clone)]
pub struct DecorationLayer {
    pub hearts: Vec<FloatingHeart>,
    pub started_at: f64,
    pub duration_ms: f64,
}

impl DecorationLayer {
    pub fn generate<R: Rng>(tuning: &Tuning, started_at: f64, rng: &mut R) -> Self {
        Self {
            hearts: (0..tuning.heart_count)
                .map(|_| FloatingHeart::random(rng))
                .collect(),
            started_at,
            duration_ms: tuning.hearts_duration_ms,
        }
    }

    /// Timestamp at which the whole layer is removed
    pub fn expires_at(&self) -> f64 {
        self.started_at + self.duration_ms
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now >= self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generate_count_and_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        let layer = DecorationLayer::generate(&Tuning::default(), 500.0, &mut rng);
        assert_eq!(layer.hearts.len(), 18);
        for h in &layer.hearts {
            assert!((8.0..92.0).contains(&h.left_percent));
            assert!((0.0..1.6).contains(&h.delay_s));
            assert!((4.8..6.5).contains(&h.duration_s));
            assert!((20.0..60.0).contains(&h.rise_px));
            assert!((0.7..1.15).contains(&h.scale));
        }
    }

    #[test]
    fn test_expiry() {
        let mut rng = Pcg32::seed_from_u64(12);
        let layer = DecorationLayer::generate(&Tuning::default(), 500.0, &mut rng);
        assert_eq!(layer.expires_at(), 7700.0);
        assert!(!layer.is_expired(7699.0));
        assert!(layer.is_expired(7700.0));
    }

    #[test]
    fn test_style() {
        let heart = FloatingHeart {
            left_percent: 50.0,
            delay_s: 0.5,
            duration_s: 5.0,
            rise_px: 30.0,
            scale: 0.8,
        };
        let style = heart.style();
        assert_eq!(style[0], ("left", "50%".to_string()));
        assert_eq!(style[3].1, "translateY(30px) scale(0.8)");
    }
}
