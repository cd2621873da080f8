//! Confetti burst simulation
//!
//! Stepped once per animation frame. Physics are per frame, not per second,
//! so speed follows the display refresh rate.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{PALETTE, RECYCLE_MARGIN, RECYCLE_Y};
use crate::geometry::{Viewport, random_between};
use crate::tuning::Tuning;

/// A single confetti square
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Side length (px)
    pub size: f64,
    pub color: &'static str,
    /// Radians
    pub rotation: f64,
    /// Radians per frame
    pub spin: f64,
}

impl Particle {
    /// Spawn somewhere across the top fifth of the viewport
    pub fn spawn<R: Rng>(rng: &mut R, viewport: Viewport) -> Self {
        Self {
            pos: DVec2::new(
                random_between(rng, 0.0, viewport.width),
                random_between(rng, -40.0, viewport.height * 0.2),
            ),
            vel: DVec2::new(
                random_between(rng, -2.2, 2.2),
                random_between(rng, -1.5, 2.8),
            ),
            size: random_between(rng, 6.0, 11.0),
            color: PALETTE[rng.random_range(0..PALETTE.len())],
            rotation: random_between(rng, 0.0, std::f64::consts::PI),
            spin: random_between(rng, -0.08, 0.08),
        }
    }

    /// Advance one frame
    pub fn update(&mut self, gravity: f64, drag: f64) {
        self.vel.y += gravity;
        self.vel *= drag;
        self.pos += self.vel;
        self.rotation += self.spin;
    }
}

/// Whether a burst wants another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstStatus {
    Running,
    /// Duration elapsed; tear the surface down
    Finished,
}

/// Canvas backing store size for a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Device pixels
    pub backing_width: u32,
    pub backing_height: u32,
    /// CSS pixels
    pub css_width: f64,
    pub css_height: f64,
    /// Scale applied to the 2d context
    pub dpr: f64,
}

impl SurfaceSize {
    pub fn for_viewport(viewport: Viewport, device_pixel_ratio: f64) -> Self {
        let dpr = if device_pixel_ratio > 0.0 && device_pixel_ratio.is_finite() {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            backing_width: (viewport.width * dpr) as u32,
            backing_height: (viewport.height * dpr) as u32,
            css_width: viewport.width,
            css_height: viewport.height,
            dpr,
        }
    }
}

/// One confetti run: owns its particles, bounded by a fixed duration
#[derive(Debug, Clone)]
pub struct ConfettiBurst<R: Rng = Pcg32> {
    particles: Vec<Particle>,
    viewport: Viewport,
    started_at: f64,
    duration_ms: f64,
    gravity: f64,
    drag: f64,
    frames: u32,
    rng: R,
}

impl ConfettiBurst<Pcg32> {
    pub fn new(tuning: &Tuning, viewport: Viewport, started_at: f64, seed: u64) -> Self {
        Self::with_rng(tuning, viewport, started_at, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> ConfettiBurst<R> {
    pub fn with_rng(tuning: &Tuning, viewport: Viewport, started_at: f64, mut rng: R) -> Self {
        let particles = (0..tuning.particle_count)
            .map(|_| Particle::spawn(&mut rng, viewport))
            .collect();
        Self {
            particles,
            viewport,
            started_at,
            duration_ms: tuning.confetti_duration_ms,
            gravity: tuning.gravity,
            drag: tuning.drag,
            frames: 0,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Termination predicate
    pub fn is_expired(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }

    /// Viewport changed mid-run. Particles keep their state.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance every particle by one frame at `timestamp` (ms, same clock as
    /// `started_at`)
    pub fn step(&mut self, timestamp: f64) -> BurstStatus {
        let floor = self.viewport.height + RECYCLE_MARGIN;
        for particle in &mut self.particles {
            particle.update(self.gravity, self.drag);
            if particle.pos.y > floor {
                particle.pos.y = RECYCLE_Y;
                particle.vel.y = random_between(&mut self.rng, -2.0, 2.0);
            }
        }
        self.frames += 1;

        if self.is_expired(timestamp - self.started_at) {
            BurstStatus::Finished
        } else {
            BurstStatus::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst() -> ConfettiBurst {
        ConfettiBurst::new(&Tuning::default(), Viewport::new(1200.0, 800.0), 0.0, 42)
    }

    #[test]
    fn test_seeding() {
        let b = burst();
        assert_eq!(b.particles().len(), 120);
        for p in b.particles() {
            assert!((0.0..1200.0).contains(&p.pos.x));
            assert!((-40.0..160.0).contains(&p.pos.y));
            assert!((-2.2..2.2).contains(&p.vel.x));
            assert!((-1.5..2.8).contains(&p.vel.y));
            assert!((6.0..11.0).contains(&p.size));
            assert!((-0.08..0.08).contains(&p.spin));
            assert!(PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn test_particle_update() {
        let mut p = Particle {
            pos: DVec2::new(10.0, 10.0),
            vel: DVec2::new(1.0, 0.0),
            size: 8.0,
            color: PALETTE[0],
            rotation: 0.0,
            spin: 0.05,
        };
        p.update(0.18, 0.98);
        assert!((p.vel.x - 0.98).abs() < 1e-12);
        assert!((p.vel.y - 0.18 * 0.98).abs() < 1e-12);
        assert!((p.pos.x - 10.98).abs() < 1e-12);
        assert!((p.rotation - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_runs_for_full_duration_then_finishes() {
        let mut b = burst();
        let frame = 1000.0 / 60.0;
        let mut t = frame;
        while t < 7200.0 {
            assert_eq!(b.step(t), BurstStatus::Running, "finished early at {t}");
            t += frame;
        }
        // First frame at or past the duration ends the run
        assert_eq!(b.step(t), BurstStatus::Finished);
        assert!(b.frames() >= 431);
    }

    #[test]
    fn test_particles_are_recycled() {
        let mut b = burst();
        let floor = 800.0 + RECYCLE_MARGIN;
        for i in 0..2000 {
            b.step(i as f64);
            assert!(b.particles().iter().all(|p| p.pos.y <= floor));
        }
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut b = burst();
        b.step(16.0);
        let before = b.particles().to_vec();
        b.resize(Viewport::new(400.0, 300.0));
        assert_eq!(b.particles(), &before[..]);
        assert_eq!(b.viewport(), Viewport::new(400.0, 300.0));
    }

    #[test]
    fn test_surface_size() {
        let s = SurfaceSize::for_viewport(Viewport::new(390.0, 844.0), 3.0);
        assert_eq!((s.backing_width, s.backing_height), (1170, 2532));
        assert_eq!(s.css_width, 390.0);

        let s = SurfaceSize::for_viewport(Viewport::new(100.0, 50.0), 0.0);
        assert_eq!(s.dpr, 1.0);
        assert_eq!((s.backing_width, s.backing_height), (100, 50));
    }
}
