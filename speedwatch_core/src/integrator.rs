//! Discrete-time velocity integration with stationary drift reset.

use crate::util::dt_seconds;
use std::time::Instant;

/// Running velocity estimate from per-tick acceleration.
///
/// `prev_at` is advanced on every tick regardless of branch, so a skipped
/// or at-rest tick never produces a stale time base for the next one.
#[derive(Debug, Clone)]
pub struct VelocityIntegrator {
    velocity_mps: f32,
    prev_velocity_mps: f32,
    prev_at: Instant,
}

impl VelocityIntegrator {
    pub fn new(epoch: Instant) -> Self {
        Self {
            velocity_mps: 0.0,
            prev_velocity_mps: 0.0,
            prev_at: epoch,
        }
    }

    /// Advance one tick.
    ///
    /// `dt` comes from the same monotonic clock as every other tick and is
    /// clamped to zero if `now` precedes the previous timestamp. When
    /// `at_rest` is set the velocity is zeroed outright, discarding any
    /// drift the dead zone let through.
    pub fn tick(&mut self, accel_mps2: f32, now: Instant, at_rest: bool) -> f32 {
        let dt = dt_seconds(self.prev_at, now);
        self.prev_at = now;
        if at_rest {
            self.velocity_mps = 0.0;
            self.prev_velocity_mps = 0.0;
            return self.velocity_mps;
        }
        self.velocity_mps = self.prev_velocity_mps + accel_mps2 * dt;
        self.prev_velocity_mps = self.velocity_mps;
        self.velocity_mps
    }

    pub fn velocity(&self) -> f32 {
        self.velocity_mps
    }

    /// Seed the estimate, for tests that need a non-zero starting point.
    #[doc(hidden)]
    pub fn set_velocity(&mut self, velocity_mps: f32) {
        self.velocity_mps = velocity_mps;
        self.prev_velocity_mps = velocity_mps;
    }
}
