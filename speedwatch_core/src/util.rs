//! Common time/period helpers for speedwatch_core.

use std::time::Instant;

/// Number of microseconds in one second.
pub const MICROS_PER_SEC: u64 = 1_000_000;
/// Number of milliseconds in one second.
pub const MILLIS_PER_SEC: u64 = 1_000;

/// Compute the period in microseconds for a given tick rate in Hz.
/// - Clamps `hz` to at least 1 to avoid division by zero.
/// - Ensures result is at least 1 microsecond.
#[inline]
pub fn period_us(hz: u32) -> u64 {
    (MICROS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Compute the period in milliseconds for a given tick rate in Hz.
#[inline]
pub fn period_ms(hz: u32) -> u64 {
    (MILLIS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Elapsed seconds from `prev` to `now`, clamped to 0 when the clock
/// appears to run backwards. Integration must never see a negative step.
#[inline]
pub fn dt_seconds(prev: Instant, now: Instant) -> f32 {
    now.saturating_duration_since(prev).as_secs_f32()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn period_handles_extremes() {
        assert_eq!(period_us(0), MICROS_PER_SEC);
        assert_eq!(period_us(100), 10_000);
        assert_eq!(period_us(u32::MAX), 1);
        assert_eq!(period_ms(100), 10);
    }

    #[test]
    fn dt_clamps_backwards_clock_to_zero() {
        let later = Instant::now() + Duration::from_millis(50);
        let earlier = later - Duration::from_millis(50);
        assert_eq!(dt_seconds(later, earlier), 0.0);
        let dt = dt_seconds(earlier, later);
        assert!((dt - 0.05).abs() < 1e-4);
    }
}
