use proptest::prelude::*;
use speedwatch_core::integrator::VelocityIntegrator;
use speedwatch_core::normalize::DeadZone;
use speedwatch_core::stationary::StationaryDetector;
use std::time::{Duration, Instant};

proptest! {
    // Everything strictly inside the zone snaps to exactly zero; everything
    // at or beyond it passes through untouched.
    #[test]
    fn dead_zone_partitions_the_axis(v in -100.0f32..100.0) {
        let z = DeadZone::new(0.3);
        let out = z.apply(v);
        if v > -0.3 && v < 0.3 {
            prop_assert_eq!(out, 0.0);
        } else {
            prop_assert_eq!(out, v);
        }
    }

    // An at-rest tick yields exactly zero no matter what acceleration or
    // time step it is handed.
    #[test]
    fn at_rest_always_zeroes(accel in -100.0f32..100.0, dt_ms in 0u64..10_000, seed in -50.0f32..50.0) {
        let t0 = Instant::now();
        let mut int = VelocityIntegrator::new(t0);
        int.set_velocity(seed);
        let v = int.tick(accel, t0 + Duration::from_millis(dt_ms), true);
        prop_assert_eq!(v, 0.0);
    }

    // Constant in-band input fires exactly at multiples of the run length.
    #[test]
    fn stationary_run_fires_periodically(run in 1u32..200, accel in -0.9f32..0.9) {
        let mut det = StationaryDetector::new(1.0, run);
        for i in 1..=(run * 3) {
            let fired = det.observe(accel);
            prop_assert_eq!(fired, i % run == 0, "tick {}", i);
        }
    }

    // Integration is linear in acceleration for a fixed tick schedule.
    #[test]
    fn velocity_scales_with_accel(accel in 0.5f32..10.0) {
        let t0 = Instant::now();
        let mut int = VelocityIntegrator::new(t0);
        for i in 1..=20u32 {
            int.tick(accel, t0 + Duration::from_millis(u64::from(i) * 10), false);
        }
        let expected = accel * 0.2; // 20 ticks x 10 ms
        prop_assert!((int.velocity() - expected).abs() < 1e-3);
    }
}
