use rstest::rstest;
use speedwatch_core::integrator::VelocityIntegrator;
use speedwatch_core::monitor::ThresholdMonitor;
use speedwatch_core::stationary::StationaryDetector;
use std::time::{Duration, Instant};

#[test]
fn detector_fires_exactly_on_run_completion_and_rearms() {
    let mut det = StationaryDetector::new(1.0, 100);
    for cycle in 0..3 {
        for i in 1..=100u32 {
            let fired = det.observe(0.0);
            assert_eq!(fired, i == 100, "cycle {cycle}, tick {i}");
        }
    }
}

#[test]
fn detector_resets_on_out_of_band_reading() {
    let mut det = StationaryDetector::new(1.0, 100);
    for _ in 0..99 {
        assert!(!det.observe(0.2));
    }
    assert!(!det.observe(3.5)); // run broken
    assert_eq!(det.run_progress(), 0);
    for i in 1..=100u32 {
        assert_eq!(det.observe(-0.4), i == 100);
    }
}

#[rstest]
#[case(0.99, true)]
#[case(-0.99, true)]
#[case(1.0, false)] // band boundary is out-of-band (strict)
#[case(-1.0, false)]
#[case(2.7, false)]
fn detector_band_is_strict(#[case] accel: f32, #[case] counts: bool) {
    let mut det = StationaryDetector::new(1.0, 100);
    det.observe(accel);
    assert_eq!(det.run_progress() == 1, counts);
}

#[rstest]
#[case(2.0, true)]
#[case(-2.0, true)]
#[case(1.999, false)]
#[case(-1.999, false)]
#[case(2.5, true)]
#[case(0.0, false)]
fn monitor_threshold_is_symmetric_and_inclusive(#[case] velocity: f32, #[case] raised: bool) {
    let mut mon = ThresholdMonitor::new(2.0);
    mon.observe(velocity);
    assert_eq!(mon.take(), raised);
}

#[test]
fn monitor_take_clears_the_flag() {
    let mut mon = ThresholdMonitor::new(2.0);
    mon.observe(3.0);
    mon.observe(0.0); // later calm samples do not clear it
    assert!(mon.take());
    assert!(!mon.take());
}

#[test]
fn integrator_accumulates_accel_over_dt() {
    let t0 = Instant::now();
    let mut int = VelocityIntegrator::new(t0);
    for i in 1..=50u32 {
        let now = t0 + Duration::from_millis(u64::from(i) * 10);
        int.tick(1.0, now, false);
    }
    assert!((int.velocity() - 0.5).abs() < 1e-4);
}

#[test]
fn at_rest_zeroes_velocity_regardless_of_accel() {
    let t0 = Instant::now();
    let mut int = VelocityIntegrator::new(t0);
    int.set_velocity(5.0);
    let v = int.tick(50.0, t0 + Duration::from_millis(10), true);
    assert_eq!(v, 0.0);
    // and the reset sticks: the next quiet tick stays at zero
    let v = int.tick(0.0, t0 + Duration::from_millis(20), false);
    assert_eq!(v, 0.0);
}

#[test]
fn backwards_clock_integrates_nothing() {
    let t0 = Instant::now() + Duration::from_secs(1);
    let mut int = VelocityIntegrator::new(t0);
    int.set_velocity(2.0);
    // `now` precedes the previous timestamp: dt clamps to zero
    let v = int.tick(9.0, t0 - Duration::from_millis(500), false);
    assert_eq!(v, 2.0);
}

#[test]
fn timestamp_advances_even_when_at_rest() {
    let t0 = Instant::now();
    let mut int = VelocityIntegrator::new(t0);
    int.tick(0.0, t0 + Duration::from_millis(10), true);
    // If prev_at had not advanced, this tick would integrate over 20 ms.
    let v = int.tick(1.0, t0 + Duration::from_millis(20), false);
    assert!((v - 0.01).abs() < 1e-5);
}
