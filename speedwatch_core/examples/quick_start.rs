//! Quick Start Example
//!
//! Demonstrates the minimal setup required to run the estimation pipeline
//! without hardware: a scripted sensor, a deterministic clock, and a
//! recording reporter. Run with `cargo run --example quick_start -p speedwatch_core`.

use speedwatch_core::mocks::{NoopAccelerometer, RecordingReporter};
use speedwatch_core::{CalibrationBias, MPS2_PER_G, SpeedEstimator, runner};
use speedwatch_traits::clock::test_clock::TestClock;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

fn main() -> Result<(), eyre::Report> {
    // Drive the pipeline directly: one second of 1 m/s^2 on X, then rest.
    let mut est = SpeedEstimator::builder()
        .with_sensor(NoopAccelerometer)
        .with_bias(CalibrationBias::ZERO)
        .with_clock(Box::new(TestClock::new()))
        .build()?;

    let t0 = Instant::now();
    for i in 1..=100u32 {
        let now = t0 + Duration::from_millis(u64::from(i) * 10);
        est.step_from_axes([1.0 / MPS2_PER_G, 0.0, 0.0], now);
    }
    println!("after 1 s of 1 m/s^2: {:.3} m/s", est.velocity());

    // The runner drives the same pipeline on a cadence; with the noop
    // sensor every tick is skipped, which the summary makes visible.
    let mut reporter = RecordingReporter::default();
    let params = runner::RunParams {
        report_every_ticks: 50,
        max_ticks: Some(100),
        ..runner::RunParams::default()
    };
    let shutdown = AtomicBool::new(false);
    let summary = runner::run(&mut est, &mut reporter, &params, &shutdown);
    println!(
        "runner: {} ticks, {} skipped, {} reports",
        summary.ticks,
        summary.skipped_ticks,
        summary.reports_sent
    );
    Ok(())
}
