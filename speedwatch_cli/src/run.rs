//! Run orchestration: hardware assembly, calibration, and the tick loop.

use crate::cli::Cli;
use eyre::{Result, WrapErr};
use speedwatch_config::{Config, Credentials};
use speedwatch_core::{SpeedEstimator, calibrate, runner};
use speedwatch_hardware::reporter::{HttpReporter, LogReporter};
use speedwatch_traits::{MonotonicClock, Reporter};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[cfg(feature = "hardware")]
fn make_sensor() -> Result<speedwatch_hardware::lsm6dso::Lsm6dso> {
    speedwatch_hardware::lsm6dso::Lsm6dso::new().wrap_err("failed to open LSM6DSO")
}

#[cfg(not(feature = "hardware"))]
fn make_sensor() -> Result<speedwatch_hardware::SimulatedAccelerometer> {
    Ok(speedwatch_hardware::SimulatedAccelerometer::new())
}

fn make_reporter(cfg: &Config) -> Box<dyn Reporter> {
    match &cfg.report.collector_host {
        Some(host) => Box::new(HttpReporter::new(
            host.clone(),
            cfg.report.collector_port,
            Duration::from_millis(cfg.report.send_timeout_ms),
        )),
        None => Box::new(LogReporter),
    }
}

// Network credentials are provisioning glue: load them when configured so a
// broken store fails at startup, and leave association to the host.
fn load_credentials(cfg: &Config) -> Result<Option<Credentials>> {
    match &cfg.network.credentials_file {
        Some(path) => {
            let creds = Credentials::load_csv(Path::new(path))
                .wrap_err_with(|| format!("failed to load credentials from {path}"))?;
            tracing::info!(ssid = %creds.ssid, "network credentials loaded");
            Ok(Some(creds))
        }
        None => Ok(None),
    }
}

pub fn run(args: &Cli, cfg: &Config, ticks: Option<u64>, vehicle_id: Option<u32>) -> Result<()> {
    load_credentials(cfg)?;

    let mut sensor = make_sensor()?;
    let clock = MonotonicClock::new();
    let bias = calibrate(
        &mut sensor,
        &clock,
        cfg.calibration.samples,
        Duration::from_millis(cfg.calibration.interval_ms),
        Duration::from_millis(cfg.sensor.read_timeout_ms),
    )
    .wrap_err("bias calibration failed; refusing to start the run loop")?;

    let mut est = SpeedEstimator::builder()
        .with_sensor(sensor)
        .with_bias(bias)
        .with_pipeline((&cfg.pipeline).into())
        .with_read_timeout_ms(cfg.sensor.read_timeout_ms)
        .build()?;
    let mut reporter = make_reporter(cfg);

    let params = runner::RunParams {
        sample_rate_hz: cfg.sensor.sample_rate_hz,
        report_every_ticks: cfg.report.every_ticks,
        vehicle_id: vehicle_id.unwrap_or(cfg.report.vehicle_id),
        max_ticks: ticks,
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let s = shutdown.clone();
        ctrlc::set_handler(move || s.store(true, Ordering::Relaxed))
            .wrap_err("failed to install ctrl-c handler")?;
    }

    let summary = runner::run(&mut est, &mut reporter, &params, &shutdown);

    if args.json {
        let out = serde_json::json!({
            "ticks": summary.ticks,
            "skipped_ticks": summary.skipped_ticks,
            "reports_sent": summary.reports_sent,
            "reports_failed": summary.reports_failed,
            "notifications": summary.notifications,
            "final_velocity_mps": summary.final_velocity_mps,
        });
        println!("{out}");
    } else {
        println!(
            "run complete: {} ticks ({} skipped), {} reports sent, final speed {:.3} m/s",
            summary.ticks,
            summary.skipped_ticks,
            summary.reports_sent,
            summary.final_velocity_mps
        );
    }
    Ok(())
}

pub fn calibrate_only(args: &Cli, cfg: &Config, samples: Option<u32>) -> Result<()> {
    let mut sensor = make_sensor()?;
    let clock = MonotonicClock::new();
    let bias = calibrate(
        &mut sensor,
        &clock,
        samples.unwrap_or(cfg.calibration.samples),
        Duration::from_millis(cfg.calibration.interval_ms),
        Duration::from_millis(cfg.sensor.read_timeout_ms),
    )
    .wrap_err("bias calibration failed")?;

    if args.json {
        let out = serde_json::json!({
            "bias_x": bias.x,
            "bias_y": bias.y,
            "bias_z": bias.z,
        });
        println!("{out}");
    } else {
        println!(
            "bias: x={:.4} y={:.4} z={:.4} (raw g)",
            bias.x, bias.y, bias.z
        );
    }
    Ok(())
}
