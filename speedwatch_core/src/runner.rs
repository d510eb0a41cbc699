//! Fixed-period orchestration of the read-process-report loop.
//!
//! The loop carries no algorithmic complexity of its own: it sequences
//! sensor read, pipeline tick, and the periodic report/notification drain,
//! and throttles to the configured tick rate. It can be stopped between
//! ticks via the shutdown flag; no partial-tick state is ever observable.

use crate::{SpeedEstimator, TickStatus};
use speedwatch_traits::Reporter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunParams {
    /// Tick rate of the loop in Hz
    pub sample_rate_hz: u32,
    /// Report (and notification drain) cadence in ticks
    pub report_every_ticks: u32,
    /// Identifier sent alongside each speed report
    pub vehicle_id: u32,
    /// Stop after this many ticks; None runs until shutdown
    pub max_ticks: Option<u64>,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            sample_rate_hz: 100,
            report_every_ticks: 200,
            vehicle_id: 1,
            max_ticks: None,
        }
    }
}

/// Counters accumulated over one run of the loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub skipped_ticks: u64,
    pub reports_sent: u64,
    pub reports_failed: u64,
    pub notifications: u64,
    pub final_velocity_mps: f32,
}

/// Drive the estimator until `max_ticks` or shutdown.
///
/// Reports are fire-and-forget: a transport failure is logged and counted,
/// never retried or awaited. A failed sensor read skips the tick but still
/// counts toward the report cadence, matching the fixed-period contract.
pub fn run<R: Reporter>(
    est: &mut SpeedEstimator,
    reporter: &mut R,
    params: &RunParams,
    shutdown: &AtomicBool,
) -> RunSummary {
    let period = Duration::from_micros(crate::util::period_us(params.sample_rate_hz));
    let every = u64::from(params.report_every_ticks.max(1));
    let clock = est.clock.clone();

    tracing::info!(
        sample_rate_hz = params.sample_rate_hz,
        report_every_ticks = params.report_every_ticks,
        vehicle_id = params.vehicle_id,
        "run start"
    );

    let mut summary = RunSummary::default();
    loop {
        if shutdown.load(Ordering::Relaxed) {
            tracing::info!("shutdown requested; stopping between ticks");
            break;
        }
        if let Some(max) = params.max_ticks
            && summary.ticks >= max
        {
            break;
        }

        if let TickStatus::Skipped = est.step() {
            summary.skipped_ticks += 1;
        }
        summary.ticks += 1;

        if summary.ticks.is_multiple_of(every) {
            let velocity_mps = est.velocity();
            let [x, y, z] = est.last_axes_mps2();
            tracing::info!(
                x,
                y,
                z,
                accel_mps2 = est.last_accel_mps2(),
                velocity_mps,
                "status"
            );
            if est.take_notification() {
                summary.notifications += 1;
                tracing::warn!(velocity_mps, "speed threshold exceeded; slow down");
            }
            match reporter.report(velocity_mps, params.vehicle_id) {
                Ok(()) => {
                    summary.reports_sent += 1;
                    tracing::debug!(velocity_mps, vehicle_id = params.vehicle_id, "report sent");
                }
                Err(e) => {
                    summary.reports_failed += 1;
                    tracing::warn!(error = %e, "report failed; continuing");
                }
            }
        }

        clock.sleep(period);
    }

    summary.final_velocity_mps = est.velocity();
    tracing::info!(
        ticks = summary.ticks,
        skipped = summary.skipped_ticks,
        reports_sent = summary.reports_sent,
        final_velocity_mps = summary.final_velocity_mps,
        "run complete"
    );
    summary
}
