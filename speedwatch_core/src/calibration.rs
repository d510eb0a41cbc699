//! Startup bias calibration.

use crate::error::Result;
use eyre::WrapErr;
use speedwatch_traits::{Accelerometer, Clock};
use std::time::Duration;

/// Per-axis offsets in raw sensor units (g), captured with the device at
/// rest. Immutable once computed: the velocity estimate is defined only
/// relative to this bias, so recalibrating mid-run would invalidate it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBias {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CalibrationBias {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Subtract the bias from a raw triple.
    #[inline]
    pub fn correct(&self, raw: [f32; 3]) -> [f32; 3] {
        [raw[0] - self.x, raw[1] - self.y, raw[2] - self.z]
    }
}

/// Average `samples` raw readings spaced `interval` apart into a bias.
///
/// Any failed read aborts calibration: without a working sensor there is
/// no valid bias and the run loop must not start. The error is reported
/// upward, not retried here.
pub fn calibrate<A, C>(
    sensor: &mut A,
    clock: &C,
    samples: u32,
    interval: Duration,
    read_timeout: Duration,
) -> Result<CalibrationBias>
where
    A: Accelerometer,
    C: Clock,
{
    let samples = samples.max(1);
    tracing::info!(samples, interval_ms = interval.as_millis() as u64, "calibration start");

    let mut sum = [0.0f64; 3];
    for _ in 0..samples {
        let raw = sensor
            .read_axes(read_timeout)
            .map_err(|e| eyre::Report::new(crate::map_sensor_error(&*e)))
            .wrap_err("reading accelerometer during calibration")?;
        sum[0] += f64::from(raw[0]);
        sum[1] += f64::from(raw[1]);
        sum[2] += f64::from(raw[2]);
        clock.sleep(interval);
    }

    let n = f64::from(samples);
    let bias = CalibrationBias {
        x: (sum[0] / n) as f32,
        y: (sum[1] / n) as f32,
        z: (sum[2] / n) as f32,
    };
    tracing::info!(bias_x = bias.x, bias_y = bias.y, bias_z = bias.z, "calibration complete");
    Ok(bias)
}
