#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core speed-estimation logic (hardware-agnostic).
//!
//! This crate provides the hardware-independent estimation pipeline. All
//! hardware and network interactions go through the `speedwatch_traits`
//! `Accelerometer` and `Reporter` traits.
//!
//! ## Architecture
//!
//! - **Calibration**: at-rest bias averaging (`calibration` module)
//! - **Normalization**: per-axis dead zone (`normalize` module)
//! - **Stationary detection**: debounced run counter (`stationary` module)
//! - **Integration**: drift-corrected velocity (`integrator` module)
//! - **Alerting**: threshold-crossing flag (`monitor` module)
//! - **Orchestration**: fixed-period tick loop and reporting (`runner`)
//!
//! Each tick runs to completion on the single control thread; no pipeline
//! state is shared across threads and no tick is interrupted mid-update.

// Module declarations
pub mod calibration;
pub mod conversions;
pub mod error;
pub mod integrator;
pub mod mocks;
pub mod monitor;
pub mod normalize;
pub mod runner;
pub mod stationary;
pub mod util;

use crate::error::{BuildError, Result, SpeedError};
pub use calibration::{CalibrationBias, calibrate};
use integrator::VelocityIntegrator;
use monitor::ThresholdMonitor;
use normalize::DeadZone;
use speedwatch_traits::Accelerometer;
use speedwatch_traits::clock::{Clock, MonotonicClock};
use stationary::StationaryDetector;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Unit scaling from raw accelerometer output (g) to m/s^2.
pub const MPS2_PER_G: f32 = 9.8;

/// Which per-tick acceleration value feeds the integrator.
///
/// The estimate deliberately integrates one chosen axis; the Euclidean
/// magnitude of all three axes is a distinct opt-in mode because it changes
/// observable behavior (a norm is never negative, so braking no longer
/// reduces the estimate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegrationInput {
    #[default]
    X,
    Y,
    Z,
    Magnitude,
}

impl IntegrationInput {
    #[inline]
    fn select(self, axes: [f32; 3]) -> f32 {
        match self {
            Self::X => axes[0],
            Self::Y => axes[1],
            Self::Z => axes[2],
            Self::Magnitude => {
                (axes[0] * axes[0] + axes[1] * axes[1] + axes[2] * axes[2]).sqrt()
            }
        }
    }
}

/// Pipeline thresholds. Defaults preserve the deployed device's behavior.
#[derive(Debug, Clone)]
pub struct PipelineCfg {
    /// Per-axis noise band snapped to zero (strict inequality), m/s^2
    pub dead_zone_mps2: f32,
    /// |accel| below this counts toward a stationary run, m/s^2
    pub stationary_band_mps2: f32,
    /// Consecutive in-band ticks before velocity resets
    pub stationary_run_ticks: u32,
    /// |velocity| at or above this raises the notification flag, m/s
    pub notify_threshold_mps: f32,
    /// Acceleration input for integration
    pub input: IntegrationInput,
}

impl Default for PipelineCfg {
    fn default() -> Self {
        Self {
            dead_zone_mps2: 0.3,
            stationary_band_mps2: 1.0,
            stationary_run_ticks: 100,
            notify_threshold_mps: 2.0,
            input: IntegrationInput::X,
        }
    }
}

/// Outcome of a single tick of the pipeline.
#[derive(Debug, Clone, Copy)]
pub enum TickStatus {
    /// Pipeline advanced with a fresh sample.
    Advanced { velocity_mps: f32, at_rest: bool },
    /// Sensor read failed; previous state retained. The next successful
    /// tick integrates across the gap, which a single missed sample
    /// already tolerates.
    Skipped,
}

/// The per-tick estimation pipeline: bias correction, unit scaling, dead
/// zone, stationary detection, integration, threshold monitoring.
pub struct SpeedEstimator {
    sensor: Box<dyn Accelerometer>,
    bias: CalibrationBias,
    input: IntegrationInput,
    dead_zone: DeadZone,
    detector: StationaryDetector,
    integrator: VelocityIntegrator,
    monitor: ThresholdMonitor,
    read_timeout: Duration,
    // Unified clock for deterministic time in tests
    pub(crate) clock: Arc<dyn Clock + Send + Sync>,
    // Latest normalized axes and selected accel, for status logging
    last_axes_mps2: [f32; 3],
    last_accel_mps2: f32,
}

impl core::fmt::Debug for SpeedEstimator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpeedEstimator")
            .field("velocity_mps", &self.integrator.velocity())
            .field("input", &self.input)
            .field("last_accel_mps2", &self.last_accel_mps2)
            .finish()
    }
}

impl SpeedEstimator {
    /// Start building an estimator.
    pub fn builder() -> EstimatorBuilder<Missing, Missing> {
        EstimatorBuilder::default()
    }

    /// One tick: read the sensor and run the pipeline. A failed read skips
    /// the tick and retains all state.
    pub fn step(&mut self) -> TickStatus {
        match self.sensor.read_axes(self.read_timeout) {
            Ok(raw) => {
                let now = self.clock.now();
                self.step_from_axes(raw, now)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sensor read failed; tick skipped");
                TickStatus::Skipped
            }
        }
    }

    /// Run the pipeline on an externally sampled raw triple.
    pub fn step_from_axes(&mut self, raw: [f32; 3], now: Instant) -> TickStatus {
        let corrected = self.bias.correct(raw);
        let scaled = [
            corrected[0] * MPS2_PER_G,
            corrected[1] * MPS2_PER_G,
            corrected[2] * MPS2_PER_G,
        ];
        let axes = self.dead_zone.apply_axes(scaled);
        let accel = self.input.select(axes);

        let at_rest = self.detector.observe(accel);
        let velocity_mps = self.integrator.tick(accel, now, at_rest);
        self.monitor.observe(velocity_mps);

        self.last_axes_mps2 = axes;
        self.last_accel_mps2 = accel;
        if at_rest {
            tracing::debug!("stationary run complete; velocity reset");
        }
        TickStatus::Advanced {
            velocity_mps,
            at_rest,
        }
    }

    /// Latest velocity estimate in m/s.
    pub fn velocity(&self) -> f32 {
        self.integrator.velocity()
    }

    /// Read-and-clear accessor for the threshold notification flag.
    pub fn take_notification(&mut self) -> bool {
        self.monitor.take()
    }

    /// Latest normalized axes in m/s^2 (for status logging).
    pub fn last_axes_mps2(&self) -> [f32; 3] {
        self.last_axes_mps2
    }

    /// Latest acceleration fed to the integrator, m/s^2.
    pub fn last_accel_mps2(&self) -> f32 {
        self.last_accel_mps2
    }

    pub fn bias(&self) -> CalibrationBias {
        self.bias
    }

    /// Seed the velocity estimate (test support).
    #[doc(hidden)]
    pub fn seed_velocity(&mut self, velocity_mps: f32) {
        self.integrator.set_velocity(velocity_mps);
    }
}

// Map any sensor error to the typed domain error.
pub(crate) fn map_sensor_error(e: &(dyn std::error::Error + 'static)) -> SpeedError {
    SpeedError::SensorUnavailable(e.to_string())
}

// Type-state markers for the builder
pub struct Missing;
pub struct Set;

/// Builder for `SpeedEstimator`. The sensor and the calibration bias are
/// mandatory and tracked in the type; everything else defaults.
pub struct EstimatorBuilder<S, B> {
    sensor: Option<Box<dyn Accelerometer>>,
    bias: Option<CalibrationBias>,
    pipeline: Option<PipelineCfg>,
    read_timeout_ms: Option<u64>,
    // Optional clock for tests (accept Box here)
    clock: Option<Box<dyn Clock + Send + Sync>>,
    _s: PhantomData<S>,
    _b: PhantomData<B>,
}

impl Default for EstimatorBuilder<Missing, Missing> {
    fn default() -> Self {
        Self {
            sensor: None,
            bias: None,
            pipeline: None,
            read_timeout_ms: None,
            clock: None,
            _s: PhantomData,
            _b: PhantomData,
        }
    }
}

impl<S, B> EstimatorBuilder<S, B> {
    pub fn with_pipeline(mut self, pipeline: PipelineCfg) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn with_read_timeout_ms(mut self, ms: u64) -> Self {
        self.read_timeout_ms = Some(ms);
        self
    }

    /// Provide a custom clock implementation; defaults to MonotonicClock.
    pub fn with_clock(mut self, clock: Box<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Fallible build available in any type-state; returns a detailed
    /// BuildError for missing pieces.
    pub fn try_build(self) -> Result<SpeedEstimator> {
        let EstimatorBuilder {
            sensor,
            bias,
            pipeline,
            read_timeout_ms,
            clock,
            _s: _,
            _b: _,
        } = self;

        let sensor = sensor.ok_or_else(|| eyre::Report::new(BuildError::MissingSensor))?;
        let bias = bias.ok_or_else(|| eyre::Report::new(BuildError::MissingBias))?;
        let pipeline = pipeline.unwrap_or_default();
        let read_timeout_ms = read_timeout_ms.unwrap_or(50);
        let clock: Arc<dyn Clock + Send + Sync> = match clock {
            Some(b) => Arc::from(b),
            None => Arc::new(MonotonicClock::new()),
        };

        if !pipeline.dead_zone_mps2.is_finite() || pipeline.dead_zone_mps2 < 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "dead_zone_mps2 must be finite and >= 0",
            )));
        }
        if !pipeline.stationary_band_mps2.is_finite() || pipeline.stationary_band_mps2 < 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "stationary_band_mps2 must be finite and >= 0",
            )));
        }
        if pipeline.stationary_run_ticks == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "stationary_run_ticks must be >= 1",
            )));
        }
        if !pipeline.notify_threshold_mps.is_finite() || pipeline.notify_threshold_mps < 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "notify_threshold_mps must be finite and >= 0",
            )));
        }
        if read_timeout_ms == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "read_timeout_ms must be >= 1",
            )));
        }

        let epoch = clock.now();
        Ok(SpeedEstimator {
            sensor,
            bias,
            input: pipeline.input,
            dead_zone: DeadZone::new(pipeline.dead_zone_mps2),
            detector: StationaryDetector::new(
                pipeline.stationary_band_mps2,
                pipeline.stationary_run_ticks,
            ),
            integrator: VelocityIntegrator::new(epoch),
            monitor: ThresholdMonitor::new(pipeline.notify_threshold_mps),
            read_timeout: Duration::from_millis(read_timeout_ms),
            clock,
            last_axes_mps2: [0.0; 3],
            last_accel_mps2: 0.0,
        })
    }
}

// Setters that advance type-state when providing mandatory components
impl<B> EstimatorBuilder<Missing, B> {
    pub fn with_sensor(self, sensor: impl Accelerometer + 'static) -> EstimatorBuilder<Set, B> {
        let EstimatorBuilder {
            sensor: _,
            bias,
            pipeline,
            read_timeout_ms,
            clock,
            _s: _,
            _b: _,
        } = self;
        EstimatorBuilder {
            sensor: Some(Box::new(sensor)),
            bias,
            pipeline,
            read_timeout_ms,
            clock,
            _s: PhantomData,
            _b: PhantomData,
        }
    }
}

impl<S> EstimatorBuilder<S, Missing> {
    pub fn with_bias(self, bias: CalibrationBias) -> EstimatorBuilder<S, Set> {
        let EstimatorBuilder {
            sensor,
            bias: _,
            pipeline,
            read_timeout_ms,
            clock,
            _s: _,
            _b: _,
        } = self;
        EstimatorBuilder {
            sensor,
            bias: Some(bias),
            pipeline,
            read_timeout_ms,
            clock,
            _s: PhantomData,
            _b: PhantomData,
        }
    }
}

impl EstimatorBuilder<Set, Set> {
    /// Validate and build. Only available once sensor and bias are set.
    pub fn build(self) -> Result<SpeedEstimator> {
        self.try_build()
    }
}
