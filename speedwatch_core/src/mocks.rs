//! Test and helper mocks for speedwatch_core

use speedwatch_traits::{Accelerometer, Reporter};

/// An accelerometer that always errors on read; useful when driving the
/// pipeline with externally sampled triples via `step_from_axes`.
pub struct NoopAccelerometer;

impl Accelerometer for NoopAccelerometer {
    fn read_axes(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<[f32; 3], Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("noop accelerometer")))
    }
}

/// An accelerometer that returns the same raw triple forever.
pub struct ConstantAccelerometer(pub [f32; 3]);

impl Accelerometer for ConstantAccelerometer {
    fn read_axes(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<[f32; 3], Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0)
    }
}

/// A reporter that records every report it receives.
#[derive(Default)]
pub struct RecordingReporter {
    pub sent: Vec<(f32, u32)>,
}

impl Reporter for RecordingReporter {
    fn report(
        &mut self,
        velocity_mps: f32,
        vehicle_id: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.sent.push((velocity_mps, vehicle_id));
        Ok(())
    }
}

/// A reporter whose transport is permanently down.
pub struct FailingReporter;

impl Reporter for FailingReporter {
    fn report(
        &mut self,
        _velocity_mps: f32,
        _vehicle_id: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("collector unreachable")))
    }
}
