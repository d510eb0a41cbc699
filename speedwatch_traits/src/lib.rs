pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// Three-axis accelerometer in raw sensor units (g per axis).
pub trait Accelerometer {
    fn read_axes(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<[f32; 3], Box<dyn std::error::Error + Send + Sync>>;
}

impl<A: Accelerometer + ?Sized> Accelerometer for Box<A> {
    fn read_axes(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<[f32; 3], Box<dyn std::error::Error + Send + Sync>> {
        (**self).read_axes(timeout)
    }
}

/// Fire-and-forget speed report to a remote collector.
pub trait Reporter {
    fn report(
        &mut self,
        velocity_mps: f32,
        vehicle_id: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(
        &mut self,
        velocity_mps: f32,
        vehicle_id: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).report(velocity_mps, vehicle_id)
    }
}
