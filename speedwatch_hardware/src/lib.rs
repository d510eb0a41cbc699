pub mod error;
pub mod reporter;

#[cfg(feature = "hardware")]
pub mod lsm6dso;

use speedwatch_traits::Accelerometer;

/// Simulated accelerometer: a device lying flat (1 g on Z) with a small
/// constant tilt offset and deterministic alternating jitter, optionally
/// followed by a scripted motion profile on the X axis.
pub struct SimulatedAccelerometer {
    reads: u64,
    jitter_g: f32,
    motion_x_g: Vec<f32>,
    motion_idx: usize,
}

impl SimulatedAccelerometer {
    pub fn new() -> Self {
        SimulatedAccelerometer {
            reads: 0,
            jitter_g: 0.005,
            motion_x_g: Vec::new(),
            motion_idx: 0,
        }
    }

    /// Queue per-read X-axis offsets (raw g) consumed after calibration
    /// settles; once exhausted the device is at rest again.
    pub fn with_motion(mut self, motion_x_g: Vec<f32>) -> Self {
        self.motion_x_g = motion_x_g;
        self
    }
}

impl Default for SimulatedAccelerometer {
    fn default() -> Self {
        Self::new()
    }
}

impl Accelerometer for SimulatedAccelerometer {
    fn read_axes(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<[f32; 3], Box<dyn std::error::Error + Send + Sync>> {
        let jitter = if self.reads % 2 == 0 {
            self.jitter_g
        } else {
            -self.jitter_g
        };
        self.reads += 1;
        let motion = if self.motion_idx < self.motion_x_g.len() {
            let m = self.motion_x_g[self.motion_idx];
            self.motion_idx += 1;
            m
        } else {
            0.0
        };
        Ok([0.012 + motion + jitter, -0.004 + jitter, 1.0 + jitter])
    }
}
