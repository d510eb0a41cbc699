//! Threshold-crossing notification flag.

/// Latches when |velocity| reaches the threshold; cleared only by `take`.
///
/// This is a "has a crossing occurred since last check" signal, not a
/// continuous state: the reporting path polls it once per interval.
#[derive(Debug, Clone)]
pub struct ThresholdMonitor {
    threshold_mps: f32,
    raised: bool,
}

impl ThresholdMonitor {
    pub fn new(threshold_mps: f32) -> Self {
        Self {
            threshold_mps,
            raised: false,
        }
    }

    /// Observe one velocity sample. The comparison is symmetric and
    /// inclusive: both +threshold and -threshold raise the flag.
    pub fn observe(&mut self, velocity_mps: f32) {
        if velocity_mps.abs() >= self.threshold_mps {
            self.raised = true;
        }
    }

    /// Read and clear the flag.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.raised)
    }
}
