use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SpeedError {
    /// Sensor could not be read. Fatal during calibration; during the run
    /// loop the tick is skipped and previous state is retained.
    #[error("sensor unavailable: {0}")]
    SensorUnavailable(String),
    #[error("configuration error: {0}")]
    Config(String),
    /// Report transmission failed; logged by the loop, never fatal.
    #[error("report error: {0}")]
    Report(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing accelerometer")]
    MissingSensor,
    #[error("missing calibration bias")]
    MissingBias,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
