use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("timeout waiting for sensor data")]
    Timeout,
    #[error("unexpected accelerometer chip id: {0:#04x}")]
    BadChipId(u8),
    #[error("bus error: {0}")]
    Bus(String),
    #[error("collector unreachable: {0}")]
    Unreachable(String),
}
