//! LSM6DSO accelerometer over I2C (Linux, rppal).

use std::time::{Duration, Instant};
use tracing::trace;

use crate::error::HwError;

const I2C_ADDR: u16 = 0x6B;
const REG_WHO_AM_I: u8 = 0x0F;
const WHO_AM_I_VALUE: u8 = 0x6C;
const REG_CTRL1_XL: u8 = 0x10;
const REG_STATUS: u8 = 0x1E;
const REG_OUTX_L_A: u8 = 0x28;
// XLDA: new accelerometer data available
const STATUS_XLDA: u8 = 0x01;
// ODR 104 Hz, full scale +/-2 g
const CTRL1_XL_104HZ_2G: u8 = 0x40;
// g per LSB at +/-2 g full scale
const SENS_2G: f32 = 0.000_061;

pub struct Lsm6dso {
    i2c: rppal::i2c::I2c,
}

impl Lsm6dso {
    pub fn new() -> Result<Self, HwError> {
        let mut i2c = rppal::i2c::I2c::new().map_err(|e| HwError::Bus(e.to_string()))?;
        i2c.set_slave_address(I2C_ADDR)
            .map_err(|e| HwError::Bus(e.to_string()))?;

        let id = i2c
            .smbus_read_byte(REG_WHO_AM_I)
            .map_err(|e| HwError::Bus(e.to_string()))?;
        if id != WHO_AM_I_VALUE {
            return Err(HwError::BadChipId(id));
        }
        i2c.smbus_write_byte(REG_CTRL1_XL, CTRL1_XL_104HZ_2G)
            .map_err(|e| HwError::Bus(e.to_string()))?;
        Ok(Self { i2c })
    }

    pub fn read_with_timeout(&mut self, timeout: Duration) -> Result<[f32; 3], HwError> {
        let deadline = Instant::now() + timeout;

        // Wait for fresh accelerometer data
        loop {
            let status = self
                .i2c
                .smbus_read_byte(REG_STATUS)
                .map_err(|e| HwError::Bus(e.to_string()))?;
            if status & STATUS_XLDA != 0 {
                break;
            }
            if Instant::now() >= deadline {
                return Err(HwError::Timeout);
            }
            std::thread::sleep(Duration::from_micros(200));
        }

        // OUTX_L..OUTZ_H, little-endian i16 per axis
        let mut buf = [0u8; 6];
        self.i2c
            .block_read(REG_OUTX_L_A, &mut buf)
            .map_err(|e| HwError::Bus(e.to_string()))?;
        let x = i16::from_le_bytes([buf[0], buf[1]]);
        let y = i16::from_le_bytes([buf[2], buf[3]]);
        let z = i16::from_le_bytes([buf[4], buf[5]]);
        trace!(x, y, z, "lsm6dso raw read");
        Ok([
            f32::from(x) * SENS_2G,
            f32::from(y) * SENS_2G,
            f32::from(z) * SENS_2G,
        ])
    }
}

impl speedwatch_traits::Accelerometer for Lsm6dso {
    fn read_axes(
        &mut self,
        timeout: Duration,
    ) -> Result<[f32; 3], Box<dyn std::error::Error + Send + Sync>> {
        self.read_with_timeout(timeout).map_err(Into::into)
    }
}
