//! Blocking I2C master
//!
//! The control loop is cooperative and the seesaw transfers are a few
//! bytes each, so a blocking driver keeps the grid surface synchronous.

use adminboxx_hal::{I2cBus, I2cConfig, I2cError};
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Adapter from any embedded-hal 1.0 I2C master to [`I2cBus`]
pub struct BlockingI2c<T> {
    inner: T,
}

impl<T: I2c> BlockingI2c<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn release(self) -> T {
        self.inner
    }
}

fn map_error<E: embedded_hal::i2c::Error>(e: E) -> I2cError {
    match e.kind() {
        ErrorKind::NoAcknowledge(_) => I2cError::NoAcknowledge,
        ErrorKind::Bus | ErrorKind::ArbitrationLoss => I2cError::Bus,
        _ => I2cError::Other,
    }
}

impl<T: I2c> I2cBus for BlockingI2c<T> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
        self.inner.write(address, data).map_err(map_error)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        self.inner.read(address, buf).map_err(map_error)
    }
}

/// Convert to the embassy-rp I2C configuration
pub fn rp_config(config: I2cConfig) -> embassy_rp::i2c::Config {
    let mut rp = embassy_rp::i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}
