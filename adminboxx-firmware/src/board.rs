//! Board constants for the Adafruit QT Py RP2040
//!
//! The two NeoTrellis boards hang off the STEMMA QT connector
//! (I2C1: SDA = GPIO22, SCL = GPIO23).

use adminboxx_core::{Clock, LinkConfig};
use adminboxx_hal::I2cConfig;
use adminboxx_hal_rp2040::UsbIdentity;
use embassy_time::Instant;

/// Trellis seesaw addresses, left half first
pub const TRELLIS_ADDRESSES: [u8; 2] = [0x2E, 0x2F];

pub const I2C_CONFIG: I2cConfig = I2cConfig::FAST;

/// Control loop sleep between iterations
pub const LOOP_INTERVAL_MS: u64 = 10;

/// Retry interval while the trellis boards do not answer
pub const TRELLIS_RETRY_MS: u64 = 1_000;

/// The host application finds the grid by this VID/PID pair
pub const USB_IDENTITY: UsbIdentity = UsbIdentity {
    vid: 0x239A,
    pid: 0x80F2,
    manufacturer: "Adafruit",
    product: "AdminBoxx",
    serial_number: "ADMINBOXX-0001",
};

pub const LINK_CONFIG: LinkConfig =
    LinkConfig::DEFAULT.with_display_toggle(cfg!(feature = "display-toggle"));

/// Milliseconds since boot from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Wraps after ~49 days; consumers only compare differences
        Instant::now().as_millis() as u32
    }
}
