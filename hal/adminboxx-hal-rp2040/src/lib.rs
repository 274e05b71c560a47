//! RP2040-specific HAL for the AdminBoxx firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `adminboxx-hal` traits:
//!
//! - Blocking I2C master (implements `adminboxx_hal::I2cBus`)
//! - USB CDC-ACM host link (implements `adminboxx_hal::HostLink`)

#![no_std]

pub mod i2c;
pub mod usb;

pub use i2c::BlockingI2c;
pub use usb::{UsbIdentity, UsbResources, UsbSerial, UsbStateHandler};
