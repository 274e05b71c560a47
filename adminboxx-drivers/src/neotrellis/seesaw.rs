//! Adafruit seesaw register access
//!
//! # I2C Protocol
//!
//! Every register is addressed by a module base and a function byte:
//! - Write: `[base, function, data...]` in one transaction
//! - Read: `[base, function]`, a processing delay, then a plain read
//!
//! The seesaw firmware needs the delay to stage the reply; reading too
//! early returns stale bytes.

use adminboxx_hal::{I2cBus, I2cError};
use embedded_hal::delay::DelayNs;

/// Status module
pub mod status {
    pub const BASE: u8 = 0x00;
    /// Hardware id register
    pub const HW_ID: u8 = 0x01;
    /// Software reset register
    pub const SWRST: u8 = 0x7F;
    /// Hardware id reported by a SAMD09-based seesaw
    pub const HW_ID_CODE: u8 = 0x55;
}

/// NeoPixel module
pub mod neopixel {
    pub const BASE: u8 = 0x0E;
    pub const PIN: u8 = 0x01;
    pub const SPEED: u8 = 0x02;
    pub const BUF_LENGTH: u8 = 0x03;
    pub const BUF: u8 = 0x04;
    pub const SHOW: u8 = 0x05;
    /// 800 kHz data rate
    pub const SPEED_800KHZ: u8 = 0x01;
}

/// Keypad module
pub mod keypad {
    pub const BASE: u8 = 0x10;
    pub const EVENT: u8 = 0x01;
    pub const COUNT: u8 = 0x04;
    pub const FIFO: u8 = 0x10;
}

/// Largest I2C transfer the seesaw accepts, header included
pub const MAX_TRANSFER: usize = 32;

/// Largest payload of a register write
pub const MAX_PAYLOAD: usize = MAX_TRANSFER - 2;

/// Delay between register select and read
const READ_DELAY_US: u32 = 250;

/// Keypad FIFO reads need longer to stage
const FIFO_DELAY_US: u32 = 500;

/// Settle time after a software reset
const RESET_DELAY_MS: u32 = 500;

/// Seesaw error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeesawError {
    /// Bus transaction failed
    I2c(I2cError),
    /// Device answered with an unexpected hardware id
    UnknownHardware(u8),
    /// Write payload does not fit in one transfer
    PayloadTooLong,
}

impl From<I2cError> for SeesawError {
    fn from(e: I2cError) -> Self {
        SeesawError::I2c(e)
    }
}

/// Key event kind as encoded by the seesaw keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum KeyEdge {
    /// Key is held
    High = 0,
    /// Key is released
    Low = 1,
    /// Key was just released
    Falling = 2,
    /// Key was just pressed
    Rising = 3,
}

impl KeyEdge {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => KeyEdge::High,
            1 => KeyEdge::Low,
            2 => KeyEdge::Falling,
            _ => KeyEdge::Rising,
        }
    }
}

/// One entry of the keypad event FIFO
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Raw seesaw keypad number
    pub raw_key: u8,
    pub edge: KeyEdge,
}

impl KeyEvent {
    /// Decode a FIFO byte: key number in the upper 6 bits, edge in the lower 2
    pub fn from_byte(byte: u8) -> Self {
        Self {
            raw_key: byte >> 2,
            edge: KeyEdge::from_bits(byte),
        }
    }
}

/// Borrowed view of one seesaw device on a shared bus
pub struct Seesaw<'a, B, D> {
    bus: &'a mut B,
    delay: &'a mut D,
    address: u8,
}

impl<'a, B, D> Seesaw<'a, B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    pub fn new(bus: &'a mut B, delay: &'a mut D, address: u8) -> Self {
        Self {
            bus,
            delay,
            address,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write a register
    pub fn write(&mut self, base: u8, function: u8, data: &[u8]) -> Result<(), SeesawError> {
        if data.len() > MAX_PAYLOAD {
            return Err(SeesawError::PayloadTooLong);
        }

        let mut tx = [0u8; MAX_TRANSFER];
        tx[0] = base;
        tx[1] = function;
        tx[2..2 + data.len()].copy_from_slice(data);

        self.bus.write(self.address, &tx[..2 + data.len()])?;
        Ok(())
    }

    /// Read a register
    pub fn read(
        &mut self,
        base: u8,
        function: u8,
        buf: &mut [u8],
        delay_us: u32,
    ) -> Result<(), SeesawError> {
        self.bus.write(self.address, &[base, function])?;
        self.delay.delay_us(delay_us);
        self.bus.read(self.address, buf)?;
        Ok(())
    }

    /// Reset the seesaw and wait for it to come back
    pub fn software_reset(&mut self) -> Result<(), SeesawError> {
        self.write(status::BASE, status::SWRST, &[0xFF])?;
        self.delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    pub fn hardware_id(&mut self) -> Result<u8, SeesawError> {
        let mut buf = [0u8; 1];
        self.read(status::BASE, status::HW_ID, &mut buf, READ_DELAY_US)?;
        Ok(buf[0])
    }

    /// Check that a seesaw answers at this address
    pub fn probe(&mut self) -> Result<(), SeesawError> {
        match self.hardware_id()? {
            status::HW_ID_CODE => Ok(()),
            other => Err(SeesawError::UnknownHardware(other)),
        }
    }

    /// Configure the NeoPixel output: data pin, 800 kHz, buffer length in bytes
    pub fn neopixel_begin(&mut self, pin: u8, buffer_len: u16) -> Result<(), SeesawError> {
        self.write(neopixel::BASE, neopixel::PIN, &[pin])?;
        self.write(neopixel::BASE, neopixel::SPEED, &[neopixel::SPEED_800KHZ])?;
        self.write(neopixel::BASE, neopixel::BUF_LENGTH, &buffer_len.to_be_bytes())
    }

    /// Write raw bytes into the pixel buffer at a byte offset
    pub fn neopixel_write(&mut self, offset: u16, data: &[u8]) -> Result<(), SeesawError> {
        if data.len() > MAX_PAYLOAD - 2 {
            return Err(SeesawError::PayloadTooLong);
        }

        let mut payload = [0u8; MAX_PAYLOAD];
        payload[..2].copy_from_slice(&offset.to_be_bytes());
        payload[2..2 + data.len()].copy_from_slice(data);

        self.write(neopixel::BASE, neopixel::BUF, &payload[..2 + data.len()])
    }

    /// Latch the pixel buffer onto the LEDs
    pub fn neopixel_show(&mut self) -> Result<(), SeesawError> {
        self.write(neopixel::BASE, neopixel::SHOW, &[])
    }

    /// Enable or disable reporting of one edge kind on a raw key
    pub fn keypad_set_event(
        &mut self,
        raw_key: u8,
        edge: KeyEdge,
        enabled: bool,
    ) -> Result<(), SeesawError> {
        let mask = (1u8 << (edge as u8 + 1)) | u8::from(enabled);
        self.write(keypad::BASE, keypad::EVENT, &[raw_key, mask])
    }

    /// Number of events waiting in the FIFO
    pub fn keypad_event_count(&mut self) -> Result<u8, SeesawError> {
        let mut buf = [0u8; 1];
        self.read(keypad::BASE, keypad::COUNT, &mut buf, READ_DELAY_US)?;
        Ok(buf[0])
    }

    /// Pop `buf.len()` raw event bytes from the FIFO
    pub fn keypad_read_fifo(&mut self, buf: &mut [u8]) -> Result<(), SeesawError> {
        self.read(keypad::BASE, keypad::FIFO, buf, FIFO_DELAY_US)
    }
}
