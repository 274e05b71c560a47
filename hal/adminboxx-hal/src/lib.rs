//! AdminBoxx Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that the link
//! controller and the grid driver are written against. Chip-specific
//! crates implement them, so the protocol and liveness logic can be
//! tested on the host with in-memory fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  adminboxx-core / adminboxx-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  adminboxx-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!         ┌───────────────────────┐
//!         │  adminboxx-hal-rp2040 │
//!         └───────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialRx`], [`serial::SerialTx`], [`serial::LinkSense`] - Host byte stream
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use i2c::{I2cBus, I2cConfig, I2cError};
pub use serial::{HostLink, LinkSense, SerialError, SerialRx, SerialTx};
