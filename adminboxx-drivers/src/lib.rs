//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in adminboxx-core:
//!
//! - Adafruit seesaw register access over I2C
//! - NeoTrellis 4x4 boards tiled into the 8x4 grid surface

#![no_std]
#![deny(unsafe_code)]

pub mod neotrellis;

pub use neotrellis::{MultiTrellis, TrellisError};
