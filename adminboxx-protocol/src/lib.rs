//! AdminBoxx Host Link Protocol
//!
//! This crate defines the byte-stream protocol between the host
//! application and the AdminBoxx grid controller.
//!
//! # Protocol Overview
//!
//! Host → device commands are short binary frames closed by a reserved
//! terminator byte:
//! ```text
//! ┌────────┬─────────────────────┬──────┐
//! │ OPCODE │ PAYLOAD             │ 0xFF │
//! │ 1B     │ 0 or 4B             │ 1B   │
//! └────────┴─────────────────────┴──────┘
//!
//! Ping      80 FF
//! SetColor  81 LL RR GG BB FF     LL = led 0-31, RR/GG/BB = 0-127
//! ```
//!
//! Payload values are 7-bit so that 0xFF can never appear inside a frame.
//!
//! Device → host reports are text lines, one per button press:
//! `:{row},{column}\n`.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod report;
pub mod types;

pub use command::{EncodeError, HostCommand, CMD_PING, CMD_SET_COLOR, MAX_COMMAND_LEN};
pub use frame::{Frame, FrameDecoder, FramingError, MAX_BUFFER_LEN, TERMINATOR};
pub use report::{ButtonReport, MAX_REPORT_LEN};
pub use types::{Color, Coordinate, RangeError, GRID_COLUMNS, GRID_ROWS, LED_COUNT, MAX_CHANNEL};
