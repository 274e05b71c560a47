//! Host → device commands
//!
//! The device only ever decodes these; encoding is here for host tooling
//! and for driving the controller in tests.

use heapless::Vec;

use crate::frame::TERMINATOR;
use crate::types::{Color, Coordinate};

/// Heartbeat opcode
pub const CMD_PING: u8 = 0x80;

/// Set-pixel opcode
pub const CMD_SET_COLOR: u8 = 0x81;

/// Longest encoded command
pub const MAX_COMMAND_LEN: usize = 6;

/// Errors that can occur while encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Output buffer too small for the command
    BufferTooSmall,
}

/// A well-formed, in-range command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Keep the link alive
    Ping,
    /// Paint one cell
    SetColor { coordinate: Coordinate, color: Color },
}

impl HostCommand {
    /// Encode this command into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(EncodeError::BufferTooSmall);
        }

        match self {
            HostCommand::Ping => {
                buffer[0] = CMD_PING;
            }
            HostCommand::SetColor { coordinate, color } => {
                buffer[0] = CMD_SET_COLOR;
                buffer[1] = coordinate.led_index();
                buffer[2..5].copy_from_slice(&color.to_array());
            }
        }
        buffer[len - 1] = TERMINATOR;

        Ok(len)
    }

    /// Encode this command into a heapless Vec
    pub fn encode_to_vec(&self) -> Vec<u8, MAX_COMMAND_LEN> {
        let mut buffer = [0u8; MAX_COMMAND_LEN];
        let mut vec = Vec::new();
        // MAX_COMMAND_LEN fits every variant
        if let Ok(len) = self.encode(&mut buffer) {
            let _ = vec.extend_from_slice(&buffer[..len]);
        }
        vec
    }

    /// Encoded size, terminator included
    pub fn encoded_len(&self) -> usize {
        match self {
            HostCommand::Ping => 2,
            HostCommand::SetColor { .. } => 6,
        }
    }
}
