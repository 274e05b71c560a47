//! Terminator-delimited frame decoding
//!
//! Frame format:
//! - OPCODE (1 byte): command identifier
//! - PAYLOAD (0-4 bytes): 7-bit command fields
//! - TERMINATOR (1 byte): 0xFF, never valid inside a payload
//!
//! The decoder does not look at bytes until the terminator shows up. At
//! that point the whole buffer is classified by opcode and total length,
//! and the buffer is cleared no matter what the classification was.

use heapless::Vec;

use crate::command::{CMD_PING, CMD_SET_COLOR};

/// End-of-frame marker
pub const TERMINATOR: u8 = 0xFF;

/// Buffer cap; a stream that never sends a terminator is discarded here
pub const MAX_BUFFER_LEN: usize = 64;

const PING_LEN: usize = 2;
const SET_COLOR_LEN: usize = 6;

/// Why a terminated buffer was not a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramingError {
    /// Terminator with nothing before it
    Empty,
    /// First byte is not a known opcode
    UnknownCommand(u8),
    /// Known opcode, wrong total length (terminator included)
    BadLength { command: u8, length: u8 },
    /// Buffer reached [`MAX_BUFFER_LEN`] without a terminator
    Overflow,
}

/// A classified frame
///
/// Field values are raw bytes here; range checks belong to the
/// interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// Heartbeat only
    Ping,
    /// Set one pixel
    SetColor { led: u8, r: u8, g: u8, b: u8 },
    /// Anything else seen at terminator time
    Malformed(FramingError),
}

impl Frame {
    /// Classify a terminated buffer
    fn classify(buffer: &[u8]) -> Self {
        match buffer {
            [CMD_PING, TERMINATOR] => Frame::Ping,
            [CMD_SET_COLOR, led, r, g, b, TERMINATOR] => Frame::SetColor {
                led: *led,
                r: *r,
                g: *g,
                b: *b,
            },
            [] | [TERMINATOR] => Frame::Malformed(FramingError::Empty),
            [command @ (CMD_PING | CMD_SET_COLOR), ..] => {
                Frame::Malformed(FramingError::BadLength {
                    command: *command,
                    length: buffer.len() as u8,
                })
            }
            [other, ..] => Frame::Malformed(FramingError::UnknownCommand(*other)),
        }
    }

    /// Expected total length for an opcode, terminator included
    pub fn expected_len(command: u8) -> Option<usize> {
        match command {
            CMD_PING => Some(PING_LEN),
            CMD_SET_COLOR => Some(SET_COLOR_LEN),
            _ => None,
        }
    }
}

/// Accumulates inbound bytes into frames
#[derive(Debug, Clone, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8, MAX_BUFFER_LEN>,
}

impl FrameDecoder {
    /// Create a new, empty decoder
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Discard any buffered bytes
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes buffered since the last terminator
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Feed a single byte
    ///
    /// Returns `Some(frame)` once per terminator, and once per overflow of
    /// the buffer cap. Returns `None` while still buffering.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        if self.buffer.push(byte).is_err() {
            // Full: drop the buffer together with the byte that didn't fit
            self.buffer.clear();
            return Some(Frame::Malformed(FramingError::Overflow));
        }

        if byte != TERMINATOR {
            return None;
        }

        let frame = Frame::classify(&self.buffer);
        self.buffer.clear();
        Some(frame)
    }

    /// Feed a slice, yielding every frame it completes
    pub fn decode<'a>(&'a mut self, bytes: &'a [u8]) -> impl Iterator<Item = Frame> + 'a {
        bytes.iter().filter_map(move |&byte| self.feed(byte))
    }
}
