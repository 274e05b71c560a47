//! Adafruit NeoTrellis button/LED boards
//!
//! Each board is a seesaw microcontroller on I2C driving 16 NeoPixels and
//! a 4x4 key matrix with on-chip debouncing and an event FIFO. Two boards
//! side by side form the 8x4 grid.

pub mod multitrellis;
pub mod seesaw;

pub use multitrellis::{MultiTrellis, TrellisError, BOARD_ADDRESSES};
pub use seesaw::{KeyEdge, KeyEvent, Seesaw, SeesawError};

/// Keys (and pixels) per board side
pub const BOARD_SIZE: u8 = 4;

/// Keys (and pixels) per board
pub const KEYS_PER_BOARD: u8 = BOARD_SIZE * BOARD_SIZE;

/// Default seesaw address of a NeoTrellis with no address jumpers cut
pub const DEFAULT_ADDRESS: u8 = 0x2E;

/// NeoPixel data pin on the NeoTrellis seesaw
pub const NEOPIXEL_PIN: u8 = 3;

/// Map a board-local key number (row-major 0..16) to the seesaw keypad number
///
/// The seesaw keypad scans an 8-wide matrix of which the NeoTrellis
/// uses the left 4 columns.
pub const fn key_to_raw(key: u8) -> u8 {
    (key / 4) * 8 + key % 4
}

/// Inverse of [`key_to_raw`]
///
/// Raw numbers in the matrix columns the NeoTrellis leaves unwired have
/// no key.
pub const fn raw_to_key(raw: u8) -> Option<u8> {
    if raw % 8 >= BOARD_SIZE {
        return None;
    }
    let key = (raw / 8) * BOARD_SIZE + raw % 8;
    if key < KEYS_PER_BOARD {
        Some(key)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_to_raw(0), 0);
        assert_eq!(key_to_raw(3), 3);
        assert_eq!(key_to_raw(4), 8);
        assert_eq!(key_to_raw(15), 27);
    }

    #[test]
    fn test_key_mapping_inverse() {
        for key in 0..KEYS_PER_BOARD {
            assert_eq!(raw_to_key(key_to_raw(key)), Some(key));
        }
    }

    #[test]
    fn test_unwired_raw_keys_rejected() {
        assert_eq!(raw_to_key(4), None);
        assert_eq!(raw_to_key(7), None);
        assert_eq!(raw_to_key(12), None);
        assert_eq!(raw_to_key(32), None);
        assert_eq!(raw_to_key(8), Some(4));
    }
}
