//! Two NeoTrellis boards tiled into the 8x4 grid
//!
//! Board at `0x2E` holds columns 0-3, board at `0x2F` columns 4-7. Pixel
//! writes are buffered per board and pushed on [`flush`](GridSurface::flush),
//! followed by one SHOW per board that changed.

use adminboxx_core::{Edge, EdgeHandler, GridSurface};
use adminboxx_hal::I2cBus;
use adminboxx_protocol::{Color, Coordinate, GRID_COLUMNS};
use embedded_hal::delay::DelayNs;

use super::seesaw::{KeyEdge, KeyEvent, Seesaw, SeesawError};
use super::{key_to_raw, raw_to_key, BOARD_SIZE, KEYS_PER_BOARD, NEOPIXEL_PIN};

/// Board addresses, left to right
pub const BOARD_ADDRESSES: [u8; BOARD_COUNT] = [0x2E, 0x2F];

const BOARD_COUNT: usize = (GRID_COLUMNS / BOARD_SIZE) as usize;

/// NeoPixel byte order on the NeoTrellis is GRB
const BYTES_PER_PIXEL: usize = 3;

/// Pixels per buffer write; keeps the transfer under the seesaw limit
const MAX_RUN_PIXELS: usize = 8;

/// FIFO entries read per poll and board
const MAX_EVENTS: usize = 16;

/// Failure on one board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrellisError {
    pub address: u8,
    pub error: SeesawError,
}

/// Per-board pixel shadow
struct Board {
    address: u8,
    pixels: [Color; KEYS_PER_BOARD as usize],
    /// Bit per pixel not yet written to the seesaw
    dirty: u16,
}

impl Board {
    fn new(address: u8) -> Self {
        Self {
            address,
            pixels: [Color::OFF; KEYS_PER_BOARD as usize],
            dirty: 0,
        }
    }

    fn is_dirty(&self, key: usize) -> bool {
        self.dirty & (1 << key) != 0
    }

    /// Write the dirty pixels, then latch them with one SHOW
    fn flush<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<(), TrellisError>
    where
        B: I2cBus,
        D: DelayNs,
    {
        let address = self.address;
        let on_board = |error| TrellisError { address, error };
        let mut seesaw = Seesaw::new(bus, delay, address);

        let mut key = 0;
        while key < KEYS_PER_BOARD as usize {
            if !self.is_dirty(key) {
                key += 1;
                continue;
            }

            // Coalesce consecutive dirty pixels into one buffer write
            let start = key;
            let mut data = [0u8; MAX_RUN_PIXELS * BYTES_PER_PIXEL];
            let mut len = 0;
            while key < KEYS_PER_BOARD as usize && self.is_dirty(key) && len < data.len() {
                let [r, g, b] = self.pixels[key].to_array();
                data[len..len + BYTES_PER_PIXEL].copy_from_slice(&[g, r, b]);
                len += BYTES_PER_PIXEL;
                key += 1;
            }

            seesaw
                .neopixel_write((start * BYTES_PER_PIXEL) as u16, &data[..len])
                .map_err(on_board)?;
        }

        seesaw.neopixel_show().map_err(on_board)?;
        self.dirty = 0;
        Ok(())
    }

    /// Drain the keypad FIFO, passing board-local keys to `on_key`
    fn poll<B, D, F>(
        &self,
        bus: &mut B,
        delay: &mut D,
        on_key: &mut F,
    ) -> Result<(), TrellisError>
    where
        B: I2cBus,
        D: DelayNs,
        F: FnMut(u8, Edge),
    {
        let address = self.address;
        let on_board = |error| TrellisError { address, error };
        let mut seesaw = Seesaw::new(bus, delay, address);

        let count = usize::from(seesaw.keypad_event_count().map_err(on_board)?);
        if count == 0 {
            return Ok(());
        }

        let mut fifo = [0u8; MAX_EVENTS];
        let fifo = &mut fifo[..count.min(MAX_EVENTS)];
        seesaw.keypad_read_fifo(fifo).map_err(on_board)?;

        for &byte in fifo.iter() {
            let event = KeyEvent::from_byte(byte);
            let edge = match event.edge {
                KeyEdge::Rising => Edge::Rising,
                KeyEdge::Falling => Edge::Falling,
                KeyEdge::High | KeyEdge::Low => continue,
            };
            if let Some(key) = raw_to_key(event.raw_key) {
                on_key(key, edge);
            }
        }

        Ok(())
    }
}

/// 8x4 grid made of two NeoTrellis boards on one I2C bus
pub struct MultiTrellis<B, D> {
    bus: B,
    delay: D,
    boards: [Board; BOARD_COUNT],
}

impl<B, D> MultiTrellis<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    /// Create a grid with the default board addresses
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_addresses(bus, delay, BOARD_ADDRESSES)
    }

    pub fn with_addresses(bus: B, delay: D, addresses: [u8; BOARD_COUNT]) -> Self {
        Self {
            bus,
            delay,
            boards: addresses.map(Board::new),
        }
    }

    /// Reset and probe both boards, then configure their NeoPixel outputs
    ///
    /// All pixels are marked dirty so the next flush writes the whole grid.
    pub fn begin(&mut self) -> Result<(), TrellisError> {
        let Self { bus, delay, boards } = self;

        for board in boards.iter_mut() {
            let address = board.address;
            let on_board = |error| TrellisError { address, error };
            let mut seesaw = Seesaw::new(&mut *bus, &mut *delay, address);

            seesaw.software_reset().map_err(on_board)?;
            seesaw.probe().map_err(on_board)?;
            seesaw
                .neopixel_begin(
                    NEOPIXEL_PIN,
                    (KEYS_PER_BOARD as usize * BYTES_PER_PIXEL) as u16,
                )
                .map_err(on_board)?;

            board.dirty = u16::MAX;
        }

        Ok(())
    }

    /// Board index and board-local key of a grid cell
    fn locate(coordinate: Coordinate) -> (usize, usize) {
        let board = coordinate.column() / BOARD_SIZE;
        let key = coordinate.row() * BOARD_SIZE + coordinate.column() % BOARD_SIZE;
        (board as usize, key as usize)
    }

    /// Grid cell of a board-local key
    fn coordinate_of(board: usize, key: u8) -> Option<Coordinate> {
        let column = board as u8 * BOARD_SIZE + key % BOARD_SIZE;
        Coordinate::new(key / BOARD_SIZE, column).ok()
    }

    /// Color last set for a cell
    pub fn pixel(&self, coordinate: Coordinate) -> Color {
        let (board, key) = Self::locate(coordinate);
        self.boards[board].pixels[key]
    }

    /// Check if any pixel is waiting for a flush
    pub fn is_dirty(&self) -> bool {
        self.boards.iter().any(|b| b.dirty != 0)
    }

    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B, D> GridSurface for MultiTrellis<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    type Error = TrellisError;

    fn set_pixel(&mut self, coordinate: Coordinate, color: Color) -> Result<(), TrellisError> {
        let (board, key) = Self::locate(coordinate);
        let board = &mut self.boards[board];
        if board.pixels[key] != color {
            board.pixels[key] = color;
            board.dirty |= 1 << key;
        }
        Ok(())
    }

    fn activate_key(
        &mut self,
        coordinate: Coordinate,
        edge: Edge,
        enabled: bool,
    ) -> Result<(), TrellisError> {
        let (board, key) = Self::locate(coordinate);
        let address = self.boards[board].address;
        let edge = match edge {
            Edge::Rising => KeyEdge::Rising,
            Edge::Falling => KeyEdge::Falling,
        };

        Seesaw::new(&mut self.bus, &mut self.delay, address)
            .keypad_set_event(key_to_raw(key as u8), edge, enabled)
            .map_err(|error| TrellisError { address, error })
    }

    /// Flush every dirty board
    ///
    /// A failing board does not hold back the others. The first error is
    /// returned and the failed board stays dirty.
    fn flush(&mut self) -> Result<(), TrellisError> {
        let Self { bus, delay, boards } = self;

        let mut result = Ok(());
        for board in boards.iter_mut().filter(|b| b.dirty != 0) {
            result = result.and(board.flush(&mut *bus, &mut *delay));
        }
        result
    }

    /// Deliver edges from every board
    ///
    /// Edges from healthy boards are delivered even if another board fails.
    fn poll_edges<H: EdgeHandler>(&mut self, handler: &mut H) -> Result<(), TrellisError> {
        let Self { bus, delay, boards } = self;

        let mut result = Ok(());
        for (index, board) in boards.iter().enumerate() {
            let mut on_key = |key: u8, edge: Edge| {
                if let Some(coordinate) = Self::coordinate_of(index, key) {
                    handler.on_edge(coordinate, edge);
                }
            };
            result = result.and(board.poll(&mut *bus, &mut *delay, &mut on_key));
        }
        result
    }
}
