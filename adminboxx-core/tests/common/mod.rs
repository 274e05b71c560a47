//! In-memory collaborators for controller tests

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use adminboxx_core::{Clock, Edge, EdgeHandler, GridSurface, LinkConfig, LinkController};
use adminboxx_hal::{LinkSense, SerialError, SerialRx, SerialTx};
use adminboxx_protocol::{Color, Coordinate, GRID_COLUMNS, GRID_ROWS};

/// Grid bus failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// Grid that records every write
#[derive(Debug, Default)]
pub struct MockGrid {
    pub pixels: [[Color; GRID_COLUMNS as usize]; GRID_ROWS as usize],
    pub fills: Vec<Color>,
    pub pixel_writes: Vec<(Coordinate, Color)>,
    pub activated: Vec<(Coordinate, Edge)>,
    pub pending_edges: VecDeque<(Coordinate, Edge)>,
    pub flushes: usize,
    pub fail_fill: bool,
    pub fail_flush: bool,
}

impl MockGrid {
    pub fn pixel(&self, row: u8, column: u8) -> Color {
        self.pixels[row as usize][column as usize]
    }

    pub fn press(&mut self, row: u8, column: u8) {
        let coordinate = Coordinate::new(row, column).unwrap();
        self.pending_edges.push_back((coordinate, Edge::Rising));
    }

    pub fn release(&mut self, row: u8, column: u8) {
        let coordinate = Coordinate::new(row, column).unwrap();
        self.pending_edges.push_back((coordinate, Edge::Falling));
    }
}

impl GridSurface for MockGrid {
    type Error = BusFault;

    fn set_pixel(&mut self, coordinate: Coordinate, color: Color) -> Result<(), BusFault> {
        self.pixels[coordinate.row() as usize][coordinate.column() as usize] = color;
        self.pixel_writes.push((coordinate, color));
        Ok(())
    }

    fn fill(&mut self, color: Color) -> Result<(), BusFault> {
        if self.fail_fill {
            return Err(BusFault);
        }
        for row in self.pixels.iter_mut() {
            row.fill(color);
        }
        self.fills.push(color);
        Ok(())
    }

    fn activate_key(
        &mut self,
        coordinate: Coordinate,
        edge: Edge,
        enabled: bool,
    ) -> Result<(), BusFault> {
        if enabled {
            self.activated.push((coordinate, edge));
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), BusFault> {
        if self.fail_flush {
            return Err(BusFault);
        }
        self.flushes += 1;
        Ok(())
    }

    fn poll_edges<H: EdgeHandler>(&mut self, handler: &mut H) -> Result<(), BusFault> {
        while let Some((coordinate, edge)) = self.pending_edges.pop_front() {
            handler.on_edge(coordinate, edge);
        }
        Ok(())
    }
}

/// Host link backed by byte queues
#[derive(Debug)]
pub struct MockLink {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub attached: bool,
    pub tx_full: bool,
}

impl MockLink {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
            attached: true,
            tx_full: false,
        }
    }

    pub fn send(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    pub fn take_tx(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.tx)).unwrap()
    }
}

impl SerialRx for MockLink {
    fn bytes_available(&self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

impl SerialTx for MockLink {
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), SerialError> {
        if !self.attached {
            return Err(SerialError::Disconnected);
        }
        if self.tx_full {
            return Err(SerialError::WouldBlock);
        }
        self.tx.extend_from_slice(data);
        Ok(())
    }
}

impl LinkSense for MockLink {
    fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Manually advanced clock shared between test and controller
#[derive(Debug, Clone, Default)]
pub struct MockClock(Rc<Cell<u32>>);

impl MockClock {
    pub fn set(&self, now_ms: u32) {
        self.0.set(now_ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

pub type Controller = LinkController<MockGrid, MockLink, MockClock>;

/// Controller after init and the first tick
pub fn booted(config: LinkConfig) -> (Controller, MockClock) {
    let clock = MockClock::default();
    let mut controller =
        LinkController::new(MockGrid::default(), MockLink::new(), clock.clone(), config);
    controller.init().unwrap();
    controller.poll().unwrap();
    (controller, clock)
}

/// Advance past the heartbeat window and tick
pub fn let_peer_die(controller: &mut Controller, clock: &MockClock) {
    clock.advance(controller.config().heartbeat_timeout_ms);
    controller.poll().unwrap();
    assert!(!controller.supervisor().peer_alive());
}
