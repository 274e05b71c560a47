//! Button/LED grid surface

use adminboxx_protocol::{Color, Coordinate};

/// Button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Unpressed → pressed
    Rising,
    /// Pressed → unpressed
    Falling,
}

/// Receives button edges during [`GridSurface::sync`]
pub trait EdgeHandler {
    fn on_edge(&mut self, coordinate: Coordinate, edge: Edge);
}

impl<F: FnMut(Coordinate, Edge)> EdgeHandler for F {
    fn on_edge(&mut self, coordinate: Coordinate, edge: Edge) {
        self(coordinate, edge)
    }
}

/// Addressable 8×4 matrix of illuminated buttons
///
/// Pixel writes may be buffered until the next [`flush`](Self::flush).
/// Edge delivery is synchronous: the handler runs inside
/// [`poll_edges`](Self::poll_edges) on the caller's thread.
pub trait GridSurface {
    /// Error type for bus operations
    type Error;

    /// Set one cell's color
    fn set_pixel(&mut self, coordinate: Coordinate, color: Color) -> Result<(), Self::Error>;

    /// Set every cell to the same color
    fn fill(&mut self, color: Color) -> Result<(), Self::Error> {
        for coordinate in Coordinate::all() {
            self.set_pixel(coordinate, color)?;
        }
        Ok(())
    }

    /// Enable or disable edge reporting for a key
    fn activate_key(
        &mut self,
        coordinate: Coordinate,
        edge: Edge,
        enabled: bool,
    ) -> Result<(), Self::Error>;

    /// Push buffered pixel writes to the hardware
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Read pending key events and hand each one to `handler`
    fn poll_edges<H: EdgeHandler>(&mut self, handler: &mut H) -> Result<(), Self::Error>;

    /// Flush pixels, then deliver pending edges
    ///
    /// Edges are polled even if the flush fails; the flush error wins.
    fn sync<H: EdgeHandler>(&mut self, handler: &mut H) -> Result<(), Self::Error> {
        let flushed = self.flush();
        let polled = self.poll_edges(handler);
        flushed.and(polled)
    }
}
