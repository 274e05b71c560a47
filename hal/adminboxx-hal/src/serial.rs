//! Host serial link abstractions
//!
//! The host link is a raw bidirectional byte stream (USB CDC on the
//! reference board). Both directions are non-blocking: the control loop
//! must never stall on the transport, since the heartbeat timeout is
//! measured by that same loop.

/// Errors from the host byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Not enough room to accept the data without blocking
    WouldBlock,
    /// No host is attached to the transport
    Disconnected,
}

/// Receiving half of the host link
pub trait SerialRx {
    /// Number of bytes that can be read right now without waiting
    fn bytes_available(&self) -> usize;

    /// Read one byte if one is available
    ///
    /// Never waits. Returns `None` when the receive buffer is empty.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Transmitting half of the host link
pub trait SerialTx {
    /// Queue `data` for transmission
    ///
    /// Either the whole slice is accepted or nothing is; partial lines
    /// never reach the host.
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), SerialError>;
}

/// Physical attachment of the transport
///
/// For USB this means "enumerated and configured by a host", for a UART
/// it would typically be a sense pin.
pub trait LinkSense {
    /// Check if the transport is currently attached
    fn is_attached(&self) -> bool;
}

/// Combined host link
///
/// Everything the link controller needs from the transport.
pub trait HostLink: SerialRx + SerialTx + LinkSense {}

// Blanket implementation
impl<T: SerialRx + SerialTx + LinkSense> HostLink for T {}
