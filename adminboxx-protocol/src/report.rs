//! Device → host button reports
//!
//! One text line per rising edge: `:{row},{column}\n`.

use core::fmt::Write;

use heapless::String;

use crate::types::Coordinate;

/// Longest report line (":3,7\n" is five bytes)
pub const MAX_REPORT_LEN: usize = 8;

/// A button press to be sent to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonReport {
    pub coordinate: Coordinate,
}

impl ButtonReport {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    /// Format the report line, newline included
    pub fn encode(&self) -> String<MAX_REPORT_LEN> {
        let mut line = String::new();
        // Two single digits always fit
        let _ = write!(
            line,
            ":{},{}\n",
            self.coordinate.row(),
            self.coordinate.column()
        );
        line
    }
}
