//! Button event reporting
//!
//! A button has two meanings depending on the link state:
//! - peer alive: the press is reported to the host as `:{row},{column}\n`
//! - peer gone: the press toggles the display-off override (if enabled)

use adminboxx_hal::{SerialError, SerialTx};
use adminboxx_protocol::{ButtonReport, Coordinate};

use crate::liveness::LivenessSupervisor;
use crate::traits::{Edge, EdgeHandler};

/// What happened to one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Line queued for the host
    Reported,
    /// Host write failed; the press is lost (no retry)
    Dropped(SerialError),
    /// Display-off override flipped to the contained value
    DisplayToggled(bool),
    /// Falling edge, or press while disconnected with the toggle disabled
    Ignored,
}

/// Edge outcomes collected over one grid sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeSummary {
    pub reported: u8,
    pub dropped: u8,
    pub ignored: u8,
    /// Final override value if it was toggled during the sync
    pub toggled: Option<bool>,
}

impl EdgeSummary {
    fn record(&mut self, outcome: EdgeOutcome) {
        match outcome {
            EdgeOutcome::Reported => self.reported = self.reported.saturating_add(1),
            EdgeOutcome::Dropped(_) => self.dropped = self.dropped.saturating_add(1),
            EdgeOutcome::DisplayToggled(on) => self.toggled = Some(on),
            EdgeOutcome::Ignored => self.ignored = self.ignored.saturating_add(1),
        }
    }

    /// Check if nothing happened
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Edge handler wired to the host link and the liveness supervisor
pub struct EventReporter<'a, L> {
    link: &'a mut L,
    supervisor: &'a mut LivenessSupervisor,
    display_toggle: bool,
    summary: EdgeSummary,
}

impl<'a, L: SerialTx> EventReporter<'a, L> {
    pub fn new(link: &'a mut L, supervisor: &'a mut LivenessSupervisor, display_toggle: bool) -> Self {
        Self {
            link,
            supervisor,
            display_toggle,
            summary: EdgeSummary::default(),
        }
    }

    /// Handle one edge
    pub fn handle(&mut self, coordinate: Coordinate, edge: Edge) -> EdgeOutcome {
        let outcome = match edge {
            Edge::Falling => EdgeOutcome::Ignored,
            Edge::Rising if self.supervisor.peer_alive() => {
                let line = ButtonReport::new(coordinate).encode();
                match self.link.write_bytes(line.as_bytes()) {
                    Ok(()) => EdgeOutcome::Reported,
                    Err(e) => EdgeOutcome::Dropped(e),
                }
            }
            Edge::Rising if self.display_toggle => {
                EdgeOutcome::DisplayToggled(self.supervisor.toggle_display_off())
            }
            Edge::Rising => EdgeOutcome::Ignored,
        };
        self.summary.record(outcome);
        outcome
    }

    /// Outcomes collected so far
    pub fn finish(self) -> EdgeSummary {
        self.summary
    }
}

impl<L: SerialTx> EdgeHandler for EventReporter<'_, L> {
    fn on_edge(&mut self, coordinate: Coordinate, edge: Edge) {
        self.handle(coordinate, edge);
    }
}
