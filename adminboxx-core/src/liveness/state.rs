//! Status display states

/// What the grid shows when the host is not painting it
///
/// Variants are listed in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// No transport attached
    TransportLost,
    /// Transport attached, no valid command within the heartbeat window
    PeerLost,
    /// Connected
    Idle,
}

impl DisplayState {
    /// Derive the display state from the two liveness signals
    pub fn from_signals(transport_present: bool, peer_alive: bool) -> Self {
        match (transport_present, peer_alive) {
            (false, _) => DisplayState::TransportLost,
            (true, false) => DisplayState::PeerLost,
            (true, true) => DisplayState::Idle,
        }
    }

    /// Check if the host is reachable
    pub fn is_connected(&self) -> bool {
        matches!(self, DisplayState::Idle)
    }
}

/// Redraw instruction produced on a liveness transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Render {
    /// Fill the grid with the status color
    Status(DisplayState),
    /// Display-off override engaged: clear the grid
    Blank,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_lost_wins() {
        assert_eq!(DisplayState::from_signals(false, true), DisplayState::TransportLost);
        assert_eq!(DisplayState::from_signals(false, false), DisplayState::TransportLost);
    }

    #[test]
    fn test_peer_lost() {
        assert_eq!(DisplayState::from_signals(true, false), DisplayState::PeerLost);
    }

    #[test]
    fn test_idle() {
        let state = DisplayState::from_signals(true, true);
        assert_eq!(state, DisplayState::Idle);
        assert!(state.is_connected());
    }
}
