//! Compile-time configuration
//!
//! The controller has no configuration file and no persisted state.
//! Everything tunable lives here as constants; firmware builds pick
//! variants through cargo features.

use adminboxx_protocol::Color;

use crate::liveness::DisplayState;

/// Time without a valid command after which the peer counts as gone
pub const HEARTBEAT_TIMEOUT_MS: u32 = 2_000;

/// Fill colors for each liveness display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusPalette {
    /// No USB host attached
    pub transport_lost: Color,
    /// Host attached but silent
    pub peer_lost: Color,
    /// Connected; the host owns the pixels
    pub idle: Color,
}

impl StatusPalette {
    pub const DEFAULT: Self = Self {
        transport_lost: Color::saturating(24, 0, 0),
        peer_lost: Color::saturating(24, 10, 0),
        idle: Color::OFF,
    };

    /// Color to fill the grid with for a display state
    pub fn color_for(&self, state: DisplayState) -> Color {
        match state {
            DisplayState::TransportLost => self.transport_lost,
            DisplayState::PeerLost => self.peer_lost,
            DisplayState::Idle => self.idle,
        }
    }
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Link controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Heartbeat window in milliseconds
    pub heartbeat_timeout_ms: u32,
    /// Let a button press toggle the grid off while the peer is gone
    pub display_toggle: bool,
    /// Status colors
    pub palette: StatusPalette,
}

impl LinkConfig {
    pub const DEFAULT: Self = Self {
        heartbeat_timeout_ms: HEARTBEAT_TIMEOUT_MS,
        display_toggle: false,
        palette: StatusPalette::DEFAULT,
    };

    pub const fn with_display_toggle(mut self, enabled: bool) -> Self {
        self.display_toggle = enabled;
        self
    }

    pub const fn with_heartbeat_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.heartbeat_timeout_ms = timeout_ms;
        self
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LinkConfig::default();
        assert_eq!(config.heartbeat_timeout_ms, 2_000);
        assert!(!config.display_toggle);
        assert_eq!(config.palette.idle, Color::OFF);
    }

    #[test]
    fn test_builders() {
        let config = LinkConfig::DEFAULT
            .with_display_toggle(true)
            .with_heartbeat_timeout_ms(500);
        assert!(config.display_toggle);
        assert_eq!(config.heartbeat_timeout_ms, 500);
    }

    #[test]
    fn test_status_colors_are_distinct() {
        let palette = StatusPalette::DEFAULT;
        assert_ne!(palette.color_for(DisplayState::TransportLost), palette.color_for(DisplayState::PeerLost));
        assert_ne!(palette.color_for(DisplayState::PeerLost), palette.color_for(DisplayState::Idle));
    }
}
