//! Liveness supervisor implementation
//!
//! Watches two independent signals every tick:
//! - transport presence (is a USB host attached)
//! - peer freshness (has a valid command arrived within the heartbeat window)
//!
//! A redraw is requested only when one of them changes or a refresh was
//! forced. Redrawing at tick rate would saturate the I2C bus.

use super::state::{DisplayState, Render};

/// Liveness state machine
#[derive(Debug, Clone)]
pub struct LivenessSupervisor {
    /// Heartbeat window (ms)
    heartbeat_timeout_ms: u32,
    /// Transport presence seen on the previous tick
    transport_present: bool,
    /// Peer freshness seen on the previous tick
    peer_alive: bool,
    /// Time of the last valid command; `None` once the window has expired
    last_command_ms: Option<u32>,
    /// Redraw on the next tick even without a transition
    force_refresh: bool,
    /// Display-off override
    display_off: bool,
}

impl LivenessSupervisor {
    /// Create a supervisor at boot
    ///
    /// Starts out optimistic (present and alive) with a forced refresh
    /// pending, so the first tick draws the real state without flashing
    /// a lost color first.
    pub fn new(heartbeat_timeout_ms: u32, now_ms: u32) -> Self {
        Self {
            heartbeat_timeout_ms,
            transport_present: true,
            peer_alive: true,
            last_command_ms: Some(now_ms),
            force_refresh: true,
            display_off: false,
        }
    }

    /// Record a valid command
    pub fn refresh_heartbeat(&mut self, now_ms: u32) {
        self.last_command_ms = Some(now_ms);
    }

    /// Check whether the last valid command is still inside the window
    ///
    /// Expires the timestamp once the window has passed, so a wrapped
    /// clock cannot bring a dead peer back.
    fn peer_fresh(&mut self, now_ms: u32) -> bool {
        match self.last_command_ms {
            Some(at) if now_ms.wrapping_sub(at) < self.heartbeat_timeout_ms => true,
            Some(_) => {
                self.last_command_ms = None;
                false
            }
            None => false,
        }
    }

    /// Evaluate one tick
    ///
    /// Returns the redraw to perform, or `None` when nothing changed.
    pub fn update(&mut self, transport_present: bool, now_ms: u32) -> Option<Render> {
        let peer_alive = self.peer_fresh(now_ms);

        let changed =
            transport_present != self.transport_present || peer_alive != self.peer_alive;

        // Reconnecting peer releases the display-off override
        if peer_alive && !self.peer_alive {
            self.display_off = false;
        }

        self.transport_present = transport_present;
        self.peer_alive = peer_alive;

        if !changed && !self.force_refresh {
            return None;
        }

        let forced = core::mem::take(&mut self.force_refresh);

        if self.display_off {
            return forced.then_some(Render::Blank);
        }

        Some(Render::Status(DisplayState::from_signals(
            transport_present,
            peer_alive,
        )))
    }

    /// Flip the display-off override
    ///
    /// Returns the new override value. Forces a refresh so the change
    /// shows on the next tick.
    pub fn toggle_display_off(&mut self) -> bool {
        self.display_off = !self.display_off;
        self.force_refresh = true;
        self.display_off
    }

    /// Redraw on the next tick regardless of transitions
    pub fn request_refresh(&mut self) {
        self.force_refresh = true;
    }

    /// Transport presence as of the last tick
    pub fn transport_present(&self) -> bool {
        self.transport_present
    }

    /// Peer freshness as of the last tick
    pub fn peer_alive(&self) -> bool {
        self.peer_alive
    }

    /// Check if the display-off override is engaged
    pub fn display_off(&self) -> bool {
        self.display_off
    }

    /// Check if a forced refresh is pending
    pub fn refresh_pending(&self) -> bool {
        self.force_refresh
    }

    /// Display state as of the last tick
    pub fn display_state(&self) -> DisplayState {
        DisplayState::from_signals(self.transport_present, self.peer_alive)
    }

    /// Time of the last valid command, if still inside the window
    pub fn last_command_ms(&self) -> Option<u32> {
        self.last_command_ms
    }
}
