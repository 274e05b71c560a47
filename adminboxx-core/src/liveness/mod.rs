//! Connection liveness supervision
//!
//! Tracks whether the transport is attached and whether the host is still
//! talking, and decides when the status display has to be redrawn.

pub mod state;
pub mod supervisor;

pub use state::{DisplayState, Render};
pub use supervisor::LivenessSupervisor;
