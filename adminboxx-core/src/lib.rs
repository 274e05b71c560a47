//! Board-agnostic core logic for the AdminBoxx grid controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (grid surface, clock)
//! - Command interpretation and range validation
//! - Connection liveness supervision and status display
//! - Button event reporting
//! - The cooperative link controller tying them together
//! - Compile-time configuration

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod link;
pub mod liveness;
pub mod traits;

pub use config::{LinkConfig, StatusPalette, HEARTBEAT_TIMEOUT_MS};
pub use controller::{LinkController, LinkEvent};
pub use link::{interpret, Effect, EdgeSummary, EventReporter, InvalidCommand};
pub use liveness::{DisplayState, LivenessSupervisor, Render};
pub use traits::{Clock, Edge, EdgeHandler, GridSurface};
