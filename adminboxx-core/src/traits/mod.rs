//! Hardware abstraction traits
//!
//! These traits define the interface between the link logic and the
//! collaborators it drives. The host byte stream comes from
//! `adminboxx_hal::HostLink`.

pub mod clock;
pub mod grid;

pub use clock::Clock;
pub use grid::{Edge, EdgeHandler, GridSurface};
