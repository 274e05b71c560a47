//! Host link handling
//!
//! Inbound: classified frames are turned into effects by the interpreter.
//! Outbound: button edges are turned into report lines by the reporter.

pub mod interpreter;
pub mod reporter;

pub use interpreter::{interpret, Effect, InvalidCommand};
pub use reporter::{EdgeOutcome, EdgeSummary, EventReporter};
