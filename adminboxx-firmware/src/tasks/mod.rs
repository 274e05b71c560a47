//! Embassy async tasks
//!
//! USB runs in its own tasks; all grid and link logic runs in the
//! single cooperative control task.

pub mod control;
pub mod usb;

pub use control::control_task;
pub use usb::{cdc_task, usb_task};
