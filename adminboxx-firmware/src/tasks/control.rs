//! Control task
//!
//! One cooperative loop owns the grid, the host link and all link state:
//! sync the grid, drain inbound bytes, supervise liveness, sleep.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Delay, Timer};

use adminboxx_core::{Effect, EdgeSummary, InvalidCommand, LinkController, LinkEvent};
use adminboxx_drivers::MultiTrellis;
use adminboxx_hal_rp2040::{BlockingI2c, UsbSerial};

use crate::board::{self, EmbassyClock};

pub type Grid = MultiTrellis<BlockingI2c<I2c<'static, I2C1, Blocking>>, Delay>;

type Controller = LinkController<Grid, UsbSerial, EmbassyClock>;

/// Control task - runs the link controller forever
#[embassy_executor::task]
pub async fn control_task(mut grid: Grid) {
    info!("Control task started");

    // Nothing works without the boards; keep trying until they answer
    while let Err(e) = grid.begin() {
        warn!("Trellis at {=u8:#x} not ready: {}", e.address, e.error);
        Timer::after_millis(board::TRELLIS_RETRY_MS).await;
    }

    let mut controller: Controller =
        LinkController::new(grid, UsbSerial::new(), EmbassyClock, board::LINK_CONFIG);

    if let Err(e) = controller.init() {
        warn!("Grid init failed at {=u8:#x}: {}", e.address, e.error);
    }

    info!(
        "Grid ready (heartbeat {} ms, display toggle {})",
        controller.config().heartbeat_timeout_ms,
        controller.config().display_toggle
    );

    loop {
        run_iteration(&mut controller);
        Timer::after_millis(board::LOOP_INTERVAL_MS).await;
    }
}

fn run_iteration(controller: &mut Controller) {
    match controller.sync_grid() {
        Ok(summary) => log_edges(&summary, controller.dropped_reports()),
        Err(e) => warn!("Grid sync failed at {=u8:#x}: {}", e.address, e.error),
    }

    if let Err(e) = controller.drain_link(log_event) {
        warn!("Pixel write failed at {=u8:#x}: {}", e.address, e.error);
    }

    match controller.supervise() {
        Ok(Some(render)) => debug!("Display: {}", render),
        Ok(None) => {}
        Err(e) => warn!("Status redraw failed at {=u8:#x}: {}", e.address, e.error),
    }
}

fn log_edges(summary: &EdgeSummary, dropped_total: u32) {
    if summary.reported > 0 {
        debug!("Reported {} button press(es)", summary.reported);
    }
    if summary.dropped > 0 {
        warn!(
            "Dropped {} button report(s), {} total",
            summary.dropped, dropped_total
        );
    }
    if let Some(off) = summary.toggled {
        info!("Display {}", if off { "off" } else { "on" });
    }
}

fn log_event(event: LinkEvent) {
    match event {
        LinkEvent::Command(Effect::RefreshHeartbeat(at)) => trace!("Ping at {}", at),
        LinkEvent::Command(Effect::SetPixel {
            coordinate, color, ..
        }) => trace!("Set {} to {}", coordinate, color),
        LinkEvent::Command(Effect::ReportInvalid(InvalidCommand::Framing(e))) => {
            warn!("Malformed command received: {}", e)
        }
        LinkEvent::Command(Effect::ReportInvalid(InvalidCommand::Range(e))) => {
            warn!("Invalid values in command: {}", e)
        }
        LinkEvent::Redraw(render) => debug!("Display: {}", render),
    }
}
