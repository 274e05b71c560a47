//! Link controller coordinating decoder, interpreter, supervisor and reporter
//!
//! The controller is the single owner of all mutable link state. One
//! cooperative loop iteration is:
//! 1. [`sync_grid`](LinkController::sync_grid) - flush pixels, deliver button edges
//! 2. [`drain_link`](LinkController::drain_link) - decode and apply every available byte
//! 3. [`supervise`](LinkController::supervise) - redraw on liveness transitions
//!
//! followed by a short sleep in the caller.

use adminboxx_hal::HostLink;
use adminboxx_protocol::{Color, Coordinate, FrameDecoder};

use crate::config::LinkConfig;
use crate::link::{interpret, Effect, EdgeSummary, EventReporter};
use crate::liveness::{LivenessSupervisor, Render};
use crate::traits::{Clock, Edge, GridSurface};

/// Something the caller may want to log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// A frame was interpreted and its effect applied
    Command(Effect),
    /// The status display was redrawn
    Redraw(Render),
}

/// Owner of the grid, the host link, the clock and all link state
pub struct LinkController<G, L, C> {
    grid: G,
    link: L,
    clock: C,
    config: LinkConfig,
    decoder: FrameDecoder,
    supervisor: LivenessSupervisor,
    dropped_reports: u32,
}

impl<G, L, C> LinkController<G, L, C>
where
    G: GridSurface,
    L: HostLink,
    C: Clock,
{
    /// Create a new controller
    pub fn new(grid: G, link: L, clock: C, config: LinkConfig) -> Self {
        let supervisor = LivenessSupervisor::new(config.heartbeat_timeout_ms, clock.now_ms());
        Self {
            grid,
            link,
            clock,
            config,
            decoder: FrameDecoder::new(),
            supervisor,
            dropped_reports: 0,
        }
    }

    /// Boot sequence
    ///
    /// Shows the boot color, then enables rising-edge events on every key.
    /// The supervisor's pending refresh clears the boot color on the first
    /// tick.
    pub fn init(&mut self) -> Result<(), G::Error> {
        self.grid.fill(Color::BOOT)?;
        self.grid.flush()?;

        for coordinate in Coordinate::all() {
            self.grid.activate_key(coordinate, Edge::Rising, true)?;
        }

        Ok(())
    }

    /// Step 1: flush pixel writes and deliver pending button edges
    pub fn sync_grid(&mut self) -> Result<EdgeSummary, G::Error> {
        let mut reporter = EventReporter::new(
            &mut self.link,
            &mut self.supervisor,
            self.config.display_toggle,
        );
        let synced = self.grid.sync(&mut reporter);

        let summary = reporter.finish();
        self.dropped_reports = self
            .dropped_reports
            .saturating_add(u32::from(summary.dropped));
        synced.map(|()| summary)
    }

    /// Step 2: decode every byte currently available and apply the effects
    ///
    /// Returns the number of frames processed. A grid error stops the
    /// drain; remaining bytes stay in the link for the next iteration.
    pub fn drain_link<F>(&mut self, mut on_event: F) -> Result<usize, G::Error>
    where
        F: FnMut(LinkEvent),
    {
        let mut frames = 0;

        while let Some(byte) = self.link.read_byte() {
            if self.process_byte(byte, &mut on_event)? {
                frames += 1;
            }
        }

        Ok(frames)
    }

    /// Feed one inbound byte, applying the frame it completes
    ///
    /// Returns whether a frame was completed. Its redraw, if any, is
    /// reported before the command itself.
    pub fn process_byte<F>(&mut self, byte: u8, mut on_event: F) -> Result<bool, G::Error>
    where
        F: FnMut(LinkEvent),
    {
        let Some(frame) = self.decoder.feed(byte) else {
            return Ok(false);
        };

        let effect = interpret(frame, self.clock.now_ms());
        if let Some(render) = self.apply(effect)? {
            on_event(LinkEvent::Redraw(render));
        }
        on_event(LinkEvent::Command(effect));
        Ok(true)
    }

    /// Apply an effect immediately
    ///
    /// A heartbeat is evaluated before the pixel write, so a command that
    /// revives the peer gets its idle redraw out of the way instead of
    /// having its own pixel wiped by it. Returns that redraw, if any.
    ///
    /// The pixel is written even when the redraw fails; the redraw error
    /// is returned afterwards.
    pub fn apply(&mut self, effect: Effect) -> Result<Option<Render>, G::Error> {
        let mut redraw = Ok(None);

        if let Some(at) = effect.heartbeat() {
            self.supervisor.refresh_heartbeat(at);
            redraw = self.supervise();
        }

        if let Effect::SetPixel {
            coordinate, color, ..
        } = effect
        {
            self.grid.set_pixel(coordinate, color)?;
        }

        redraw
    }

    /// Step 3: evaluate liveness and redraw on transition
    pub fn supervise(&mut self) -> Result<Option<Render>, G::Error> {
        let transport_present = self.link.is_attached();
        let now_ms = self.clock.now_ms();

        let Some(render) = self.supervisor.update(transport_present, now_ms) else {
            return Ok(None);
        };

        let color = match render {
            Render::Status(state) => self.config.palette.color_for(state),
            Render::Blank => Color::OFF,
        };

        if let Err(e) = self.grid.fill(color) {
            // Try again next tick
            self.supervisor.request_refresh();
            return Err(e);
        }

        Ok(Some(render))
    }

    /// One full loop iteration without logging hooks
    pub fn poll(&mut self) -> Result<(), G::Error> {
        self.sync_grid()?;
        self.drain_link(|_| {})?;
        self.supervise()?;
        Ok(())
    }

    pub fn supervisor(&self) -> &LivenessSupervisor {
        &self.supervisor
    }

    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Button reports lost to outbound write failures
    pub fn dropped_reports(&self) -> u32 {
        self.dropped_reports
    }
}
