//! USB CDC-ACM host link
//!
//! The CDC class is serviced by its own task, which moves bytes between
//! the USB endpoints and two static pipes. The control loop only touches
//! the pipes through [`UsbSerial`], which never waits.
//!
//! ```text
//!   host ──OUT──► cdc task ──► RX_PIPE ──► UsbSerial::read_byte
//!   host ◄──IN─── cdc task ◄── TX_PIPE ◄── UsbSerial::write_bytes
//! ```

use adminboxx_hal::{LinkSense, SerialError, SerialRx, SerialTx};
use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::pipe::Pipe;
use embassy_usb::class::cdc_acm::{CdcAcmClass, Receiver, Sender, State};
use embassy_usb::driver::{Driver, EndpointError};
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use portable_atomic::{AtomicBool, Ordering};

/// Bytes buffered in each direction
pub const PIPE_SIZE: usize = 256;

/// Full-speed bulk packet size
pub const MAX_PACKET_SIZE: u16 = 64;

type LinkPipe = Pipe<CriticalSectionRawMutex, PIPE_SIZE>;

/// Host to device
static RX_PIPE: LinkPipe = Pipe::new();

/// Device to host
static TX_PIPE: LinkPipe = Pipe::new();

/// Set while a host has the device configured
static CONFIGURED: AtomicBool = AtomicBool::new(false);

/// USB device identity
#[derive(Debug, Clone, Copy)]
pub struct UsbIdentity {
    pub vid: u16,
    pub pid: u16,
    pub manufacturer: &'static str,
    pub product: &'static str,
    pub serial_number: &'static str,
}

/// Tracks host configuration for [`LinkSense`]
pub struct UsbStateHandler;

impl Handler for UsbStateHandler {
    fn enabled(&mut self, enabled: bool) {
        if !enabled {
            CONFIGURED.store(false, Ordering::Relaxed);
        }
    }

    fn reset(&mut self) {
        CONFIGURED.store(false, Ordering::Relaxed);
    }

    fn configured(&mut self, configured: bool) {
        CONFIGURED.store(configured, Ordering::Relaxed);
    }
}

/// Buffers the USB stack borrows for its whole lifetime
pub struct UsbResources<'d> {
    config_descriptor: [u8; 256],
    bos_descriptor: [u8; 256],
    msos_descriptor: [u8; 256],
    control_buf: [u8; 64],
    state: State<'d>,
    handler: UsbStateHandler,
}

impl UsbResources<'_> {
    pub fn new() -> Self {
        Self {
            config_descriptor: [0; 256],
            bos_descriptor: [0; 256],
            msos_descriptor: [0; 256],
            control_buf: [0; 64],
            state: State::new(),
            handler: UsbStateHandler,
        }
    }
}

impl Default for UsbResources<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the USB device with a single CDC-ACM interface
pub fn build<'d, D: Driver<'d>>(
    driver: D,
    identity: UsbIdentity,
    resources: &'d mut UsbResources<'d>,
) -> (UsbDevice<'d, D>, CdcAcmClass<'d, D>) {
    let mut config = Config::new(identity.vid, identity.pid);
    config.manufacturer = Some(identity.manufacturer);
    config.product = Some(identity.product);
    config.serial_number = Some(identity.serial_number);
    config.max_power = 100;
    config.max_packet_size_0 = MAX_PACKET_SIZE as u8;

    let UsbResources {
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
        state,
        handler,
    } = resources;

    let mut builder = Builder::new(
        driver,
        config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    builder.handler(handler);

    let class = CdcAcmClass::new(&mut builder, state, MAX_PACKET_SIZE);
    (builder.build(), class)
}

/// Shuttle bytes between the CDC endpoints and the pipes, forever
pub async fn run_cdc<'d, D: Driver<'d>>(class: CdcAcmClass<'d, D>) -> ! {
    let (mut sender, mut receiver) = class.split();
    loop {
        join(rx_loop(&mut receiver), tx_loop(&mut sender)).await;
    }
}

async fn rx_loop<'d, D: Driver<'d>>(receiver: &mut Receiver<'d, D>) {
    let mut buf = [0u8; MAX_PACKET_SIZE as usize];
    loop {
        receiver.wait_connection().await;
        loop {
            match receiver.read_packet(&mut buf).await {
                Ok(n) => RX_PIPE.write_all(&buf[..n]).await,
                Err(EndpointError::BufferOverflow) => continue,
                Err(EndpointError::Disabled) => break,
            }
        }
        RX_PIPE.clear();
    }
}

async fn tx_loop<'d, D: Driver<'d>>(sender: &mut Sender<'d, D>) {
    let mut buf = [0u8; MAX_PACKET_SIZE as usize];
    loop {
        sender.wait_connection().await;
        loop {
            let n = TX_PIPE.read(&mut buf).await;
            if write_transfer(sender, &buf[..n]).await.is_err() {
                break;
            }
        }
        // Lines queued for a host that went away are stale
        TX_PIPE.clear();
    }
}

async fn write_transfer<'d, D: Driver<'d>>(
    sender: &mut Sender<'d, D>,
    data: &[u8],
) -> Result<(), EndpointError> {
    sender.write_packet(data).await?;
    // A full packet does not end the transfer on the host side
    if data.len() == MAX_PACKET_SIZE as usize {
        sender.write_packet(&[]).await?;
    }
    Ok(())
}

/// Non-blocking handle on the CDC link used by the control loop
pub struct UsbSerial {
    _private: (),
}

impl UsbSerial {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for UsbSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialRx for UsbSerial {
    fn bytes_available(&self) -> usize {
        RX_PIPE.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match RX_PIPE.try_read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}

impl SerialTx for UsbSerial {
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), SerialError> {
        if !CONFIGURED.load(Ordering::Relaxed) {
            return Err(SerialError::Disconnected);
        }
        queue_whole(&TX_PIPE, data)
    }
}

/// Queue all of `data` or none of it
///
/// `try_write` stops at the end of the ring buffer, so data straddling the
/// wrap takes a second call. The capacity check holds across the calls as
/// long as this is the only writer.
fn queue_whole<M: RawMutex, const N: usize>(
    pipe: &Pipe<M, N>,
    data: &[u8],
) -> Result<(), SerialError> {
    if pipe.free_capacity() < data.len() {
        return Err(SerialError::WouldBlock);
    }

    let mut rest = data;
    while !rest.is_empty() {
        match pipe.try_write(rest) {
            Ok(n) if n > 0 => rest = &rest[n..],
            _ => return Err(SerialError::WouldBlock),
        }
    }
    Ok(())
}

impl LinkSense for UsbSerial {
    fn is_attached(&self) -> bool {
        CONFIGURED.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn drain<const N: usize>(pipe: &Pipe<NoopRawMutex, N>, out: &mut [u8]) -> usize {
        let mut len = 0;
        while let Ok(n) = pipe.try_read(&mut out[len..]) {
            len += n;
        }
        len
    }

    #[test]
    fn test_line_across_wrap_is_queued_whole() {
        let pipe: Pipe<NoopRawMutex, 8> = Pipe::new();
        let mut out = [0u8; 8];

        queue_whole(&pipe, b":0,0\n").unwrap();
        assert_eq!(drain(&pipe, &mut out), 5);

        // Starts at offset 5 of 8 and wraps
        queue_whole(&pipe, b":3,7\n").unwrap();
        let n = drain(&pipe, &mut out);
        assert_eq!(&out[..n], b":3,7\n");
    }

    #[test]
    fn test_full_pipe_queues_nothing() {
        let pipe: Pipe<NoopRawMutex, 8> = Pipe::new();
        let mut out = [0u8; 8];

        queue_whole(&pipe, b":1,1\n").unwrap();
        assert_eq!(queue_whole(&pipe, b":2,2\n"), Err(SerialError::WouldBlock));

        let n = drain(&pipe, &mut out);
        assert_eq!(&out[..n], b":1,1\n");
    }

    #[test]
    fn test_report_stream_stays_line_aligned() {
        let pipe: Pipe<NoopRawMutex, PIPE_SIZE> = Pipe::new();
        let mut out = [0u8; PIPE_SIZE];

        for _ in 0..200 {
            queue_whole(&pipe, b":0,0\n").unwrap();
            let n = drain(&pipe, &mut out);
            assert_eq!(&out[..n], b":0,0\n");
        }
    }
}
