//! AdminBoxx - Button/LED Grid Link Firmware
//!
//! Firmware for an RP2040 driving two NeoTrellis boards as one 8x4 grid.
//! A host application paints the pixels over USB CDC and receives button
//! presses as text lines; while the host is silent or unplugged the grid
//! shows a status color instead.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use adminboxx_drivers::MultiTrellis;
use adminboxx_hal_rp2040::i2c::rp_config;
use adminboxx_hal_rp2040::{usb, BlockingI2c, UsbResources};

mod board;
mod tasks;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

// USB descriptors and class state must live forever
static USB_RESOURCES: StaticCell<UsbResources<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("AdminBoxx firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // USB CDC link to the host
    let driver = Driver::new(p.USB, Irqs);
    let resources = USB_RESOURCES.init(UsbResources::new());
    let (device, class) = usb::build(driver, board::USB_IDENTITY, resources);

    info!(
        "USB initialized ({=u16:#x}:{=u16:#x})",
        board::USB_IDENTITY.vid,
        board::USB_IDENTITY.pid
    );

    // Trellis boards on the STEMMA QT connector
    // Pin assignments are board-specific (QT Py RP2040: SCL=GPIO23, SDA=GPIO22)
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_23, p.PIN_22, rp_config(board::I2C_CONFIG));
    let grid = MultiTrellis::with_addresses(
        BlockingI2c::new(i2c),
        Delay,
        board::TRELLIS_ADDRESSES,
    );

    info!("I2C initialized at {} Hz", board::I2C_CONFIG.frequency);

    // Spawn tasks
    spawner.spawn(tasks::usb_task(device)).unwrap();
    spawner.spawn(tasks::cdc_task(class)).unwrap();
    spawner.spawn(tasks::control_task(grid)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
