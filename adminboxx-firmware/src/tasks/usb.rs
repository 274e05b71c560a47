//! USB device and CDC class tasks

use defmt::*;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::UsbDevice;

use adminboxx_hal_rp2040::usb::run_cdc;

pub type UsbDriver = Driver<'static, USB>;

/// Runs the USB device state machine
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) {
    info!("USB task started");
    device.run().await
}

/// Moves CDC data between the endpoints and the link pipes
#[embassy_executor::task]
pub async fn cdc_task(class: CdcAcmClass<'static, UsbDriver>) {
    info!("CDC task started");
    run_cdc(class).await
}
