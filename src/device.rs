//! The USB device session.
//!
//! [`Fx2Device`] represents an opened FX2 device whose interface 0 has been
//! claimed. It owns the nusb handles, so dropping it releases the interface
//! and closes the device on every exit path, including early error returns.

use std::time::Duration;

use nusb::transfer::{ControlIn, ControlOut, ControlType, Recipient, TransferError};
use nusb::{self, DeviceInfo, MaybeFuture};

use crate::constants::DEFAULT_TIMEOUT;
use crate::error::{Error, Result};
use crate::transport::ControlTransport;

/// Interface claimed for the duration of a session.
const INTERFACE: u8 = 0;

/// An opened FX2 USB device.
///
/// # Opening a device
///
/// ```no_run
/// use fx2eeprom::Fx2Device;
///
/// let dev = Fx2Device::open(0x04b4, 0x8613)?;
/// println!("opened {:04x}:{:04x}", dev.vendor_id(), dev.product_id());
/// # Ok::<(), fx2eeprom::Error>(())
/// ```
pub struct Fx2Device {
    #[allow(dead_code)] // Kept to ensure the USB device stays open
    device: nusb::Device,
    interface: nusb::Interface,
    vendor_id: u16,
    product_id: u16,
    timeout: Duration,
}

impl std::fmt::Debug for Fx2Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fx2Device")
            .field("vendor_id", &format_args!("{:04x}", self.vendor_id))
            .field("product_id", &format_args!("{:04x}", self.product_id))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

// ---- Construction / Opening ----

impl Fx2Device {
    /// Open the first device matching the given vendor and product IDs.
    ///
    /// Any kernel driver bound to interface 0 is detached before the
    /// interface is claimed.
    pub fn open(vendor: u16, product: u16) -> Result<Self> {
        let dev_info = nusb::list_devices()
            .wait()?
            .find(|d| d.vendor_id() == vendor && d.product_id() == product)
            .ok_or(Error::DeviceNotFound { vendor, product })?;

        Self::from_device_info(dev_info)
    }

    /// Open a device from an already-discovered [`nusb::DeviceInfo`].
    pub fn from_device_info(dev_info: DeviceInfo) -> Result<Self> {
        let vendor_id = dev_info.vendor_id();
        let product_id = dev_info.product_id();

        let device = dev_info.open().wait()?;

        let interface = device
            .detach_and_claim_interface(INTERFACE)
            .wait()
            .map_err(|source| Error::ClaimFailed {
                interface: INTERFACE,
                source,
            })?;

        log::info!("opened {vendor_id:04x}:{product_id:04x}, claimed interface {INTERFACE}");

        Ok(Self {
            device,
            interface,
            vendor_id,
            product_id,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// USB vendor ID of the opened device.
    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    /// USB product ID of the opened device.
    pub fn product_id(&self) -> u16 {
        self.product_id
    }

    /// Set the timeout applied to every control transfer.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Get the current control transfer timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Drop for Fx2Device {
    fn drop(&mut self) {
        log::debug!(
            "releasing interface {INTERFACE} of {:04x}:{:04x}",
            self.vendor_id,
            self.product_id
        );
    }
}

// ---- Control transfers ----

impl ControlTransport for Fx2Device {
    fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> std::result::Result<Vec<u8>, TransferError> {
        self.interface
            .control_in(
                ControlIn {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request,
                    value,
                    index,
                    length,
                },
                self.timeout,
            )
            .wait()
    }

    fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> std::result::Result<usize, TransferError> {
        self.interface
            .control_out(
                ControlOut {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request,
                    value,
                    index,
                    data,
                },
                self.timeout,
            )
            .wait()?;
        Ok(data.len())
    }
}
