//! The control-transfer seam between the transfer logic and a USB device.
//!
//! [`Fx2Device`](crate::Fx2Device) implements [`ControlTransport`] on top of
//! nusb. Anything else that speaks vendor control requests, such as an
//! in-memory EEPROM model in tests, can implement it as well.

use nusb::transfer::TransferError;

/// Vendor-class, device-recipient control transfers.
pub trait ControlTransport {
    /// Issue a device-to-host vendor request (`bmRequestType` 0xC0) and
    /// return the bytes the device sent, at most `length` of them.
    fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Vec<u8>, TransferError>;

    /// Issue a host-to-device vendor request (`bmRequestType` 0x40) carrying
    /// `data` and return the number of bytes sent.
    fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, TransferError>;
}

impl<T: ControlTransport + ?Sized> ControlTransport for &T {
    fn control_in(
        &self,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Vec<u8>, TransferError> {
        (**self).control_in(request, value, index, length)
    }

    fn control_out(
        &self,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize, TransferError> {
        (**self).control_out(request, value, index, data)
    }
}
