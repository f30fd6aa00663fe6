//! Type definitions describing an EEPROM transfer run.

use crate::constants::MAX_TRANSFER_SIZE;
use crate::error::{Error, Result};

/// Direction of an EEPROM transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Copy EEPROM contents to the output stream.
    #[default]
    Read,
    /// Copy the input stream into the EEPROM.
    Write,
}

impl Mode {
    /// Parse the mode argument: anything starting with `w`/`W` writes,
    /// everything else reads.
    pub fn from_arg(arg: &str) -> Self {
        match arg.chars().next() {
            Some('w' | 'W') => Self::Write,
            _ => Self::Read,
        }
    }
}

/// A complete description of one run, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Read or write.
    pub mode: Mode,
    /// USB vendor ID of the target device.
    pub vendor_id: u16,
    /// USB product ID of the target device.
    pub product_id: u16,
    /// Number of bytes to transfer (1..=65536).
    pub length: u32,
    /// First EEPROM address touched.
    pub start_address: u32,
    /// Whether `length` was given explicitly. In write mode an explicit
    /// length must be fully satisfied by the input.
    pub explicit_length: bool,
}

impl TransferRequest {
    /// Build a request. `length` defaults to the full 64 KiB address space
    /// and `start_address` to 0.
    pub fn new(
        mode: Mode,
        vendor_id: u16,
        product_id: u16,
        length: Option<u32>,
        start_address: Option<u32>,
    ) -> Result<Self> {
        let explicit_length = length.is_some();
        let length = length.unwrap_or(MAX_TRANSFER_SIZE);
        if length == 0 {
            return Err(Error::InvalidArgument("size must be at least 1 byte"));
        }
        if length > MAX_TRANSFER_SIZE {
            return Err(Error::InvalidArgument("size must not be greater than 65536"));
        }

        Ok(Self {
            mode,
            vendor_id,
            product_id,
            length,
            start_address: start_address.unwrap_or(0),
            explicit_length,
        })
    }
}

/// Byte counters accumulated over a run.
///
/// The device-side and stream-side counters are kept separately so the
/// summary can report both ends of the copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferResult {
    /// Bytes returned by EEPROM read transfers.
    pub bytes_from_device: u32,
    /// Bytes sent with EEPROM write transfers.
    pub bytes_to_device: u32,
    /// Bytes consumed from the input stream.
    pub bytes_from_input: u32,
    /// Bytes written to the output stream.
    pub bytes_to_output: u32,
    /// Number of control transfers issued.
    pub chunks: usize,
}
