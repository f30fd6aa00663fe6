//! Error types for the fx2eeprom crate.

use nusb::transfer::TransferError;

/// The error type for FX2 EEPROM operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the nusb USB layer.
    #[error("USB error: {0}")]
    Usb(#[from] nusb::Error),

    /// No device with the requested IDs is connected.
    #[error("unable to find device {vendor:04x}:{product:04x}")]
    DeviceNotFound {
        /// The requested vendor ID.
        vendor: u16,
        /// The requested product ID.
        product: u16,
    },

    /// The kernel driver could not be detached or the interface not claimed.
    #[error("unable to claim interface {interface}: {source}")]
    ClaimFailed {
        /// The interface number.
        interface: u8,
        /// The underlying USB error.
        #[source]
        source: nusb::Error,
    },

    /// No vend_ax image was configured.
    #[error("no vend_ax firmware image given; use --firmware or FX2EEPROM_VENDAX")]
    FirmwareMissing,

    /// The vend_ax image cannot be loaded into FX2 RAM.
    #[error("invalid vend_ax image: {0}")]
    FirmwareImage(&'static str),

    /// A RAM load request failed while uploading vend_ax.
    #[error("failed to load vend_ax firmware at 0x{address:04x}: {source}")]
    FirmwareLoad {
        /// RAM address of the failed request.
        address: u16,
        /// The underlying transfer error.
        #[source]
        source: TransferError,
    },

    /// An EEPROM control transfer failed. The run stops at this chunk.
    #[error("unable to control transfer chunk {chunk} at EEPROM address 0x{address:04x}: {source}")]
    Transfer {
        /// Index of the failed chunk.
        chunk: usize,
        /// EEPROM address of the failed chunk.
        address: u32,
        /// The underlying transfer error.
        #[source]
        source: TransferError,
    },

    /// The input ended before an explicitly requested size was reached.
    #[error("wrong size from stdin - expected {expected}, got {actual}")]
    SizeMismatch {
        /// Requested number of bytes.
        expected: u32,
        /// Bytes actually available.
        actual: u32,
    },

    /// Invalid argument(s) were provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Reading the input or writing the output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Firmware problems exit with `-4`, everything else with `-1`, both
    /// truncated to a byte the way the shell reports them.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::FirmwareMissing | Self::FirmwareImage(_) | Self::FirmwareLoad { .. } => -4i8 as u8,
            _ => -1i8 as u8,
        }
    }
}

/// A specialized `Result` type for FX2 EEPROM operations.
pub type Result<T> = std::result::Result<T, Error>;
