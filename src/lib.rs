//! Read and write the serial EEPROM of Cypress FX2 USB microcontrollers.
//!
//! The FX2 has no built-in EEPROM commands. This crate first loads the
//! vend_ax helper firmware into the chip's RAM, then moves the EEPROM
//! contents in 64-byte vendor control transfers. It uses
//! [nusb](https://crates.io/crates/nusb) as the USB backend, with no C
//! dependencies or `libusb` required.
//!
//! # Quick Start
//!
//! ```no_run
//! use fx2eeprom::{transfer, Fx2Device, Mode, TransferRequest, VendAx};
//!
//! // Dump the first 256 bytes of the EEPROM to stdout
//! let request = TransferRequest::new(Mode::Read, 0x04b4, 0x8613, Some(256), None)?;
//! let dev = Fx2Device::open(request.vendor_id, request.product_id)?;
//! VendAx::from_file("vend_ax.bin")?.load(&dev)?;
//! transfer(&dev, &request, &mut std::io::empty(), &mut std::io::stdout().lock())?;
//! # Ok::<(), fx2eeprom::Error>(())
//! ```
//!
//! # Features
//!
//! - **Device session**: Open by VID/PID, detach the kernel driver, claim
//!   interface 0, release everything on drop ([`device`]).
//! - **Firmware loading**: Upload a vend_ax RAM image over the FX2's
//!   built-in `0xA0` loader ([`firmware`]).
//! - **Chunked transfers**: Fixed 64-byte chunks with fixed address
//!   stepping, explicit and open-ended write lengths ([`eeprom`], [`chunk`]).
//! - **Testable seam**: All traffic goes through [`ControlTransport`], so
//!   the transfer logic runs against any implementation.

pub mod chunk;
pub mod constants;
pub mod device;
pub mod eeprom;
pub mod error;
pub mod firmware;
pub mod transport;
pub mod types;

// ---- Convenience re-exports ----

pub use chunk::{Chunk, ChunkPlan};
pub use device::Fx2Device;
pub use eeprom::{read_eeprom, transfer, write_eeprom};
pub use error::{Error, Result};
pub use firmware::VendAx;
pub use transport::ControlTransport;
pub use types::*;
