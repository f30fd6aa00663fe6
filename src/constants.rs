//! Protocol constants for FX2 EEPROM access.
//!
//! These constants define the USB vendor request codes, request types and
//! other wire-level details of the vend_ax EEPROM protocol and of the FX2
//! RAM loader. Most users should not need to use these directly.

use std::time::Duration;

// ---- bmRequestType values ----

/// Device-to-host, vendor, device recipient.
pub const REQUEST_TYPE_READ: u8 = 0xC0;
/// Host-to-device, vendor, device recipient.
pub const REQUEST_TYPE_WRITE: u8 = 0x40;

// ---- vend_ax vendor request codes ----

/// Read or write the serial EEPROM (direction selects the operation).
pub const VENDAX_EEPROM_REQUEST: u8 = 0xA2;

/// `wIndex` sent with every EEPROM request, selecting the EEPROM location.
pub const EEPROM_LOCATOR: u16 = 1 << 4;

// ---- Transfer geometry ----

/// Bytes moved per EEPROM control transfer (the FX2 EP0 buffer size).
pub const CHUNK_SIZE: u16 = 64;

/// Largest transfer the tool performs: the whole 16-bit EEPROM address space.
pub const MAX_TRANSFER_SIZE: u32 = 0x1_0000;

/// Default timeout for every control transfer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

// ---- FX2 RAM loader ----

/// Firmware load request, handled by the FX2 silicon itself.
pub const FX2_RAM_LOAD_REQUEST: u8 = 0xA0;

/// CPUCS register address on FX2 / FX2LP parts.
pub const FX2_CPUCS: u16 = 0xE600;

/// CPUCS register address on the older AN21xx / FX parts.
pub const AN21XX_CPUCS: u16 = 0x7F92;

/// Size of the FX2 internal code RAM that a helper firmware may occupy.
pub const FX2_RAM_SIZE: usize = 0x4000;

/// Largest payload sent in a single RAM load request.
pub const FX2_RAM_CHUNK_SIZE: usize = 1023;
