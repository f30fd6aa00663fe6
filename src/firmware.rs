//! Loading the vend_ax helper firmware into FX2 RAM.
//!
//! The FX2 silicon answers vendor request `0xA0` even without firmware:
//! it writes the request's data into internal RAM at the address in
//! `wValue`. Loading a program means holding the 8051 in reset through the
//! CPUCS register, writing the image, then releasing reset so the new
//! code starts. Once vend_ax runs, the `0xA2` EEPROM requests are available.
//!
//! Images are flat binaries loaded at address 0x0000.

use std::fs;
use std::path::Path;

use crate::constants::{FX2_CPUCS, FX2_RAM_CHUNK_SIZE, FX2_RAM_LOAD_REQUEST, FX2_RAM_SIZE};
use crate::error::{Error, Result};
use crate::transport::ControlTransport;

/// A vend_ax RAM image ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendAx {
    image: Vec<u8>,
    cpucs: u16,
}

impl VendAx {
    /// Wrap a raw RAM image.
    pub fn from_bytes(image: impl Into<Vec<u8>>) -> Result<Self> {
        let image = image.into();
        if image.is_empty() {
            return Err(Error::FirmwareImage("image is empty"));
        }
        if image.len() > FX2_RAM_SIZE {
            return Err(Error::FirmwareImage("image does not fit into FX2 RAM"));
        }
        Ok(Self {
            image,
            cpucs: FX2_CPUCS,
        })
    }

    /// Read a raw RAM image from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let image = fs::read(path.as_ref())?;
        Self::from_bytes(image)
    }

    /// Use a different CPUCS register address, e.g.
    /// [`AN21XX_CPUCS`](crate::constants::AN21XX_CPUCS) for older parts.
    pub fn with_cpucs(mut self, cpucs: u16) -> Self {
        self.cpucs = cpucs;
        self
    }

    /// The raw image bytes.
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Upload the image and start it.
    pub fn load<T: ControlTransport>(&self, dev: &T) -> Result<()> {
        log::info!("loading vend_ax ({} bytes)", self.image.len());

        self.set_reset(dev, true)?;

        for (i, segment) in self.image.chunks(FX2_RAM_CHUNK_SIZE).enumerate() {
            let address = (i * FX2_RAM_CHUNK_SIZE) as u16;
            log::debug!("RAM load 0x{address:04x}, {} bytes", segment.len());
            write_ram(dev, address, segment)?;
        }

        self.set_reset(dev, false)?;
        Ok(())
    }

    fn set_reset<T: ControlTransport>(&self, dev: &T, hold: bool) -> Result<()> {
        write_ram(dev, self.cpucs, &[u8::from(hold)])
    }
}

fn write_ram<T: ControlTransport>(dev: &T, address: u16, data: &[u8]) -> Result<()> {
    dev.control_out(FX2_RAM_LOAD_REQUEST, address, 0, data)
        .map_err(|source| Error::FirmwareLoad { address, source })?;
    Ok(())
}
