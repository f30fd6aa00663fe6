//! EEPROM transfers: reading the EEPROM into a stream and writing a stream
//! into the EEPROM through vend_ax.
//!
//! Both directions walk a [`ChunkPlan`] and issue one `0xA2` vendor request
//! per chunk. The first failed request ends the run; nothing is retried.
//!
//! ```no_run
//! use fx2eeprom::{read_eeprom, Fx2Device, Mode, TransferRequest, VendAx};
//!
//! let request = TransferRequest::new(Mode::Read, 0x04b4, 0x8613, Some(256), None)?;
//! let dev = Fx2Device::open(request.vendor_id, request.product_id)?;
//! VendAx::from_file("vend_ax.bin")?.load(&dev)?;
//!
//! let mut contents = Vec::new();
//! let result = read_eeprom(&dev, &request, &mut contents)?;
//! assert_eq!(result.bytes_from_device, 256);
//! # Ok::<(), fx2eeprom::Error>(())
//! ```

use std::io::{self, Read, Write};

use crate::chunk::{Chunk, ChunkPlan};
use crate::constants::{CHUNK_SIZE, EEPROM_LOCATOR, VENDAX_EEPROM_REQUEST};
use crate::error::{Error, Result};
use crate::transport::ControlTransport;
use crate::types::{Mode, TransferRequest, TransferResult};

/// Run `request` in whichever direction its mode selects.
///
/// Only `input` is used in write mode and only `output` in read mode.
pub fn transfer<T, R, W>(
    dev: &T,
    request: &TransferRequest,
    input: &mut R,
    output: &mut W,
) -> Result<TransferResult>
where
    T: ControlTransport,
    R: Read,
    W: Write,
{
    match request.mode {
        Mode::Read => read_eeprom(dev, request, output),
        Mode::Write => write_eeprom(dev, request, input),
    }
}

/// Read `request.length` bytes starting at `request.start_address` and copy
/// them to `output`.
///
/// Every byte the device returns is written out, so a short transfer yields
/// a shorter output rather than padding.
pub fn read_eeprom<T, W>(dev: &T, request: &TransferRequest, output: &mut W) -> Result<TransferResult>
where
    T: ControlTransport,
    W: Write,
{
    warn_on_wrap(request);

    let mut result = TransferResult::default();
    let plan = ChunkPlan::new(request.start_address, request.length);
    let last = plan.len().saturating_sub(1);

    for chunk in plan {
        let data = dev
            .control_in(
                VENDAX_EEPROM_REQUEST,
                chunk.wire_address(),
                EEPROM_LOCATOR,
                chunk.size,
            )
            .map_err(|source| transfer_error(&chunk, source))?;
        result.chunks += 1;

        log::debug!(
            "read chunk {} at 0x{:04x}: {}/{} bytes",
            chunk.index,
            chunk.address,
            data.len(),
            chunk.size
        );
        if data.len() < usize::from(chunk.size) && chunk.index != last {
            warn_short(&chunk, data.len());
        }

        result.bytes_from_device += data.len() as u32;
        output.write_all(&data)?;
        result.bytes_to_output += data.len() as u32;
    }

    output.flush()?;
    Ok(result)
}

/// Copy `input` into the EEPROM starting at `request.start_address`.
///
/// With an explicit length the input must supply all of it, otherwise the
/// run fails with [`Error::SizeMismatch`] before the incomplete chunk is
/// sent. Without one, the run ends at end-of-input: a partial last chunk
/// is written as-is, an empty one ends the run.
pub fn write_eeprom<T, R>(dev: &T, request: &TransferRequest, input: &mut R) -> Result<TransferResult>
where
    T: ControlTransport,
    R: Read,
{
    warn_on_wrap(request);

    let mut result = TransferResult::default();
    let mut buffer = [0u8; CHUNK_SIZE as usize];

    for chunk in ChunkPlan::new(request.start_address, request.length) {
        let wanted = usize::from(chunk.size);
        let got = read_full(input, &mut buffer[..wanted])?;
        result.bytes_from_input += got as u32;

        let end_of_input = got < wanted;
        if end_of_input {
            if request.explicit_length {
                return Err(Error::SizeMismatch {
                    expected: request.length,
                    actual: result.bytes_from_input,
                });
            }
            if got == 0 {
                log::debug!("end of input before chunk {}", chunk.index);
                break;
            }
        }

        let sent = dev
            .control_out(
                VENDAX_EEPROM_REQUEST,
                chunk.wire_address(),
                EEPROM_LOCATOR,
                &buffer[..got],
            )
            .map_err(|source| transfer_error(&chunk, source))?;
        result.chunks += 1;
        result.bytes_to_device += sent as u32;

        log::debug!("wrote chunk {} at 0x{:04x}: {sent}/{got} bytes", chunk.index, chunk.address);
        if sent < got {
            warn_short(&chunk, sent);
        }

        if end_of_input {
            break;
        }
    }

    Ok(result)
}

/// Fill `buf` from `input`, stopping early only at end-of-input.
fn read_full<R: Read>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn transfer_error(chunk: &Chunk, source: nusb::transfer::TransferError) -> Error {
    Error::Transfer {
        chunk: chunk.index,
        address: chunk.address,
        source,
    }
}

fn warn_short(chunk: &Chunk, moved: usize) {
    log::warn!(
        "short transfer on chunk {} at 0x{:04x} ({moved} of {} bytes); \
         later chunks still advance by {CHUNK_SIZE}",
        chunk.index,
        chunk.address,
        chunk.size
    );
}

fn warn_on_wrap(request: &TransferRequest) {
    if ChunkPlan::wraps(request.start_address, request.length) {
        log::warn!(
            "0x{:x} bytes from 0x{:x} run past 0xffff; addresses wrap around",
            request.length,
            request.start_address
        );
    }
}
