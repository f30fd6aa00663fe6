//! Command-line front end.
//!
//! Usage: `fx2eeprom {w|r} VID PID [SIZE [ADDRESS]]`
//!
//! - Read: `fx2eeprom r 0x04b4 0x8613 256 > eeprom.raw`
//! - Write: `fx2eeprom w 0x04b4 0x8613 < eeprom.raw`
//!
//! SIZE defaults to 65536 and ADDRESS to 0. Without SIZE, write mode stores
//! the input until end-of-file.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use fx2eeprom::{transfer, Error, Fx2Device, Mode, Result, TransferRequest, TransferResult, VendAx};

#[derive(Parser, Debug)]
#[command(
    name = "fx2eeprom",
    version,
    about = "Read and write the EEPROM of an FX2 chip with the help of the vend_ax firmware"
)]
struct Args {
    /// `w` to write stdin to the EEPROM, `r` to dump the EEPROM to stdout.
    mode: String,

    /// USB vendor ID (decimal, 0x-prefixed hex or 0-prefixed octal).
    #[arg(value_parser = parse_u16)]
    vid: u16,

    /// USB product ID.
    #[arg(value_parser = parse_u16)]
    pid: u16,

    /// Number of bytes to transfer, at most 65536.
    #[arg(value_parser = parse_u32)]
    size: Option<u32>,

    /// EEPROM address to start at.
    #[arg(value_parser = parse_u32)]
    address: Option<u32>,

    /// Raw vend_ax RAM image, loaded at address 0.
    #[arg(long, env = "FX2EEPROM_VENDAX")]
    firmware: Option<PathBuf>,

    /// Do not upload vend_ax; the device already runs it.
    #[arg(long)]
    skip_firmware: bool,

    /// Control transfer timeout in milliseconds.
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = std::error::Error::source(cause);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let request = TransferRequest::new(
        Mode::from_arg(&args.mode),
        args.vid,
        args.pid,
        args.size,
        args.address,
    )?;

    let firmware = if args.skip_firmware {
        None
    } else {
        let path = args.firmware.as_ref().ok_or(Error::FirmwareMissing)?;
        Some(VendAx::from_file(path)?)
    };

    let mut dev = Fx2Device::open(request.vendor_id, request.product_id)?;
    dev.set_timeout(Duration::from_millis(args.timeout_ms));

    match firmware {
        Some(fw) => fw.load(&dev)?,
        None => log::warn!("skipping vend_ax upload"),
    }

    let result = transfer(
        &dev,
        &request,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    )?;

    report(request.mode, &result);
    Ok(())
}

fn report(mode: Mode, result: &TransferResult) {
    match mode {
        Mode::Read => {
            eprintln!("Read {} bytes from EEPROM", result.bytes_from_device);
            eprintln!("Wrote {} bytes to stdout", result.bytes_to_output);
        }
        Mode::Write => {
            eprintln!("Read {} bytes from stdin", result.bytes_from_input);
            eprintln!("Wrote {} bytes to EEPROM", result.bytes_to_device);
        }
    }
}

/// Parse a number with C `strtoul(.., 0)` base detection.
fn parse_number(input: &str) -> std::result::Result<u32, String> {
    let s = input.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        u32::from_str_radix(&s[1..], 8)
    } else {
        s.parse::<u32>()
    };
    parsed.map_err(|e| format!("invalid number '{input}': {e}"))
}

fn parse_u32(input: &str) -> std::result::Result<u32, String> {
    parse_number(input)
}

fn parse_u16(input: &str) -> std::result::Result<u16, String> {
    let n = parse_number(input)?;
    u16::try_from(n).map_err(|_| format!("'{input}' does not fit in 16 bits"))
}
