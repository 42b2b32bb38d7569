//! Command-line front-end for [`imgdec_jpeg`] and [`imgdec_bmp`].
//!
//! This binary is a thin convenience wrapper, not part of either decoder's
//! public API: it sniffs the input's extension/magic bytes, decodes it, and
//! reports either the image's dimensions or writes out a raw pixel dump.
//!
//! Exit codes:
//! - `0`: decoded successfully
//! - `1`: the file was malformed (bad magic bytes, truncated segment, a
//!   container that isn't a recognised JPEG or BMP at all, ...)
//! - `2`: the file used a real but unsupported feature of its format
//!   (progressive JPEG, a paletted/compressed BMP, ...)
//! - `3`: an I/O failure reading the input or writing `--out`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use imgdec_bmp::BmpDecoder;
use imgdec_jpeg::JpegDecoder;
use log::error;

#[derive(Parser)]
#[command(name = "imgdec", about = "Decode a baseline JPEG or 24-bit BMP image")]
struct Args {
    /// Path to a .jpg/.jpeg or .bmp file.
    path: PathBuf,

    /// Print only width/height/component count, without decoding pixels.
    #[arg(long)]
    info_only: bool,

    /// Write decoded pixels to this path as a raw interleaved byte dump.
    #[arg(long)]
    out: Option<PathBuf>
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let bytes = match std::fs::read(&args.path) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("Could not read {}: {err}", args.path.display());
            return ExitCode::from(3);
        }
    };

    if imgdec_bmp::probe_bmp(&bytes) {
        return run_bmp(&bytes, &args);
    }
    if bytes.starts_with(&[0xFF, 0xD8]) {
        return run_jpeg(&bytes, &args);
    }

    error!("{}: not a recognised JPEG or BMP file", args.path.display());
    ExitCode::from(1)
}

fn run_jpeg(bytes: &[u8], args: &Args) -> ExitCode {
    let mut decoder = JpegDecoder::new(bytes);

    if args.info_only {
        return match decoder.read_info() {
            Ok(info) => {
                println!("jpeg {}x{} components={}", info.width(), info.height(), info.components);
                ExitCode::SUCCESS
            }
            Err(err) => report(&err)
        };
    }

    match decoder.decode() {
        Ok(pixels) => write_output(args, &pixels),
        Err(err) => report(&err)
    }
}

fn run_bmp(bytes: &[u8], args: &Args) -> ExitCode {
    let mut decoder = BmpDecoder::new(bytes);

    if args.info_only {
        return match decoder.decode_headers() {
            Ok(()) => {
                let (width, height) = decoder.dimensions();
                println!("bmp {width}x{height}");
                ExitCode::SUCCESS
            }
            Err(err) => report(&err)
        };
    }

    match decoder.decode() {
        Ok(pixels) => write_output(args, &pixels),
        Err(err) => report(&err)
    }
}

fn write_output(args: &Args, pixels: &[u8]) -> ExitCode {
    if let Some(out) = &args.out {
        if let Err(err) = std::fs::write(out, pixels) {
            error!("Could not write {}: {err}", out.display());
            return ExitCode::from(3);
        }
    } else {
        println!("decoded {} bytes", pixels.len());
    }
    ExitCode::SUCCESS
}

/// Map a decode error onto an exit code: `2` for a real-but-unsupported
/// feature, `1` for a malformed/corrupt file.
fn report(err: &dyn std::error::Error) -> ExitCode {
    let message = err.to_string();
    error!("{message}");
    if message.contains("not supported") || message.contains("Unsupported") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
