//! Error types returned by this crate.

use core::fmt::{Debug, Formatter};

/// Errors that can occur when decoding a 24-bit uncompressed BMP image.
#[non_exhaustive]
pub enum BmpDecoderErrors {
    /// The first two bytes weren't `BM`.
    InvalidMagicBytes,
    /// The buffer was too small to hold a declared field.
    TooSmallBuffer(usize, usize),
    /// A generic error with a static message.
    GenericStatic(&'static str),
    /// A generic error with an owned, formatted message.
    Generic(String),
    /// Width or height exceeded a configured/hard limit.
    TooLargeDimensions(&'static str, usize, usize),
    /// This crate only supports the BITMAPINFOHEADER (40-byte) info header.
    UnsupportedInfoHeader(u32),
    /// This crate only supports uncompressed (`BI_RGB`), 24-bit, bottom-up
    /// or top-down images; anything else (RLE, palettes, bitfields, other
    /// bit depths) is reported here.
    Unsupported(String)
}

impl Debug for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMagicBytes => write!(f, "Invalid magic bytes, expected 'BM' at the start of the file"),
            Self::TooSmallBuffer(expected, found) => {
                write!(f, "Too small a buffer, expected at least {expected} bytes, found {found}")
            }
            Self::GenericStatic(val) => write!(f, "{val}"),
            Self::Generic(val) => write!(f, "{val}"),
            Self::TooLargeDimensions(field, limit, found) => {
                write!(f, "{field} {found} exceeds the configured maximum of {limit}")
            }
            Self::UnsupportedInfoHeader(size) => {
                write!(f, "Unsupported BMP info header size {size}, only the 40-byte BITMAPINFOHEADER is supported")
            }
            Self::Unsupported(val) => write!(f, "Unsupported feature: {val}")
        }
    }
}

impl core::fmt::Display for BmpDecoderErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for BmpDecoderErrors {}
