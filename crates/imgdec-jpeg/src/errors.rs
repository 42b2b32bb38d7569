//! Error types returned by this crate.

use core::fmt::{Debug, Formatter};

/// Errors that can occur when decoding a baseline JPEG image.
#[allow(clippy::enum_variant_names)]
#[non_exhaustive]
pub enum DecodeErrors {
    /// The first two bytes of the stream were not `0xFFD8` (SOI).
    IllegalMagicBytes,
    /// A generic error with a static error message.
    FormatStatic(&'static str),
    /// A generic error with an owned, formatted error message.
    Format(String),
    /// An error occurred decoding a Huffman-coded block.
    HuffmanDecode(String),
    /// The DQT segment could not be parsed.
    DqtError(String),
    /// The SOF segment could not be parsed, or describes something we don't support.
    SofError(String),
    /// The SOS segment could not be parsed.
    SosError(String),
    /// The image exercises a real JPEG feature that this decoder does not implement.
    Unsupported(String),
    /// Ran out of bytes while a multi-byte read was in progress.
    ExhaustedData
}

impl Debug for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IllegalMagicBytes => {
                write!(f, "Start of image marker not found, is this a JPEG file?")
            }
            Self::FormatStatic(val) => write!(f, "{val}"),
            Self::Format(val) => write!(f, "{val}"),
            Self::HuffmanDecode(val) => write!(f, "Huffman decode error: {val}"),
            Self::DqtError(val) => write!(f, "DQT error: {val}"),
            Self::SofError(val) => write!(f, "SOF error: {val}"),
            Self::SosError(val) => write!(f, "SOS error: {val}"),
            Self::Unsupported(val) => write!(f, "Unsupported feature: {val}"),
            Self::ExhaustedData => write!(f, "Exhausted data while a read was in progress")
        }
    }
}

impl core::fmt::Display for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for DecodeErrors {}

impl From<&'static str> for DecodeErrors {
    fn from(value: &'static str) -> Self {
        DecodeErrors::FormatStatic(value)
    }
}

impl From<String> for DecodeErrors {
    fn from(value: String) -> Self {
        DecodeErrors::Format(value)
    }
}
