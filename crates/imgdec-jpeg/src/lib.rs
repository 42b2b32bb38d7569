//! A baseline (SOF0) sequential-DCT JPEG decoder.
//!
//! This decoder handles the common case: 8-bit precision, Huffman entropy
//! coding, a single interleaved scan, 1 (grayscale) or 3 (YCbCr) components,
//! 4:4:4/4:2:2/4:2:0/4:4:0 chroma sub-sampling, and restart markers.
//!
//! Progressive (`SOF2`), lossless, hierarchical and arithmetic-coded JPEGs
//! are detected and rejected with [`errors::DecodeErrors::Unsupported`]
//! rather than silently misdecoded.
//!
//! ```no_run
//! use imgdec_jpeg::JpegDecoder;
//!
//! let data = std::fs::read("image.jpg").unwrap();
//! let pixels = JpegDecoder::new(&data).decode().unwrap();
//! ```

mod bitstream;
mod color_convert;
mod components;
mod decoder;
pub mod errors;
mod huffman;
mod idct;
mod marker;
mod misc;
mod reader;
mod upsampler;

pub use zune_core;
pub use zune_core::colorspace::ColorSpace;
pub use zune_core::options::DecoderOptions;

pub use crate::decoder::{ImageInfo, JfifHeader, JpegDecoder};
pub use crate::errors::DecodeErrors;
