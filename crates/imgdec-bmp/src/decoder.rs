//! A minimal BMP decoder: 24-bit, uncompressed (`BI_RGB`) images only.

use log::{debug, trace};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;

use crate::errors::BmpDecoderErrors;

const BITMAPFILEHEADER_SIZE: usize = 14;
const BITMAPINFOHEADER_SIZE: usize = 40;

/// Check whether `bytes` looks like a BMP file, without fully decoding it.
///
/// Only checks the two-byte `BM` magic and that the declared info-header
/// size matches the one variant this crate understands; a `true` result is
/// not a guarantee that [`BmpDecoder::decode`] will succeed.
pub fn probe_bmp(bytes: &[u8]) -> bool {
    bytes.len() >= BITMAPFILEHEADER_SIZE + 4
        && &bytes[0..2] == b"BM"
        && u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]) == BITMAPINFOHEADER_SIZE as u32
}

/// A BMP decoder restricted to the 24-bit, uncompressed (`BI_RGB`) case.
///
/// Paletted images, RLE compression, bit-field masks and 1/4/8/16/32-bit
/// depths are all real BMP features this crate doesn't implement; such
/// files are rejected with [`BmpDecoderErrors::Unsupported`] rather than
/// misdecoded.
pub struct BmpDecoder<'a> {
    bytes: &'a [u8],
    options: DecoderOptions,
    width: usize,
    height: usize,
    flip_vertically: bool,
    data_offset: usize,
    decoded_headers: bool
}

impl<'a> BmpDecoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::new_with_options(bytes, DecoderOptions::default())
    }

    pub fn new_with_options(bytes: &'a [u8], options: DecoderOptions) -> Self {
        BmpDecoder {
            bytes,
            options,
            width: 0,
            height: 0,
            flip_vertically: false,
            data_offset: 0,
            decoded_headers: false
        }
    }

    /// Image dimensions, available after [`decode_headers`](Self::decode_headers) runs.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Always [`ColorSpace::RGB`]; this decoder only supports 24-bit `BI_RGB`.
    pub const fn colorspace(&self) -> ColorSpace {
        ColorSpace::RGB
    }

    /// Number of bytes [`decode`](Self::decode) will return.
    pub fn output_buffer_size(&self) -> Option<usize> {
        if !self.decoded_headers {
            return None;
        }
        Some(self.width * self.height * 3)
    }

    /// Parse the file header and the 40-byte `BITMAPINFOHEADER`, validating
    /// everything this decoder requires (24-bit depth, `BI_RGB`, a single
    /// color plane) without reading any pixel data.
    pub fn decode_headers(&mut self) -> Result<(), BmpDecoderErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        if self.bytes.len() < BITMAPFILEHEADER_SIZE + BITMAPINFOHEADER_SIZE {
            return Err(BmpDecoderErrors::TooSmallBuffer(
                BITMAPFILEHEADER_SIZE + BITMAPINFOHEADER_SIZE,
                self.bytes.len()
            ));
        }
        if &self.bytes[0..2] != b"BM" {
            return Err(BmpDecoderErrors::InvalidMagicBytes);
        }

        let data_offset = u32::from_le_bytes([self.bytes[10], self.bytes[11], self.bytes[12], self.bytes[13]]);

        let info_header_size =
            u32::from_le_bytes([self.bytes[14], self.bytes[15], self.bytes[16], self.bytes[17]]);
        if info_header_size != BITMAPINFOHEADER_SIZE as u32 {
            return Err(BmpDecoderErrors::UnsupportedInfoHeader(info_header_size));
        }

        let width = i32::from_le_bytes([self.bytes[18], self.bytes[19], self.bytes[20], self.bytes[21]]);
        let height = i32::from_le_bytes([self.bytes[22], self.bytes[23], self.bytes[24], self.bytes[25]]);
        let planes = u16::from_le_bytes([self.bytes[26], self.bytes[27]]);
        let bit_count = u16::from_le_bytes([self.bytes[28], self.bytes[29]]);
        let compression = u32::from_le_bytes([self.bytes[30], self.bytes[31], self.bytes[32], self.bytes[33]]);

        if width <= 0 {
            return Err(BmpDecoderErrors::Generic(format!("Width must be positive, got {width}")));
        }
        if height == 0 {
            return Err(BmpDecoderErrors::Generic("Height cannot be zero".to_string()));
        }
        if planes != 1 {
            return Err(BmpDecoderErrors::Generic(format!("Expected 1 color plane, found {planes}")));
        }
        if bit_count != 24 {
            return Err(BmpDecoderErrors::Unsupported(format!(
                "{bit_count}-bit BMP images are not supported, only 24-bit BI_RGB"
            )));
        }
        if compression != 0 {
            return Err(BmpDecoderErrors::Unsupported(
                "Compressed (RLE/BITFIELDS) BMP images are not supported, only BI_RGB".to_string()
            ));
        }

        // A negative height means the rows are stored top-down; a positive
        // height (the common case) means bottom-up, so row 0 of our output
        // is the file's last stored row.
        self.flip_vertically = height > 0;
        self.width = width as usize;
        self.height = height.unsigned_abs() as usize;
        self.data_offset = data_offset as usize;

        if self.width > self.options.get_max_width() || self.height > self.options.get_max_height() {
            return Err(BmpDecoderErrors::TooLargeDimensions(
                "width/height",
                self.options.get_max_width().max(self.options.get_max_height()),
                self.width.max(self.height)
            ));
        }

        debug!(
            "BMP headers: {}x{}, 24-bit BI_RGB, {}",
            self.width,
            self.height,
            if self.flip_vertically { "bottom-up" } else { "top-down" }
        );

        self.decoded_headers = true;
        Ok(())
    }

    /// Decode pixel data into `RGB8`, top-down, row-major, with no padding.
    pub fn decode(&mut self) -> Result<Vec<u8>, BmpDecoderErrors> {
        self.decode_headers()?;

        let out_row_width = self.width * 3;
        // Each stored row is padded to a 4-byte boundary.
        let in_row_width = (self.width * 3 + 3) & !3;
        let needed = self.data_offset + in_row_width * self.height;
        if self.bytes.len() < needed {
            return Err(BmpDecoderErrors::TooSmallBuffer(needed, self.bytes.len()));
        }

        let mut out = vec![0u8; out_row_width * self.height];
        let pixels = &self.bytes[self.data_offset..];

        for row in 0..self.height {
            let src_start = row * in_row_width;
            let src = &pixels[src_start..src_start + out_row_width];

            // Rows are bottom-up in the file when `flip_vertically` is set,
            // so the file's row `row` becomes output row `height - 1 - row`.
            let dst_row = if self.flip_vertically { self.height - 1 - row } else { row };
            let dst = &mut out[dst_row * out_row_width..(dst_row + 1) * out_row_width];

            for (src_px, dst_px) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
                // Stored as B, G, R; output as R, G, B.
                dst_px[0] = src_px[2];
                dst_px[1] = src_px[1];
                dst_px[2] = src_px[0];
            }
        }

        trace!("Decoded {} rows of {} bytes each", self.height, out_row_width);
        Ok(out)
    }
}
