//! A minimal BMP decoder, restricted to 24-bit uncompressed (`BI_RGB`)
//! images.
//!
//! ```no_run
//! use imgdec_bmp::BmpDecoder;
//!
//! let data = std::fs::read("image.bmp").unwrap();
//! let pixels = BmpDecoder::new(&data).decode().unwrap();
//! ```

mod decoder;
pub mod errors;

pub use zune_core;
pub use zune_core::colorspace::ColorSpace;
pub use zune_core::options::DecoderOptions;

pub use crate::decoder::{probe_bmp, BmpDecoder};
pub use crate::errors::BmpDecoderErrors;

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_2x2_bmp() -> Vec<u8> {
        // 2x2, 24-bit, BI_RGB. Row stride is padded to a 4-byte boundary:
        // 2 pixels * 3 bytes = 6, padded to 8.
        let mut data = Vec::new();
        data.extend_from_slice(b"BM");
        data.extend_from_slice(&0u32.to_le_bytes()); // file size, unchecked
        data.extend_from_slice(&0u16.to_le_bytes()); // reserved1
        data.extend_from_slice(&0u16.to_le_bytes()); // reserved2
        let header_size = 14 + 40;
        data.extend_from_slice(&(header_size as u32).to_le_bytes()); // data offset

        data.extend_from_slice(&40u32.to_le_bytes()); // BITMAPINFOHEADER size
        data.extend_from_slice(&2i32.to_le_bytes()); // width
        data.extend_from_slice(&2i32.to_le_bytes()); // height, positive -> bottom-up
        data.extend_from_slice(&1u16.to_le_bytes()); // planes
        data.extend_from_slice(&24u16.to_le_bytes()); // bit count
        data.extend_from_slice(&0u32.to_le_bytes()); // compression: BI_RGB
        data.extend_from_slice(&0u32.to_le_bytes()); // size image
        data.extend_from_slice(&0i32.to_le_bytes()); // x pels per meter
        data.extend_from_slice(&0i32.to_le_bytes()); // y pels per meter
        data.extend_from_slice(&0u32.to_le_bytes()); // colors used
        data.extend_from_slice(&0u32.to_le_bytes()); // colors important

        // Bottom row first (red, green), then top row (blue, white), each
        // stored as B, G, R with 2 bytes of padding per row.
        data.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]); // red, green
        data.extend_from_slice(&[255, 0, 0, 255, 255, 255, 0, 0]); // blue, white

        data
    }

    #[test]
    fn decodes_minimal_bottom_up_image() {
        let data = minimal_2x2_bmp();
        let mut decoder = BmpDecoder::new(&data);
        let pixels = decoder.decode().unwrap();
        assert_eq!(decoder.dimensions(), (2, 2));
        // Output is top-down: row 0 should be the file's last stored row
        // (blue, white), row 1 the first stored row (red, green).
        assert_eq!(&pixels[0..3], &[0, 0, 255]); // blue
        assert_eq!(&pixels[3..6], &[255, 255, 255]); // white
        assert_eq!(&pixels[6..9], &[255, 0, 0]); // red
        assert_eq!(&pixels[9..12], &[0, 255, 0]); // green
    }

    #[test]
    fn probe_rejects_non_bmp() {
        assert!(!probe_bmp(b"not a bmp"));
    }

    #[test]
    fn rejects_non_24_bit() {
        let mut data = minimal_2x2_bmp();
        data[28] = 32; // bit count low byte
        let mut decoder = BmpDecoder::new(&data);
        assert!(matches!(decoder.decode_headers(), Err(BmpDecoderErrors::Unsupported(_))));
    }
}
