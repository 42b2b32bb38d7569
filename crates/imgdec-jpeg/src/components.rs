//! Per-component frame and scan state.

use crate::errors::DecodeErrors;

/// Chroma sub-sampling layout, derived from the `(h_max, v_max)` pair found
/// across all components in the frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SampleRatios {
    /// No sub-sampling; every component has one sample per luma sample.
    None,
    /// Horizontal 2:1 sub-sampling (4:2:2).
    H,
    /// Vertical 2:1 sub-sampling (rare, but legal).
    V,
    /// Both horizontal and vertical 2:1 sub-sampling (4:2:0).
    HV
}

/// A single frame component (e.g. `Y`, `Cb`, `Cr`) as declared by SOF0 and
/// referenced by SOS.
#[derive(Debug, Clone)]
pub struct Components {
    /// Component identifier byte from SOF0 (order is not guaranteed to be
    /// `1, 2, 3`, so SOS must look components up by id).
    pub id: u8,
    /// Horizontal sampling factor, 1..=4.
    pub horizontal_sample: usize,
    /// Vertical sampling factor, 1..=4.
    pub vertical_sample: usize,
    /// Index into the quantization table array this component uses.
    pub quantization_table_number: u8,
    /// Index into the DC Huffman table array, filled in by SOS.
    pub dc_huffman_table: usize,
    /// Index into the AC Huffman table array, filled in by SOS.
    pub ac_huffman_table: usize,
    /// Component width in samples, rounded up to a whole number of blocks.
    pub width_stride: usize,
    /// Component height in samples, rounded up to a whole number of blocks.
    pub height_stride: usize,
    /// How many 8x8 blocks wide this component's non-padded data is.
    pub block_width: usize,
    /// How many 8x8 blocks tall this component's non-padded data is.
    pub block_height: usize
}

impl Components {
    /// Build a component from the 3-byte SOF0 component descriptor
    /// `[id, sampling_factors, quantization_table_number]`.
    pub fn from(bytes: [u8; 3]) -> Result<Components, DecodeErrors> {
        let id = bytes[0];
        let horizontal_sample = (bytes[1] >> 4) as usize;
        let vertical_sample = (bytes[1] & 0x0F) as usize;
        let quantization_table_number = bytes[2];

        if !(1..=4).contains(&horizontal_sample) || !(1..=4).contains(&vertical_sample) {
            return Err(DecodeErrors::SofError(format!(
                "Invalid sampling factor {horizontal_sample}x{vertical_sample} for component {id}, expected values in 1..=4"
            )));
        }
        if quantization_table_number > 3 {
            return Err(DecodeErrors::SofError(format!(
                "Invalid quantization table index {quantization_table_number} for component {id}"
            )));
        }

        Ok(Components {
            id,
            horizontal_sample,
            vertical_sample,
            quantization_table_number,
            dc_huffman_table: 0,
            ac_huffman_table: 0,
            width_stride: 0,
            height_stride: 0,
            block_width: 0,
            block_height: 0
        })
    }
}
