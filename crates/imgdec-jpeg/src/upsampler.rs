//! Chroma upsampling.
//!
//! Subsampled chroma planes are brought back up to the luma plane's
//! resolution by nearest-neighbor replication: each chroma sample is
//! repeated `h_scale` times horizontally and `v_scale` times vertically.
//! Real-world decoders often use a smoother (triangle/bilinear) filter here;
//! this one deliberately doesn't, since nearest-neighbor is what a baseline
//! decoder is required to produce at minimum and it keeps the upsampler
//! trivially verifiable.

/// Upsample a single chroma plane of size `in_width x in_height` to
/// `in_width * h_scale x in_height * v_scale`, writing into `out` which must
/// be at least that large, row-major.
pub fn upsample_nearest(
    input: &[u8], in_width: usize, in_height: usize, h_scale: usize, v_scale: usize, out: &mut [u8]
) {
    let out_width = in_width * h_scale;
    debug_assert!(out.len() >= out_width * in_height * v_scale);

    for y in 0..in_height {
        let src_row = &input[y * in_width..(y + 1) * in_width];
        for vy in 0..v_scale {
            let out_row_start = (y * v_scale + vy) * out_width;
            let out_row = &mut out[out_row_start..out_row_start + out_width];
            for (x, &sample) in src_row.iter().enumerate() {
                let start = x * h_scale;
                out_row[start..start + h_scale].fill(sample);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_replication() {
        let input = [1u8, 2, 3, 4];
        let mut out = [0u8; 16];
        upsample_nearest(&input, 2, 2, 2, 2, &mut out);
        assert_eq!(out, [1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]);
    }

    #[test]
    fn horizontal_only() {
        let input = [5u8, 6];
        let mut out = [0u8; 4];
        upsample_nearest(&input, 2, 1, 2, 1, &mut out);
        assert_eq!(out, [5, 5, 6, 6]);
    }
}
