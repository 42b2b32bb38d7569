//! Colorspace conversion dispatch.

mod scalar;

pub use scalar::{gray_to_rgb, ycbcr_to_grayscale, ycbcr_to_rgb};
