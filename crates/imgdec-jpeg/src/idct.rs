//! Inverse DCT dispatch.
//!
//! The production zune-jpeg decoder this crate is descended from picks
//! between AVX2/NEON/scalar IDCT kernels at runtime. Runtime CPU dispatch
//! isn't part of what this decoder needs to be correct, so only the scalar
//! kernel made the trip over; `choose_idct_func` still exists as the single
//! seam the MCU loop calls through, in case a platform-specific kernel is
//! ever worth adding back.

mod scalar;

pub use scalar::{idct_dc_only, idct_int};

/// Function pointer type for an IDCT kernel: takes a dequantized,
/// zig-zag-descattered 8x8 block and writes clamped spatial-domain samples
/// into `out`, `stride` elements apart per row.
pub type IDCTPtr = fn(&mut [i32; 64], &mut [i16], usize);

/// Select the IDCT kernel to use.
pub fn choose_idct_func() -> IDCTPtr {
    idct_int
}
