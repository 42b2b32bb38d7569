//! Small constant tables shared across the decoder.

/// Maps a zig-zag scan index to its natural (row-major) position inside an
/// 8x8 block.
///
/// The table is padded past index 63 with repeated `63` entries: a
/// corrupt AC run can in principle push the zig-zag cursor past 63 before
/// the bounds check fires, and indexing into the padding keeps that a
/// logic error instead of a panic.
pub const UN_ZIGZAG: [usize; 64 + 16] = [
    0, 1, 8, 16, 9, 2, 3, 10, 17, 24, 32, 25, 18, 11, 4, 5, 12, 19, 26, 33, 40, 48, 41, 34, 27, 20,
    13, 6, 7, 14, 21, 28, 35, 42, 49, 56, 57, 50, 43, 36, 29, 22, 15, 23, 30, 37, 44, 51, 58, 59,
    52, 45, 38, 31, 39, 46, 53, 60, 61, 54, 47, 55, 62, 63, 63, 63, 63, 63, 63, 63, 63, 63, 63,
    63, 63, 63, 63, 63, 63, 63
];

/// Number of samples in an 8x8 DCT block.
pub const DCT_BLOCK: usize = 64;

/// Maximum number of components a frame we accept can declare (`Y`, `Cb`,
/// `Cr`, plus one spare slot; CMYK is out of scope).
pub const MAX_COMPONENTS: usize = 4;

/// Hard ceiling on width/height we'll ever attempt, guarding against
/// a crafted SOF claiming an absurd canvas.
pub const MAX_DIMENSIONS: usize = 1 << 27;
