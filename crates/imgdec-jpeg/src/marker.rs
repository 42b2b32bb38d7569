//! JPEG marker codes we recognise while splitting the stream into segments.

/// A marker found in a JPEG bitstream.
///
/// Only the markers relevant to a baseline, single-scan decoder are named
/// explicitly; everything else is carried as `APP(n)`/`Unknown` so the
/// segment splitter can skip it without understanding its payload.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub enum Marker {
    /// Start of image, `0xFFD8`.
    SOI,
    /// End of image, `0xFFD9`.
    EOI,
    /// Start of frame, baseline DCT (`0xFFC0`). Other SOF variants are
    /// recognised only so we can report them as unsupported.
    SOF(u8),
    /// Define Huffman table(s), `0xFFC4`.
    DHT,
    /// Define quantization table(s), `0xFFDB`.
    DQT,
    /// Define restart interval, `0xFFDD`.
    DRI,
    /// Start of scan, `0xFFDA`.
    SOS,
    /// Restart marker `0xFFD0..=0xFFD7`, carries its low 3 bits.
    RST(u8),
    /// Application segment `0xFFE0..=0xFFEF`, carries `n`.
    APP(u8),
    /// Comment segment, `0xFFFE`.
    COM,
    /// Any other marker we don't special-case; carried verbatim so it can be
    /// skipped by length.
    Unknown(u8)
}

impl Marker {
    /// Interpret the byte following a `0xFF` marker prefix.
    ///
    /// `0xFF00` (a stuffed literal `0xFF` byte) must never reach this
    /// function; the segment splitter consumes that case itself.
    pub fn from_u8(byte: u8) -> Option<Marker> {
        match byte {
            0xD8 => Some(Marker::SOI),
            0xD9 => Some(Marker::EOI),
            0xC0 => Some(Marker::SOF(0)),
            0xC1 => Some(Marker::SOF(1)),
            0xC2 => Some(Marker::SOF(2)),
            0xC3 => Some(Marker::SOF(3)),
            0xC5..=0xC7 => Some(Marker::SOF(byte - 0xC0)),
            0xC9..=0xCF => Some(Marker::SOF(byte - 0xC0)),
            0xC4 => Some(Marker::DHT),
            0xDB => Some(Marker::DQT),
            0xDD => Some(Marker::DRI),
            0xDA => Some(Marker::SOS),
            0xD0..=0xD7 => Some(Marker::RST(byte - 0xD0)),
            0xE0..=0xEF => Some(Marker::APP(byte - 0xE0)),
            0xFE => Some(Marker::COM),
            0x01 => None,
            _ => Some(Marker::Unknown(byte))
        }
    }
}
