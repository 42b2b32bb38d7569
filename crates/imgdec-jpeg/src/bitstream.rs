//! MSB-first entropy-coded bit reader.
//!
//! This mirrors the shape of `zune_core::bytestream::ZByteReader` (a cursor
//! over a borrowed byte slice with error-returning and non-error-returning
//! accessors) but adds the two things a JPEG entropy decoder needs on top of
//! a plain byte cursor: transparent `0xFF00` → `0xFF` byte unstuffing, and
//! restart-marker awareness so a caller can detect `RSTn` without
//! accidentally consuming it as data.

use crate::errors::DecodeErrors;
use crate::marker::Marker;

/// A bit-level cursor over the entropy-coded segment of a scan.
pub struct BitReader<'a> {
    stream: &'a [u8],
    position: usize,
    /// Bit accumulator; valid bits are left-aligned in the high bits.
    bit_buffer: u64,
    /// Number of valid bits currently held in `bit_buffer`.
    bits_left: u32,
    /// Set once we've consumed a marker other than a restart marker
    /// (typically EOI) so subsequent reads return zero bits instead of
    /// re-scanning.
    marker: Option<Marker>,
    /// Set once `refill` ran out of stream bytes without ever finding a
    /// marker (i.e. the scan was truncated instead of properly closed by
    /// `EOI`). Distinguishing this from the "reached EOI" case is what lets
    /// the decode loop report a truncated stream as malformed rather than
    /// silently decoding trailing zero-padded bits.
    exhausted: bool
}

impl<'a> BitReader<'a> {
    pub fn new(stream: &'a [u8]) -> BitReader<'a> {
        BitReader { stream, position: 0, bit_buffer: 0, bits_left: 0, marker: None, exhausted: false }
    }

    /// Whether the stream ran out of bytes mid-scan without ever reaching a
    /// marker. A well-formed scan never triggers this: it always has enough
    /// entropy-coded bits to finish the last MCU, followed immediately by an
    /// `RSTn` or `EOI` marker.
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Any marker encountered while refilling the bit buffer (almost always
    /// either a restart marker or EOI).
    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    pub fn clear_marker(&mut self) {
        self.marker = None;
    }

    /// Refill `bit_buffer` until it holds at least 25 bits, or we run out of
    /// entropy-coded data.
    ///
    /// Stops at the first marker: `0xFF` followed by anything other than
    /// `0x00` (a stuffed literal byte) ends the refill so the caller can
    /// inspect `marker()`.
    fn refill(&mut self) {
        while self.bits_left <= 56 {
            if self.marker.is_some() {
                // Pad with zero bits past a marker; callers must stop
                // reading meaningful symbols once a marker is seen.
                self.bits_left += 8;
                continue;
            }
            if self.position >= self.stream.len() {
                self.exhausted = true;
                self.bits_left += 8;
                continue;
            }

            let byte = self.stream[self.position];
            self.position += 1;

            if byte == 0xFF {
                // Peek the next byte without consuming it if we can't
                // tell yet whether it's a stuffed 0x00 or a real marker.
                match self.stream.get(self.position) {
                    Some(0x00) => {
                        // Stuffed literal 0xFF; drop the stuffing byte.
                        self.position += 1;
                    }
                    Some(&next) => {
                        self.position += 1;
                        self.marker = Marker::from_u8(next);
                        self.bits_left += 8;
                        continue;
                    }
                    None => {
                        self.marker = None;
                    }
                }
            }

            self.bit_buffer |= u64::from(byte) << (56 - self.bits_left);
            self.bits_left += 8;
        }
    }

    /// Peek, without consuming, the top `count` bits (0..=16) of the stream.
    #[inline]
    pub fn peek_bits(&mut self, count: u32) -> u32 {
        if self.bits_left < count {
            self.refill();
        }
        (self.bit_buffer >> (64 - count)) as u32
    }

    /// Consume `count` bits (0..=32) previously observed via `peek_bits`.
    #[inline]
    pub fn drop_bits(&mut self, count: u32) {
        self.bit_buffer <<= count;
        self.bits_left = self.bits_left.saturating_sub(count);
    }

    /// Read `count` (0..=16) bits MSB-first, returning them right-aligned.
    pub fn get_bits(&mut self, count: u32) -> u32 {
        if count == 0 {
            return 0;
        }
        let bits = self.peek_bits(count);
        self.drop_bits(count);
        bits
    }

    /// Read a single bit as 0/1.
    #[inline]
    pub fn get_bit(&mut self) -> u32 {
        self.get_bits(1)
    }

    /// Reset decoder bit state and seek past a restart marker at the current
    /// position, as required by the restart-interval handling in §4.8: the
    /// bit buffer is byte-aligned and discarded, and the two-byte `RSTn`
    /// marker is consumed. `expected` is `m = (mcu_index/R - 1) mod 8`; any
    /// other marker (a restart with the wrong index, or no restart at all)
    /// is a fatal restart desync rather than silently tolerated.
    pub fn reset_after_restart(&mut self, expected: u8) -> Result<(), DecodeErrors> {
        self.bit_buffer = 0;
        self.bits_left = 0;

        // `refill` may already have walked past the marker and stashed it
        // here; in that case `position` is already past it and there's
        // nothing left to skip.
        if let Some(marker) = self.marker.take() {
            return Self::check_restart_marker(marker, expected);
        }

        // Otherwise the buffer hadn't been refilled far enough to see it
        // yet; scan forward for the marker byte pair ourselves.
        while self.position + 1 < self.stream.len() {
            if self.stream[self.position] == 0xFF && self.stream[self.position + 1] != 0x00 {
                let marker_byte = self.stream[self.position + 1];
                self.position += 2;
                let marker = Marker::from_u8(marker_byte).ok_or_else(|| {
                    DecodeErrors::HuffmanDecode(format!("restart desync: unknown marker 0xFF{marker_byte:02X}"))
                })?;
                return Self::check_restart_marker(marker, expected);
            }
            self.position += 1;
        }
        Err(DecodeErrors::HuffmanDecode(
            "restart desync: expected a restart marker, ran out of data".to_string()
        ))
    }

    fn check_restart_marker(marker: Marker, expected: u8) -> Result<(), DecodeErrors> {
        match marker {
            Marker::RST(m) if m == expected => Ok(()),
            Marker::RST(m) => Err(DecodeErrors::HuffmanDecode(format!(
                "restart desync: expected RST{expected}, found RST{m}"
            ))),
            other => Err(DecodeErrors::HuffmanDecode(format!(
                "restart desync: expected a restart marker, found {other:?}"
            )))
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Property: an `0xFF00` pair inside entropy data unstuffs transparently
    /// to a literal `0xFF` byte, reproducing the original encoded payload
    /// bit-for-bit rather than leaking the stuffing byte as data.
    #[test]
    fn ff00_unstuffs_to_a_literal_ff_byte() {
        // Trailing EOI marker so the refill loop has something to stop at
        // instead of eagerly running past the end of the buffer.
        let stream = [0xFFu8, 0x00, 0b1010_1010, 0xFF, 0xD9];
        let mut reader = BitReader::new(&stream);
        assert_eq!(reader.get_bits(8), 0xFF);
        assert_eq!(reader.get_bits(8), 0b1010_1010);
        assert!(!reader.exhausted());
    }

    #[test]
    fn reset_after_restart_accepts_matching_sequence_number() {
        let stream = [0xFF, 0xD2]; // RST2
        let mut reader = BitReader::new(&stream);
        // Force a refill so `marker` gets populated from the stream.
        reader.peek_bits(1);
        assert!(reader.reset_after_restart(2).is_ok());
    }

    #[test]
    fn reset_after_restart_rejects_wrong_sequence_number() {
        let stream = [0xFF, 0xD2]; // RST2, but MCU bookkeeping expects RST5
        let mut reader = BitReader::new(&stream);
        reader.peek_bits(1);
        assert!(matches!(reader.reset_after_restart(5), Err(DecodeErrors::HuffmanDecode(_))));
    }

    #[test]
    fn reset_after_restart_rejects_a_non_restart_marker() {
        let stream = [0xFF, 0xD9]; // EOI where an RSTn was expected
        let mut reader = BitReader::new(&stream);
        reader.peek_bits(1);
        assert!(matches!(reader.reset_after_restart(0), Err(DecodeErrors::HuffmanDecode(_))));
    }
}
