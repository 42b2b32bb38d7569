//! Canonical Huffman table construction and fast symbol lookup.

use crate::bitstream::BitReader;
use crate::errors::DecodeErrors;

/// Number of bits used for the fast lookup table; codes longer than this
/// fall back to a bit-by-bit walk.
const FAST_BITS: u32 = 9;

/// A single DC or AC Huffman table, built from the 16 length counts and the
/// symbol list found in a DHT segment.
///
/// Lookup uses the classic "fast table" trick: every possible `FAST_BITS`-bit
/// prefix is precomputed to either resolve a short code directly, or to
/// signal that the bit-by-bit `slow` path is needed for codes longer than
/// `FAST_BITS`.
pub struct HuffmanTable {
    /// `fast[prefix] = (symbol, length)`, or `(0, 0)` if no code of length
    /// `<= FAST_BITS` matches this prefix.
    fast: Vec<(u8, u8)>,
    /// For codes longer than `FAST_BITS`: `(max_code, first_symbol_index)`
    /// per bit length, used to walk bit-by-bit.
    max_code: [i32; 18],
    val_ptr: [i32; 18],
    min_code: [i32; 18],
    symbols: Vec<u8>
}

impl HuffmanTable {
    /// Build a table from the 16 per-length symbol counts and the flattened
    /// symbol list that follow them in a DHT segment.
    pub fn new(num_symbols: &[u8; 16], symbols: Vec<u8>) -> Result<HuffmanTable, DecodeErrors> {
        let total: usize = num_symbols.iter().map(|&x| x as usize).sum();
        if total != symbols.len() {
            return Err(DecodeErrors::HuffmanDecode(format!(
                "Expected {total} Huffman symbols, header declares {} present",
                symbols.len()
            )));
        }
        if total > 256 {
            return Err(DecodeErrors::HuffmanDecode(
                "Huffman table has more than 256 symbols".to_string()
            ));
        }

        // Assign canonical codes: shortest codes first, incrementing by one
        // and shifting left whenever the bit length grows, per the standard
        // canonical-Huffman construction (ITU-T T.81 Annex C).
        let mut codes = vec![0u32; symbols.len()];
        let mut lengths = vec![0u8; symbols.len()];
        let mut code: u32 = 0;
        let mut k = 0usize;
        let mut min_code = [0i32; 18];
        let mut max_code = [-1i32; 18];
        let mut val_ptr = [0i32; 18];

        for (len_minus_one, &count) in num_symbols.iter().enumerate() {
            let length = (len_minus_one + 1) as u8;
            if count == 0 {
                min_code[length as usize] = 0;
                max_code[length as usize] = -1;
                code <<= 1;
                continue;
            }
            // An over-subscribed length count (more codes of this length, or
            // shorter, than fit in `length` bits) would otherwise assign a
            // code >= 1 << length, breaking the prefix property and, via the
            // fast-table fill below, indexing past the table's end.
            if code + u32::from(count) > (1u32 << length) {
                return Err(DecodeErrors::HuffmanDecode(format!(
                    "Huffman code set is over-subscribed at length {length} (not prefix-valid)"
                )));
            }

            val_ptr[length as usize] = k as i32;
            min_code[length as usize] = code as i32;
            for _ in 0..count {
                codes[k] = code;
                lengths[k] = length;
                code += 1;
                k += 1;
            }
            max_code[length as usize] = code as i32 - 1;
            code <<= 1;
        }

        let mut fast = vec![(0u8, 0u8); 1 << FAST_BITS];
        for (i, (&c, &len)) in codes.iter().zip(lengths.iter()).enumerate() {
            if len == 0 || len as u32 > FAST_BITS {
                continue;
            }
            let shift = FAST_BITS - u32::from(len);
            let base = (c as usize) << shift;
            for fill in base..base + (1 << shift) {
                fast[fill] = (symbols[i], len);
            }
        }

        Ok(HuffmanTable { fast, max_code, val_ptr, min_code, symbols })
    }

    /// Decode one Huffman symbol from `reader`.
    pub fn decode(&self, reader: &mut BitReader) -> Result<u8, DecodeErrors> {
        let peek = reader.peek_bits(FAST_BITS);
        let (symbol, len) = self.fast[peek as usize];
        if len != 0 {
            reader.drop_bits(u32::from(len));
            return Ok(symbol);
        }
        self.decode_slow(reader)
    }

    /// Bit-by-bit walk for codes longer than `FAST_BITS`.
    fn decode_slow(&self, reader: &mut BitReader) -> Result<u8, DecodeErrors> {
        let mut code: i32 = 0;
        for length in 1..=16usize {
            code = (code << 1) | reader.get_bit() as i32;
            if self.max_code[length] != -1 && code <= self.max_code[length] {
                let index = (self.val_ptr[length] + (code - self.min_code[length])) as usize;
                return self
                    .symbols
                    .get(index)
                    .copied()
                    .ok_or_else(|| DecodeErrors::HuffmanDecode("Corrupt Huffman code".to_string()));
            }
        }
        Err(DecodeErrors::HuffmanDecode(
            "Huffman code longer than 16 bits, stream is corrupt".to_string()
        ))
    }
}
