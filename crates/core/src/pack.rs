//! Bit packing: input bytes through a code table into the packed layout.
//!
//! # Packed Layout
//!
//! ```text
//! +------------------+
//! | padding (1)      |  number of zero bits appended to the body (0-7)
//! +------------------+
//! | body             |  concatenated codes, MSB-first, zero padded
//! | (variable)       |  to a byte boundary
//! +------------------+
//! ```
//!
//! Empty input packs to an empty buffer with no padding byte.

use tracing::debug;

use crate::bitio::BitWriter;
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};

/// Pack `data` with `codes`.
///
/// # Errors
/// `HuffmanError::MissingCode` if a byte of `data` has no code. Nothing is
/// returned in that case.
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = BitWriter::with_capacity_bits(8 + data.len() * 8);
    // Placeholder for the padding count, patched below
    writer.write_bits(0, 8)?;

    for &byte in data {
        let code = codes
            .get(byte)
            .ok_or(HuffmanError::MissingCode { symbol: byte })?;
        writer.write_bits(code.bits(), code.len())?;
    }

    let payload_bits = writer.bit_len() - 8;
    let (mut packed, padding) = writer.finish();
    packed[0] = padding;

    debug!(
        input_len = data.len(),
        payload_bits,
        padding,
        packed_len = packed.len(),
        "packed input"
    );

    Ok(packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_table::Code;
    use crate::Error;

    fn table(entries: &[(u8, &str)]) -> CodeTable {
        CodeTable::from_codes(entries.iter().map(|&(s, c)| (s, c.parse::<Code>().unwrap())))
            .unwrap()
    }

    #[test]
    fn test_empty_input_has_no_padding_byte() {
        let codes = table(&[(b'a', "0")]);
        assert!(pack(b"", &codes).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_layout() {
        let codes = table(&[(b'a', "0")]);
        // 4 bits of payload, 4 bits of padding
        assert_eq!(pack(b"aaaa", &codes).unwrap(), vec![4, 0b0000_0000]);
    }

    #[test]
    fn test_bits_are_msb_first() {
        let codes = table(&[(b'a', "1"), (b'b', "00"), (b'c', "01")]);
        // a b c a -> 1 00 01 1 -> 1000_11 + 00 padding
        assert_eq!(pack(b"abca", &codes).unwrap(), vec![2, 0b1000_1100]);
    }

    #[test]
    fn test_aligned_payload_has_zero_padding() {
        let codes = table(&[(b'a', "1"), (b'b', "0")]);
        assert_eq!(pack(b"abababab", &codes).unwrap(), vec![0, 0b1010_1010]);
    }

    #[test]
    fn test_multi_byte_payload() {
        let codes = table(&[(b'x', "110"), (b'y', "0"), (b'z', "10"), (b'w', "111")]);
        // x x x w -> 110 110 110 111 = 12 bits
        assert_eq!(
            pack(b"xxxw", &codes).unwrap(),
            vec![4, 0b1101_1011, 0b0111_0000]
        );
    }

    #[test]
    fn test_missing_code() {
        let codes = table(&[(b'a', "0"), (b'b', "1")]);
        let result = pack(b"abc", &codes);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::MissingCode { symbol: b'c' }))
        ));
    }
}
