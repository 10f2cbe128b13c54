//! Bit-level I/O for packing codes into bytes and reading them back.
//!
//! Both [`BitWriter`] and [`BitReader`] work MSB-first: the first bit written
//! lands in the most significant bit of the first byte. This matches the
//! packed representation, where a code `0b101` of length 3 followed by
//! `0b11` of length 2 becomes `10111` + padding.
//!
//! # Padding
//! - `BitWriter::finish` pads the final partial byte with zero bits and
//!   reports how many it added (0-7).
//! - `BitReader::with_bit_len` limits reads to the valid prefix of a buffer,
//!   so trailing padding is never handed to the caller.
//!
//! # Example
//! ```
//! use huffzip_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//!
//! let (bytes, padding) = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//! assert_eq!(padding, 3);
//!
//! let mut reader = BitReader::with_bit_len(&bytes, 5).unwrap();
//! assert_eq!(reader.read_bits(5).unwrap(), 0b10111);
//! assert!(reader.is_empty());
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a growable byte buffer.
///
/// # Invariants
/// - `pending` holds up to 7 bits, left-aligned
/// - `pending_len` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    pending: u8,
    /// Number of bits in `pending` (0-7)
    pending_len: u8,
}

impl BitWriter {
    /// Create a new writer with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bits` bits before reallocating.
    pub fn with_capacity_bits(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            pending: 0,
            pending_len: 0,
        }
    }

    /// Append the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.pending_len as usize;
            let take = remaining.min(free);

            // Top `take` bits of the not-yet-written part of `value`
            let shift = remaining - take;
            let chunk = ((value >> shift) & low_mask(take)) as u8;

            self.pending |= chunk << (free - take);
            self.pending_len += take as u8;
            remaining -= take;

            if self.pending_len == 8 {
                self.bytes.push(self.pending);
                self.pending = 0;
                self.pending_len = 0;
            }
        }

        Ok(())
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.pending |= 0x80 >> self.pending_len;
        }
        self.pending_len += 1;
        if self.pending_len == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.pending_len = 0;
        }
    }

    /// Finish writing, returning the bytes and the number of zero bits
    /// appended to reach a byte boundary (0-7).
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        let padding = self.padding();
        if self.pending_len > 0 {
            self.bytes.push(self.pending);
        }
        (self.bytes, padding)
    }

    /// Number of zero bits `finish` would append.
    pub fn padding(&self) -> u8 {
        (8 - self.pending_len) % 8
    }

    /// Total number of bits written (including the partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending_len as usize
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `position <= bit_len <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Number of readable bits; anything past this is padding
    bit_len: usize,
    /// Current bit position (0 = MSB of first byte)
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len() * 8,
            position: 0,
        }
    }

    /// Create a reader over the first `bit_len` bits of `data`.
    ///
    /// # Errors
    /// Returns `BitIoError::UnexpectedEof` if `data` holds fewer bits.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Result<Self> {
        if bit_len > data.len() * 8 {
            return Err(BitIoError::UnexpectedEof.into());
        }
        Ok(Self {
            data,
            bit_len,
            position: 0,
        })
    }

    /// Read up to 64 bits, most significant first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;
        while remaining > 0 {
            let offset = self.position % 8;
            let available = 8 - offset;
            let take = remaining.min(available);

            let byte = self.data[self.position / 8];
            let bits = (byte >> (available - take)) as u64 & low_mask(take);
            result = (result << take) | bits;

            self.position += take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read a single bit, or `None` once the readable bits are exhausted.
    #[inline]
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.position >= self.bit_len {
            return None;
        }
        let byte = self.data[self.position / 8];
        let bit = byte & (0x80 >> (self.position % 8)) != 0;
        self.position += 1;
        Some(bit)
    }

    /// Number of readable bits left.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.position
    }

    /// Current bit position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True once every readable bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.position >= self.bit_len
    }
}

#[inline]
fn low_mask(bits: usize) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_byte_reports_padding() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        assert_eq!(writer.bit_len(), 5);
        assert_eq!(writer.padding(), 3);

        let (bytes, padding) = writer.finish();
        assert_eq!(bytes, vec![0b1011_1000]);
        assert_eq!(padding, 3);
    }

    #[test]
    fn test_aligned_output_has_no_padding() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1010_1011_1111_0000, 16).unwrap();

        let (bytes, padding) = writer.finish();
        assert_eq!(bytes, vec![0b1010_1011, 0b1111_0000]);
        assert_eq!(padding, 0);
    }

    #[test]
    fn test_empty_writer() {
        let (bytes, padding) = BitWriter::new().finish();
        assert!(bytes.is_empty());
        assert_eq!(padding, 0);
    }

    #[test]
    fn test_write_bit_matches_write_bits() {
        let pattern = [true, false, true, true, false, false, true, false, true];

        let mut a = BitWriter::new();
        let mut b = BitWriter::new();
        for &bit in &pattern {
            a.write_bit(bit);
            b.write_bits(bit as u64, 1).unwrap();
        }

        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn test_64_bit_values() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1, 1).unwrap();
        writer.write_bits(0x1234_5678_9ABC_DEF0, 64).unwrap();

        let (bytes, padding) = writer.finish();
        assert_eq!(padding, 7);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(64).unwrap(), 0x1234_5678_9ABC_DEF0);
    }

    #[test]
    fn test_invalid_bit_count() {
        let mut writer = BitWriter::new();
        assert!(writer.write_bits(0, 65).is_err());

        let mut reader = BitReader::new(&[0u8; 16]);
        assert!(reader.read_bits(65).is_err());
    }

    #[test]
    fn test_bit_len_limit_hides_padding() {
        let data = [0b1100_0000];
        let mut reader = BitReader::with_bit_len(&data, 2).unwrap();

        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.next_bit(), Some(true));
        assert_eq!(reader.next_bit(), None);
        assert!(reader.is_empty());
        assert!(reader.read_bits(1).is_err());
    }

    #[test]
    fn test_bit_len_longer_than_data() {
        assert!(BitReader::with_bit_len(&[0xFF], 9).is_err());
    }

    #[test]
    fn test_bits_remaining() {
        let data = vec![0xFF, 0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.bits_remaining(), 16);
        reader.read_bits(5).unwrap();
        assert_eq!(reader.bits_remaining(), 11);
        assert_eq!(reader.position(), 5);
        reader.read_bits(11).unwrap();
        assert_eq!(reader.bits_remaining(), 0);
        assert!(reader.is_empty());
    }
}
