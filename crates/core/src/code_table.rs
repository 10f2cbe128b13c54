//! Code table derivation and serialization.
//!
//! A [`CodeTable`] maps each byte to a [`Code`], a bit-string of 1 to 64 bits.
//! Tables built from a [`PrefixTree`] are prefix-free by construction; tables
//! assembled from outside (see [`CodeTable::from_codes`]) are validated.
//!
//! # Metadata Format
//!
//! ```text
//! +------------------+
//! | count (2)        |  u16 little-endian, number of entries (0-256)
//! +------------------+
//! | symbol (1)       |  \
//! | length (1)       |   | repeated `count` times,
//! | code bits        |   | ascending symbol order;
//! | (ceil(len/8))    |  /  MSB-first, zero padded
//! +------------------+
//! ```

use std::fmt;
use std::str::FromStr;

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{Node, PrefixTree};

/// A prefix code: `len` bits stored in the low bits of `bits`, first bit
/// most significant.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// Longest supported code, in bits.
    pub const MAX_LEN: usize = 64;

    /// Create a code from its bit value and length.
    ///
    /// # Errors
    /// `HuffmanError::InvalidCodeLength` if `len` is outside 1..=64 or `bits`
    /// has bits set above `len`.
    pub fn new(bits: u64, len: usize) -> Result<Self> {
        if len == 0 || len > Self::MAX_LEN || (len < 64 && bits >> len != 0) {
            return Err(HuffmanError::InvalidCodeLength { length: len }.into());
        }
        Ok(Self {
            bits,
            len: len as u8,
        })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; codes hold at least one bit.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The `index`-th bit in emission order (0 = first).
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len());
        (self.bits >> (self.len() - 1 - index)) & 1 == 1
    }

    /// Iterate bits in emission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(|i| self.bit(i))
    }

    /// True if `self` is a prefix of `other` (including equality).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }

    /// Bits left-aligned in a u64. Sorting by `(aligned, len)` is
    /// lexicographic bit-string order.
    fn aligned(&self) -> u64 {
        self.bits << (64 - self.len())
    }

    fn child(&self, bit: bool) -> Result<Self> {
        Self::new((self.bits << 1) | bit as u64, self.len() + 1)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({self})")
    }
}

impl FromStr for Code {
    type Err = Error;

    /// Parse a textual bit-string such as `"0110"`.
    fn from_str(s: &str) -> Result<Self> {
        let mut bits = 0u64;
        for (i, c) in s.chars().enumerate() {
            if i >= Self::MAX_LEN {
                return Err(HuffmanError::InvalidCodeLength { length: s.len() }.into());
            }
            let bit = match c {
                '0' => 0,
                '1' => 1,
                other => {
                    return Err(HuffmanError::InvalidMetadata(format!(
                        "unexpected character {other:?} in bit-string"
                    ))
                    .into())
                }
            };
            bits = (bits << 1) | bit;
        }
        Self::new(bits, s.len())
    }
}

/// Bijective mapping between the symbols of one input and their codes.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    len: usize,
}

impl CodeTable {
    /// A table with no entries, produced for empty input.
    pub fn empty() -> Self {
        Self {
            codes: [None; 256],
            len: 0,
        }
    }

    /// Derive codes from a tree: `0` for each left edge, `1` for each right
    /// edge. A lone leaf root gets the one-bit code `0`.
    ///
    /// # Errors
    /// `HuffmanError::InvalidCodeLength` if a leaf sits deeper than 64.
    pub fn from_tree(tree: &PrefixTree) -> Result<Self> {
        let mut table = Self::empty();

        if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
            table.insert(symbol, Code::new(0, 1)?);
            return Ok(table);
        }

        // (node, code so far); the root carries no bits yet
        let mut stack = vec![(tree.root(), None::<Code>)];
        while let Some((id, prefix)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    if let Some(code) = prefix {
                        table.insert(symbol, code);
                    }
                }
                Node::Internal { left, right, .. } => {
                    let (l, r) = match prefix {
                        Some(code) => (code.child(false)?, code.child(true)?),
                        None => (Code::new(0, 1)?, Code::new(1, 1)?),
                    };
                    // Right pushed first so the left subtree is walked first
                    stack.push((right, Some(r)));
                    stack.push((left, Some(l)));
                }
            }
        }

        Ok(table)
    }

    /// Build a table from externally supplied `(symbol, code)` pairs.
    ///
    /// # Errors
    /// - `HuffmanError::DuplicateSymbol` if a symbol appears twice
    /// - `HuffmanError::NotPrefixFree` if a code equals or prefixes another
    pub fn from_codes<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, Code)>,
    {
        let mut table = Self::empty();
        for (symbol, code) in entries {
            if table.codes[symbol as usize].is_some() {
                return Err(HuffmanError::DuplicateSymbol { symbol }.into());
            }
            table.insert(symbol, code);
        }
        table.check_prefix_free()?;
        Ok(table)
    }

    fn insert(&mut self, symbol: u8, code: Code) {
        if self.codes[symbol as usize].replace(code).is_none() {
            self.len += 1;
        }
    }

    /// In lexicographic order, any code that prefixes another also
    /// prefixes its immediate successor, so adjacent pairs suffice.
    fn check_prefix_free(&self) -> Result<()> {
        let mut entries: Vec<(u8, Code)> = self.iter().collect();
        entries.sort_by_key(|(_, code)| (code.aligned(), code.len()));

        for pair in entries.windows(2) {
            let (symbol, code) = pair[0];
            let (other, next) = pair[1];
            if code.is_prefix_of(&next) {
                return Err(HuffmanError::NotPrefixFree { symbol, other }.into());
            }
        }
        Ok(())
    }

    /// Code assigned to `symbol`, if any.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Longest code length in the table (0 when empty).
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Number of payload bits needed to encode an input with these counts.
    ///
    /// # Errors
    /// `HuffmanError::MissingCode` for a counted symbol without a code.
    pub fn encoded_bit_len(&self, freqs: &FrequencyTable) -> Result<u64> {
        freqs.iter().try_fold(0u64, |acc, (symbol, count)| -> Result<u64> {
            let code = self
                .get(symbol)
                .ok_or(HuffmanError::MissingCode { symbol })?;
            Ok(acc + count * code.len() as u64)
        })
    }

    /// Serialize the table for storage next to the packed payload.
    pub fn serialize_metadata(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.len * 4);
        out.extend_from_slice(&(self.len as u16).to_le_bytes());

        for (symbol, code) in self.iter() {
            out.push(symbol);
            out.push(code.len);

            let mut writer = BitWriter::with_capacity_bits(code.len());
            // Cannot fail: code.len() <= 64
            let _ = writer.write_bits(code.bits, code.len());
            let (bytes, _) = writer.finish();
            out.extend_from_slice(&bytes);
        }

        out
    }

    /// Parse a table written by [`serialize_metadata`](Self::serialize_metadata).
    ///
    /// # Errors
    /// `HuffmanError::InvalidMetadata` for truncated or trailing bytes,
    /// nonzero pad bits or an entry count above 256, plus every error of
    /// [`from_codes`](Self::from_codes).
    pub fn deserialize_metadata(bytes: &[u8]) -> Result<Self> {
        let invalid = |msg: String| -> Error { HuffmanError::InvalidMetadata(msg).into() };

        if bytes.len() < 2 {
            return Err(invalid(format!("need 2 header bytes, got {}", bytes.len())));
        }
        let count = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        if count > 256 {
            return Err(invalid(format!("entry count {count} exceeds 256")));
        }

        let mut entries = Vec::with_capacity(count);
        let mut pos = 2;
        for _ in 0..count {
            let Some(&[symbol, len]) = bytes.get(pos..pos + 2) else {
                return Err(invalid(format!("truncated entry header at byte {pos}")));
            };
            let len = len as usize;
            if len == 0 || len > Code::MAX_LEN {
                return Err(HuffmanError::InvalidCodeLength { length: len }.into());
            }
            pos += 2;

            let width = len.div_ceil(8);
            let Some(code_bytes) = bytes.get(pos..pos + width) else {
                return Err(invalid(format!("truncated code for symbol {symbol}")));
            };
            pos += width;

            let mut reader = BitReader::new(code_bytes);
            let bits = reader.read_bits(len)?;
            let pad_bits = reader.bits_remaining();
            if reader.read_bits(pad_bits)? != 0 {
                return Err(invalid(format!("nonzero pad bits in code for symbol {symbol}")));
            }

            entries.push((symbol, Code::new(bits, len)?));
        }

        if pos != bytes.len() {
            return Err(invalid(format!(
                "{} trailing bytes after {count} entries",
                bytes.len() - pos
            )));
        }

        Self::from_codes(entries)
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(symbol, code)| (symbol, code.to_string())))
            .finish()
    }
}
