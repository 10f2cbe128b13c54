//! Bit unpacking: packed bytes back to the original input.
//!
//! Decoding walks the payload one bit at a time through a [`DecodeTrie`]
//! built once per call from the code table, so each bit costs one array
//! lookup regardless of code length.
//!
//! # Integrity
//!
//! - A padding byte above 7, or larger than the body, is rejected.
//! - A bit path that no code starts with is rejected (only possible when the
//!   table does not cover every path, e.g. an empty or hand-built table).
//! - Running out of bits in the middle of a code is rejected: truncated or
//!   corrupted input never decodes silently to a partial last symbol.

use tracing::debug;

use crate::bitio::BitReader;
use crate::code_table::{Code, CodeTable};
use crate::error::{HuffmanError, Result};

/// One outgoing edge of a trie branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    None,
    Branch(u32),
    Symbol(u8),
}

/// Inverse code table: a binary trie from bit paths to symbols.
///
/// Branch 0 is the root. Every branch holds a `0` edge and a `1` edge.
#[derive(Debug, Clone)]
pub struct DecodeTrie {
    branches: Vec<[Edge; 2]>,
}

const ROOT: u32 = 0;

impl DecodeTrie {
    /// Build the trie for `codes`.
    ///
    /// # Errors
    /// `HuffmanError::NotPrefixFree` if two codes collide. Tables produced by
    /// this crate are already validated, so this only guards hand-made ones.
    pub fn new(codes: &CodeTable) -> Result<Self> {
        let mut trie = Self {
            branches: Vec::with_capacity(codes.len().max(1)),
        };
        trie.branches.push([Edge::None; 2]);

        for (symbol, code) in codes.iter() {
            trie.insert(symbol, code)?;
        }

        Ok(trie)
    }

    fn insert(&mut self, symbol: u8, code: Code) -> Result<()> {
        let mut branch = ROOT;
        let last = code.len() - 1;

        for (depth, bit) in code.iter().enumerate() {
            let fresh = self.branches.len() as u32;
            let edge = &mut self.branches[branch as usize][bit as usize];
            match (*edge, depth == last) {
                (Edge::None, true) => *edge = Edge::Symbol(symbol),
                (Edge::None, false) => {
                    *edge = Edge::Branch(fresh);
                    self.branches.push([Edge::None; 2]);
                    branch = fresh;
                }
                (Edge::Branch(next), false) => branch = next,
                (Edge::Symbol(other), _) => {
                    return Err(HuffmanError::NotPrefixFree { symbol: other, other: symbol }.into());
                }
                (Edge::Branch(next), true) => {
                    let other = self.first_symbol_below(next);
                    return Err(HuffmanError::NotPrefixFree { symbol, other }.into());
                }
            }
        }

        Ok(())
    }

    fn first_symbol_below(&self, mut branch: u32) -> u8 {
        loop {
            match self.branches[branch as usize] {
                [Edge::Symbol(s), _] | [Edge::None, Edge::Symbol(s)] => return s,
                [Edge::Branch(next), _] | [Edge::None, Edge::Branch(next)] => branch = next,
                [Edge::None, Edge::None] => return 0,
            }
        }
    }

    /// Follow one edge from `branch`.
    #[inline]
    fn step(&self, branch: u32, bit: bool) -> Edge {
        self.branches[branch as usize][bit as usize]
    }

    /// Symbol whose code is exactly `code`, if any.
    pub fn lookup(&self, code: &Code) -> Option<u8> {
        let mut branch = ROOT;
        let mut edges = code.iter().peekable();
        while let Some(bit) = edges.next() {
            match (self.step(branch, bit), edges.peek().is_none()) {
                (Edge::Symbol(s), true) => return Some(s),
                (Edge::Branch(next), false) => branch = next,
                _ => return None,
            }
        }
        None
    }
}

/// Unpack `packed` with `codes`.
///
/// # Errors
/// - `HuffmanError::InvalidPadding` if the padding byte is out of range
/// - `HuffmanError::InvalidCode` if a bit path matches no code
/// - `HuffmanError::IncompleteCode` if the payload ends mid-code
pub fn unpack(packed: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let Some((&padding, body)) = packed.split_first() else {
        return Ok(Vec::new());
    };

    let body_bits = body.len() * 8;
    if padding > 7 || padding as usize > body_bits {
        return Err(HuffmanError::InvalidPadding { padding, body_bits }.into());
    }
    let payload_bits = body_bits - padding as usize;

    let trie = DecodeTrie::new(codes)?;
    let mut reader = BitReader::with_bit_len(body, payload_bits)?;
    let mut output = Vec::with_capacity(body.len() * 2);

    let mut branch = ROOT;
    let mut pending_bits = 0usize;
    while let Some(bit) = reader.next_bit() {
        match trie.step(branch, bit) {
            Edge::Symbol(symbol) => {
                output.push(symbol);
                branch = ROOT;
                pending_bits = 0;
            }
            Edge::Branch(next) => {
                branch = next;
                pending_bits += 1;
            }
            Edge::None => {
                let position = reader.position() - 1 - pending_bits;
                return Err(HuffmanError::InvalidCode { position }.into());
            }
        }
    }

    if pending_bits > 0 {
        return Err(HuffmanError::IncompleteCode { pending_bits }.into());
    }

    debug!(
        packed_len = packed.len(),
        payload_bits,
        output_len = output.len(),
        "unpacked payload"
    );

    Ok(output)
}
