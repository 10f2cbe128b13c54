//! huffzip-core: byte-oriented Huffman coding
//!
//! This library builds a prefix code from the byte frequencies of an input,
//! packs the input into a dense bitstream with it, and reverses the
//! transform exactly.
//!
//! # Architecture
//!
//! Each stage is a pure function of its inputs:
//! - `frequency`: byte counting
//! - `tree`: Huffman tree construction in an arena
//! - `code_table`: code derivation, validation and serialization
//! - `pack` / `unpack`: bit packing with an explicit padding byte
//! - `codec`: the composed `compress` / `decompress` operations
//! - `container`: persisted artifact framing with CRC32
//! - `bitio`: low-level MSB-first bit reading/writing
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: equal-weight ties break by creation order, so the
//!   same input always yields the same tree and the same bytes
//! - **No hidden state**: every call builds its own tables from scratch

pub mod bitio;
pub mod code_table;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod pack;
pub mod tree;
pub mod unpack;

// Re-export commonly used types
pub use code_table::{Code, CodeTable};
pub use codec::{compress, decompress};
pub use error::{Error, HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use tree::PrefixTree;
