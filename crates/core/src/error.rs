//! Error types for the huffzip coding engine.
//!
//! Every stage returns structured errors instead of panicking. A failed
//! compress or decompress call never exposes partial output.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Huffman: tree, code table, packing or unpacking failures
/// - Container: persisted artifact framing
/// - CRC: data corruption detected in a container
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (e.g., incomplete code, missing symbol)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Container framing error (e.g., bad magic, length mismatch)
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build prefix tree")]
    EmptyFrequencyTable,

    /// A byte in the input has no code in the table
    #[error("no code for symbol {symbol:#04x}")]
    MissingCode { symbol: u8 },

    /// Bit stream ended in the middle of a code
    #[error("incomplete code at end of stream ({pending_bits} unmatched bits)")]
    IncompleteCode { pending_bits: usize },

    /// Bit sequence that no code in the table starts with
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Padding count out of range for the packed body
    #[error("invalid padding count {padding} for {body_bits} body bits")]
    InvalidPadding { padding: u8, body_bits: usize },

    /// Code length outside 1..=64, or a code value wider than its length
    #[error("invalid code length {length}: codes hold 1 to 64 bits")]
    InvalidCodeLength { length: usize },

    /// Two symbols share a code, or one code prefixes another
    #[error("code for symbol {symbol:#04x} conflicts with symbol {other:#04x}: table is not prefix-free")]
    NotPrefixFree { symbol: u8, other: u8 },

    /// A symbol appears twice in an external code table
    #[error("duplicate entry for symbol {symbol:#04x}")]
    DuplicateSymbol { symbol: u8 },

    /// Decoded length doesn't match the recorded length
    #[error("decoded length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Serialized code table is malformed
    #[error("invalid code table metadata: {0}")]
    InvalidMetadata(String),
}

/// Container framing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Container written by an unknown format version
    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),

    /// Buffer is too short to contain a valid header
    #[error("container too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Header lengths don't add up to the buffer size
    #[error("container length mismatch: header says {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
