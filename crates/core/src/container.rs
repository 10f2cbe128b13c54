//! Container serialization and parsing for compressed artifacts.
//!
//! A container packages a packed payload with everything needed to reverse
//! it: the serialized code table and the original length.
//!
//! # Container Format
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  0x48 0x55 0x46 0x5A ("HUFZ")
//! +------------------+
//! | version (1)      |  format version, currently 1
//! +------------------+
//! | original_len (8) |  u64 little-endian, decompressed size
//! +------------------+
//! | table_len (4)    |  u32 length of the serialized code table
//! +------------------+
//! | payload_len (8)  |  u64 length of the packed payload
//! +------------------+
//! | crc32 (4)        |  u32 checksum
//! +------------------+
//! | code table       |  CodeTable metadata (table_len bytes)
//! | (variable)       |
//! +------------------+
//! | payload          |  padding byte + packed bits (payload_len bytes)
//! | (variable)       |
//! +------------------+
//! ```
//!
//! # CRC Coverage
//!
//! The CRC32 covers original_len, table_len, payload_len, the code table
//! and the payload.

use tracing::debug;

use crate::code_table::CodeTable;
use crate::codec::{compress, decompress};
use crate::error::{ContainerError, Error, HuffmanError, Result};

/// Magic number for containers: "HUFZ"
pub const MAGIC: [u8; 4] = [0x48, 0x55, 0x46, 0x5A];

/// Current container format version
pub const VERSION: u8 = 1;

/// Size of the container header in bytes
pub const HEADER_SIZE: usize = 29;

/// A parsed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Decompressed length
    pub original_len: u64,

    /// Code table for decoding
    pub codes: CodeTable,

    /// Packed payload (padding byte + body)
    pub payload: Vec<u8>,

    /// CRC32 checksum (as stored)
    pub crc32: u32,
}

/// Serialize a container.
///
/// # Arguments
/// - `original_len`: length of the uncompressed input
/// - `codes`: the code table used for packing
/// - `payload`: the packed bytes
pub fn serialize_container(original_len: u64, codes: &CodeTable, payload: &[u8]) -> Vec<u8> {
    let table = codes.serialize_metadata();

    let table_len = table.len() as u32;
    let payload_len = payload.len() as u64;
    let crc32 = compute_crc(original_len, table_len, payload_len, &table, payload);

    let mut out = Vec::with_capacity(HEADER_SIZE + table.len() + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&original_len.to_le_bytes());
    out.extend_from_slice(&table_len.to_le_bytes());
    out.extend_from_slice(&payload_len.to_le_bytes());
    out.extend_from_slice(&crc32.to_le_bytes());
    out.extend_from_slice(&table);
    out.extend_from_slice(payload);

    out
}

/// Parse a container from bytes.
///
/// # Errors
/// - `ContainerError::TooShort` if the buffer can't hold a header
/// - `ContainerError::InvalidMagic` / `UnsupportedVersion` for foreign data
/// - `ContainerError::LengthMismatch` if header lengths disagree with the buffer
/// - `Error::Crc` if the checksum fails
/// - Propagates code table deserialization errors
pub fn parse_container(bytes: &[u8]) -> Result<Container> {
    if bytes.len() < HEADER_SIZE {
        return Err(ContainerError::TooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let (header, rest) = bytes.split_at(HEADER_SIZE);
    let magic = [header[0], header[1], header[2], header[3]];
    if magic != MAGIC {
        return Err(ContainerError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }
    if header[4] != VERSION {
        return Err(ContainerError::UnsupportedVersion(header[4]).into());
    }

    let original_len = u64::from_le_bytes(to_array(&header[5..13]));
    let table_len = u32::from_le_bytes(to_array(&header[13..17]));
    let payload_len = u64::from_le_bytes(to_array(&header[17..25]));
    let crc32 = u32::from_le_bytes(to_array(&header[25..29]));

    let expected = (table_len as u64)
        .checked_add(payload_len)
        .and_then(|body| body.checked_add(HEADER_SIZE as u64));
    if expected != Some(bytes.len() as u64) {
        return Err(ContainerError::LengthMismatch {
            expected: expected.map_or(usize::MAX, |n| n as usize),
            actual: bytes.len(),
        }
        .into());
    }

    let (table, payload) = rest.split_at(table_len as usize);

    let computed = compute_crc(original_len, table_len, payload_len, table, payload);
    if computed != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed,
        });
    }

    let codes = CodeTable::deserialize_metadata(table)?;

    Ok(Container {
        original_len,
        codes,
        payload: payload.to_vec(),
        crc32,
    })
}

fn to_array<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    out
}

/// CRC32 over the protected fields.
fn compute_crc(
    original_len: u64,
    table_len: u32,
    payload_len: u64,
    table: &[u8],
    payload: &[u8],
) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&original_len.to_le_bytes());
    hasher.update(&table_len.to_le_bytes());
    hasher.update(&payload_len.to_le_bytes());
    hasher.update(table);
    hasher.update(payload);
    hasher.finalize()
}

/// Compress `data` and wrap the result in a container.
pub fn compress_to_container(data: &[u8]) -> Result<Vec<u8>> {
    let (payload, codes) = compress(data)?;
    let out = serialize_container(data.len() as u64, &codes, &payload);

    debug!(
        input_len = data.len(),
        payload_len = payload.len(),
        container_len = out.len(),
        "built container"
    );

    Ok(out)
}

/// Decompress a parsed container, checking the recorded length.
///
/// # Errors
/// `HuffmanError::LengthMismatch` if the decoded size differs from
/// `original_len`, plus every error of [`decompress`].
pub fn decompress_container(container: &Container) -> Result<Vec<u8>> {
    let data = decompress(&container.payload, &container.codes)?;
    if data.len() as u64 != container.original_len {
        return Err(HuffmanError::LengthMismatch {
            expected: container.original_len as usize,
            actual: data.len(),
        }
        .into());
    }
    Ok(data)
}
