//! The two operations the rest of a program needs: [`compress`] and
//! [`decompress`].
//!
//! Each call builds its own frequency table, tree and code table and drops
//! the intermediate state before returning. Nothing is cached between calls.

use tracing::debug;

use crate::code_table::CodeTable;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::pack::pack;
use crate::tree::PrefixTree;
use crate::unpack::unpack;

/// Derive the code table for `data`.
///
/// Returns an empty table for empty input.
pub fn build_code_table(data: &[u8]) -> Result<CodeTable> {
    let freqs = FrequencyTable::from_bytes(data);
    if freqs.is_empty() {
        return Ok(CodeTable::empty());
    }

    let tree = PrefixTree::build(&freqs)?;
    let codes = CodeTable::from_tree(&tree)?;

    debug!(
        input_len = data.len(),
        symbols = freqs.len(),
        depth = tree.depth(),
        max_code_len = codes.max_len(),
        "built code table"
    );

    Ok(codes)
}

/// Compress `data`, returning the packed bytes and the code table needed to
/// reverse them.
///
/// Empty input yields `(vec![], CodeTable::empty())`.
///
/// # Example
/// ```
/// use huffzip_core::{compress, decompress};
///
/// let (packed, codes) = compress(b"abracadabra").unwrap();
/// assert_eq!(decompress(&packed, &codes).unwrap(), b"abracadabra");
/// ```
pub fn compress(data: &[u8]) -> Result<(Vec<u8>, CodeTable)> {
    let codes = build_code_table(data)?;
    let packed = pack(data, &codes)?;
    Ok((packed, codes))
}

/// Reverse [`compress`] given the code table it returned.
///
/// Empty `packed` yields an empty output.
pub fn decompress(packed: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    unpack(packed, codes)
}
