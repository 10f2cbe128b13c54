//! Property-based tests for the coding engine.

use huffzip_core::{compress, decompress, CodeTable, FrequencyTable, PrefixTree};
use proptest::prelude::*;

/// Inputs biased toward small alphabets, where ties and deep trees happen.
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..2048),
        prop::collection::vec(0u8..4, 0..2048),
        prop::collection::vec(prop::sample::select(b"aab.cccd".to_vec()), 1..512),
    ]
}

proptest! {
    #[test]
    fn prop_round_trip(data in skewed_bytes()) {
        let (packed, codes) = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed, &codes).unwrap(), data);
    }

    #[test]
    fn prop_codes_are_prefix_free(data in skewed_bytes()) {
        let (_, codes) = compress(&data).unwrap();
        let entries: Vec<_> = codes.iter().collect();

        for (i, (_, a)) in entries.iter().enumerate() {
            for (j, (_, b)) in entries.iter().enumerate() {
                if i != j {
                    prop_assert!(!a.is_prefix_of(b), "{} prefixes {}", a, b);
                }
            }
        }
    }

    /// A full tree saturates the Kraft inequality: sum of 2^-len == 1.
    #[test]
    fn prop_kraft_sum_is_one(data in prop::collection::vec(any::<u8>(), 2..1024)) {
        let (_, codes) = compress(&data).unwrap();
        prop_assume!(codes.len() >= 2);

        let sum: u128 = codes.iter().map(|(_, c)| 1u128 << (64 - c.len())).sum();
        prop_assert_eq!(sum, 1u128 << 64);
    }

    #[test]
    fn prop_packed_length_matches_code_lengths(data in skewed_bytes()) {
        let (packed, codes) = compress(&data).unwrap();
        if data.is_empty() {
            prop_assert!(packed.is_empty());
        } else {
            let bits = codes.encoded_bit_len(&FrequencyTable::from_bytes(&data)).unwrap();
            prop_assert_eq!(packed.len() as u64, 1 + bits.div_ceil(8));
            prop_assert_eq!(packed[0] as u64, (8 - bits % 8) % 8);
        }
    }

    #[test]
    fn prop_compress_is_deterministic(data in skewed_bytes()) {
        prop_assert_eq!(compress(&data).unwrap(), compress(&data).unwrap());
    }

    #[test]
    fn prop_tree_shape(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let freqs = FrequencyTable::from_bytes(&data);
        let tree = PrefixTree::build(&freqs).unwrap();

        prop_assert_eq!(tree.leaf_count(), freqs.len());
        prop_assert_eq!(tree.internal_count(), freqs.len() - 1);
        prop_assert_eq!(tree.weight(), data.len() as u64);
    }

    #[test]
    fn prop_metadata_round_trip(data in skewed_bytes()) {
        let (_, codes) = compress(&data).unwrap();
        let restored = CodeTable::deserialize_metadata(&codes.serialize_metadata()).unwrap();
        prop_assert_eq!(restored, codes);
    }
}
