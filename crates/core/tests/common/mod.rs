//! Shared helpers for the integration tests.

#![allow(dead_code)]

use huffzip_core::bitio::{BitReader, BitWriter};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of data mixing runs, text-like bytes, short
/// repeating patterns and random bytes. Same seed, same bytes.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let block = (size_bytes - data.len()).min(rng.gen_range(64..=4096));

        match rng.gen_range(0..10u8) {
            // runs of one byte
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(block));
            }
            // limited alphabet
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                for _ in 0..block {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }
            // repeating pattern
            6..=7 => {
                let len = rng.gen_range(4..=32);
                let pattern: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(block));
            }
            // noise
            _ => data.extend((0..block).map(|_| rng.gen::<u8>())),
        }
    }

    data
}

/// Drop the last `bits` payload bits of a packed buffer and re-pad it, as if
/// the stream had been cut short.
pub fn truncate_payload(packed: &[u8], bits: usize) -> Vec<u8> {
    let (&padding, body) = packed.split_first().expect("packed buffer is not empty");
    let payload_bits = body.len() * 8 - padding as usize;
    let kept = payload_bits - bits;

    let mut reader = BitReader::with_bit_len(body, kept).unwrap();
    let mut writer = BitWriter::new();
    while !reader.is_empty() {
        let n = reader.bits_remaining().min(64);
        writer.write_bits(reader.read_bits(n).unwrap(), n).unwrap();
    }

    let (bytes, padding) = writer.finish();
    let mut out = vec![padding];
    out.extend(bytes);
    out
}

/// Ten symbols with Fibonacci weights: the two rarest get 9-bit codes.
/// The input ends with a rare symbol.
pub fn deep_code_input() -> Vec<u8> {
    let weights = [1usize, 1, 2, 3, 5, 8, 13, 21, 34, 55];
    let mut data = Vec::new();
    for (symbol, &weight) in weights.iter().enumerate().rev() {
        data.extend(std::iter::repeat(b'A' + symbol as u8).take(weight));
    }
    data
}
