//! Triple repetition code with majority-vote decoding.
//!
//! Every source bit is sent three times in a row. The decoder takes the
//! majority of each triplet, so a single flipped bit per triplet is corrected
//! and two flipped bits silently invert the decoded bit. There is no way for a
//! hard-decision majority decoder to tell those two cases apart, so this code
//! never reports uncorrectable blocks.

use crate::error::Error;
use crate::fec::bits;
use crate::fec::{DecodeReport, Result, Scheme};

/// Copies of each source bit
pub const REPETITIONS: usize = 3;

/// Rate-1/3 repetition codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Repetition3;

impl Repetition3 {
    pub fn new() -> Self {
        Repetition3
    }

    /// Encode `data`, tripling every bit. Output is exactly three times as long.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let input = bits::unpack(data);
        let mut encoded = bits::zeroed(input.len() * REPETITIONS);

        for (k, bit) in input.iter().by_vals().enumerate() {
            encoded[REPETITIONS * k..REPETITIONS * (k + 1)].fill(bit);
        }

        bits::pack(encoded)
    }

    /// Majority-decode `encoded`, whose length must be a multiple of 3 bytes
    pub fn decode(&self, encoded: &[u8]) -> Result<DecodeReport> {
        if encoded.len() % REPETITIONS != 0 {
            return Err(Error::InvalidBlockAlignment {
                scheme: Scheme::Repetition3,
                len: encoded.len(),
                multiple: REPETITIONS,
            });
        }

        let input = bits::unpack(encoded);
        let total_blocks = input.len() / REPETITIONS;
        let mut decoded = bits::zeroed(total_blocks);
        let mut corrected_bits = 0;

        for (k, triplet) in input.chunks_exact(REPETITIONS).enumerate() {
            let ones = triplet.count_ones();
            decoded.set(k, ones * 2 > REPETITIONS);
            // Any disagreement means exactly one bit was outvoted
            if ones != 0 && ones != REPETITIONS {
                corrected_bits += 1;
            }
        }

        Ok(DecodeReport {
            data: bits::pack(decoded),
            corrected_bits,
            uncorrectable_blocks: Vec::new(),
            total_blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_encode_triples_each_bit() {
        let code = Repetition3::new();
        // 1 0 1 1 0 0 0 0 -> 111 000 111 111 000 000 000 000
        let encoded = code.encode(&[0b1011_0000]);
        assert_eq!(encoded, vec![0b1110_0011, 0b1111_0000, 0b0000_0000]);
    }

    #[test]
    fn test_decode_concrete_scenario() {
        let code = Repetition3::new();
        let report = code.decode(&[0b1110_0011, 0b1111_0000, 0b0000_0000]).unwrap();
        assert_eq!(report.data, vec![0b1011_0000]);
        assert_eq!(report.corrected_bits, 0);
        assert_eq!(report.total_blocks, 8);
        assert!(report.is_clean());
    }

    #[test]
    fn test_round_trip() {
        let code = Repetition3::new();
        let mut rng = StdRng::seed_from_u64(7);
        for len in [0usize, 1, 2, 3, 17, 64] {
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let encoded = code.encode(&data);
            assert_eq!(encoded.len(), 3 * len);
            assert_eq!(code.decode(&encoded).unwrap().data, data);
        }
    }

    #[test]
    fn test_single_flip_per_triplet_is_corrected() {
        let code = Repetition3::new();
        let data = b"rep";
        let clean = code.encode(data);
        let triplets = data.len() * 8;

        for offset in 0..REPETITIONS {
            let mut encoded = clean.clone();
            {
                let stream = encoded.view_bits_mut::<Msb0>();
                for k in 0..triplets {
                    let pos = REPETITIONS * k + offset;
                    let bit = stream[pos];
                    stream.set(pos, !bit);
                }
            }
            let report = code.decode(&encoded).unwrap();
            assert_eq!(report.data, data.to_vec());
            assert_eq!(report.corrected_bits, triplets);
        }
    }

    #[test]
    fn test_two_flips_invert_the_bit() {
        let code = Repetition3::new();
        let mut encoded = code.encode(&[0x00]);
        // Flip the first two bits of the first triplet
        encoded[0] ^= 0b1100_0000;
        let report = code.decode(&encoded).unwrap();
        assert_eq!(report.data, vec![0x80]);
        assert_eq!(report.corrected_bits, 1);
        assert!(report.uncorrectable_blocks.is_empty());
    }

    #[test]
    fn test_misaligned_decode_is_rejected() {
        let code = Repetition3::new();
        for len in [1usize, 2, 4, 5] {
            let err = code.decode(&vec![0u8; len]).unwrap_err();
            assert_eq!(
                err,
                Error::InvalidBlockAlignment {
                    scheme: Scheme::Repetition3,
                    len,
                    multiple: 3,
                }
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let code = Repetition3::new();
        assert!(code.encode(&[]).is_empty());
        let report = code.decode(&[]).unwrap();
        assert!(report.data.is_empty());
        assert_eq!(report.total_blocks, 0);
    }
}
