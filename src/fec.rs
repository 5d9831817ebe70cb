//! Forward error correction for link-layer PDUs.
//!
//! This module provides three interchangeable schemes behind one codec:
//! - `None`: identity pass-through
//! - `Repetition3`: every bit sent three times, majority-vote decoding
//! - `Golay24_12`: extended binary Golay (24,12), corrects up to 3 bit errors
//!   per 24-bit codeword
//!
//! All schemes take a complete byte buffer and return a new one. Bits are read
//! and written most-significant first in every direction.
//!
//! # Examples
//!
//! ```rust
//! use pdu_fec::fec::{CodecConfig, ErrorCorrection, FecCodec, Scheme};
//!
//! let codec = FecCodec::new(CodecConfig::new(Scheme::Golay24_12));
//! let payload = b"PDU".to_vec();
//!
//! let mut encoded = codec.encode(&payload).unwrap();
//! encoded[1] ^= 0x04;
//! assert_eq!(codec.decode(&encoded).unwrap(), payload);
//! ```

pub use crate::error::Result;

/// Trait for error correction code implementations
pub trait ErrorCorrection {
    /// Encode data with error correction symbols
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decode data and correct errors if possible
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Outcome of a decode call, with per-block diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Decoded payload
    pub data: Vec<u8>,
    /// Number of received bits the decoder had to flip
    pub corrected_bits: usize,
    /// Indices of blocks that could not be corrected, in ascending order
    pub uncorrectable_blocks: Vec<usize>,
    /// Number of code blocks in the input
    pub total_blocks: usize,
}

impl DecodeReport {
    /// True when no block was uncorrectable
    pub fn is_clean(&self) -> bool {
        self.uncorrectable_blocks.is_empty()
    }
}

pub mod bits;
pub mod block;
pub mod code;
pub mod codec;
pub mod golay;
pub mod repetition;

pub use block::{BlockStats, FecDecoderBlock, FecEncoderBlock, Pdu};
pub use code::{CodeDefinition, GOLAY_24_12};
pub use codec::{CodecConfig, FecCodec, Scheme, UncorrectablePolicy};
pub use golay::{Golay24, WordOutcome};
pub use repetition::Repetition3;
