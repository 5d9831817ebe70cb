//! Extended binary Golay (24,12) encoder and syndrome decoder.
//!
//! # Bit layout
//!
//! A data word `u` of 12 bits is encoded as `c = u * G` with `G = [P | I]`.
//! Positions 0..11 of the codeword (the first twelve bits on the wire) carry
//! the parity `u * P`, positions 12..23 carry `u` unchanged. Held in a `u32`,
//! the parity is therefore in bits 23..12 and the data in the low bits 11..0.
//!
//! The decoder computes the error pattern `e = (e_parity, e_data)` over the
//! same positions and recovers the data as `r[12..24] ^ e[12..24]`, so encoder
//! and decoder agree on which half is the message.
//!
//! # Byte framing
//!
//! Three data bytes hold exactly two data words and encode to six bytes.
//! Inputs must be a multiple of three bytes in both directions; the whole call
//! fails otherwise and nothing is produced.
//!
//! # Example
//!
//! ```
//! use pdu_fec::fec::golay::Golay24;
//!
//! let golay = Golay24::new();
//! let encoded = golay.encode(&[0xAB, 0xCD, 0xEF]).unwrap();
//! assert_eq!(encoded.len(), 6);
//!
//! let mut received = encoded.clone();
//! received[0] ^= 0x81;
//! received[4] ^= 0x10;
//! let report = golay.decode(&received).unwrap();
//! assert_eq!(report.data, vec![0xAB, 0xCD, 0xEF]);
//! assert_eq!(report.corrected_bits, 3);
//! ```

use bitvec::prelude::*;
use log::warn;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Error;
use crate::fec::bits::{self, weight};
use crate::fec::code::{unit_vector, CodeDefinition, CODE_BITS, DATA_BITS};
use crate::fec::{DecodeReport, Result, Scheme};

/// Data bytes per independent group (two data words)
pub const DATA_GROUP_BYTES: usize = 3;

/// Encoded bytes per independent group (two codewords)
pub const CODE_GROUP_BYTES: usize = 6;

const WORDS_PER_GROUP: usize = 2;

/// Result of decoding one 24-bit received word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOutcome {
    /// The word was within distance 3 of a codeword
    Corrected {
        /// Recovered 12-bit data word
        data: u16,
        /// 24-bit error pattern that was removed
        error: u32,
    },
    /// More than 3 errors were detected
    Uncorrectable,
}

impl WordOutcome {
    /// Recovered data, or the all-zero word when uncorrectable
    pub fn data(&self) -> u16 {
        match self {
            WordOutcome::Corrected { data, .. } => *data,
            WordOutcome::Uncorrectable => 0,
        }
    }

    /// Number of bits the decoder flipped
    pub fn flipped_bits(&self) -> usize {
        match self {
            WordOutcome::Corrected { error, .. } => weight(*error) as usize,
            WordOutcome::Uncorrectable => 0,
        }
    }

    pub fn is_correctable(&self) -> bool {
        matches!(self, WordOutcome::Corrected { .. })
    }
}

/// Golay (24,12) codec bound to a shared code definition
#[derive(Debug, Clone, Copy)]
pub struct Golay24 {
    code: &'static CodeDefinition,
}

impl Default for Golay24 {
    fn default() -> Self {
        Self::new()
    }
}

impl Golay24 {
    /// Codec over the standard compile-time code
    pub fn new() -> Self {
        Self::with_code(CodeDefinition::standard())
    }

    pub fn with_code(code: &'static CodeDefinition) -> Self {
        Golay24 { code }
    }

    pub fn code(&self) -> &'static CodeDefinition {
        self.code
    }

    /// Encode a single 12-bit data word into a 24-bit codeword
    pub fn encode_word(&self, u: u16) -> u32 {
        self.code.encode(u)
    }

    /// Find the error pattern of a received word, if it has weight 3 or less.
    ///
    /// With `s = r * H^T` the search runs:
    /// 1. `w(s) <= 3`: `e = (s, 0)`
    /// 2. `w(s + P_i) <= 2` for the first row `i`: `e = (s + P_i, u_i)`
    /// 3. `w(s * P)` is 2 or 3: `e = (0, s * P)`
    /// 4. `w(s * P + P_i) == 2` for the first row `i`: `e = (u_i, s * P + P_i)`
    pub fn error_pattern(&self, r: u32) -> Option<u32> {
        let s = self.code.syndrome(r);

        if weight(s.into()) <= 3 {
            return Some(join(s, 0));
        }

        for i in 0..DATA_BITS {
            let spi = s ^ self.code.p_row(i);
            if weight(spi.into()) <= 2 {
                return Some(join(spi, unit_vector(i)));
            }
        }

        let sp = self.code.mul_p(s);
        if matches!(weight(sp.into()), 2 | 3) {
            return Some(join(0, sp));
        }

        for i in 0..DATA_BITS {
            let sppi = sp ^ self.code.p_row(i);
            if weight(sppi.into()) == 2 {
                return Some(join(unit_vector(i), sppi));
            }
        }

        None
    }

    /// Decode a single 24-bit received word
    pub fn decode_word(&self, r: u32) -> WordOutcome {
        let r = r & 0x00FF_FFFF;
        match self.error_pattern(r) {
            Some(error) => WordOutcome::Corrected {
                data: message_half(r ^ error),
                error,
            },
            None => WordOutcome::Uncorrectable,
        }
    }

    /// Encode `data`, whose length must be a multiple of 3 bytes.
    ///
    /// Output is exactly twice as long as the input.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        check_alignment(data, DATA_GROUP_BYTES)?;

        #[cfg(feature = "parallel")]
        let groups: Vec<[u8; CODE_GROUP_BYTES]> = data
            .par_chunks_exact(DATA_GROUP_BYTES)
            .map(|group| self.encode_group(group))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let groups: Vec<[u8; CODE_GROUP_BYTES]> = data
            .chunks_exact(DATA_GROUP_BYTES)
            .map(|group| self.encode_group(group))
            .collect();

        Ok(groups.concat())
    }

    /// Decode `encoded`, whose length must be a multiple of 3 bytes.
    ///
    /// Uncorrectable words are replaced by twelve zero bits and listed in the
    /// report by codeword index; decoding continues with the next word. An odd
    /// number of codewords leaves a trailing half byte, zero-padded.
    pub fn decode(&self, encoded: &[u8]) -> Result<DecodeReport> {
        check_alignment(encoded, DATA_GROUP_BYTES)?;

        let total_blocks = encoded.len() * 8 / CODE_BITS;
        let input = bits::unpack(encoded);

        #[cfg(feature = "parallel")]
        let outcomes: Vec<WordOutcome> = input
            .chunks_exact(CODE_BITS)
            .map(bits::load_word)
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|r| self.decode_word(r))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<WordOutcome> = input
            .chunks_exact(CODE_BITS)
            .map(|word| self.decode_word(bits::load_word(word)))
            .collect();

        let mut decoded = bits::zeroed(total_blocks * DATA_BITS);
        let mut report = DecodeReport {
            total_blocks,
            ..DecodeReport::default()
        };

        for (k, outcome) in outcomes.iter().enumerate() {
            bits::store_word(
                &mut decoded[k * DATA_BITS..(k + 1) * DATA_BITS],
                outcome.data().into(),
            );
            if outcome.is_correctable() {
                report.corrected_bits += outcome.flipped_bits();
            } else {
                warn!("golay: codeword {} of {} is uncorrectable", k, total_blocks);
                report.uncorrectable_blocks.push(k);
            }
        }

        report.data = bits::pack(decoded);
        Ok(report)
    }

    fn encode_group(&self, group: &[u8]) -> [u8; CODE_GROUP_BYTES] {
        let input = bits::unpack(group);
        let mut output = [0u8; CODE_GROUP_BYTES];
        let stream = output.view_bits_mut::<Msb0>();

        for (k, word) in input.chunks_exact(DATA_BITS).take(WORDS_PER_GROUP).enumerate() {
            let codeword = self.encode_word(bits::load_word(word) as u16);
            bits::store_word(&mut stream[k * CODE_BITS..(k + 1) * CODE_BITS], codeword);
        }

        output
    }
}

/// Place a parity half and a message half into a 24-bit word
fn join(parity: u16, message: u16) -> u32 {
    (u32::from(parity) << DATA_BITS) | u32::from(message)
}

fn message_half(word: u32) -> u16 {
    (word & 0x0FFF) as u16
}

fn check_alignment(data: &[u8], multiple: usize) -> Result<()> {
    if data.len() % multiple != 0 {
        return Err(Error::InvalidBlockAlignment {
            scheme: Scheme::Golay24_12,
            len: data.len(),
            multiple,
        });
    }
    Ok(())
}
