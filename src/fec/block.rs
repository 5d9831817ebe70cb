//! PDU-level encoder and decoder stages.
//!
//! These wrap a shared [`FecCodec`] the way a flow-graph block would: a PDU
//! that cannot be processed is dropped with a warning instead of failing the
//! pipeline, and counters record what happened.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::warn;

use crate::error::Error;
use crate::fec::codec::{FecCodec, Scheme};
use crate::fec::ErrorCorrection;

/// Metadata key listing uncorrectable block indices, comma separated
pub const META_UNCORRECTABLE: &str = "fec.uncorrectable";

/// Metadata key holding the number of corrected bits
pub const META_CORRECTED_BITS: &str = "fec.corrected_bits";

/// A payload with attached key/value metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pdu {
    pub meta: BTreeMap<String, String>,
    pub payload: Vec<u8>,
}

impl Pdu {
    pub fn new(payload: Vec<u8>) -> Self {
        Pdu {
            meta: BTreeMap::new(),
            payload,
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// Counters kept by a block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockStats {
    /// PDUs published downstream
    pub processed: usize,
    /// PDUs dropped because they could not be processed
    pub dropped: usize,
    /// Codewords that exceeded the correction capability
    pub uncorrectable_blocks: usize,
    /// Bits flipped by the decoder
    pub corrected_bits: usize,
}

/// Encoder stage: applies the codec's scheme to each PDU
#[derive(Debug, Clone)]
pub struct FecEncoderBlock {
    codec: Arc<FecCodec>,
    stats: BlockStats,
}

impl FecEncoderBlock {
    pub fn new(codec: Arc<FecCodec>) -> Self {
        FecEncoderBlock {
            codec,
            stats: BlockStats::default(),
        }
    }

    /// Encode one PDU.
    ///
    /// With no FEC the PDU passes through untouched, metadata included.
    /// Otherwise the output carries only the encoded payload. Returns `None`
    /// when the PDU was dropped.
    pub fn process(&mut self, pdu: Pdu) -> Option<Pdu> {
        if self.codec.scheme() == Scheme::None {
            self.stats.processed += 1;
            return Some(pdu);
        }

        match self.codec.encode(&pdu.payload) {
            Ok(payload) => {
                self.stats.processed += 1;
                Some(Pdu::new(payload))
            }
            Err(e) => {
                warn!("fec encoder dropped a PDU: {}", e);
                self.stats.dropped += 1;
                None
            }
        }
    }

    pub fn stats(&self) -> BlockStats {
        self.stats
    }
}

/// Decoder stage: removes the codec's scheme from each PDU
#[derive(Debug, Clone)]
pub struct FecDecoderBlock {
    codec: Arc<FecCodec>,
    stats: BlockStats,
}

impl FecDecoderBlock {
    pub fn new(codec: Arc<FecCodec>) -> Self {
        FecDecoderBlock {
            codec,
            stats: BlockStats::default(),
        }
    }

    /// Decode one PDU.
    ///
    /// Corrected and uncorrectable counts are attached as metadata when
    /// nonzero. Misaligned PDUs, and PDUs with uncorrectable blocks under the
    /// `Reject` policy, are dropped.
    pub fn process(&mut self, pdu: Pdu) -> Option<Pdu> {
        if self.codec.scheme() == Scheme::None {
            self.stats.processed += 1;
            return Some(pdu);
        }

        let decoded = self
            .codec
            .decode_with_report(&pdu.payload)
            .and_then(|report| self.codec.config().policy.resolve(report));

        match decoded {
            Ok(report) => {
                self.stats.processed += 1;
                self.stats.corrected_bits += report.corrected_bits;
                self.stats.uncorrectable_blocks += report.uncorrectable_blocks.len();

                let mut out = Pdu::new(report.data);
                if report.corrected_bits > 0 {
                    out = out.with_meta(META_CORRECTED_BITS, report.corrected_bits.to_string());
                }
                if !report.uncorrectable_blocks.is_empty() {
                    let blocks: Vec<String> = report
                        .uncorrectable_blocks
                        .iter()
                        .map(|b| b.to_string())
                        .collect();
                    out = out.with_meta(META_UNCORRECTABLE, blocks.join(","));
                }
                Some(out)
            }
            Err(e) => {
                if let Error::Uncorrectable { blocks } = &e {
                    self.stats.uncorrectable_blocks += blocks.len();
                }
                warn!("fec decoder dropped a PDU: {}", e);
                self.stats.dropped += 1;
                None
            }
        }
    }

    pub fn stats(&self) -> BlockStats {
        self.stats
    }
}
