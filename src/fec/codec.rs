//! Scheme selection and the codec front-end.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use log::{debug, trace};

use crate::error::Error;
use crate::fec::golay::Golay24;
use crate::fec::repetition::Repetition3;
use crate::fec::{DecodeReport, ErrorCorrection, Result};

/// FEC scheme applied to every PDU passing through a codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Pass-through
    #[default]
    None,
    /// Rate-1/3 repetition with majority vote
    Repetition3,
    /// Extended binary Golay (24,12)
    Golay24_12,
}

impl Scheme {
    /// Numeric selector used by pipeline configuration: 0, 1 or 2
    pub fn selector(&self) -> i32 {
        match self {
            Scheme::None => 0,
            Scheme::Repetition3 => 1,
            Scheme::Golay24_12 => 2,
        }
    }

    /// Ratio of encoded bytes to payload bytes
    pub fn expansion(&self) -> usize {
        match self {
            Scheme::None => 1,
            Scheme::Repetition3 => 3,
            Scheme::Golay24_12 => 2,
        }
    }

    /// Payload lengths accepted by `encode` must be a multiple of this
    pub fn encode_multiple(&self) -> usize {
        match self {
            Scheme::None | Scheme::Repetition3 => 1,
            Scheme::Golay24_12 => 3,
        }
    }

    /// Encoded lengths accepted by `decode` must be a multiple of this
    pub fn decode_multiple(&self) -> usize {
        match self {
            Scheme::None => 1,
            Scheme::Repetition3 | Scheme::Golay24_12 => 3,
        }
    }

    /// Length of the encoding of an `n`-byte payload
    pub fn encoded_len(&self, n: usize) -> usize {
        n * self.expansion()
    }

    /// Length of the payload recovered from `n` encoded bytes, rounded up to
    /// whole bytes
    pub fn decoded_len(&self, n: usize) -> usize {
        n.div_ceil(self.expansion())
    }
}

impl TryFrom<i32> for Scheme {
    type Error = Error;

    fn try_from(selector: i32) -> Result<Self> {
        match selector {
            0 => Ok(Scheme::None),
            1 => Ok(Scheme::Repetition3),
            2 => Ok(Scheme::Golay24_12),
            other => Err(Error::Configuration(format!(
                "invalid FEC selector {}, expected 0 (none), 1 (repetition) or 2 (golay)",
                other
            ))),
        }
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(Scheme::None),
            "repetition3" | "rep3" | "1" => Ok(Scheme::Repetition3),
            "golay24_12" | "golay" | "2" => Ok(Scheme::Golay24_12),
            other => Err(Error::Configuration(format!("unknown FEC scheme '{}'", other))),
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::None => "none",
            Scheme::Repetition3 => "repetition3",
            Scheme::Golay24_12 => "golay24_12",
        };
        write!(f, "{}", name)
    }
}

/// What `decode` does when a Golay codeword cannot be corrected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UncorrectablePolicy {
    /// Substitute zero bits for the block and keep going
    #[default]
    ZeroFill,
    /// Fail the whole call with [`Error::Uncorrectable`]
    Reject,
}

impl UncorrectablePolicy {
    /// Apply the policy to a finished report
    pub fn resolve(&self, report: DecodeReport) -> Result<DecodeReport> {
        match self {
            UncorrectablePolicy::Reject if !report.is_clean() => Err(Error::Uncorrectable {
                blocks: report.uncorrectable_blocks,
            }),
            _ => Ok(report),
        }
    }
}

/// Configuration for [`FecCodec`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    pub scheme: Scheme,
    pub policy: UncorrectablePolicy,
}

impl CodecConfig {
    pub fn new(scheme: Scheme) -> Self {
        CodecConfig {
            scheme,
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, policy: UncorrectablePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Stateless codec for a fixed scheme.
///
/// Every call works on its own buffers and the Golay matrices are a shared
/// `static`, so one codec can serve any number of threads.
#[derive(Debug, Clone)]
pub struct FecCodec {
    config: CodecConfig,
    repetition: Repetition3,
    golay: Golay24,
}

impl FecCodec {
    pub fn new(config: CodecConfig) -> Self {
        debug!(
            "fec codec: scheme {}, uncorrectable policy {:?}",
            config.scheme, config.policy
        );
        FecCodec {
            config,
            repetition: Repetition3::new(),
            golay: Golay24::new(),
        }
    }

    /// Build a codec from the numeric selector (0 none, 1 repetition, 2 golay)
    pub fn from_selector(selector: i32) -> Result<Self> {
        Ok(Self::new(CodecConfig::new(Scheme::try_from(selector)?)))
    }

    pub fn scheme(&self) -> Scheme {
        self.config.scheme
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode and return per-block diagnostics.
    ///
    /// The uncorrectable policy is not applied here: uncorrectable blocks are
    /// zero-filled in `data` and listed in the report.
    pub fn decode_with_report(&self, data: &[u8]) -> Result<DecodeReport> {
        let report = match self.config.scheme {
            Scheme::None => DecodeReport {
                data: data.to_vec(),
                ..DecodeReport::default()
            },
            Scheme::Repetition3 => self.repetition.decode(data)?,
            Scheme::Golay24_12 => self.golay.decode(data)?,
        };

        trace!(
            "{}: decoded {} bytes into {}, {} bits corrected, {} of {} blocks uncorrectable",
            self.config.scheme,
            data.len(),
            report.data.len(),
            report.corrected_bits,
            report.uncorrectable_blocks.len(),
            report.total_blocks
        );
        Ok(report)
    }
}

impl ErrorCorrection for FecCodec {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self.config.scheme {
            Scheme::None => Ok(data.to_vec()),
            Scheme::Repetition3 => Ok(self.repetition.encode(data)),
            Scheme::Golay24_12 => self.golay.encode(data),
        }
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let report = self.decode_with_report(data)?;
        Ok(self.config.policy.resolve(report)?.data)
    }
}
