use thiserror::Error;

use crate::fec::Scheme;

/// Errors produced while configuring or running a FEC codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The codec could not be constructed from the given configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The input length is not a multiple of the scheme's byte granularity
    #[error("{scheme}: input of {len} bytes is not a multiple of {multiple}")]
    InvalidBlockAlignment {
        scheme: Scheme,
        len: usize,
        multiple: usize,
    },

    /// One or more codewords exceeded the correction capability of the code
    #[error("{} uncorrectable block(s)", .blocks.len())]
    Uncorrectable { blocks: Vec<usize> },
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
