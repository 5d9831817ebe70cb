pub mod error;
pub mod fec;

pub use error::{Error, Result};
pub use fec::{
    CodecConfig, DecodeReport, ErrorCorrection, FecCodec, FecDecoderBlock, FecEncoderBlock, Pdu,
    Scheme, UncorrectablePolicy,
};
