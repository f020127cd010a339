#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod streaming;

pub use config::StreamConfig;
pub use decoder::Utf8000Decoder;
pub use error::DecodeError;
pub use streaming::StreamingDecoder;
pub use utf8000_wire::{DecodedByte, DecodedValue, DecoderConfig, IncrementalDecoder, WireError};
