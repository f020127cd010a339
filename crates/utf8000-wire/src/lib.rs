#![warn(clippy::pedantic)]

pub mod buffer;
pub mod classify;
pub mod config;
pub mod decoded_byte;
pub mod decoded_value;
pub mod error;
pub mod incremental;

pub use config::DecoderConfig;
pub use decoded_byte::{ByteFlags, DecodedByte};
pub use decoded_value::DecodedValue;
pub use error::WireError;
pub use incremental::IncrementalDecoder;
