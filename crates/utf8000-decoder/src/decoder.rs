use std::io::{ErrorKind, Read};

use log::debug;
use utf8000_wire::{DecodedValue, IncrementalDecoder};

use crate::config::StreamConfig;
use crate::error::DecodeError;

/// Synchronous UTF8000 decoder for inputs that are known to be complete.
///
/// Wraps an [`IncrementalDecoder`] and adds the one check it cannot make
/// on its own: when the input is over, the last value must be finished.
///
///   1. **Feed**: hand the input (or each chunk read from a reader) to the
///      incremental decoder.
///   2. **Collect**: drain completed values after every chunk.
///   3. **Termination**: at end of input, report
///      [`DecodeError::Truncated`] if a value is still half-built.
///
/// # Example
///
/// ```rust
/// use utf8000_decoder::Utf8000Decoder;
///
/// let values = Utf8000Decoder::decode(&[0x41, 0xC2, 0xA9]).unwrap();
/// let ints: Vec<_> = values.iter().map(|v| v.to_u64().unwrap()).collect();
/// assert_eq!(ints, vec![0x41, 0xA9]);
/// ```
pub struct Utf8000Decoder;

impl Utf8000Decoder {
    /// Decode every value in `input`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] on any grammar violation.
    /// - [`DecodeError::Truncated`] if `input` ends inside a value.
    pub fn decode(input: &[u8]) -> Result<Vec<DecodedValue>, DecodeError> {
        let mut decoder = IncrementalDecoder::new();
        decoder.feed(input)?;
        finish(decoder, Vec::new())
    }

    /// Decode every value from a blocking reader, `read_chunk_size` bytes
    /// at a time.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Io`] if the reader fails.
    /// - [`DecodeError::Wire`] on any grammar violation.
    /// - [`DecodeError::Truncated`] if the reader hits EOF inside a value.
    pub fn decode_reader<R: Read>(
        mut reader: R,
        config: &StreamConfig,
    ) -> Result<Vec<DecodedValue>, DecodeError> {
        let mut decoder = IncrementalDecoder::with_config(config.decoder);
        let mut chunk = vec![0u8; config.chunk_size()];
        let mut values = Vec::new();

        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::Io(e)),
            };
            decoder.feed(&chunk[..n])?;
            values.extend(decoder.drain());
        }

        debug!(
            "reader exhausted after {} bytes, {} values",
            decoder.consumed(),
            values.len() + decoder.pending()
        );
        finish(decoder, values)
    }

    /// Check that `decoder` is not holding half a value, for callers that
    /// drive an [`IncrementalDecoder`] themselves and have reached the end
    /// of their input.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Truncated`] if a value is still under construction.
    pub fn ensure_complete(decoder: &IncrementalDecoder) -> Result<(), DecodeError> {
        match decoder.in_progress() {
            0 => Ok(()),
            pending_bytes => Err(DecodeError::Truncated { pending_bytes }),
        }
    }
}

/// Collect whatever is still queued and reject a trailing partial value.
fn finish(
    mut decoder: IncrementalDecoder,
    mut values: Vec<DecodedValue>,
) -> Result<Vec<DecodedValue>, DecodeError> {
    values.extend(decoder.drain());
    Utf8000Decoder::ensure_complete(&decoder)?;
    Ok(values)
}
