/// Errors raised while classifying or decoding a UTF8000 byte stream.
///
/// The three grammar variants (`InvalidStartByte`,
/// `InvalidContinuationByte`, `OverlongEncoding`) are fatal for the stream
/// that produced them. There is no resynchronisation: once one is returned
/// the decoder refuses further input with [`WireError::Poisoned`].
///
/// ```text
///   WireError
///   ├── InvalidStartByte         ← 10xxxxxx where a value must begin
///   ├── InvalidContinuationByte  ← expected 10xxxxxx, got something else
///   ├── OverlongEncoding         ← value fits in fewer bytes
///   ├── NotContentByte           ← content queried on a signaling byte
///   └── Poisoned                 ← feed after a fatal error
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A continuation-pattern byte appeared where a primary start byte was
    /// expected.
    #[error("invalid start byte {byte:#04X} at offset {offset}: continuation byte detected")]
    InvalidStartByte { offset: u64, byte: u8 },

    /// A byte read as a continuation byte does not carry the `10` prefix.
    #[error("invalid continuation byte {byte:#04X} at offset {offset}: not a continuation byte prefix")]
    InvalidContinuationByte { offset: u64, byte: u8 },

    /// The value starting at `offset` could have been encoded in fewer bytes.
    #[error("overlong encoding for value starting at offset {offset}")]
    OverlongEncoding { offset: u64 },

    /// `content` or `n_content_bits` was requested from a byte that carries
    /// only signaling bits.
    #[error("byte {byte:#04X} carries no content bits")]
    NotContentByte { byte: u8 },

    /// The decoder already failed on an earlier byte and cannot resume.
    #[error("decoder is unusable after a previous grammar error")]
    Poisoned,
}
