use utf8000_wire::WireError;

/// Errors from the whole-input and streaming decoders.
///
/// ```text
///   DecodeError
///   ├── Wire(WireError)   ← grammar violation inside the byte stream
///   ├── Truncated         ← input ended in the middle of a value
///   └── Io(io::Error)     ← from the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The byte stream violates the UTF8000 grammar.
    ///
    /// Wraps the fatal [`WireError`] raised by the incremental decoder;
    /// the offset inside it is relative to the start of the input.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The input ended after `pending_bytes` bytes of an unfinished value.
    ///
    /// The incremental decoder itself never reports this: an unbounded
    /// stream can always deliver more bytes. Only callers that know the
    /// input is complete can call a partial value an error.
    #[error("input ended mid-value: {pending_bytes} bytes of an unfinished value")]
    Truncated { pending_bytes: usize },

    /// An I/O error from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
