use utf8000_wire::DecoderConfig;

/// Configuration for reader-driven decoding.
///
/// Used by [`Utf8000Decoder::decode_reader`](crate::Utf8000Decoder::decode_reader)
/// and [`StreamingDecoder`](crate::StreamingDecoder).
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────────┐
/// │ Field           │ Purpose                                          │
/// ├─────────────────┼──────────────────────────────────────────────────┤
/// │ read_chunk_size │ Bytes requested from the reader per read call    │
/// │ decoder         │ Buffer tuning for the wrapped IncrementalDecoder │
/// └─────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// Chunk size affects latency and syscall count only. The decoded values
/// are identical for every chunk size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamConfig {
    /// Bytes requested per read. Zero is treated as one.
    pub read_chunk_size: usize,

    /// Settings for the incremental decoder underneath.
    pub decoder: DecoderConfig,
}

impl StreamConfig {
    /// The effective chunk size, never zero.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.read_chunk_size.max(1)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: 4096,
            decoder: DecoderConfig::default(),
        }
    }
}
