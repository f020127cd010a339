use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};
use utf8000_wire::{DecodedValue, IncrementalDecoder};

use crate::config::StreamConfig;
use crate::error::DecodeError;

/// Asynchronous streaming decoder: yields values one at a time as their
/// bytes arrive.
///
/// Reads up to `read_chunk_size` bytes per call from any `AsyncRead`
/// source (files, TCP sockets, HTTP response bodies, etc.) and feeds them
/// to an [`IncrementalDecoder`]. Backpressure is natural: nothing is read
/// until the caller awaits the next value and the queue is empty.
///
/// ```text
///   Value(v0)
///   Value(v1)
///   ...
///   None                 ← clean EOF between values
///   Err(Truncated)       ← EOF inside a value, then None
///   Err(Wire(..))        ← grammar error, then None
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use utf8000_decoder::StreamingDecoder;
/// use tokio::io::AsyncRead;
///
/// async fn sum_values(reader: impl AsyncRead + Unpin) -> u128 {
///     let mut stream = StreamingDecoder::new(reader);
///     let mut total = 0;
///     while let Some(value) = stream.next().await.transpose().unwrap() {
///         total += value.to_u128().unwrap_or(0);
///     }
///     total
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    decoder: IncrementalDecoder,
    state: StreamState,
    /// Error raised by the last chunk, held back until the values that
    /// completed before it have been yielded.
    deferred_error: Option<DecodeError>,
    /// Read buffer, reused for every chunk.
    buf: Vec<u8>,
}

/// ```text
///   Reading → Done
/// ```
///
/// `Done` is entered on EOF, on a reader error, or on a grammar error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Reading,
    Done,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    /// Create a streaming decoder with the default configuration.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &StreamConfig::default())
    }

    #[must_use]
    pub fn with_config(reader: R, config: &StreamConfig) -> Self {
        Self {
            reader,
            decoder: IncrementalDecoder::with_config(config.decoder),
            state: StreamState::Reading,
            deferred_error: None,
            buf: vec![0u8; config.chunk_size()],
        }
    }

    /// Read the next value from the stream.
    ///
    /// Returns `Some(Ok(value))` for each decoded value, `None` once the
    /// stream is exhausted, or `Some(Err(..))` exactly once if decoding
    /// fails. After an error every further call returns `None`.
    pub async fn next(&mut self) -> Option<Result<DecodedValue, DecodeError>> {
        loop {
            if let Some(value) = self.decoder.next_value() {
                return Some(Ok(value));
            }
            if let Some(err) = self.deferred_error.take() {
                return Some(Err(err));
            }
            if self.state == StreamState::Done {
                return None;
            }
            self.fill().await;
        }
    }

    /// Total bytes consumed by the decoder so far.
    #[must_use]
    pub fn consumed(&self) -> u64 {
        self.decoder.consumed()
    }

    /// Recover the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read one chunk and feed it. Sets `Done` on EOF or error.
    async fn fill(&mut self) {
        let n = match self.reader.read(&mut self.buf).await {
            Ok(n) => n,
            Err(e) => {
                self.finish_with(DecodeError::Io(e));
                return;
            }
        };

        if n == 0 {
            debug!("stream EOF after {} bytes", self.decoder.consumed());
            self.state = StreamState::Done;
            let pending_bytes = self.decoder.in_progress();
            if pending_bytes > 0 {
                self.deferred_error = Some(DecodeError::Truncated { pending_bytes });
            }
            return;
        }

        if let Err(e) = self.decoder.feed(&self.buf[..n]) {
            self.finish_with(e.into());
        }
    }

    fn finish_with(&mut self, err: DecodeError) {
        self.state = StreamState::Done;
        self.deferred_error = Some(err);
    }
}
