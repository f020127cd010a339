use std::collections::VecDeque;
use std::collections::vec_deque::Drain;
use std::mem;

use log::{trace, warn};

use crate::buffer::ByteBuffer;
use crate::classify::{
    CONTINUATION_BITS, START_BYTE_BITS, byte_is_continuation, first_zero_bit_from_msb,
};
use crate::config::DecoderConfig;
use crate::decoded_byte::DecodedByte;
use crate::decoded_value::DecodedValue;
use crate::error::WireError;

/// Payload bits of a two-byte start byte that must not all be zero.
const TWO_BYTE_OVERLONG_MASK: u8 = 0b0001_1110;

/// Length, in bytes, that a `0xFF` primary start byte contributes on its own.
const EXTENDED_BASE_LEN: u64 = 8;

/// Bits split between the last start byte and the next continuation byte
/// when checking for overlong forms.
const OVERLONG_CHECK_BITS: u32 = 5;

/// Position of the parser inside one grammar unit.
///
/// The parser only ever waits *between* bytes, so the whole suspended
/// continuation is this enum plus the bytes collected so far.
///
/// ```text
///          ┌──────────── 0xxxxxxx ───────────────────────────┐
///          │                                                 ▼
///   ──▶ Start ── 110xxxxx ──────────────────────────▶ Fill ──▶ emit
///          │                                          ▲
///          ├── 1110xxxx..11111110 ──▶ OverlongCheck ──┘
///          │                               ▲
///          └── 11111111 ──▶ Extension ─────┘
///                             │   ▲
///                             └───┘ 10111111
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Waiting for the primary start byte of the next value.
    Start,
    /// Inside the extension chain that follows a `0xFF` primary.
    Extension { expected: u64 },
    /// Waiting for the continuation byte that completes the overlong check.
    OverlongCheck { expected: u64 },
    /// Waiting for filler continuation bytes.
    Fill { expected: u64 },
    /// A grammar error was raised; no further input is accepted.
    Poisoned,
}

/// Resumable UTF8000 decoder.
///
/// Bytes go in through [`feed`](Self::feed) in chunks of any size,
/// including empty ones. Every time enough bytes are buffered to finish a
/// value, that value is queued and decoding of the next one starts right
/// away. Completed values come out through [`drain`](Self::drain) in the
/// order their last byte arrived.
///
/// Chunk boundaries are invisible to the grammar: feeding a stream in one
/// call or one byte at a time produces the same values.
///
/// The decoder never finishes on its own. It stops making progress only
/// when it runs out of buffered bytes, and stops for good on the first
/// grammar error.
///
/// # Example
///
/// ```rust
/// use utf8000_wire::IncrementalDecoder;
///
/// let mut decoder = IncrementalDecoder::new();
/// decoder.feed(&[0x41, 0xE2, 0x82]).unwrap();
/// decoder.feed(&[0xAC]).unwrap();
///
/// let values: Vec<_> = decoder.drain().map(|v| v.to_u64().unwrap()).collect();
/// assert_eq!(values, vec![0x41, 0x20AC]);
/// assert_eq!(decoder.drain().count(), 0);
/// ```
#[derive(Debug)]
pub struct IncrementalDecoder {
    buffer: ByteBuffer,
    ready: VecDeque<DecodedValue>,
    state: State,
    /// Bytes of the value under construction.
    partial: Vec<DecodedByte>,
    /// Stream offset of `partial[0]`.
    value_offset: u64,
    /// Total bytes consumed from the stream so far.
    consumed: u64,
}

impl Default for IncrementalDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            buffer: ByteBuffer::new(config.initial_capacity),
            ready: VecDeque::new(),
            state: State::Start,
            partial: Vec::new(),
            value_offset: 0,
            consumed: 0,
        }
    }

    /// Append `chunk` to the input and decode as far as the buffered bytes
    /// allow.
    ///
    /// # Errors
    ///
    /// - [`WireError::InvalidStartByte`] if a value begins with `10xxxxxx`.
    /// - [`WireError::InvalidContinuationByte`] if a byte that must be a
    ///   continuation byte lacks the `10` prefix.
    /// - [`WireError::OverlongEncoding`] if a value could have been encoded
    ///   in fewer bytes.
    /// - [`WireError::Poisoned`] if any of the above was already returned.
    ///
    /// Grammar errors are fatal. The value under construction and any
    /// unread input are discarded; values completed before the offending
    /// byte stay available through [`drain`](Self::drain).
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), WireError> {
        if self.state == State::Poisoned {
            return Err(WireError::Poisoned);
        }
        self.buffer.extend(chunk);

        if let Err(err) = self.resume() {
            warn!("{err}; decoder poisoned");
            self.state = State::Poisoned;
            self.partial.clear();
            self.buffer.clear();
            return Err(err);
        }
        Ok(())
    }

    /// Remove and yield every completed value, oldest first.
    ///
    /// Only values completed since the previous drain are returned. The
    /// underlying stream keeps going; later feeds can complete more values.
    pub fn drain(&mut self) -> Drain<'_, DecodedValue> {
        self.ready.drain(..)
    }

    /// Remove and return the oldest completed value.
    pub fn next_value(&mut self) -> Option<DecodedValue> {
        self.ready.pop_front()
    }

    /// Number of completed values waiting to be drained.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.ready.len()
    }

    /// Number of bytes already consumed into the value under construction.
    #[must_use]
    pub fn in_progress(&self) -> usize {
        self.partial.len()
    }

    /// Number of fed bytes not yet consumed by the parser.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.remaining()
    }

    /// Total bytes consumed from the stream.
    #[must_use]
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// `true` between values: nothing half-decoded, nothing unread.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == State::Start && self.partial.is_empty() && self.buffer.remaining() == 0
    }

    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.state == State::Poisoned
    }

    /// Run the parser until the buffer is empty.
    fn resume(&mut self) -> Result<(), WireError> {
        while let Some(byte) = self.buffer.next_byte() {
            let offset = self.consumed;
            self.consumed += 1;
            self.step(byte, offset)?;
        }
        Ok(())
    }

    fn step(&mut self, byte: u8, offset: u64) -> Result<(), WireError> {
        match self.state {
            State::Start => self.on_start_byte(byte, offset),
            State::Extension { expected } => self.on_extension_byte(byte, offset, expected),
            State::OverlongCheck { expected } => {
                self.on_overlong_check_byte(byte, offset, expected)
            }
            State::Fill { expected } => self.on_fill_byte(byte, offset, expected),
            State::Poisoned => Err(WireError::Poisoned),
        }
    }

    fn on_start_byte(&mut self, byte: u8, offset: u64) -> Result<(), WireError> {
        self.value_offset = offset;
        let idx0 = first_zero_bit_from_msb(byte, START_BYTE_BITS);

        match idx0 {
            0 => {
                self.partial.push(DecodedByte::new(byte, true, false, true));
                self.finish_value();
            }
            1 => return Err(WireError::InvalidStartByte { offset, byte }),
            2 => {
                self.partial.push(DecodedByte::new(byte, true, false, true));
                if byte & TWO_BYTE_OVERLONG_MASK == 0 {
                    return Err(WireError::OverlongEncoding { offset });
                }
                self.state = State::Fill { expected: 2 };
            }
            3..=7 => {
                self.partial
                    .push(DecodedByte::new(byte, true, false, idx0 < 7));
                self.state = State::OverlongCheck {
                    expected: u64::from(idx0),
                };
            }
            _ => {
                self.partial.push(DecodedByte::new(byte, true, false, false));
                self.state = State::Extension {
                    expected: EXTENDED_BASE_LEN,
                };
            }
        }
        Ok(())
    }

    fn on_extension_byte(&mut self, byte: u8, offset: u64, expected: u64) -> Result<(), WireError> {
        expect_continuation(byte, offset)?;
        let idx0c = first_zero_bit_from_msb(byte, CONTINUATION_BITS);
        let expected = expected + u64::from(idx0c);
        self.partial.push(DecodedByte::new(byte, true, true, idx0c < 5));

        self.state = if idx0c == CONTINUATION_BITS {
            State::Extension { expected }
        } else {
            State::OverlongCheck { expected }
        };
        Ok(())
    }

    /// Split `OVERLONG_CHECK_BITS` between the low bits of the last start
    /// byte and the high payload bits of this continuation byte. If all of
    /// them are zero the value fits in a shorter form.
    fn on_overlong_check_byte(
        &mut self,
        byte: u8,
        offset: u64,
        expected: u64,
    ) -> Result<(), WireError> {
        expect_continuation(byte, offset)?;

        #[allow(clippy::cast_possible_truncation)]
        let lower = ((expected - 2) % u64::from(CONTINUATION_BITS)) as u32;
        let upper = OVERLONG_CHECK_BITS - lower;
        let upper_mask = low_bits(upper);
        let lower_mask = low_bits(lower) << (CONTINUATION_BITS - lower);

        let last_start = self.partial.last().map_or(0, DecodedByte::byte);
        if last_start & upper_mask == 0 && byte & lower_mask == 0 {
            return Err(WireError::OverlongEncoding {
                offset: self.value_offset,
            });
        }

        self.partial.push(DecodedByte::new(byte, false, true, true));
        self.advance_fill(expected);
        Ok(())
    }

    fn on_fill_byte(&mut self, byte: u8, offset: u64, expected: u64) -> Result<(), WireError> {
        expect_continuation(byte, offset)?;
        self.partial.push(DecodedByte::new(byte, false, true, true));
        self.advance_fill(expected);
        Ok(())
    }

    fn advance_fill(&mut self, expected: u64) {
        if self.partial.len() as u64 >= expected {
            self.finish_value();
        } else {
            self.state = State::Fill { expected };
        }
    }

    fn finish_value(&mut self) {
        let bytes = mem::take(&mut self.partial);
        let value = DecodedValue::from_parts(bytes, self.value_offset);
        trace!(
            "decoded {}-byte value at offset {}",
            value.n_bytes(),
            value.offset()
        );
        self.ready.push_back(value);
        self.state = State::Start;
    }
}

fn expect_continuation(byte: u8, offset: u64) -> Result<(), WireError> {
    if byte_is_continuation(byte) {
        Ok(())
    } else {
        Err(WireError::InvalidContinuationByte { offset, byte })
    }
}

/// Mask of the low `n` bits, `n <= 6`.
fn low_bits(n: u32) -> u8 {
    (1u8 << n) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<DecodedValue> {
        let mut decoder = IncrementalDecoder::new();
        decoder.feed(bytes).unwrap();
        decoder.drain().collect()
    }

    fn values(bytes: &[u8]) -> Vec<u128> {
        decode(bytes).iter().map(|v| v.to_u128().unwrap()).collect()
    }

    #[test]
    fn empty_feed_before_any_data() {
        let mut decoder = IncrementalDecoder::new();
        decoder.feed(&[]).unwrap();
        assert!(decoder.is_idle());
        assert_eq!(decoder.drain().count(), 0);
    }

    #[test]
    fn ascii_value() {
        let out = decode(&[0x41]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].n_bytes(), 1);
        assert_eq!(out[0].to_u64(), Some(0x41));
    }

    #[test]
    fn two_byte_value() {
        assert_eq!(values(&[0xC2, 0xA9]), vec![0xA9]);
    }

    #[test]
    fn three_and_four_byte_values() {
        assert_eq!(values(&[0xE2, 0x82, 0xAC]), vec![0x20AC]);
        assert_eq!(values(&[0xF0, 0x9F, 0x98, 0x80]), vec![0x1_F600]);
    }

    #[test]
    fn seven_byte_value_has_signaling_only_start() {
        let out = decode(&[0xFE, 0x82, 0x80, 0x80, 0x80, 0x80, 0x80]);
        assert_eq!(out[0].n_bytes(), 7);
        assert!(!out[0].bytes()[0].is_content_byte());
        assert_eq!(out[0].to_u64(), Some(1 << 31));
    }

    #[test]
    fn extension_chain_sets_length() {
        // FF, extension 10_0_00001 (idx0c = 0), then six continuation bytes.
        let mut input = vec![0xFF, 0x81];
        input.extend([0x80; 6]);
        let out = decode(&input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].n_bytes(), 8);
        let ext = out[0].bytes()[1];
        assert!(ext.is_start_byte() && ext.is_continuation_byte() && ext.is_content_byte());
        assert_eq!(out[0].to_u64(), Some(1 << 36));
    }

    #[test]
    fn chained_extension_bytes() {
        // FF, 10_111111 (idx0c = 6, chain continues), 10_0_00001: 14 bytes.
        let mut input = vec![0xFF, 0xBF, 0x81];
        input.extend([0x80; 11]);
        let out = decode(&input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].n_bytes(), 14);
        assert_eq!(out[0].n_bits_capacity(), 71);
        assert!(!out[0].bytes()[1].is_content_byte());
        assert_eq!(out[0].to_u128(), Some(1 << 66));
        assert_eq!(out[0].to_u64(), None);
    }

    #[test]
    fn byte_roles_in_order() {
        let out = decode(&[0xE2, 0x82, 0xAC]);
        let roles: Vec<_> = out[0]
            .bytes()
            .iter()
            .map(|b| (b.is_start_byte(), b.is_continuation_byte(), b.is_content_byte()))
            .collect();
        assert_eq!(
            roles,
            vec![(true, false, true), (false, true, true), (false, true, true)]
        );
    }

    #[test]
    fn suspends_between_bytes() {
        let mut decoder = IncrementalDecoder::new();
        decoder.feed(&[0xE2]).unwrap();
        assert_eq!(decoder.in_progress(), 1);
        assert_eq!(decoder.pending(), 0);
        decoder.feed(&[0x82]).unwrap();
        assert_eq!(decoder.in_progress(), 2);
        decoder.feed(&[]).unwrap();
        assert_eq!(decoder.in_progress(), 2);
        decoder.feed(&[0xAC, 0x41]).unwrap();
        assert_eq!(decoder.in_progress(), 0);
        assert_eq!(decoder.pending(), 2);
        assert_eq!(decoder.consumed(), 4);
        assert!(decoder.is_idle());
    }

    #[test]
    fn value_offsets_span_feeds() {
        let mut decoder = IncrementalDecoder::new();
        decoder.feed(&[0x41, 0xC2]).unwrap();
        decoder.feed(&[0xA9, 0x42]).unwrap();
        let offsets: Vec<_> = decoder.drain().map(|v| v.offset()).collect();
        assert_eq!(offsets, vec![0, 1, 3]);
    }

    #[test]
    fn next_value_pops_in_order() {
        let mut decoder = IncrementalDecoder::new();
        decoder.feed(&[0x01, 0x02]).unwrap();
        assert_eq!(decoder.next_value().and_then(|v| v.to_u64()), Some(1));
        assert_eq!(decoder.pending(), 1);
        assert_eq!(decoder.drain().count(), 1);
        assert!(decoder.next_value().is_none());
    }

    #[test]
    fn invalid_start_byte() {
        let mut decoder = IncrementalDecoder::new();
        let err = decoder.feed(&[0x41, 0x80]).unwrap_err();
        assert_eq!(err, WireError::InvalidStartByte { offset: 1, byte: 0x80 });
        // The value completed before the bad byte is still there.
        assert_eq!(decoder.drain().count(), 1);
    }

    #[test]
    fn invalid_continuation_in_each_position() {
        let cases: &[(&[u8], u64, u8)] = &[
            (&[0xFF, 0x41], 1, 0x41),             // extension byte
            (&[0xE2, 0xC0], 1, 0xC0),             // overlong-check byte
            (&[0xE2, 0x82, 0x00], 2, 0x00),       // filler byte
            (&[0xC2, 0xFF], 1, 0xFF),             // two-byte filler
        ];
        for &(input, offset, byte) in cases {
            let mut decoder = IncrementalDecoder::new();
            assert_eq!(
                decoder.feed(input),
                Err(WireError::InvalidContinuationByte { offset, byte }),
                "input {input:02X?}"
            );
        }
    }

    #[test]
    fn overlong_two_byte() {
        let mut decoder = IncrementalDecoder::new();
        assert_eq!(
            decoder.feed(&[0xC1, 0x81]),
            Err(WireError::OverlongEncoding { offset: 0 })
        );
    }

    #[test]
    fn overlong_boundaries_for_each_length() {
        // Smallest legal value per length next to the largest overlong form.
        let legal: &[&[u8]] = &[
            &[0xC2, 0x80],
            &[0xE0, 0xA0, 0x80],
            &[0xF0, 0x90, 0x80, 0x80],
            &[0xF8, 0x88, 0x80, 0x80, 0x80],
            &[0xFC, 0x84, 0x80, 0x80, 0x80, 0x80],
            &[0xFE, 0x82, 0x80, 0x80, 0x80, 0x80, 0x80],
        ];
        let overlong: &[&[u8]] = &[
            &[0xC1, 0xBF],
            &[0xE0, 0x9F, 0xBF],
            &[0xF0, 0x8F, 0xBF, 0xBF],
            &[0xF8, 0x87, 0xBF, 0xBF, 0xBF],
            &[0xFC, 0x83, 0xBF, 0xBF, 0xBF, 0xBF],
            &[0xFE, 0x81, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF],
        ];
        for (len, input) in (2u64..).zip(legal) {
            let out = decode(input);
            assert_eq!(out.len(), 1, "input {input:02X?}");
            let capacity_below = if len == 2 { 7 } else { 1 + 5 * (len - 1) };
            assert_eq!(out[0].to_u128(), Some(1 << capacity_below), "input {input:02X?}");
        }
        for input in overlong {
            let mut decoder = IncrementalDecoder::new();
            assert!(
                matches!(decoder.feed(input), Err(WireError::OverlongEncoding { offset: 0 })),
                "input {input:02X?}"
            );
        }
    }

    #[test]
    fn overlong_extended_form() {
        // FF 80: the extension byte's five payload bits are all zero.
        let mut decoder = IncrementalDecoder::new();
        assert_eq!(
            decoder.feed(&[0xFF, 0x80, 0x80]),
            Err(WireError::OverlongEncoding { offset: 0 })
        );
    }

    #[test]
    fn poisoned_after_error() {
        let mut decoder = IncrementalDecoder::new();
        decoder.feed(&[0xE2]).unwrap();
        assert!(decoder.feed(&[0x41]).is_err());
        assert!(decoder.is_poisoned());
        assert_eq!(decoder.in_progress(), 0);
        assert_eq!(decoder.feed(&[0x41]), Err(WireError::Poisoned));
        assert_eq!(decoder.drain().count(), 0);
    }

    #[test]
    fn tiny_buffer_preserves_stream() {
        let config = DecoderConfig {
            initial_capacity: 0,
        };
        let mut decoder = IncrementalDecoder::with_config(config);
        for chunk in [&[0xE2, 0x82][..], &[0xAC, 0xC2], &[0xA9], &[0x41]] {
            decoder.feed(chunk).unwrap();
        }
        let out: Vec<_> = decoder.drain().map(|v| v.to_u64().unwrap()).collect();
        assert_eq!(out, vec![0x20AC, 0xA9, 0x41]);
    }

    #[test]
    fn partial_value_lives_in_progress_not_in_buffer() {
        // 14-byte chained value, then E2 82 AC and 41, three bytes a feed.
        let mut input = vec![0xFF, 0xBF, 0x81];
        input.extend([0x80; 11]);
        input.extend([0xE2, 0x82, 0xAC, 0x41]);

        let mut progress = Vec::new();
        let mut decoder = IncrementalDecoder::new();
        for chunk in input.chunks(3) {
            decoder.feed(chunk).unwrap();
            assert_eq!(decoder.buffered(), 0);
            progress.push(decoder.in_progress());
        }
        assert_eq!(progress, vec![3, 6, 9, 12, 1, 0]);
        assert!(decoder.is_idle());
        assert_eq!(decoder.drain().count(), 3);
    }
}
