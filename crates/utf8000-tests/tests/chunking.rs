//! Feed-granularity independence.
//!
//! Splitting the same byte stream into different chunks must not change
//! what comes out: the same values at the same offsets, and for malformed
//! input the same first error.

use proptest::prelude::*;
use utf8000_decoder::{StreamConfig, Utf8000Decoder};
use utf8000_tests::{VALID, mixed_stream, stream_of};
use utf8000_wire::{DecodedValue, DecoderConfig, IncrementalDecoder, WireError};

type Outcome = (Vec<DecodedValue>, Option<WireError>);

/// Feed `chunks` in order, stopping at the first error.
fn feed_chunks<'a>(decoder: &mut IncrementalDecoder, chunks: impl IntoIterator<Item = &'a [u8]>) -> Outcome {
    let mut values = Vec::new();
    for chunk in chunks {
        let result = decoder.feed(chunk);
        values.extend(decoder.drain());
        if let Err(err) = result {
            return (values, Some(err));
        }
    }
    (values, None)
}

fn one_shot(bytes: &[u8]) -> Outcome {
    feed_chunks(&mut IncrementalDecoder::new(), [bytes])
}

/// Split `bytes` at the given cut points (taken modulo the length).
fn split_at_cuts<'a>(bytes: &'a [u8], cuts: &[usize]) -> Vec<&'a [u8]> {
    let mut points: Vec<usize> = cuts
        .iter()
        .map(|c| if bytes.is_empty() { 0 } else { c % bytes.len() })
        .collect();
    points.sort_unstable();
    points.dedup();

    let mut out = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for p in points {
        out.push(&bytes[start..p]);
        start = p;
    }
    out.push(&bytes[start..]);
    out
}

#[test]
fn byte_at_a_time_matches_one_shot() {
    let stream = mixed_stream(3);
    let whole = one_shot(&stream);
    let single = feed_chunks(&mut IncrementalDecoder::new(), stream.chunks(1));
    assert_eq!(whole, single);
    assert_eq!(whole.0.len(), VALID.len() * 3);
    assert!(whole.1.is_none());
}

#[test]
fn zero_capacity_buffer_matches_default() {
    let config = DecoderConfig {
        initial_capacity: 0,
    };
    let stream = mixed_stream(5);
    let mut decoder = IncrementalDecoder::with_config(config);
    let regrowing = feed_chunks(&mut decoder, stream.chunks(7));
    assert_eq!(regrowing, one_shot(&stream));
}

#[test]
fn nothing_stays_buffered_between_feeds() {
    let stream = mixed_stream(2);
    let mut decoder = IncrementalDecoder::new();
    for chunk in stream.chunks(3) {
        decoder.feed(chunk).unwrap();
        assert_eq!(decoder.buffered(), 0);
    }
    assert!(decoder.is_idle());
}

#[test]
fn empty_chunks_are_harmless() {
    let mut decoder = IncrementalDecoder::new();
    let chunks: [&[u8]; 6] = [&[], &[0xE2], &[], &[0x82], &[0xAC], &[]];
    let (values, err) = feed_chunks(&mut decoder, chunks);
    assert!(err.is_none());
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].to_u64(), Some(0x20AC));
}

#[test]
fn reader_chunk_sizes_agree() {
    let stream = mixed_stream(2);
    let baseline = Utf8000Decoder::decode(&stream).unwrap();
    for read_chunk_size in [1, 2, 3, 5, 13, 64, 4096] {
        let config = StreamConfig {
            read_chunk_size,
            ..StreamConfig::default()
        };
        let values = Utf8000Decoder::decode_reader(&stream[..], &config).unwrap();
        assert_eq!(values, baseline, "read_chunk_size = {read_chunk_size}");
    }
}

proptest! {
    #[test]
    fn valid_streams_ignore_chunking(
        picks in prop::collection::vec(0..VALID.len(), 0..40),
        cuts in prop::collection::vec(any::<usize>(), 0..20),
    ) {
        let (bytes, expected) = stream_of(&picks);
        let whole = one_shot(&bytes);
        let chunked = feed_chunks(&mut IncrementalDecoder::new(), split_at_cuts(&bytes, &cuts));

        prop_assert!(whole.1.is_none());
        let ints: Vec<_> = whole.0.iter().map(|v| v.to_u128().unwrap()).collect();
        prop_assert_eq!(ints, expected);
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn arbitrary_bytes_ignore_chunking(
        bytes in prop::collection::vec(any::<u8>(), 0..256),
        cuts in prop::collection::vec(any::<usize>(), 0..32),
    ) {
        let whole = one_shot(&bytes);
        let chunked = feed_chunks(&mut IncrementalDecoder::new(), split_at_cuts(&bytes, &cuts));
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn consumed_bytes_account_for_every_value(
        picks in prop::collection::vec(0..VALID.len(), 1..20),
    ) {
        let (bytes, _) = stream_of(&picks);
        let mut decoder = IncrementalDecoder::new();
        decoder.feed(&bytes).unwrap();
        let total: usize = decoder.drain().map(|v| v.n_bytes()).sum();
        prop_assert_eq!(total, bytes.len());
        prop_assert_eq!(decoder.consumed(), bytes.len() as u64);
        prop_assert!(decoder.is_idle());
    }
}
