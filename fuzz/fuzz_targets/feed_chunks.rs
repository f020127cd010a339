#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utf8000_wire::{DecodedValue, IncrementalDecoder, WireError};

// Fuzz target: chunk boundaries must not change the outcome.
//
// Feeds the same bytes once in a single call and once split at the
// fuzzer-chosen chunk lengths, then asserts both runs produced the same
// values and the same first error.
#[derive(Debug, Arbitrary)]
struct Input {
    bytes: Vec<u8>,
    chunk_lens: Vec<u8>,
}

fn run<'a>(chunks: impl Iterator<Item = &'a [u8]>) -> (Vec<DecodedValue>, Option<WireError>) {
    let mut decoder = IncrementalDecoder::new();
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

fuzz_target!(|input: Input| {
    let whole = run(std::iter::once(&input.bytes[..]));

    let mut rest = &input.bytes[..];
    let mut pieces = Vec::new();
    for &len in &input.chunk_lens {
        let (head, tail) = rest.split_at(usize::from(len).min(rest.len()));
        pieces.push(head);
        rest = tail;
    }
    pieces.push(rest);

    assert_eq!(whole, run(pieces.into_iter()));
});
