#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: complete-input decoder on arbitrary bytes.
//
// Must never panic. When decoding succeeds, every value's bytes must
// account for the input exactly and every integer must fit its capacity.
fuzz_target!(|data: &[u8]| {
    let Ok(values) = utf8000_decoder::Utf8000Decoder::decode(data) else {
        return;
    };

    let mut offset = 0u64;
    for value in &values {
        assert_eq!(value.offset(), offset);
        offset += value.n_bytes() as u64;
        assert!(value.to_biguint().bits() <= value.n_bits_capacity());
    }
    assert_eq!(offset, data.len() as u64);
});
