//! Single-byte classification for the UTF8000 grammar.
//!
//! ```text
//! ┌──────────┬─────────────────────────────────────────────────────┐
//! │ Pattern  │ Meaning                                             │
//! ├──────────┼─────────────────────────────────────────────────────┤
//! │ 0xxxxxxx │ ASCII: one-byte value, 7 content bits               │
//! │ 10xxxxxx │ continuation byte, up to 6 content bits             │
//! │ 11111111 │ extension start byte: length continues in 10xxxxxx  │
//! │ 11xxxxxx │ start byte declaring idx0 total bytes (2..=7)       │
//! └──────────┴─────────────────────────────────────────────────────┘
//! ```
//!
//! These functions are total over `u8` and never fail. Deciding what a
//! byte *means* in context is the decoder's job; this module only answers
//! questions about bit patterns.

/// Mask selecting the two prefix bits of a continuation byte.
pub const CONTINUATION_MASK: u8 = 0b1100_0000;

/// Expected value of the prefix bits under [`CONTINUATION_MASK`].
pub const CONTINUATION_TAG: u8 = 0b1000_0000;

/// Width of the payload field of a continuation byte.
pub const CONTINUATION_BITS: u32 = 6;

/// Byte width used when classifying a primary start byte.
pub const START_BYTE_BITS: u32 = 8;

/// Returns `true` if the top bit is clear (`0xxxxxxx`).
#[must_use]
pub fn byte_is_ascii(byte: u8) -> bool {
    byte & 0b1000_0000 == 0
}

/// Returns `true` if the top two bits are `10` (`10xxxxxx`).
#[must_use]
pub fn byte_is_continuation(byte: u8) -> bool {
    byte & CONTINUATION_MASK == CONTINUATION_TAG
}

/// Index of the first `0` bit in the low `width` bits of `byte`, counted
/// from the most-significant end of that region.
///
/// Returns `width` when every scanned bit is `1`.
///
/// | Call                                 | Result |
/// |--------------------------------------|--------|
/// | `first_zero_bit_from_msb(0x41, 8)`   | 0      |
/// | `first_zero_bit_from_msb(0xC2, 8)`   | 2      |
/// | `first_zero_bit_from_msb(0xFF, 8)`   | 8      |
/// | `first_zero_bit_from_msb(0xB8, 6)`   | 3      |
/// | `first_zero_bit_from_msb(0xBF, 6)`   | 6      |
///
/// Widths above 8 scan the whole byte; a width of 0 scans nothing and
/// returns 0.
#[must_use]
pub fn first_zero_bit_from_msb(byte: u8, width: u32) -> u32 {
    let width = width.min(START_BYTE_BITS);
    if width == 0 {
        return 0;
    }
    let aligned = byte << (START_BYTE_BITS - width);
    aligned.leading_ones().min(width)
}
