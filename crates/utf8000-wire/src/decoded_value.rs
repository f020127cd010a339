use std::fmt;

use num_bigint::BigUint;

use crate::decoded_byte::DecodedByte;

/// One fully decoded UTF8000 integer.
///
/// Holds the classified bytes in stream order, which is also
/// most-significant-group-first order:
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │ primary start byte                                          │
/// │ extension start bytes        (only after a 0xFF primary)    │
/// │ overlong-check continuation  (every multi-byte value)       │
/// │ filler continuation bytes    (until the declared length)    │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// A `DecodedValue` performs no validation of its own. Only
/// [`IncrementalDecoder`](crate::IncrementalDecoder) can build one, and it
/// only does so after the whole grammar unit has been checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedValue {
    bytes: Vec<DecodedByte>,
    offset: u64,
}

impl DecodedValue {
    pub(crate) fn from_parts(bytes: Vec<DecodedByte>, offset: u64) -> Self {
        debug_assert!(!bytes.is_empty());
        Self { bytes, offset }
    }

    /// Classified bytes in stream order.
    #[must_use]
    pub fn bytes(&self) -> &[DecodedByte] {
        &self.bytes
    }

    /// The encoded form, byte for byte.
    #[must_use]
    pub fn raw_bytes(&self) -> Vec<u8> {
        self.bytes.iter().map(DecodedByte::byte).collect()
    }

    /// Stream offset of the value's first byte.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn n_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// `true` for single-byte `0xxxxxxx` values.
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.bytes.len() == 1 && self.bytes[0].is_ascii()
    }

    /// Nominal payload width for a value of this length.
    ///
    /// Seven bits for a single ASCII byte, `1 + 5 * n_bytes` otherwise.
    #[must_use]
    pub fn n_bits_capacity(&self) -> u64 {
        match self.bytes.len() {
            1 => 7,
            n => 1 + 5 * n as u64,
        }
    }

    /// Reconstruct the integer as an arbitrary-precision unsigned value.
    ///
    /// Content bytes are concatenated big-endian: each byte's payload is
    /// shifted in below everything accumulated so far.
    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        self.payloads()
            .fold(BigUint::default(), |acc, (bits, content)| {
                (acc << bits) | BigUint::from(content)
            })
    }

    /// The integer as a `u64`, or `None` if it does not fit.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }

    /// The integer as a `u128`, or `None` if it does not fit.
    #[must_use]
    pub fn to_u128(&self) -> Option<u128> {
        self.payloads().try_fold(0u128, |acc, (bits, content)| {
            if acc.leading_zeros() < bits {
                return None;
            }
            Some((acc << bits) | u128::from(content))
        })
    }

    fn payloads(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.bytes.iter().filter_map(DecodedByte::payload)
    }
}

impl fmt::Display for DecodedValue {
    /// Space-separated bit patterns of every byte, e.g.
    /// `1110|0010 10|000010 10|101100`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte}")?;
        }
        Ok(())
    }
}
