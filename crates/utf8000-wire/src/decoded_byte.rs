use std::fmt;

use crate::classify::{
    CONTINUATION_BITS, START_BYTE_BITS, byte_is_ascii, first_zero_bit_from_msb,
};
use crate::error::WireError;

/// Role bitfield assigned to a byte by the decoder.
///
/// Bit layout:
///   bit 0 = begins a start-byte group (primary or extension)
///   bit 1 = carries the `10xxxxxx` continuation prefix
///   bit 2 = at least one low-order bit is payload
///   bits 3-7 = reserved
///
/// ```text
/// ┌──────────────────────────┬───────┬──────────────┬─────────┐
/// │ Byte role                │ START │ CONTINUATION │ CONTENT │
/// ├──────────────────────────┼───────┼──────────────┼─────────┤
/// │ ASCII                    │   ✓   │              │    ✓    │
/// │ start byte, idx0 2..=6   │   ✓   │              │    ✓    │
/// │ start byte 0xFE / 0xFF   │   ✓   │              │         │
/// │ extension, idx0c 0..=4   │   ✓   │      ✓       │    ✓    │
/// │ extension, idx0c 5 / 6   │   ✓   │      ✓       │         │
/// │ plain continuation       │       │      ✓       │    ✓    │
/// └──────────────────────────┴───────┴──────────────┴─────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByteFlags(u8);

impl ByteFlags {
    pub const NONE: Self = Self(0);
    pub const START: Self = Self(0b0000_0001);
    pub const CONTINUATION: Self = Self(0b0000_0010);
    pub const CONTENT: Self = Self(0b0000_0100);

    #[must_use]
    pub fn from_parts(is_start: bool, is_continuation: bool, is_content: bool) -> Self {
        let mut raw = 0;
        if is_start {
            raw |= Self::START.0;
        }
        if is_continuation {
            raw |= Self::CONTINUATION.0;
        }
        if is_content {
            raw |= Self::CONTENT.0;
        }
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_start(self) -> bool {
        self.0 & Self::START.0 != 0
    }

    #[must_use]
    pub fn is_continuation(self) -> bool {
        self.0 & Self::CONTINUATION.0 != 0
    }

    #[must_use]
    pub fn is_content(self) -> bool {
        self.0 & Self::CONTENT.0 != 0
    }
}

/// One classified byte of an encoded value.
///
/// The decoder supplies the role flags; this type never re-derives them
/// from the raw byte, so the grammar lives in exactly one place
/// ([`IncrementalDecoder`](crate::IncrementalDecoder)). Everything else
/// (`n_content_bits`, `content`) is computed from the flags plus the raw
/// bit pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedByte {
    byte: u8,
    flags: ByteFlags,
}

impl DecodedByte {
    #[must_use]
    pub fn new(byte: u8, is_start: bool, is_continuation: bool, is_content: bool) -> Self {
        Self {
            byte,
            flags: ByteFlags::from_parts(is_start, is_continuation, is_content),
        }
    }

    /// The raw byte as it appeared on the wire.
    #[must_use]
    pub fn byte(&self) -> u8 {
        self.byte
    }

    #[must_use]
    pub fn flags(&self) -> ByteFlags {
        self.flags
    }

    #[must_use]
    pub fn is_start_byte(&self) -> bool {
        self.flags.is_start()
    }

    #[must_use]
    pub fn is_continuation_byte(&self) -> bool {
        self.flags.is_continuation()
    }

    #[must_use]
    pub fn is_content_byte(&self) -> bool {
        self.flags.is_content()
    }

    #[must_use]
    pub fn is_ascii(&self) -> bool {
        byte_is_ascii(self.byte)
    }

    /// Number of payload bits below the signaling prefix.
    ///
    /// ```text
    /// ┌──────────────────────────────┬──────────────────┐
    /// │ Role                         │ Width            │
    /// ├──────────────────────────────┼──────────────────┤
    /// │ content, not continuation    │ 8 - 1 - idx0     │
    /// │ continuation, not start      │ 6                │
    /// │ continuation and start       │ 6 - 1 - idx0c    │
    /// └──────────────────────────────┴──────────────────┘
    /// ```
    ///
    /// # Errors
    ///
    /// [`WireError::NotContentByte`] if the byte is signaling-only.
    pub fn n_content_bits(&self) -> Result<u32, WireError> {
        self.payload()
            .map(|(bits, _)| bits)
            .ok_or(WireError::NotContentByte { byte: self.byte })
    }

    /// The payload bits, right-aligned.
    ///
    /// # Errors
    ///
    /// [`WireError::NotContentByte`] if the byte is signaling-only.
    pub fn content(&self) -> Result<u8, WireError> {
        self.payload()
            .map(|(_, content)| content)
            .ok_or(WireError::NotContentByte { byte: self.byte })
    }

    /// `(n_content_bits, content)` for content bytes, `None` otherwise.
    pub(crate) fn payload(&self) -> Option<(u32, u8)> {
        if !self.is_content_byte() {
            return None;
        }
        let bits = if !self.is_continuation_byte() {
            let idx0 = first_zero_bit_from_msb(self.byte, START_BYTE_BITS);
            (START_BYTE_BITS - 1).saturating_sub(idx0)
        } else if !self.is_start_byte() {
            CONTINUATION_BITS
        } else {
            let idx0c = first_zero_bit_from_msb(self.byte, CONTINUATION_BITS);
            (CONTINUATION_BITS - 1).saturating_sub(idx0c)
        };
        // bits <= 7, so the shift cannot overflow a u8.
        let mask = (1u8 << bits) - 1;
        Some((bits, self.byte & mask))
    }
}

impl fmt::Display for DecodedByte {
    /// Bit pattern with a `|` between signaling prefix and payload, e.g.
    /// `110|00010`. Signaling-only bytes print all eight bits unsplit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            Some((bits, content)) => {
                let prefix_width = (8 - bits) as usize;
                let prefix = self.byte >> bits;
                write!(
                    f,
                    "{prefix:0prefix_width$b}|{content:0width$b}",
                    width = bits as usize
                )
            }
            None => write!(f, "{:08b}", self.byte),
        }
    }
}
