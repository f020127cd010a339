//! Hand-assembled UTF8000 byte vectors shared by the integration tests and
//! benchmarks.
//!
//! There is no encoder in this workspace, so every vector here was built
//! bit by bit from the grammar and its expected integer worked out by hand.

/// A complete, valid encoding of one value.
#[derive(Clone, Copy, Debug)]
pub struct Vector {
    pub name: &'static str,
    pub bytes: &'static [u8],
    pub value: u128,
}

/// Valid single-value encodings, shortest first.
///
/// Each length appears with its smallest legal value (anything smaller
/// would be overlong) and, where it fits in a `u128`, its largest.
pub const VALID: &[Vector] = &[
    Vector { name: "zero", bytes: &[0x00], value: 0 },
    Vector { name: "ascii_a", bytes: &[0x41], value: 0x41 },
    Vector { name: "ascii_max", bytes: &[0x7F], value: 0x7F },
    Vector { name: "two_min", bytes: &[0xC2, 0x80], value: 0x80 },
    Vector { name: "two_copyright", bytes: &[0xC2, 0xA9], value: 0xA9 },
    Vector { name: "two_max", bytes: &[0xDF, 0xBF], value: 0x7FF },
    Vector { name: "three_min", bytes: &[0xE0, 0xA0, 0x80], value: 0x800 },
    Vector { name: "three_euro", bytes: &[0xE2, 0x82, 0xAC], value: 0x20AC },
    Vector { name: "three_pattern", bytes: &[0xE5, 0x8A, 0xB3], value: 0x52B3 },
    Vector { name: "three_max", bytes: &[0xEF, 0xBF, 0xBF], value: 0xFFFF },
    Vector { name: "four_min", bytes: &[0xF0, 0x90, 0x80, 0x80], value: 0x1_0000 },
    Vector { name: "four_emoji", bytes: &[0xF0, 0x9F, 0x98, 0x80], value: 0x1_F600 },
    Vector { name: "five_min", bytes: &[0xF8, 0x88, 0x80, 0x80, 0x80], value: 1 << 21 },
    Vector {
        name: "six_min",
        bytes: &[0xFC, 0x84, 0x80, 0x80, 0x80, 0x80],
        value: 1 << 26,
    },
    Vector {
        name: "six_max",
        bytes: &[0xFD, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF],
        value: (1 << 31) - 1,
    },
    Vector {
        name: "seven_min",
        bytes: &[0xFE, 0x82, 0x80, 0x80, 0x80, 0x80, 0x80],
        value: 1 << 31,
    },
    Vector {
        name: "seven_max",
        bytes: &[0xFE, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF],
        value: (1 << 36) - 1,
    },
    Vector {
        name: "eight_min",
        bytes: &[0xFF, 0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80],
        value: 1 << 36,
    },
    Vector {
        name: "eight_max",
        bytes: &[0xFF, 0x9F, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF],
        value: (1 << 41) - 1,
    },
    Vector {
        name: "nine_min",
        bytes: &[0xFF, 0xA0, 0xA0, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80],
        value: 1 << 41,
    },
    Vector {
        name: "fourteen_chained",
        bytes: &[
            0xFF, 0xBF, 0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80,
        ],
        value: 1 << 66,
    },
];

/// Look up a vector by name.
///
/// # Panics
///
/// Panics if no vector has that name.
#[must_use]
pub fn vector(name: &str) -> Vector {
    VALID
        .iter()
        .copied()
        .find(|v| v.name == name)
        .unwrap_or_else(|| panic!("no vector named {name}"))
}

/// Concatenate the encodings at `indices` (into [`VALID`]) into one stream,
/// returning the stream and the expected integers.
#[must_use]
pub fn stream_of(indices: &[usize]) -> (Vec<u8>, Vec<u128>) {
    let mut bytes = Vec::new();
    let mut values = Vec::with_capacity(indices.len());
    for &i in indices {
        let v = VALID[i % VALID.len()];
        bytes.extend_from_slice(v.bytes);
        values.push(v.value);
    }
    (bytes, values)
}

/// Every valid vector, back to back, `repeat` times.
#[must_use]
pub fn mixed_stream(repeat: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..repeat {
        for v in VALID {
            out.extend_from_slice(v.bytes);
        }
    }
    out
}
