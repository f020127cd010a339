/// Buffer tuning for an [`IncrementalDecoder`](crate::IncrementalDecoder).
///
/// Does not change what is decoded. The input buffer keeps its allocation
/// across feeds, so a larger `initial_capacity` only saves regrowth when
/// chunks are big.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Capacity reserved for the input buffer when the decoder is created.
    pub initial_capacity: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 4096,
        }
    }
}
