/// Growable input buffer read through a cursor.
///
/// Fed chunks are appended to `data`; reads advance `pos` instead of
/// slicing the consumed prefix off. The prefix is dropped when the next
/// chunk arrives, so the allocation is reused across feeds.
///
/// ```text
///   data: [ consumed ........ | unread ............ ]
///           0                 pos                 len
/// ```
#[derive(Debug, Default)]
pub struct ByteBuffer {
    data: Vec<u8>,
    pos: usize,
}

impl ByteBuffer {
    #[must_use]
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(initial_capacity),
            pos: 0,
        }
    }

    /// Append a chunk after dropping the consumed prefix.
    pub fn extend(&mut self, chunk: &[u8]) {
        if self.pos == self.data.len() {
            self.data.clear();
        } else {
            self.data.drain(..self.pos);
        }
        self.pos = 0;
        self.data.extend_from_slice(chunk);
    }

    /// Take the next unread byte, if any.
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Discard everything, read or not.
    pub fn clear(&mut self) {
        self.data.clear();
        self.pos = 0;
    }

    #[cfg(test)]
    fn consumed_prefix(&self) -> usize {
        self.pos
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.data.capacity()
    }
}
