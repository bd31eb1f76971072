use std::ops::Range;

use bytes::BytesMut;
use tracing::debug;

/// Growable scan buffer with a hard ceiling.
///
/// Bytes `start..end` are filled but not yet consumed; `end..capacity` is free.
/// Capacity only grows, geometrically, and never past `max`. Any slide or
/// growth moves bytes, so ranges handed out before it no longer refer to the
/// same data.
#[derive(Debug)]
pub struct Buffer {
    storage: BytesMut,
    start: usize,
    end: usize,
    max: usize,
    base: u64,
}

impl Buffer {
    /// Empty buffer that may grow up to `max` bytes.
    pub fn new(max: usize) -> Self {
        Self {
            storage: BytesMut::new(),
            start: 0,
            end: 0,
            max,
            base: 0,
        }
    }

    /// Allocated size.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Configured ceiling.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Index of the first unconsumed byte.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of unconsumed bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when every filled byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The unconsumed bytes.
    pub fn data(&self) -> &[u8] {
        &self.storage[self.start..self.end]
    }

    /// Bytes at absolute buffer indices.
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        &self.storage[range]
    }

    /// Stream offset of the byte at buffer index `index`.
    pub fn stream_offset(&self, index: usize) -> u64 {
        self.base + index as u64
    }

    /// Mark `n` unconsumed bytes as consumed.
    pub fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.len());
        self.start += n;
    }

    /// Free space for at least one more byte, sliding and growing as needed.
    ///
    /// Returns `false` when the buffer is full at its ceiling.
    pub fn make_room(&mut self, initial: usize) -> bool {
        if self.start > 0 && (self.end == self.capacity() || self.start > self.capacity() / 2) {
            self.slide();
        }
        if self.end < self.capacity() {
            return true;
        }
        self.grow(initial)
    }

    /// Free region to read into, at most `limit` bytes long.
    pub fn spare_mut(&mut self, limit: usize) -> &mut [u8] {
        let end = self.capacity().min(self.end.saturating_add(limit));
        &mut self.storage[self.end..end]
    }

    /// Mark `n` bytes of the spare region as filled.
    pub fn commit(&mut self, n: usize) {
        debug_assert!(self.end + n <= self.capacity());
        self.end += n;
    }

    fn slide(&mut self) {
        self.storage.copy_within(self.start..self.end, 0);
        self.base += self.start as u64;
        self.end -= self.start;
        self.start = 0;
    }

    fn grow(&mut self, initial: usize) -> bool {
        let capacity = self.capacity();
        if capacity >= self.max {
            return false;
        }
        let target = if capacity == 0 {
            initial.max(1)
        } else {
            capacity.saturating_mul(2)
        };
        let new_capacity = target.min(self.max);

        let mut storage = BytesMut::zeroed(new_capacity);
        let len = self.len();
        storage[..len].copy_from_slice(self.data());

        debug!(from = capacity, to = new_capacity, "growing scan buffer");
        self.storage = storage;
        self.base += self.start as u64;
        self.start = 0;
        self.end = len;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(buffer: &mut Buffer, bytes: &[u8]) {
        let spare = buffer.spare_mut(bytes.len());
        let n = spare.len();
        spare.copy_from_slice(&bytes[..n]);
        buffer.commit(n);
    }

    #[test]
    fn grows_geometrically_up_to_max() {
        let mut buffer = Buffer::new(20);
        assert_eq!(buffer.capacity(), 0);

        assert!(buffer.make_room(4));
        assert_eq!(buffer.capacity(), 4);
        fill(&mut buffer, b"abcd");

        assert!(buffer.make_room(4));
        assert_eq!(buffer.capacity(), 8);
        fill(&mut buffer, b"efgh");

        assert!(buffer.make_room(4));
        assert_eq!(buffer.capacity(), 16);
        fill(&mut buffer, b"ijklmnop");

        assert!(buffer.make_room(4));
        assert_eq!(buffer.capacity(), 20);
        fill(&mut buffer, b"qrst");

        assert!(!buffer.make_room(4));
        assert_eq!(buffer.data(), b"abcdefghijklmnopqrst");
    }

    #[test]
    fn slides_before_growing() {
        let mut buffer = Buffer::new(8);
        assert!(buffer.make_room(8));
        fill(&mut buffer, b"abcdefgh");
        buffer.consume(5);

        assert!(buffer.make_room(8));
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.start(), 0);
        assert_eq!(buffer.data(), b"fgh");
        assert_eq!(buffer.stream_offset(0), 5);
    }

    #[test]
    fn spare_region_is_bounded_by_limit() {
        let mut buffer = Buffer::new(64);
        assert!(buffer.make_room(32));
        assert_eq!(buffer.spare_mut(10).len(), 10);
        assert_eq!(buffer.spare_mut(100).len(), 32);
    }

    #[test]
    fn zero_ceiling_never_has_room() {
        let mut buffer = Buffer::new(0);
        assert!(!buffer.make_room(16));
        assert!(buffer.is_empty());
    }
}
