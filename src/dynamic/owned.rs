//! Self-owned dynamic buffer with a sliding window.

use bytes::Bytes;

use super::{DynamicBuffer, UNBOUNDED, check_prepare};
use crate::buffer::{ConstBuffer, MutableBuffer};
use crate::error::StreamError;

/// A [`DynamicBuffer`] that owns its storage.
///
/// Committed bytes live in `store[start..end]`. Consuming only moves
/// `start`; bytes are shifted back to the front when a `prepare` would run
/// off the end of the store, and the store only grows when compaction alone
/// cannot make room.
#[derive(Debug, Clone, Default)]
pub struct OwnedBuffer {
    store: Vec<u8>,
    start: usize,
    end: usize,
    prepared: usize,
    max_size: Option<usize>,
}

impl OwnedBuffer {
    /// Creates an empty, unbounded buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer bounded to `max_size` bytes.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size: Some(max_size),
            ..Self::default()
        }
    }

    /// Creates an empty, unbounded buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: vec![0; capacity],
            ..Self::default()
        }
    }

    /// Returns the committed bytes as a vector.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.store.truncate(self.end);
        self.store.drain(..self.start);
        self.store
    }

    /// Returns the committed bytes as [`Bytes`].
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.into_vec())
    }

    /// Moves the committed bytes to the front of the store.
    fn compact(&mut self) {
        if self.start == 0 {
            return;
        }
        tracing::debug!(
            start = self.start,
            len = self.end - self.start,
            "compacting dynamic buffer"
        );
        self.store.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
    }
}

impl From<Vec<u8>> for OwnedBuffer {
    fn from(store: Vec<u8>) -> Self {
        let end = store.len();
        Self {
            store,
            end,
            ..Self::default()
        }
    }
}

impl DynamicBuffer for OwnedBuffer {
    fn size(&self) -> usize {
        self.end - self.start
    }

    fn max_size(&self) -> usize {
        self.max_size.unwrap_or(UNBOUNDED).max(self.size())
    }

    fn capacity(&self) -> usize {
        self.store.len()
    }

    fn data(&self) -> ConstBuffer<'_> {
        ConstBuffer::new(&self.store[self.start..self.end])
    }

    fn prepare(&mut self, n: usize) -> Result<MutableBuffer<'_>, StreamError> {
        let size = self.size();
        let needed = check_prepare(size, n, self.max_size())?;

        if self.end + n > self.store.len() {
            self.compact();
            if needed > self.store.len() {
                let grown = (self.store.len() * 2).max(needed).min(self.max_size());
                self.store.resize(grown, 0);
            }
        }

        self.prepared = n;
        Ok(MutableBuffer::new(&mut self.store[self.end..self.end + n]))
    }

    fn commit(&mut self, n: usize) {
        self.end += n.min(self.prepared);
        self.prepared = 0;
    }

    fn consume(&mut self, n: usize) {
        self.start += n.min(self.size());
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
        self.prepared = 0;
    }
}
