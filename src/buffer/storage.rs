//! Fixed-capacity storage behind the buffered adaptors.
//!
//! The storage slides a `[begin, end)` window over one allocation and only
//! moves bytes back to the front when a resize would run off the end.

use std::ops::{Deref, DerefMut};

use super::pool;

/// Fixed-capacity byte store with a sliding readable window.
#[derive(Debug)]
pub(crate) struct Storage {
    data: Vec<u8>,
    begin: usize,
    end: usize,
}

impl Storage {
    /// Creates an empty store holding up to `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: pool::take(capacity),
            begin: 0,
            end: 0,
        }
    }

    pub fn clear(&mut self) {
        self.begin = 0;
        self.end = 0;
    }

    /// The readable bytes.
    pub fn data(&self) -> &[u8] {
        &self.data[self.begin..self.end]
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.begin..self.end]
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Sets the readable length, keeping the first `min(len, self.len())` bytes.
    ///
    /// `len` is clamped to the capacity.
    pub fn resize(&mut self, len: usize) {
        let len = len.min(self.capacity());
        if self.begin + len <= self.capacity() {
            self.end = self.begin + len;
        } else {
            tracing::debug!(
                begin = self.begin,
                len = self.len(),
                "compacting buffered stream storage"
            );
            self.data.copy_within(self.begin..self.end, 0);
            self.begin = 0;
            self.end = len;
        }
    }

    /// Discards `min(n, len)` bytes from the front.
    pub fn consume(&mut self, n: usize) {
        self.begin += n.min(self.len());
        if self.is_empty() {
            self.clear();
        }
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        pool::give_back(std::mem::take(&mut self.data));
    }
}

/// Restores a [`Storage`]'s readable length unless committed.
///
/// Growing the store to expose space for a fill, then failing before the
/// final size is known, must not leave the unfilled tail readable. The guard
/// snapshots the length on creation and puts it back on drop; `commit`
/// keeps whatever length was set in between.
pub(crate) struct ResizeGuard<'a> {
    storage: &'a mut Storage,
    old_len: Option<usize>,
}

impl<'a> ResizeGuard<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        let old_len = Some(storage.len());
        Self { storage, old_len }
    }

    pub fn commit(mut self) {
        self.old_len = None;
    }
}

impl Deref for ResizeGuard<'_> {
    type Target = Storage;

    fn deref(&self) -> &Storage {
        self.storage
    }
}

impl DerefMut for ResizeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Storage {
        self.storage
    }
}

impl Drop for ResizeGuard<'_> {
    fn drop(&mut self) {
        if let Some(len) = self.old_len {
            self.storage.resize(len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(bytes: &[u8], capacity: usize) -> Storage {
        let mut storage = Storage::with_capacity(capacity);
        storage.resize(bytes.len());
        storage.data_mut().copy_from_slice(bytes);
        storage
    }

    #[test]
    fn test_consume_and_reset() {
        let mut storage = filled(b"abcdef", 8);
        storage.consume(2);
        assert_eq!(storage.data(), b"cdef");

        storage.consume(100);
        assert!(storage.is_empty());
        assert_eq!(storage.begin, 0);
    }

    #[test]
    fn test_resize_compacts_when_needed() {
        let mut storage = filled(b"abcdefgh", 8);
        storage.consume(6);
        assert_eq!(storage.data(), b"gh");

        // Fits only after moving "gh" to the front
        storage.resize(5);
        assert_eq!(storage.begin, 0);
        assert_eq!(&storage.data()[..2], b"gh");
        assert_eq!(storage.len(), 5);
    }

    #[test]
    fn test_guard_rolls_back() {
        let mut storage = filled(b"abc", 8);
        {
            let mut guard = ResizeGuard::new(&mut storage);
            guard.resize(8);
            assert_eq!(guard.len(), 8);
        }
        assert_eq!(storage.data(), b"abc");
    }

    #[test]
    fn test_guard_commit_keeps_length() {
        let mut storage = filled(b"abc", 8);
        {
            let mut guard = ResizeGuard::new(&mut storage);
            guard.resize(5);
            guard.commit();
        }
        assert_eq!(storage.len(), 5);
    }

    #[test]
    fn test_guard_rolls_back_on_panic() {
        let mut storage = filled(b"abc", 8);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = ResizeGuard::new(&mut storage);
            guard.resize(8);
            panic!("fill failed");
        }));
        assert!(result.is_err());
        assert_eq!(storage.data(), b"abc");
    }
}
