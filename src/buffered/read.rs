//! Read-ahead adaptor.

use crate::buffer::storage::{ResizeGuard, Storage};
use crate::buffer::{
    ConstBufferSequence, MutableBuffer, MutableBufferSequence, buffer, buffer_copy, buffer_size,
};
use crate::config::{DEFAULT_BUFFER_SIZE, StreamConfig};
use crate::error::StreamError;
use crate::stream::{
    Outcome, ReadStream, SeekMode, Seekable, SeekableReadStream, StreamPosition, WriteStream,
};

/// Batches small reads against an underlying stream.
///
/// Reads are served from an internal store of fixed capacity, refilled with
/// one short read of the next layer whenever it runs dry. A read at least as
/// large as the capacity skips the store when it is empty.
///
/// Writes and seeks are forwarded; a seek discards the store.
///
/// # Example
///
/// ```
/// use spanio::{BufferedReadStream, MemoryStream, ReadStream, buffer_mut};
///
/// let mut stream = BufferedReadStream::with_capacity(16, MemoryStream::new(b"hello world"));
/// let mut word = [0u8; 5];
/// stream.read_some(&mut buffer_mut(&mut word))?;
/// assert_eq!(&word, b"hello");
/// assert_eq!(stream.buffer(), b" world");
/// # Ok::<(), spanio::StreamError>(())
/// ```
#[derive(Debug)]
pub struct BufferedReadStream<S> {
    next_layer: S,
    storage: Storage,
}

impl<S> BufferedReadStream<S> {
    /// Wraps `stream` with the default capacity.
    pub fn new(stream: S) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, stream)
    }

    /// Wraps `stream` with a store of `capacity` bytes (at least one).
    pub fn with_capacity(capacity: usize, stream: S) -> Self {
        Self {
            next_layer: stream,
            storage: Storage::with_capacity(capacity.max(1)),
        }
    }

    /// Wraps `stream` using `config.read_capacity()`.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: &StreamConfig, stream: S) -> Result<Self, StreamError> {
        config.validate()?;
        Ok(Self::with_capacity(config.read_capacity(), stream))
    }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.next_layer
    }

    /// Returns a mutable reference to the underlying stream.
    ///
    /// Reading from it directly skips the bytes held in the store.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.next_layer
    }

    /// The stream this adaptor reads from.
    pub fn next_layer(&mut self) -> &mut S {
        &mut self.next_layer
    }

    /// Unwraps the underlying stream, discarding buffered bytes.
    pub fn into_inner(self) -> S {
        self.next_layer
    }

    /// Bytes read ahead and not yet consumed.
    pub fn buffer(&self) -> &[u8] {
        self.storage.data()
    }

    /// Capacity of the internal store.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }
}

impl<S: ReadStream> BufferedReadStream<S> {
    /// Performs one short read of the next layer into the free part of the store.
    ///
    /// Returns the number of bytes added. If the next layer fails (or the
    /// read panics) the store keeps only what was actually read.
    pub fn fill_outcome(&mut self) -> Outcome<usize> {
        let old_len = self.storage.len();
        let capacity = self.storage.capacity();

        let mut guard = ResizeGuard::new(&mut self.storage);
        guard.resize(capacity);
        let (n, error) = self
            .next_layer
            .read_some_outcome(&mut MutableBuffer::new(&mut guard.data_mut()[old_len..]))
            .into_parts();
        let n = n.min(capacity - old_len);
        guard.resize(old_len + n);
        guard.commit();

        tracing::trace!(filled = n, buffered = old_len + n, "read-ahead fill");
        Outcome::new(n, error)
    }

    /// Performs one short read of the next layer into the store.
    pub fn fill(&mut self) -> Result<usize, StreamError> {
        self.fill_outcome().into_result()
    }

    /// Copies buffered bytes into `buffers` without consuming them.
    ///
    /// Fills the store first if it is empty, so a later read observes the
    /// same bytes.
    pub fn peek_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        if buffer_size(buffers) == 0 {
            return Outcome::ok(0);
        }
        let deferred = match self.refill_if_empty() {
            Ok(deferred) => deferred,
            Err(e) => return Outcome::err(e),
        };

        let n = buffer_copy(buffers, &buffer(self.storage.data()));
        Outcome::new(n, deferred.filter(|e| !e.is_eof()))
    }

    /// Copies buffered bytes into `buffers` without consuming them.
    pub fn peek<B>(&mut self, buffers: &mut B) -> Result<usize, StreamError>
    where
        B: MutableBufferSequence + ?Sized,
    {
        self.peek_outcome(buffers).into_result()
    }

    /// Fills an empty store.
    ///
    /// Returns the error reported together with the new bytes, or fails if
    /// no bytes arrived at all.
    fn refill_if_empty(&mut self) -> Result<Option<StreamError>, StreamError> {
        if !self.storage.is_empty() {
            return Ok(None);
        }
        match self.fill_outcome().into_parts() {
            (0, Some(e)) => Err(e),
            (0, None) => Err(StreamError::Eof),
            (_, error) => Ok(error),
        }
    }
}

impl<S: ReadStream> ReadStream for BufferedReadStream<S> {
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        let requested = buffer_size(buffers);
        if requested == 0 {
            return Outcome::ok(0);
        }

        if self.storage.is_empty() && requested >= self.storage.capacity() {
            tracing::trace!(requested, "read-ahead bypass");
            return self.next_layer.read_some_outcome(buffers);
        }

        let deferred = match self.refill_if_empty() {
            Ok(deferred) => deferred,
            Err(e) => return Outcome::err(e),
        };

        let n = buffer_copy(buffers, &buffer(self.storage.data()));
        self.storage.consume(n);

        // End of stream is reported by the first read that finds nothing to copy
        Outcome::new(n, deferred.filter(|e| !e.is_eof()))
    }
}

impl<S: WriteStream> WriteStream for BufferedReadStream<S> {
    fn write_some_outcome<B>(&mut self, buffers: &B) -> Outcome<usize>
    where
        B: ConstBufferSequence + ?Sized,
    {
        self.next_layer.write_some_outcome(buffers)
    }
}

impl<S: SeekableReadStream> Seekable for BufferedReadStream<S> {
    /// Seeks relative to the logical position, which trails the next layer
    /// by the bytes held in the store.
    ///
    /// A position query (`0`, [`SeekMode::Current`]) keeps the store; any
    /// other successful seek discards it.
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition> {
        let buffered = self.storage.len() as u64;

        if offset == 0 && mode == SeekMode::Current {
            return self.next_layer.seek_outcome(0, mode).map(|pos| pos - buffered);
        }

        let offset = match mode {
            SeekMode::Current => offset.saturating_sub(buffered as i64),
            _ => offset,
        };
        let outcome = self.next_layer.seek_outcome(offset, mode);
        if outcome.is_ok() {
            self.storage.clear();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::buffer_mut;
    use crate::streams::MemoryStream;

    /// Fails every read after the first `good` ones.
    struct FailAfter<'a> {
        inner: MemoryStream<'a>,
        good: usize,
    }

    impl ReadStream for FailAfter<'_> {
        fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
        where
            B: MutableBufferSequence + ?Sized,
        {
            if self.good == 0 {
                return Outcome::err(std::io::Error::other("device gone").into());
            }
            self.good -= 1;
            self.inner.read_some_outcome(buffers)
        }
    }

    #[test]
    fn test_small_reads_share_one_fill() {
        let mut stream = BufferedReadStream::with_capacity(8, MemoryStream::new(b"abcdefgh"));
        let mut dest = [0u8; 3];

        assert_eq!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap(), 3);
        assert_eq!(stream.get_ref().remaining(), b"");
        assert_eq!(stream.buffer(), b"defgh");
    }

    #[test]
    fn test_large_read_bypasses_store() {
        let mut stream = BufferedReadStream::with_capacity(4, MemoryStream::new(b"0123456789"));
        let mut dest = [0u8; 6];
        assert_eq!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap(), 6);
        assert!(stream.buffer().is_empty());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = BufferedReadStream::with_capacity(8, MemoryStream::new(b"peekaboo"));
        let mut first = [0u8; 4];
        let mut second = [0u8; 4];
        assert_eq!(stream.peek(&mut buffer_mut(&mut first)).unwrap(), 4);
        assert_eq!(stream.read_some(&mut buffer_mut(&mut second)).unwrap(), 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_fill_rolls_back() {
        let mut stream = BufferedReadStream::with_capacity(
            8,
            FailAfter {
                inner: MemoryStream::new(b"abc"),
                good: 1,
            },
        );
        assert_eq!(stream.fill().unwrap(), 3);
        assert!(matches!(stream.fill(), Err(StreamError::Io(_))));
        assert_eq!(stream.buffer(), b"abc");
    }

    #[test]
    fn test_eof_after_drain() {
        let mut stream = BufferedReadStream::with_capacity(8, MemoryStream::new(b"ab"));
        let mut dest = [0u8; 1];
        assert_eq!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap(), 1);
        assert_eq!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap(), 1);
        assert!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap_err().is_eof());
    }

    #[test]
    fn test_seek_accounts_for_buffered_bytes() {
        let mut stream = BufferedReadStream::with_capacity(8, MemoryStream::new(b"0123456789"));
        let mut dest = [0u8; 2];
        stream.read_some(&mut buffer_mut(&mut dest)).unwrap();

        assert_eq!(stream.position().unwrap().offset_from_start(), 2);
        assert_eq!(stream.buffer(), b"234567");

        stream.seek(1, SeekMode::Current).unwrap();
        assert!(stream.buffer().is_empty());
        stream.read_some(&mut buffer_mut(&mut dest)).unwrap();
        assert_eq!(&dest, b"34");
    }
}
