//! Write-behind adaptor.

use crate::buffer::storage::Storage;
use crate::buffer::{
    ConstBufferSequence, MutableBuffer, MutableBufferSequence, buffer, buffer_copy, buffer_size,
};
use crate::config::{DEFAULT_BUFFER_SIZE, StreamConfig};
use crate::error::StreamError;
use crate::stream::{
    Outcome, ReadStream, SeekMode, Seekable, SeekableWriteStream, StreamPosition, WriteStream,
};
use crate::transfer::{TransferAll, write_outcome};

/// Batches small writes against an underlying stream.
///
/// Writes are copied into an internal store of fixed capacity and sent to
/// the next layer when it fills up, on [`flush`](Self::flush), before any
/// read or seek, and when the adaptor is dropped. Errors from the flush on
/// drop are logged and otherwise lost; call `flush` first to observe them.
///
/// # Example
///
/// ```
/// use spanio::{BufferedWriteStream, VecStream, WriteStream, buffer};
///
/// let mut stream = BufferedWriteStream::with_capacity(64, VecStream::new());
/// stream.write_some(&buffer("batched"))?;
/// assert!(stream.get_ref().get_ref().is_empty());
///
/// assert_eq!(stream.flush()?, 7);
/// assert_eq!(stream.get_ref().get_ref(), b"batched");
/// # Ok::<(), spanio::StreamError>(())
/// ```
#[derive(Debug)]
pub struct BufferedWriteStream<S: WriteStream> {
    next_layer: S,
    storage: Storage,
}

impl<S: WriteStream> BufferedWriteStream<S> {
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

    /// Wraps `stream` using `config.write_capacity()`.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: &StreamConfig, stream: S) -> Result<Self, StreamError> {
        config.validate()?;
        Ok(Self::with_capacity(config.write_capacity(), stream))
    }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.next_layer
    }

    /// Returns a mutable reference to the underlying stream.
    ///
    /// Writing to it directly overtakes the bytes held in the store.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.next_layer
    }

    /// The stream this adaptor writes to.
    pub fn next_layer(&mut self) -> &mut S {
        &mut self.next_layer
    }

    /// Bytes accepted and not yet flushed.
    pub fn buffer(&self) -> &[u8] {
        self.storage.data()
    }

    /// Capacity of the internal store.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Writes the whole store to the next layer, consuming what was confirmed written.
    ///
    /// Returns the number of bytes flushed; on error the unwritten bytes stay
    /// buffered.
    pub fn flush_outcome(&mut self) -> Outcome<usize> {
        if self.storage.is_empty() {
            return Outcome::ok(0);
        }

        let outcome = write_outcome(
            &mut self.next_layer,
            &buffer(self.storage.data()),
            TransferAll,
        );
        self.storage.consume(outcome.value);

        tracing::trace!(
            flushed = outcome.value,
            pending = self.storage.len(),
            "write-behind flush"
        );
        outcome
    }

    /// Writes the whole store to the next layer.
    pub fn flush(&mut self) -> Result<usize, StreamError> {
        self.flush_outcome().into_result()
    }

    fn flush_first(&mut self) -> Result<(), StreamError> {
        match self.flush_outcome().error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<S: WriteStream> WriteStream for BufferedWriteStream<S> {
    /// Copies as much of `buffers` as fits into the store, flushing first if
    /// the store is full.
    fn write_some_outcome<B>(&mut self, buffers: &B) -> Outcome<usize>
    where
        B: ConstBufferSequence + ?Sized,
    {
        if buffer_size(buffers) == 0 {
            return Outcome::ok(0);
        }
        if self.storage.is_full() {
            if let Err(e) = self.flush_first() {
                return Outcome::err(e);
            }
        }

        let old_len = self.storage.len();
        self.storage.resize(self.storage.capacity());
        let n = buffer_copy(
            &mut MutableBuffer::new(&mut self.storage.data_mut()[old_len..]),
            buffers,
        );
        self.storage.resize(old_len + n);
        Outcome::ok(n)
    }
}

impl<S: WriteStream + ReadStream> ReadStream for BufferedWriteStream<S> {
    /// Flushes pending writes, then reads from the next layer.
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        if let Err(e) = self.flush_first() {
            return Outcome::err(e);
        }
        self.next_layer.read_some_outcome(buffers)
    }
}

impl<S: SeekableWriteStream> Seekable for BufferedWriteStream<S> {
    /// Flushes pending writes, then seeks the next layer.
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition> {
        if let Err(e) = self.flush_first() {
            return Outcome::err(e);
        }
        self.next_layer.seek_outcome(offset, mode)
    }
}

impl<S: WriteStream> Drop for BufferedWriteStream<S> {
    fn drop(&mut self) {
        if let Some(e) = self.flush_outcome().error {
            tracing::warn!(
                error = %e,
                lost = self.storage.len(),
                "flush on drop failed, buffered bytes discarded"
            );
        }
    }
}
