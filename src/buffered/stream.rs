//! Read-ahead over write-behind.

use crate::buffer::{ConstBufferSequence, MutableBufferSequence};
use crate::config::StreamConfig;
use crate::error::StreamError;
use crate::stream::{
    Outcome, ReadStream, SeekMode, Seekable, SeekableWriteStream, StreamPosition, WriteStream,
};

use super::{BufferedReadStream, BufferedWriteStream};

/// A stream buffered in both directions.
///
/// Layered as `BufferedReadStream<BufferedWriteStream<S>>`: every fill and
/// seek of the read side goes through the write side, which flushes pending
/// writes first, so the two directions agree on the position of `S`.
///
/// Reads and writes still share that one position. A write issued while
/// read-ahead bytes are buffered lands after them.
#[derive(Debug)]
pub struct BufferedStream<S: WriteStream> {
    inner: BufferedReadStream<BufferedWriteStream<S>>,
}

impl<S: WriteStream> BufferedStream<S> {
    /// Wraps `stream` with default capacities.
    pub fn new(stream: S) -> Self {
        Self {
            inner: BufferedReadStream::new(BufferedWriteStream::new(stream)),
        }
    }

    /// Wraps `stream` with the given store capacities.
    pub fn with_capacities(read_capacity: usize, write_capacity: usize, stream: S) -> Self {
        Self {
            inner: BufferedReadStream::with_capacity(
                read_capacity,
                BufferedWriteStream::with_capacity(write_capacity, stream),
            ),
        }
    }

    /// Wraps `stream` using the capacities from `config`.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: &StreamConfig, stream: S) -> Result<Self, StreamError> {
        config.validate()?;
        Ok(Self::with_capacities(
            config.read_capacity(),
            config.write_capacity(),
            stream,
        ))
    }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        self.inner.get_ref().get_ref()
    }

    /// Returns a mutable reference to the underlying stream.
    pub fn get_mut(&mut self) -> &mut S {
        self.inner.get_mut().get_mut()
    }

    /// The read-ahead layer.
    pub fn next_layer(&mut self) -> &mut BufferedReadStream<BufferedWriteStream<S>> {
        &mut self.inner
    }

    /// Sends pending writes to the underlying stream.
    pub fn flush(&mut self) -> Result<usize, StreamError> {
        self.inner.get_mut().flush()
    }
}

impl<S: WriteStream + ReadStream> BufferedStream<S> {
    /// Flushes pending writes, then performs one read-ahead fill.
    pub fn fill(&mut self) -> Result<usize, StreamError> {
        self.inner.fill()
    }

    /// Copies buffered bytes into `buffers` without consuming them.
    pub fn peek<B>(&mut self, buffers: &mut B) -> Result<usize, StreamError>
    where
        B: MutableBufferSequence + ?Sized,
    {
        self.inner.peek(buffers)
    }

    /// Bytes read ahead and not yet consumed.
    pub fn buffer(&self) -> &[u8] {
        self.inner.buffer()
    }
}

impl<S: WriteStream + ReadStream> ReadStream for BufferedStream<S> {
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        self.inner.read_some_outcome(buffers)
    }
}

impl<S: WriteStream> WriteStream for BufferedStream<S> {
    fn write_some_outcome<B>(&mut self, buffers: &B) -> Outcome<usize>
    where
        B: ConstBufferSequence + ?Sized,
    {
        self.inner.write_some_outcome(buffers)
    }
}

impl<S: SeekableWriteStream + ReadStream> Seekable for BufferedStream<S> {
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition> {
        self.inner.seek_outcome(offset, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{buffer, buffer_mut};
    use crate::streams::VecStream;

    #[test]
    fn test_read_sees_pending_writes() {
        let mut stream = BufferedStream::with_capacities(8, 8, VecStream::new());
        stream.write_some(&buffer("hello")).unwrap();
        assert!(stream.get_ref().get_ref().is_empty());

        stream.seek(0, SeekMode::Start).unwrap();
        let mut dest = [0u8; 5];
        assert_eq!(crate::read(&mut stream, &mut buffer_mut(&mut dest)).unwrap(), 5);
        assert_eq!(&dest, b"hello");
    }

    #[test]
    fn test_fill_flushes_first() {
        let mut stream = BufferedStream::with_capacities(4, 4, VecStream::from(b"abcdef".to_vec()));
        stream.write_some(&buffer("XY")).unwrap();
        assert_eq!(stream.fill().unwrap(), 4);
        assert_eq!(stream.buffer(), b"cdef");
        assert_eq!(stream.get_ref().get_ref(), b"XYcdef");
    }

    /// Rewinds and reads the first byte through the composite bound.
    fn first_byte<S: crate::stream::SeekableReadStream>(stream: &mut S) -> u8 {
        stream.seek(0, SeekMode::Start).unwrap();
        let mut byte = [0u8; 1];
        crate::read(stream, &mut buffer_mut(&mut byte)).unwrap();
        byte[0]
    }

    #[test]
    fn test_adaptors_are_seekable_read_streams() {
        let mut composed = BufferedStream::with_capacities(4, 4, VecStream::new());
        composed.write_some(&buffer("xyz")).unwrap();
        assert_eq!(first_byte(&mut composed), b'x');

        let mut read_ahead = BufferedReadStream::with_capacity(2, VecStream::from(b"qr".to_vec()));
        crate::read(&mut read_ahead, &mut buffer_mut(&mut [0u8; 2])).unwrap();
        assert_eq!(first_byte(&mut read_ahead), b'q');
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = StreamConfig::default().with_write_capacity(0);
        assert!(BufferedStream::with_config(&config, VecStream::new()).is_err());
    }
}
