//! Bridge from `std::io` types.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::buffer::{ConstBufferSequence, MutableBufferSequence};
use crate::error::StreamError;
use crate::stream::{Outcome, ReadStream, SeekMode, Seekable, StreamPosition, WriteStream};

/// Adapts a `std::io` reader, writer or seeker to the stream traits.
///
/// Each short operation goes to the first non-empty span of the sequence.
/// `Interrupted` is retried; `Ok(0)` on a non-empty read is end of stream.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use spanio::{OwnedBuffer, StdStream, read_all};
///
/// let mut stream = StdStream::new(Cursor::new(b"from std".to_vec()));
/// let mut buf = OwnedBuffer::new();
/// assert_eq!(read_all(&mut stream, &mut buf)?, 8);
/// # Ok::<(), spanio::StreamError>(())
/// ```
#[derive(Debug, Default)]
pub struct StdStream<T> {
    inner: T,
}

impl<T> StdStream<T> {
    /// Wraps `inner`.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Returns a reference to the wrapped value.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Returns a mutable reference to the wrapped value.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwraps the value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write> StdStream<T> {
    /// Flushes the wrapped writer.
    pub fn flush(&mut self) -> Result<(), StreamError> {
        retry(|| self.inner.flush()).map_err(StreamError::from)
    }
}

fn retry<R>(mut op: impl FnMut() -> io::Result<R>) -> io::Result<R> {
    loop {
        match op() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

impl<T: Read> ReadStream for StdStream<T> {
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        let Some(target) = buffers.mutable_buffers().find(|b| !b.is_empty()) else {
            return Outcome::ok(0);
        };

        match retry(|| self.inner.read(target)) {
            Ok(0) => Outcome::err(StreamError::Eof),
            Ok(n) => Outcome::ok(n),
            Err(e) => Outcome::err(e.into()),
        }
    }
}

impl<T: Write> WriteStream for StdStream<T> {
    fn write_some_outcome<B>(&mut self, buffers: &B) -> Outcome<usize>
    where
        B: ConstBufferSequence + ?Sized,
    {
        let Some(source) = buffers.const_buffers().find(|b| !b.is_empty()) else {
            return Outcome::ok(0);
        };

        match retry(|| self.inner.write(source)) {
            Ok(n) => Outcome::ok(n),
            Err(e) => Outcome::err(e.into()),
        }
    }
}

impl<T: Seek> StdStream<T> {
    /// The absolute position a rejected seek asked for.
    fn rejected_target(&mut self, offset: i64, mode: SeekMode) -> i64 {
        let base = match mode {
            SeekMode::Start => Ok(0),
            SeekMode::Current => self.inner.stream_position(),
            SeekMode::End => self.end_position(),
        };
        match base {
            Ok(base) => i64::try_from(base)
                .unwrap_or(i64::MAX)
                .saturating_add(offset),
            Err(_) => offset,
        }
    }

    /// Length of the stream, restoring the position afterwards.
    fn end_position(&mut self) -> io::Result<u64> {
        let current = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(current))?;
        Ok(end)
    }
}

impl<T: Seek> Seekable for StdStream<T> {
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition> {
        let result = match mode.to_seek_from(offset) {
            Ok(from) => match self.inner.seek(from) {
                Ok(pos) => Ok(StreamPosition::new(pos)),
                Err(e) if e.kind() == io::ErrorKind::InvalidInput => {
                    Err(StreamError::InvalidSeek {
                        offset: self.rejected_target(offset, mode),
                    })
                }
                Err(e) => Err(e.into()),
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(pos) => Outcome::ok(pos),
            Err(e) => {
                let current = self.inner.stream_position().unwrap_or_default();
                Outcome::new(StreamPosition::new(current), Some(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::buffer::{buffer, buffer_mut};

    /// Fails with `Interrupted` once before every successful read.
    struct Flaky {
        inner: Cursor<Vec<u8>>,
        interrupt: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_read_retries_interrupted() {
        let mut stream = StdStream::new(Flaky {
            inner: Cursor::new(b"data".to_vec()),
            interrupt: false,
        });
        let mut dest = [0u8; 4];
        assert_eq!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap(), 4);
        assert!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap_err().is_eof());
    }

    #[test]
    fn test_read_skips_empty_spans() {
        let mut stream = StdStream::new(Cursor::new(b"xy".to_vec()));
        let mut empty = [0u8; 0];
        let mut target = [0u8; 2];
        let mut seq = [&mut empty[..], &mut target[..]];
        assert_eq!(stream.read_some(&mut seq).unwrap(), 2);
        assert_eq!(&target, b"xy");
    }

    #[test]
    fn test_write_and_seek_file() {
        let file = tempfile::tempfile().unwrap();
        let mut stream = StdStream::new(file);
        assert_eq!(crate::write(&mut stream, &buffer("file contents")).unwrap(), 13);
        stream.flush().unwrap();

        assert_eq!(stream.seek(5, SeekMode::Start).unwrap().offset_from_start(), 5);
        let mut dest = [0u8; 8];
        assert_eq!(crate::read(&mut stream, &mut buffer_mut(&mut dest)).unwrap(), 8);
        assert_eq!(&dest, b"contents");
    }

    #[test]
    fn test_negative_seek() {
        let mut stream = StdStream::new(Cursor::new(vec![0u8; 4]));
        stream.seek(2, SeekMode::Start).unwrap();
        let outcome = stream.seek_outcome(-3, SeekMode::Current);
        assert!(matches!(outcome.error, Some(StreamError::InvalidSeek { .. })));
        assert_eq!(outcome.value.offset_from_start(), 2);
        assert!(stream.seek(-1, SeekMode::Start).is_err());
    }

    #[test]
    fn test_rejected_seek_reports_resulting_position() {
        let mut stream = StdStream::new(Cursor::new(vec![0u8; 5]));
        stream.seek(1, SeekMode::Start).unwrap();

        let current = stream.seek_outcome(-3, SeekMode::Current);
        assert!(matches!(current.error, Some(StreamError::InvalidSeek { offset: -2 })));

        let end = stream.seek_outcome(-8, SeekMode::End);
        assert!(matches!(end.error, Some(StreamError::InvalidSeek { offset: -3 })));
        assert_eq!(end.value.offset_from_start(), 1, "Position must be unchanged");

        let start = stream.seek_outcome(-4, SeekMode::Start);
        assert!(matches!(start.error, Some(StreamError::InvalidSeek { offset: -4 })));
    }

    #[test]
    fn test_rejected_seek_matches_vec_stream() {
        let mut bridged = StdStream::new(Cursor::new(b"abcdef".to_vec()));
        let mut vec = crate::streams::VecStream::from(b"abcdef".to_vec());

        let from_std = bridged.seek(-10, SeekMode::End).unwrap_err();
        let from_vec = vec.seek(-10, SeekMode::End).unwrap_err();
        assert_eq!(from_std.to_string(), from_vec.to_string());
    }
}
