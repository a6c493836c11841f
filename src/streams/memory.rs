//! Read-only stream over a byte slice.

use crate::buffer::{MutableBufferSequence, buffer, buffer_copy, buffer_size};
use crate::error::StreamError;
use crate::stream::{Outcome, ReadStream, SeekMode, Seekable, StreamPosition};

/// A readable, seekable view over borrowed bytes.
///
/// A short read returns as many bytes as fit; a read at the end returns 0
/// with [`StreamError::Eof`].
#[derive(Debug, Clone)]
pub struct MemoryStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MemoryStream<'a> {
    /// Creates a stream positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The bytes not yet read.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// The whole underlying slice.
    pub fn get_ref(&self) -> &'a [u8] {
        self.data
    }
}

impl ReadStream for MemoryStream<'_> {
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        let remaining = self.remaining();
        if remaining.is_empty() && buffer_size(buffers) > 0 {
            return Outcome::err(StreamError::Eof);
        }

        let n = buffer_copy(buffers, &buffer(remaining));
        self.pos += n;
        Outcome::ok(n)
    }
}

impl Seekable for MemoryStream<'_> {
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition> {
        match mode.resolve(offset, self.pos as u64, self.data.len() as u64) {
            Ok(pos) => {
                self.pos = pos as usize;
                Outcome::ok(StreamPosition::new(pos))
            }
            Err(e) => Outcome::new(StreamPosition::new(self.pos as u64), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::buffer_mut;

    #[test]
    fn test_short_reads_then_eof() {
        let mut stream = MemoryStream::new(b"abcde");
        let mut dest = [0u8; 3];

        assert_eq!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap(), 3);
        assert_eq!(&dest, b"abc");
        assert_eq!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap(), 2);
        assert_eq!(&dest[..2], b"de");

        let outcome = stream.read_some_outcome(&mut buffer_mut(&mut dest));
        assert_eq!(outcome.value, 0);
        assert!(outcome.is_eof());
    }

    #[test]
    fn test_empty_request_is_not_eof() {
        let mut stream = MemoryStream::new(b"");
        let mut dest = [0u8; 0];
        let outcome = stream.read_some_outcome(&mut buffer_mut(&mut dest));
        assert!(outcome.is_ok());
        assert_eq!(outcome.value, 0);
    }

    #[test]
    fn test_seek() {
        let mut stream = MemoryStream::new(b"0123456789");
        assert_eq!(stream.seek(4, SeekMode::Start).unwrap().offset_from_start(), 4);
        assert_eq!(stream.seek(-1, SeekMode::End).unwrap().offset_from_start(), 9);
        assert_eq!(stream.remaining(), b"9");
        assert_eq!(stream.position().unwrap(), StreamPosition::new(9));
    }

    #[test]
    fn test_invalid_seek_keeps_position() {
        let mut stream = MemoryStream::new(b"0123");
        stream.seek(2, SeekMode::Start).unwrap();
        let outcome = stream.seek_outcome(-3, SeekMode::Current);
        assert!(matches!(outcome.error, Some(StreamError::InvalidSeek { .. })));
        assert_eq!(outcome.value.offset_from_start(), 2);
        assert!(stream.seek(5, SeekMode::Start).is_err());
        assert_eq!(stream.remaining(), b"23");
    }
}
