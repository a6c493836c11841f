//! Growable in-memory stream.

use crate::buffer::{ConstBufferSequence, MutableBufferSequence, buffer, buffer_copy, buffer_size};
use crate::error::StreamError;
use crate::stream::{Outcome, ReadStream, SeekMode, Seekable, StreamPosition, WriteStream};

/// A readable, writable, seekable stream over an owned vector.
///
/// Writes overwrite bytes at the cursor and extend the vector past its end.
/// A read that cannot fill its request because it ran into the end returns
/// the bytes it got together with [`StreamError::Eof`].
///
/// # Example
///
/// ```
/// use spanio::{ReadStream, SeekMode, Seekable, VecStream, WriteStream, buffer, buffer_mut};
///
/// let mut stream = VecStream::new();
/// stream.write_some(&buffer("hello"))?;
/// stream.seek(0, SeekMode::Start)?;
///
/// let mut out = [0u8; 5];
/// assert_eq!(stream.read_some(&mut buffer_mut(&mut out))?, 5);
/// assert_eq!(&out, b"hello");
/// # Ok::<(), spanio::StreamError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecStream {
    data: Vec<u8>,
    pos: usize,
}

impl VecStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full contents.
    pub fn get_ref(&self) -> &Vec<u8> {
        &self.data
    }

    /// Mutable access to the contents.
    ///
    /// Truncating below the cursor leaves the stream at its end.
    pub fn get_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Returns the contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn remaining(&self) -> &[u8] {
        &self.data[self.pos.min(self.data.len())..]
    }
}

impl From<Vec<u8>> for VecStream {
    /// Wraps existing contents, positioned at the start.
    fn from(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl ReadStream for VecStream {
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        let requested = buffer_size(buffers);
        let n = buffer_copy(buffers, &buffer(self.remaining()));
        self.pos += n;

        if n < requested {
            Outcome::new(n, Some(StreamError::Eof))
        } else {
            Outcome::ok(n)
        }
    }
}

impl WriteStream for VecStream {
    fn write_some_outcome<B>(&mut self, buffers: &B) -> Outcome<usize>
    where
        B: ConstBufferSequence + ?Sized,
    {
        self.pos = self.pos.min(self.data.len());
        let mut written = 0;
        for span in buffers.const_buffers() {
            let overlap = span.len().min(self.data.len() - self.pos);
            self.data[self.pos..self.pos + overlap].copy_from_slice(&span[..overlap]);
            self.data.extend_from_slice(&span[overlap..]);
            self.pos += span.len();
            written += span.len();
        }
        Outcome::ok(written)
    }
}

impl Seekable for VecStream {
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition> {
        let current = self.pos.min(self.data.len());
        match mode.resolve(offset, current as u64, self.data.len() as u64) {
            Ok(pos) => {
                self.pos = pos as usize;
                Outcome::ok(StreamPosition::new(pos))
            }
            Err(e) => Outcome::new(StreamPosition::new(current as u64), Some(e)),
        }
    }
}
