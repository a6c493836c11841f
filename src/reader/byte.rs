//! Byte-at-a-time iteration.

use crate::buffer::buffer_mut;
use crate::error::StreamError;
use crate::stream::ReadStream;
use crate::transfer::read;

/// An iterator of the bytes of a read stream.
///
/// Ends cleanly at end of stream. Any other error is yielded once and ends
/// the iteration.
#[derive(Debug)]
pub struct ByteReader<S> {
    stream: S,
    finished: bool,
}

impl<S: ReadStream> ByteReader<S> {
    /// Creates an iterator over `stream`.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            finished: false,
        }
    }

    /// Unwraps the stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: ReadStream> Iterator for ByteReader<S> {
    type Item = Result<u8, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut byte = [0u8; 1];
        match read(&mut self.stream, &mut buffer_mut(&mut byte)) {
            Ok(_) => Some(Ok(byte[0])),
            Err(StreamError::Eof) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
