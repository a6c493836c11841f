//! Delimiter-separated records.

use bytes::Bytes;

use crate::config::StreamConfig;
use crate::dynamic::{DynamicBuffer, OwnedBuffer};
use crate::error::StreamError;
use crate::stream::ReadStream;
use crate::transfer::{Delimiter, read_all_outcome, read_until_outcome};

/// An iterator of the records of a read stream, split on a delimiter.
///
/// Records exclude the delimiter. A final record without a delimiter is
/// yielded at end of stream; an empty stream yields nothing. A record that
/// would outgrow the configured bound is reported as
/// [`StreamError::NotFound`] and ends the iteration, as does any other error.
///
/// An empty delimiter makes the whole stream one record.
#[derive(Debug)]
pub struct Lines<S> {
    stream: S,
    buf: OwnedBuffer,
    delimiter: Vec<u8>,
    finished: bool,
}

impl<S: ReadStream> Lines<S> {
    /// Splits `stream` on `delimiter` with no bound on record length.
    pub fn new(stream: S, delimiter: impl Delimiter) -> Self {
        Self::with_buffer(stream, delimiter, OwnedBuffer::new())
    }

    /// Splits `stream` on `delimiter`, bounding records by `config.max_dynamic_size()`.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(
        stream: S,
        delimiter: impl Delimiter,
        config: &StreamConfig,
    ) -> Result<Self, StreamError> {
        config.validate()?;
        Ok(Self::with_buffer(
            stream,
            delimiter,
            OwnedBuffer::with_max_size(config.max_dynamic_size()),
        ))
    }

    fn with_buffer(stream: S, delimiter: impl Delimiter, buf: OwnedBuffer) -> Self {
        Self {
            stream,
            buf,
            delimiter: delimiter.as_bytes().to_vec(),
            finished: false,
        }
    }

    /// Unwraps the stream. Bytes read past the last record are lost.
    pub fn into_inner(self) -> S {
        self.stream
    }

    fn take(&mut self, len: usize, skip: usize) -> Bytes {
        let record = Bytes::copy_from_slice(&self.buf.data()[..len]);
        self.buf.consume(len + skip);
        record
    }

    fn take_rest(&mut self) -> Option<Result<Bytes, StreamError>> {
        self.finished = true;
        let size = self.buf.size();
        (size > 0).then(|| Ok(self.take(size, 0)))
    }
}

impl<S: ReadStream> Iterator for Lines<S> {
    type Item = Result<Bytes, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.delimiter.is_empty() {
            return match read_all_outcome(&mut self.stream, &mut self.buf).into_parts() {
                (_, None) => self.take_rest(),
                (_, Some(e)) => {
                    self.finished = true;
                    Some(Err(e))
                }
            };
        }

        let delimiter = self.delimiter.as_slice();
        match read_until_outcome(&mut self.stream, &mut self.buf, delimiter).into_parts() {
            (end, None) => {
                // The match starts one byte before `end`
                let len = end - 1;
                Some(Ok(self.take(len, self.delimiter.len())))
            }
            (_, Some(StreamError::Eof)) => self.take_rest(),
            (_, Some(e)) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
