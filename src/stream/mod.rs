//! Stream capabilities.
//!
//! Generic algorithms are written against three traits:
//!
//! - [`ReadStream`] - short reads into a [`MutableBufferSequence`]
//! - [`WriteStream`] - short writes from a [`ConstBufferSequence`]
//! - [`Seekable`] - repositioning, only meaningful together with one of the
//!   other two, hence the [`SeekableReadStream`] / [`SeekableWriteStream`]
//!   composites
//!
//! Every short operation exists in two forms. The `*_outcome` form is the one
//! implementors write and reports failure in an [`Outcome`] next to the byte
//! count; the unsuffixed form is a provided wrapper returning a `Result`.
//!
//! End of stream is reported as [`StreamError::Eof`], never as a bare zero
//! count: a zero-length request returns zero with no error, so the two cases
//! stay distinguishable.

mod position;

pub use position::{SeekMode, StreamPosition};

use crate::buffer::{ConstBufferSequence, MutableBufferSequence};
use crate::error::StreamError;

/// A value together with the error, if any, that ended the operation producing it.
///
/// Short reads may return bytes *and* an error (for example the final bytes
/// of a stream together with [`StreamError::Eof`]), which a plain `Result`
/// cannot express.
#[derive(Debug)]
#[must_use]
pub struct Outcome<T> {
    /// Bytes moved, or the position reached.
    pub value: T,

    /// The error that ended the operation.
    pub error: Option<StreamError>,
}

impl<T> Outcome<T> {
    /// A successful outcome.
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    /// An outcome carrying both a value and an error.
    pub fn new(value: T, error: Option<StreamError>) -> Self {
        Self { value, error }
    }

    /// Returns true if no error was reported.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Returns true if the operation ended at end of stream.
    pub fn is_eof(&self) -> bool {
        self.error.as_ref().is_some_and(StreamError::is_eof)
    }

    /// Maps the value, keeping the error.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            error: self.error,
        }
    }

    /// Splits into the value and the error.
    pub fn into_parts(self) -> (T, Option<StreamError>) {
        (self.value, self.error)
    }

    /// Converts into the raising form: any error wins over the value.
    pub fn into_result(self) -> Result<T, StreamError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.value),
        }
    }
}

impl<T: Default> Outcome<T> {
    /// A failed outcome with a default value.
    pub fn err(error: StreamError) -> Self {
        Self {
            value: T::default(),
            error: Some(error),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, StreamError> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

/// A byte source supporting short reads.
pub trait ReadStream {
    /// Reads some bytes into `buffers`, filling member spans in order.
    ///
    /// Returns the number of bytes read, which may be less than
    /// `buffer_size(buffers)`. A zero-length request returns 0 with no error.
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized;

    /// Reads some bytes into `buffers`.
    ///
    /// # Errors
    ///
    /// Whatever [`ReadStream::read_some_outcome`] reported; bytes read in the
    /// same call are not returned.
    fn read_some<B>(&mut self, buffers: &mut B) -> Result<usize, StreamError>
    where
        B: MutableBufferSequence + ?Sized,
    {
        self.read_some_outcome(buffers).into_result()
    }
}

/// A byte sink supporting short writes.
pub trait WriteStream {
    /// Writes some bytes from `buffers`, draining member spans in order.
    fn write_some_outcome<B>(&mut self, buffers: &B) -> Outcome<usize>
    where
        B: ConstBufferSequence + ?Sized;

    /// Writes some bytes from `buffers`.
    fn write_some<B>(&mut self, buffers: &B) -> Result<usize, StreamError>
    where
        B: ConstBufferSequence + ?Sized,
    {
        self.write_some_outcome(buffers).into_result()
    }
}

/// A stream with a movable position.
///
/// On its own this is only the seek half of a capability: a position is
/// meaningful for a stream that also reads or writes. Code that needs a
/// seekable stream bounds on [`SeekableReadStream`] or
/// [`SeekableWriteStream`]; plain `Seekable` is what concrete streams
/// implement and what forwarding wrappers pass through.
pub trait Seekable {
    /// Moves the position by `offset` relative to `mode`, returning the new position.
    ///
    /// A resulting position outside the stream is [`StreamError::InvalidSeek`]
    /// and leaves the position unchanged.
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition>;

    /// Moves the position, raising form.
    fn seek(&mut self, offset: i64, mode: SeekMode) -> Result<StreamPosition, StreamError> {
        self.seek_outcome(offset, mode).into_result()
    }

    /// Returns the current position.
    fn position(&mut self) -> Result<StreamPosition, StreamError> {
        self.seek(0, SeekMode::Current)
    }
}

/// A readable stream that can also seek.
pub trait SeekableReadStream: ReadStream + Seekable {}

impl<S: ReadStream + Seekable + ?Sized> SeekableReadStream for S {}

/// A writable stream that can also seek.
pub trait SeekableWriteStream: WriteStream + Seekable {}

impl<S: WriteStream + Seekable + ?Sized> SeekableWriteStream for S {}

impl<S: ReadStream + ?Sized> ReadStream for &mut S {
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        (**self).read_some_outcome(buffers)
    }
}

impl<S: WriteStream + ?Sized> WriteStream for &mut S {
    fn write_some_outcome<B>(&mut self, buffers: &B) -> Outcome<usize>
    where
        B: ConstBufferSequence + ?Sized,
    {
        (**self).write_some_outcome(buffers)
    }
}

impl<S: Seekable + ?Sized> Seekable for &mut S {
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition> {
        (**self).seek_outcome(offset, mode)
    }
}
