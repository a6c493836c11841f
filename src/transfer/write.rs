//! Composed writes.

use std::io;

use crate::buffer::{ConstBufferSequence, ConstWindow, buffer_size};
use crate::dynamic::DynamicBuffer;
use crate::error::StreamError;
use crate::stream::{Outcome, WriteStream};

use super::{CompletionCondition, TransferAll};

pub(crate) fn write_zero() -> StreamError {
    StreamError::Io(io::Error::new(
        io::ErrorKind::WriteZero,
        "stream accepted no bytes",
    ))
}

/// Writes from a fixed sequence until `condition` stops or the sequence is drained.
pub fn write_outcome<S, B, C>(stream: &mut S, buffers: &B, mut condition: C) -> Outcome<usize>
where
    S: WriteStream + ?Sized,
    B: ConstBufferSequence + ?Sized,
    C: CompletionCondition,
{
    let size = buffer_size(buffers);
    let mut total = 0;

    while total < size {
        let next = condition.next(total).min(size - total);
        if next == 0 {
            break;
        }

        let window = ConstWindow::new(buffers, total, next);
        let (n, error) = stream.write_some_outcome(&window).into_parts();
        total += n.min(next);

        if let Some(e) = error {
            return Outcome::new(total, Some(e));
        }
        if n == 0 {
            return Outcome::new(total, Some(write_zero()));
        }
    }

    Outcome::ok(total)
}

/// Writes all of `buffers`.
///
/// # Example
///
/// ```
/// use spanio::{VecStream, buffer, write};
///
/// let mut stream = VecStream::new();
/// assert_eq!(write(&mut stream, &[buffer("hello "), buffer("world")])?, 11);
/// assert_eq!(stream.get_ref(), b"hello world");
/// # Ok::<(), spanio::StreamError>(())
/// ```
pub fn write<S, B>(stream: &mut S, buffers: &B) -> Result<usize, StreamError>
where
    S: WriteStream + ?Sized,
    B: ConstBufferSequence + ?Sized,
{
    write_outcome(stream, buffers, TransferAll).into_result()
}

/// Writes from a fixed sequence until `condition` stops.
pub fn write_with<S, B, C>(stream: &mut S, buffers: &B, condition: C) -> Result<usize, StreamError>
where
    S: WriteStream + ?Sized,
    B: ConstBufferSequence + ?Sized,
    C: CompletionCondition,
{
    write_outcome(stream, buffers, condition).into_result()
}

/// Drains a dynamic buffer into `stream`, consuming what was confirmed written.
///
/// On error the unwritten bytes stay in `buf`.
pub fn write_dynamic_outcome<S, D, C>(
    stream: &mut S,
    buf: &mut D,
    mut condition: C,
) -> Outcome<usize>
where
    S: WriteStream + ?Sized,
    D: DynamicBuffer + ?Sized,
    C: CompletionCondition,
{
    let mut total = 0;

    while buf.size() > 0 {
        let next = condition.next(total).min(buf.size());
        if next == 0 {
            break;
        }

        let (n, error) = stream
            .write_some_outcome(&buf.data().prefix(next))
            .into_parts();
        let n = n.min(next);
        buf.consume(n);
        total += n;

        if let Some(e) = error {
            return Outcome::new(total, Some(e));
        }
        if n == 0 {
            return Outcome::new(total, Some(write_zero()));
        }
    }

    Outcome::ok(total)
}

/// Drains a dynamic buffer into `stream`.
pub fn write_dynamic<S, D>(stream: &mut S, buf: &mut D) -> Result<usize, StreamError>
where
    S: WriteStream + ?Sized,
    D: DynamicBuffer + ?Sized,
{
    write_dynamic_outcome(stream, buf, TransferAll).into_result()
}

/// Drains a dynamic buffer into `stream` until `condition` stops.
pub fn write_dynamic_with<S, D, C>(
    stream: &mut S,
    buf: &mut D,
    condition: C,
) -> Result<usize, StreamError>
where
    S: WriteStream + ?Sized,
    D: DynamicBuffer + ?Sized,
    C: CompletionCondition,
{
    write_dynamic_outcome(stream, buf, condition).into_result()
}
