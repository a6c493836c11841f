//! Composed reads.

use crate::buffer::{MutableBufferSequence, MutableWindow, buffer_size};
use crate::config::MIN_DYNAMIC_CHUNK;
use crate::dynamic::DynamicBuffer;
use crate::error::StreamError;
use crate::stream::{Outcome, ReadStream};

use super::{CompletionCondition, TransferAll};

/// Reads into a fixed sequence until `condition` stops or the sequence is full.
///
/// Each short read targets the unfilled remainder of `buffers`, capped at
/// the size the condition asked for.
pub fn read_outcome<S, B, C>(stream: &mut S, buffers: &mut B, mut condition: C) -> Outcome<usize>
where
    S: ReadStream + ?Sized,
    B: MutableBufferSequence + ?Sized,
    C: CompletionCondition,
{
    let size = buffer_size(buffers);
    let mut total = 0;

    while total < size {
        let next = condition.next(total).min(size - total);
        if next == 0 {
            break;
        }

        let mut window = MutableWindow::new(buffers, total, next);
        let (n, error) = stream.read_some_outcome(&mut window).into_parts();
        total += n.min(next);

        if let Some(e) = error {
            return Outcome::new(total, Some(e));
        }
        if n == 0 {
            return Outcome::new(total, Some(StreamError::Eof));
        }
    }

    Outcome::ok(total)
}

/// Reads until `buffers` is full.
///
/// # Errors
///
/// [`StreamError::Eof`] if the stream ends first, or any stream error.
///
/// # Example
///
/// ```
/// use spanio::{MemoryStream, buffer_mut, read};
///
/// let mut stream = MemoryStream::new(b"hello world");
/// let mut word = [0u8; 5];
/// assert_eq!(read(&mut stream, &mut buffer_mut(&mut word))?, 5);
/// assert_eq!(&word, b"hello");
/// # Ok::<(), spanio::StreamError>(())
/// ```
pub fn read<S, B>(stream: &mut S, buffers: &mut B) -> Result<usize, StreamError>
where
    S: ReadStream + ?Sized,
    B: MutableBufferSequence + ?Sized,
{
    read_outcome(stream, buffers, TransferAll).into_result()
}

/// Reads into a fixed sequence until `condition` stops.
pub fn read_with<S, B, C>(
    stream: &mut S,
    buffers: &mut B,
    condition: C,
) -> Result<usize, StreamError>
where
    S: ReadStream + ?Sized,
    B: MutableBufferSequence + ?Sized,
    C: CompletionCondition,
{
    read_outcome(stream, buffers, condition).into_result()
}

/// Reads into a dynamic buffer until `condition` stops or the buffer reaches `max_size()`.
///
/// Each cycle prepares `min(next, max(spare capacity, MIN_DYNAMIC_CHUNK), headroom)`
/// bytes, reads into them and commits what arrived.
pub fn read_dynamic_outcome<S, D, C>(
    stream: &mut S,
    buf: &mut D,
    mut condition: C,
) -> Outcome<usize>
where
    S: ReadStream + ?Sized,
    D: DynamicBuffer + ?Sized,
    C: CompletionCondition,
{
    let mut total = 0;

    loop {
        let headroom = buf.headroom();
        if headroom == 0 {
            break;
        }
        let next = condition.next(total);
        if next == 0 {
            break;
        }

        let spare = buf.capacity().saturating_sub(buf.size());
        let want = next.min(spare.max(MIN_DYNAMIC_CHUNK)).min(headroom);
        let (n, error) = match buf.prepare(want) {
            Ok(mut span) => stream.read_some_outcome(&mut span).into_parts(),
            Err(e) => return Outcome::new(total, Some(e)),
        };
        let n = n.min(want);
        buf.commit(n);
        total += n;

        if let Some(e) = error {
            return Outcome::new(total, Some(e));
        }
        if n == 0 {
            return Outcome::new(total, Some(StreamError::Eof));
        }
    }

    Outcome::ok(total)
}

/// Reads into a dynamic buffer until it reaches `max_size()`.
pub fn read_dynamic<S, D>(stream: &mut S, buf: &mut D) -> Result<usize, StreamError>
where
    S: ReadStream + ?Sized,
    D: DynamicBuffer + ?Sized,
{
    read_dynamic_outcome(stream, buf, TransferAll).into_result()
}

/// Reads into a dynamic buffer until `condition` stops.
pub fn read_dynamic_with<S, D, C>(
    stream: &mut S,
    buf: &mut D,
    condition: C,
) -> Result<usize, StreamError>
where
    S: ReadStream + ?Sized,
    D: DynamicBuffer + ?Sized,
    C: CompletionCondition,
{
    read_dynamic_outcome(stream, buf, condition).into_result()
}

/// Reads everything the stream has left; end of stream is success.
pub fn read_all_outcome<S, D>(stream: &mut S, buf: &mut D) -> Outcome<usize>
where
    S: ReadStream + ?Sized,
    D: DynamicBuffer + ?Sized,
{
    let mut outcome = read_dynamic_outcome(stream, buf, TransferAll);
    if outcome.is_eof() {
        outcome.error = None;
    }
    outcome
}

/// Reads everything the stream has left.
///
/// # Example
///
/// ```
/// use spanio::{MemoryStream, dynamic_buffer, read_all};
///
/// let mut stream = MemoryStream::new(b"all of it");
/// let mut out = Vec::new();
/// assert_eq!(read_all(&mut stream, &mut dynamic_buffer(&mut out))?, 9);
/// assert_eq!(out, b"all of it");
/// # Ok::<(), spanio::StreamError>(())
/// ```
pub fn read_all<S, D>(stream: &mut S, buf: &mut D) -> Result<usize, StreamError>
where
    S: ReadStream + ?Sized,
    D: DynamicBuffer + ?Sized,
{
    read_all_outcome(stream, buf).into_result()
}
