//! Delimited reads.

use crate::config::{MAX_SINGLE_TRANSFER, MIN_DYNAMIC_CHUNK};
use crate::dynamic::DynamicBuffer;
use crate::error::StreamError;
use crate::stream::{Outcome, ReadStream};

/// A byte pattern that ends a record.
pub trait Delimiter {
    /// The pattern bytes.
    fn as_bytes(&self) -> &[u8];
}

impl Delimiter for u8 {
    fn as_bytes(&self) -> &[u8] {
        std::slice::from_ref(self)
    }
}

impl Delimiter for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> Delimiter for [u8; N] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl Delimiter for str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl Delimiter for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<D: Delimiter + ?Sized> Delimiter for &D {
    fn as_bytes(&self) -> &[u8] {
        (**self).as_bytes()
    }
}

/// Returns the offset of the first occurrence of `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    match needle {
        [] => Some(0),
        [byte] => haystack.iter().position(|b| b == byte),
        _ => haystack.windows(needle.len()).position(|w| w == needle),
    }
}

/// Grows `buf` until it contains `delimiter`.
///
/// Returns the offset one past the first byte of the first occurrence. For
/// a single-byte delimiter that is the record length including the
/// delimiter; for a longer one the record ends at `value - 1` and the rest
/// of the delimiter follows it. The whole delimiter is in `buf` either way.
/// An empty delimiter matches at once with a value of 0.
///
/// Bytes already in `buf` are searched first; after that, each fill only
/// rescans the last `delimiter.len() - 1` old bytes together with the new
/// ones, which finds occurrences straddling two fills without rescanning
/// the whole buffer.
///
/// On failure the value is `buf.size()` and every byte read stays in `buf`:
/// [`StreamError::NotFound`] once `buf` reaches `max_size()`, or the error
/// that ended the stream. A match in bytes that arrived together with an
/// error still wins and the error is dropped.
pub fn read_until_outcome<S, D, P>(stream: &mut S, buf: &mut D, delimiter: P) -> Outcome<usize>
where
    S: ReadStream + ?Sized,
    D: DynamicBuffer + ?Sized,
    P: Delimiter,
{
    let delim = delimiter.as_bytes();
    let overlap = delim.len().saturating_sub(1);
    let mut searched = 0;
    let mut pending: Option<StreamError> = None;

    loop {
        let data = buf.data();
        if let Some(pos) = find(&data[searched..], delim) {
            return Outcome::ok(searched + pos + delim.len().min(1));
        }
        searched = data.len().saturating_sub(overlap).max(searched);

        if let Some(e) = pending {
            return Outcome::new(buf.size(), Some(e));
        }

        let headroom = buf.headroom();
        if headroom == 0 {
            tracing::debug!(
                size = buf.size(),
                "read_until exhausted buffer without delimiter"
            );
            return Outcome::new(buf.size(), Some(StreamError::NotFound));
        }

        let spare = buf.capacity().saturating_sub(buf.size());
        let want = spare
            .max(MIN_DYNAMIC_CHUNK)
            .min(MAX_SINGLE_TRANSFER)
            .min(headroom);
        let (n, error) = match buf.prepare(want) {
            Ok(mut span) => stream.read_some_outcome(&mut span).into_parts(),
            Err(e) => return Outcome::new(buf.size(), Some(e)),
        };
        buf.commit(n.min(want));

        pending = match error {
            Some(e) => Some(e),
            None if n == 0 => Some(StreamError::Eof),
            None => None,
        };
    }
}

/// Grows `buf` until it contains `delimiter`, raising form.
///
/// # Example
///
/// ```
/// use spanio::{DynamicBuffer, MemoryStream, OwnedBuffer, read_until};
///
/// let mut stream = MemoryStream::new(b"key=value\nnext");
/// let mut buf = OwnedBuffer::new();
///
/// let n = read_until(&mut stream, &mut buf, b'\n')?;
/// assert_eq!(&buf.data()[..n], b"key=value\n");
/// # Ok::<(), spanio::StreamError>(())
/// ```
pub fn read_until<S, D, P>(stream: &mut S, buf: &mut D, delimiter: P) -> Result<usize, StreamError>
where
    S: ReadStream + ?Sized,
    D: DynamicBuffer + ?Sized,
    P: Delimiter,
{
    read_until_outcome(stream, buf, delimiter).into_result()
}
