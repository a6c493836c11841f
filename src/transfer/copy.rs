//! Stream-to-stream copy.

use crate::buffer::{buffer, buffer_mut};
use crate::config::DEFAULT_BUFFER_SIZE;
use crate::error::StreamError;
use crate::stream::{Outcome, ReadStream, WriteStream};

use super::{TransferAll, write_outcome};

/// Pumps every byte from `source` into `sink` through a stack buffer.
///
/// End of `source` is success. The value is the number of bytes written to
/// `sink`, which on a write error may be less than the number read.
pub fn copy_outcome<R, W>(source: &mut R, sink: &mut W) -> Outcome<usize>
where
    R: ReadStream + ?Sized,
    W: WriteStream + ?Sized,
{
    let mut scratch = [0u8; DEFAULT_BUFFER_SIZE];
    let mut total = 0;

    loop {
        let (n, read_error) = source
            .read_some_outcome(&mut buffer_mut(&mut scratch))
            .into_parts();
        let n = n.min(scratch.len());

        let written = write_outcome(sink, &buffer(&scratch[..n]), TransferAll);
        total += written.value;
        if written.error.is_some() {
            return Outcome::new(total, written.error);
        }

        match read_error {
            Some(StreamError::Eof) => return Outcome::ok(total),
            Some(e) => return Outcome::new(total, Some(e)),
            None if n == 0 => return Outcome::ok(total),
            None => {}
        }
    }
}

/// Pumps every byte from `source` into `sink`.
///
/// # Example
///
/// ```
/// use spanio::{MemoryStream, VecStream, copy};
///
/// let mut source = MemoryStream::new(b"copied");
/// let mut sink = VecStream::new();
/// assert_eq!(copy(&mut source, &mut sink)?, 6);
/// assert_eq!(sink.get_ref(), b"copied");
/// # Ok::<(), spanio::StreamError>(())
/// ```
pub fn copy<R, W>(source: &mut R, sink: &mut W) -> Result<usize, StreamError>
where
    R: ReadStream + ?Sized,
    W: WriteStream + ?Sized,
{
    copy_outcome(source, sink).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::{MemoryStream, VecStream};

    #[test]
    fn test_copy_spans_several_chunks() {
        let content: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let mut source = MemoryStream::new(&content);
        let mut sink = VecStream::new();
        assert_eq!(copy(&mut source, &mut sink).unwrap(), 5000);
        assert_eq!(sink.get_ref(), &content);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut source = MemoryStream::new(b"");
        let mut sink = VecStream::new();
        assert_eq!(copy(&mut source, &mut sink).unwrap(), 0);
    }
}
