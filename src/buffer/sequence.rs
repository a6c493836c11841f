//! Buffer sequences for scatter/gather I/O.
//!
//! A sequence is either a single span or an ordered collection of spans. The
//! iteration order is the I/O order: gather-writes concatenate the members in
//! sequence order and scatter-reads fill them in sequence order.

use bytes::{Bytes, BytesMut};

use super::span::{ConstBuffer, MutableBuffer};

/// A sequence of readable byte spans.
pub trait ConstBufferSequence {
    /// Iterates the member spans in I/O order.
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]>;
}

/// A sequence of writable byte spans.
///
/// Every mutable sequence is also readable, the same way a [`MutableBuffer`]
/// widens into a [`ConstBuffer`].
pub trait MutableBufferSequence: ConstBufferSequence {
    /// Iterates the member spans in I/O order.
    fn mutable_buffers(&mut self) -> impl Iterator<Item = &mut [u8]>;
}

impl ConstBufferSequence for ConstBuffer<'_> {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        std::iter::once(self.as_slice())
    }
}

impl ConstBufferSequence for MutableBuffer<'_> {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        std::iter::once(self.as_slice())
    }
}

impl MutableBufferSequence for MutableBuffer<'_> {
    fn mutable_buffers(&mut self) -> impl Iterator<Item = &mut [u8]> {
        std::iter::once(self.as_mut_slice())
    }
}

impl ConstBufferSequence for Bytes {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        std::iter::once(&self[..])
    }
}

impl ConstBufferSequence for BytesMut {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        std::iter::once(&self[..])
    }
}

impl MutableBufferSequence for BytesMut {
    fn mutable_buffers(&mut self) -> impl Iterator<Item = &mut [u8]> {
        std::iter::once(&mut self[..])
    }
}

impl<T: AsRef<[u8]>> ConstBufferSequence for [T] {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        self.iter().map(|b| b.as_ref())
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> MutableBufferSequence for [T] {
    fn mutable_buffers(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.iter_mut().map(|b| b.as_mut())
    }
}

impl<T: AsRef<[u8]>, const N: usize> ConstBufferSequence for [T; N] {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        self.iter().map(|b| b.as_ref())
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>, const N: usize> MutableBufferSequence for [T; N] {
    fn mutable_buffers(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.iter_mut().map(|b| b.as_mut())
    }
}

impl<T: AsRef<[u8]>> ConstBufferSequence for Vec<T> {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        self.iter().map(|b| b.as_ref())
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> MutableBufferSequence for Vec<T> {
    fn mutable_buffers(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.iter_mut().map(|b| b.as_mut())
    }
}

impl<S: ConstBufferSequence + ?Sized> ConstBufferSequence for &S {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        (**self).const_buffers()
    }
}

impl<S: ConstBufferSequence + ?Sized> ConstBufferSequence for &mut S {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        (**self).const_buffers()
    }
}

impl<S: MutableBufferSequence + ?Sized> MutableBufferSequence for &mut S {
    fn mutable_buffers(&mut self) -> impl Iterator<Item = &mut [u8]> {
        (**self).mutable_buffers()
    }
}

/// Returns the total number of bytes in a sequence.
///
/// Runs in time linear in the number of member spans.
pub fn buffer_size<S: ConstBufferSequence + ?Sized>(buffers: &S) -> usize {
    buffers.const_buffers().map(<[u8]>::len).sum()
}

/// Copies bytes from `source` into `dest`.
///
/// Copies `min(buffer_size(dest), buffer_size(source))` bytes and returns the
/// count. Both sequences are walked independently, so one source span may be
/// split across several destination spans and vice versa.
///
/// # Example
///
/// ```
/// use spanio::buffer_copy;
///
/// let mut first = [0u8; 3];
/// let mut second = [0u8; 5];
/// let mut dest = [&mut first[..], &mut second[..]];
/// let source = [&b"ab"[..], &b"cdefg"[..]];
///
/// assert_eq!(buffer_copy(&mut dest, &source), 7);
/// assert_eq!(&first, b"abc");
/// assert_eq!(&second, b"defg\0");
/// ```
pub fn buffer_copy<D, S>(dest: &mut D, source: &S) -> usize
where
    D: MutableBufferSequence + ?Sized,
    S: ConstBufferSequence + ?Sized,
{
    buffer_copy_max(dest, source, usize::MAX)
}

/// Copies at most `max_size` bytes from `source` into `dest`.
///
/// Never writes past the end of a destination span nor reads past the end of
/// a source span.
pub fn buffer_copy_max<D, S>(dest: &mut D, source: &S, max_size: usize) -> usize
where
    D: MutableBufferSequence + ?Sized,
    S: ConstBufferSequence + ?Sized,
{
    let mut sources = source.const_buffers();
    let mut pending: &[u8] = &[];
    let mut remaining = max_size;
    let mut copied = 0;

    'dest: for mut target in dest.mutable_buffers() {
        while !target.is_empty() {
            if remaining == 0 {
                break 'dest;
            }
            while pending.is_empty() {
                match sources.next() {
                    Some(next) => pending = next,
                    None => break 'dest,
                }
            }

            let n = target.len().min(pending.len()).min(remaining);
            let (head, tail) = std::mem::take(&mut target).split_at_mut(n);
            head.copy_from_slice(&pending[..n]);
            target = tail;
            pending = &pending[n..];
            remaining -= n;
            copied += n;
        }
    }

    copied
}

/// A readable window into another sequence: skips a prefix and caps the length.
///
/// Transfer loops use windows to resume a gather-write after a short write
/// without copying or reallocating the caller's sequence.
#[derive(Debug)]
pub struct ConstWindow<'s, S: ?Sized> {
    inner: &'s S,
    skip: usize,
    limit: usize,
}

impl<'s, S: ConstBufferSequence + ?Sized> ConstWindow<'s, S> {
    /// Views `inner` starting `skip` bytes in, covering at most `limit` bytes.
    pub fn new(inner: &'s S, skip: usize, limit: usize) -> Self {
        Self { inner, skip, limit }
    }
}

impl<S: ConstBufferSequence + ?Sized> ConstBufferSequence for ConstWindow<'_, S> {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        window(self.inner.const_buffers(), self.skip, self.limit)
    }
}

fn window<'a>(
    spans: impl Iterator<Item = &'a [u8]>,
    mut skip: usize,
    mut limit: usize,
) -> impl Iterator<Item = &'a [u8]> {
    spans.filter_map(move |b| {
        if skip >= b.len() {
            skip -= b.len();
            return None;
        }
        let rest = &b[skip..];
        skip = 0;
        let n = rest.len().min(limit);
        limit -= n;
        (n > 0).then_some(&rest[..n])
    })
}

fn window_mut<'a>(
    spans: impl Iterator<Item = &'a mut [u8]>,
    mut skip: usize,
    mut limit: usize,
) -> impl Iterator<Item = &'a mut [u8]> {
    spans.filter_map(move |b| {
        if skip >= b.len() {
            skip -= b.len();
            return None;
        }
        let (_, rest) = b.split_at_mut(skip);
        skip = 0;
        let n = rest.len().min(limit);
        limit -= n;
        let (head, _) = rest.split_at_mut(n);
        (n > 0).then_some(head)
    })
}

/// A writable window into another sequence: skips a prefix and caps the length.
///
/// Transfer loops use windows to resume a scatter-read after a short read.
#[derive(Debug)]
pub struct MutableWindow<'s, S: ?Sized> {
    inner: &'s mut S,
    skip: usize,
    limit: usize,
}

impl<'s, S: MutableBufferSequence + ?Sized> MutableWindow<'s, S> {
    /// Views `inner` starting `skip` bytes in, covering at most `limit` bytes.
    pub fn new(inner: &'s mut S, skip: usize, limit: usize) -> Self {
        Self { inner, skip, limit }
    }
}

impl<S: MutableBufferSequence + ?Sized> ConstBufferSequence for MutableWindow<'_, S> {
    fn const_buffers(&self) -> impl Iterator<Item = &[u8]> {
        window(self.inner.const_buffers(), self.skip, self.limit)
    }
}

impl<S: MutableBufferSequence + ?Sized> MutableBufferSequence for MutableWindow<'_, S> {
    fn mutable_buffers(&mut self) -> impl Iterator<Item = &mut [u8]> {
        window_mut(self.inner.mutable_buffers(), self.skip, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{buffer, buffer_mut};

    #[test]
    fn test_buffer_size_sums_members() {
        let seq = [&b"abc"[..], &b""[..], &b"defg"[..]];
        assert_eq!(buffer_size(&seq), 7);
        assert_eq!(buffer_size(&buffer(b"hello")), 5);

        let empty: [&[u8]; 0] = [];
        assert_eq!(buffer_size(&empty), 0);
    }

    #[test]
    fn test_buffer_copy_single_spans() {
        let src = b"0123456789";
        let mut dest = [0u8; 4];
        assert_eq!(buffer_copy(&mut buffer_mut(&mut dest), &buffer(src)), 4);
        assert_eq!(&dest, b"0123");

        let mut big = [0u8; 12];
        assert_eq!(buffer_copy(&mut buffer_mut(&mut big), &buffer(src)), 10);
        assert_eq!(&big[..10], src);
        assert_eq!(&big[10..], &[0, 0]);
    }

    #[test]
    fn test_buffer_copy_respects_max() {
        let mut dest = [0u8; 8];
        let copied = buffer_copy_max(&mut buffer_mut(&mut dest), &buffer(b"abcdefgh"), 3);
        assert_eq!(copied, 3);
        assert_eq!(&dest[..4], b"abc\0");
    }

    #[test]
    fn test_buffer_copy_splits_across_spans() {
        let mut a = [0u8; 2];
        let mut b = [0u8; 1];
        let mut c = [0u8; 4];
        let mut dest = [&mut a[..], &mut b[..], &mut c[..]];
        let src = [&b"x"[..], &b"yzw"[..], &b"v"[..]];

        assert_eq!(buffer_copy(&mut dest, &src), 5);
        assert_eq!(&a, b"xy");
        assert_eq!(&b, b"z");
        assert_eq!(&c, b"wv\0\0");
    }

    #[test]
    fn test_const_window() {
        let seq = [&b"abc"[..], &b"def"[..], &b"ghi"[..]];
        let window = ConstWindow::new(&seq, 2, 5);
        let parts: Vec<&[u8]> = window.const_buffers().collect();
        assert_eq!(parts, vec![&b"c"[..], &b"def"[..], &b"g"[..]]);
        assert_eq!(buffer_size(&window), 5);

        let past_end = ConstWindow::new(&seq, 20, 5);
        assert_eq!(buffer_size(&past_end), 0);
    }

    #[test]
    fn test_mutable_window_writes_in_place() {
        let mut a = [0u8; 3];
        let mut b = [0u8; 3];
        {
            let mut seq = [&mut a[..], &mut b[..]];
            let mut window = MutableWindow::new(&mut seq, 1, 4);
            assert_eq!(buffer_size(&window), 4);
            assert_eq!(buffer_copy(&mut window, &buffer(b"WXYZ!")), 4);
        }
        assert_eq!(&a, b"\0WX");
        assert_eq!(&b, b"YZ\0");
    }
}
