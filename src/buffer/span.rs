//! Non-owning byte spans.
//!
//! [`ConstBuffer`] and [`MutableBuffer`] are thin views over caller-owned
//! memory. They never allocate and borrow the memory they describe, so the
//! borrow checker guarantees they cannot outlive it.

use std::ops::{Add, AddAssign, Deref, DerefMut};

/// An immutable view over contiguous bytes.
///
/// # Example
///
/// ```
/// use spanio::buffer;
///
/// let data = b"hello world";
/// let span = buffer(data) + 6;
/// assert_eq!(span.as_slice(), b"world");
///
/// // Advancing past the end clamps to an empty span.
/// let span = span + 100;
/// assert!(span.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConstBuffer<'a> {
    data: &'a [u8],
}

impl<'a> ConstBuffer<'a> {
    /// Creates a span covering all of `data`.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Returns the number of bytes in the span.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the span covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the viewed bytes with the span's full lifetime.
    pub const fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Re-slices to at most `n` bytes.
    pub fn prefix(self, n: usize) -> Self {
        Self {
            data: &self.data[..n.min(self.data.len())],
        }
    }

    /// Drops the first `min(n, len)` bytes.
    pub fn advance(self, n: usize) -> Self {
        Self {
            data: &self.data[n.min(self.data.len())..],
        }
    }
}

/// A mutable view over contiguous bytes.
///
/// Holding a `MutableBuffer` is an exclusive borrow of the underlying memory.
/// It widens into a [`ConstBuffer`] but never the other way round.
#[derive(Debug, Default, PartialEq, Eq, Hash)]
pub struct MutableBuffer<'a> {
    data: &'a mut [u8],
}

impl<'a> MutableBuffer<'a> {
    /// Creates a span covering all of `data`.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data }
    }

    /// Returns the number of bytes in the span.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the viewed bytes.
    pub fn as_slice(&self) -> &[u8] {
        self.data
    }

    /// Returns the viewed bytes mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.data
    }

    /// Consumes the span, returning the underlying slice with its full lifetime.
    pub fn into_slice(self) -> &'a mut [u8] {
        self.data
    }

    /// Borrows this span for a shorter lifetime without giving it up.
    pub fn reborrow(&mut self) -> MutableBuffer<'_> {
        MutableBuffer { data: self.data }
    }

    /// Re-slices to at most `n` bytes.
    pub fn prefix(self, n: usize) -> Self {
        let n = n.min(self.data.len());
        Self {
            data: &mut self.data[..n],
        }
    }

    /// Drops the first `min(n, len)` bytes.
    pub fn advance(self, n: usize) -> Self {
        let n = n.min(self.data.len());
        Self {
            data: &mut self.data[n..],
        }
    }
}

/// Creates an immutable span over anything that views as bytes.
pub fn buffer<T: AsRef<[u8]> + ?Sized>(data: &T) -> ConstBuffer<'_> {
    ConstBuffer::new(data.as_ref())
}

/// Creates a mutable span over anything that views as mutable bytes.
pub fn buffer_mut<T: AsMut<[u8]> + ?Sized>(data: &mut T) -> MutableBuffer<'_> {
    MutableBuffer::new(data.as_mut())
}

impl<'a> From<&'a [u8]> for ConstBuffer<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a str> for ConstBuffer<'a> {
    fn from(data: &'a str) -> Self {
        Self::new(data.as_bytes())
    }
}

impl<'a> From<MutableBuffer<'a>> for ConstBuffer<'a> {
    fn from(buf: MutableBuffer<'a>) -> Self {
        Self::new(buf.data)
    }
}

impl<'a> From<&'a mut [u8]> for MutableBuffer<'a> {
    fn from(data: &'a mut [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> Add<usize> for ConstBuffer<'a> {
    type Output = ConstBuffer<'a>;

    fn add(self, n: usize) -> Self::Output {
        self.advance(n)
    }
}

impl<'a> Add<ConstBuffer<'a>> for usize {
    type Output = ConstBuffer<'a>;

    fn add(self, buf: ConstBuffer<'a>) -> Self::Output {
        buf.advance(self)
    }
}

impl AddAssign<usize> for ConstBuffer<'_> {
    fn add_assign(&mut self, n: usize) {
        *self = self.advance(n);
    }
}

impl<'a> Add<usize> for MutableBuffer<'a> {
    type Output = MutableBuffer<'a>;

    fn add(self, n: usize) -> Self::Output {
        self.advance(n)
    }
}

impl<'a> Add<MutableBuffer<'a>> for usize {
    type Output = MutableBuffer<'a>;

    fn add(self, buf: MutableBuffer<'a>) -> Self::Output {
        buf.advance(self)
    }
}

impl AddAssign<usize> for MutableBuffer<'_> {
    fn add_assign(&mut self, n: usize) {
        *self = std::mem::take(self).advance(n);
    }
}

impl Deref for ConstBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl Deref for MutableBuffer<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl DerefMut for MutableBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

impl AsRef<[u8]> for ConstBuffer<'_> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}

impl AsRef<[u8]> for MutableBuffer<'_> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}

impl AsMut<[u8]> for MutableBuffer<'_> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_clamps() {
        let data = [1u8, 2, 3, 4];
        let span = buffer(&data);
        assert_eq!((span + 1).as_slice(), &[2, 3, 4]);
        assert_eq!((span + 4).len(), 0);
        assert_eq!((span + 9).len(), 0);
        assert_eq!((2 + span).as_slice(), &[3, 4]);
    }

    #[test]
    fn test_prefix_clamps() {
        let data = b"abcdef";
        assert_eq!(buffer(data).prefix(3).as_slice(), b"abc");
        assert_eq!(buffer(data).prefix(100).as_slice(), b"abcdef");
        assert!(buffer(data).prefix(0).is_empty());
    }

    #[test]
    fn test_mutable_advance_and_write() {
        let mut data = [0u8; 6];
        let mut span = buffer_mut(&mut data) + 2;
        span.as_mut_slice()[0] = 7;
        span += 10;
        assert!(span.is_empty());
        assert_eq!(data, [0, 0, 7, 0, 0, 0]);
    }

    #[test]
    fn test_widening() {
        let mut data = *b"xyz";
        let span: ConstBuffer<'_> = buffer_mut(&mut data).prefix(2).into();
        assert_eq!(span.as_slice(), b"xy");
    }

    #[test]
    fn test_reborrow_keeps_span() {
        let mut data = [0u8; 4];
        let mut span = buffer_mut(&mut data);
        span.reborrow().as_mut_slice().fill(9);
        assert_eq!(span.len(), 4);
        assert_eq!(span.as_slice(), &[9, 9, 9, 9]);
    }
}
