//! Dynamic buffer over a borrowed `BytesMut`.

use bytes::{Buf, BytesMut};

use super::{DynamicBuffer, UNBOUNDED, check_prepare};
use crate::buffer::{ConstBuffer, MutableBuffer};
use crate::error::StreamError;

/// A [`DynamicBuffer`] writing into a caller-owned [`BytesMut`].
///
/// Consuming advances the `BytesMut` cursor instead of moving bytes, and the
/// committed region can later be split off and frozen into a
/// [`bytes::Bytes`] without copying.
#[derive(Debug)]
pub struct BytesBuffer<'a> {
    buf: &'a mut BytesMut,
    size: usize,
    max_size: usize,
}

impl<'a> BytesBuffer<'a> {
    /// Wraps `buf` with no practical size bound.
    pub fn new(buf: &'a mut BytesMut) -> Self {
        Self::with_max_size(buf, UNBOUNDED)
    }

    /// Wraps `buf`, bounding its size to `max_size`.
    pub fn with_max_size(buf: &'a mut BytesMut, max_size: usize) -> Self {
        let size = buf.len();
        Self {
            buf,
            size,
            max_size: max_size.max(size),
        }
    }
}

impl DynamicBuffer for BytesBuffer<'_> {
    fn size(&self) -> usize {
        self.size
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    fn data(&self) -> ConstBuffer<'_> {
        ConstBuffer::new(&self.buf[..self.size])
    }

    fn prepare(&mut self, n: usize) -> Result<MutableBuffer<'_>, StreamError> {
        let end = check_prepare(self.size, n, self.max_size)?;
        self.buf.resize(end, 0);
        Ok(MutableBuffer::new(&mut self.buf[self.size..]))
    }

    fn commit(&mut self, n: usize) {
        self.size += n.min(self.buf.len() - self.size);
        self.buf.truncate(self.size);
    }

    fn consume(&mut self, n: usize) {
        let m = n.min(self.size);
        self.buf.advance(m);
        self.size -= m;
    }
}

impl Drop for BytesBuffer<'_> {
    fn drop(&mut self) {
        self.buf.truncate(self.size);
    }
}
