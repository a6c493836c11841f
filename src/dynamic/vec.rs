//! Dynamic buffer over a borrowed `Vec<u8>`.

use super::{DynamicBuffer, UNBOUNDED, check_prepare};
use crate::buffer::{ConstBuffer, MutableBuffer};
use crate::error::StreamError;

/// A [`DynamicBuffer`] writing into a caller-owned vector.
///
/// Existing vector contents start out committed. Consuming erases from the
/// front of the vector, so the vector always holds exactly the unconsumed
/// bytes once the buffer is dropped.
///
/// # Example
///
/// ```
/// use spanio::{DynamicBuffer, dynamic_buffer};
///
/// let mut vec = b"head".to_vec();
/// {
///     let mut buf = dynamic_buffer(&mut vec);
///     buf.prepare(4)?.copy_from_slice(b"tail");
///     buf.commit(4);
///     buf.consume(2);
///     assert_eq!(buf.data().as_slice(), b"adtail");
/// }
/// assert_eq!(vec, b"adtail");
/// # Ok::<(), spanio::StreamError>(())
/// ```
#[derive(Debug)]
pub struct VecBuffer<'a> {
    vec: &'a mut Vec<u8>,
    size: usize,
    max_size: usize,
}

impl<'a> VecBuffer<'a> {
    /// Wraps `vec` with no practical size bound.
    pub fn new(vec: &'a mut Vec<u8>) -> Self {
        Self::with_max_size(vec, UNBOUNDED)
    }

    /// Wraps `vec`, bounding its size to `max_size`.
    ///
    /// If `vec` already holds more than `max_size` bytes the bound is raised
    /// to its length so the buffer starts out valid.
    pub fn with_max_size(vec: &'a mut Vec<u8>, max_size: usize) -> Self {
        let size = vec.len();
        Self {
            vec,
            size,
            max_size: max_size.max(size),
        }
    }
}

/// Creates an unbounded [`VecBuffer`] over `vec`.
pub fn dynamic_buffer(vec: &mut Vec<u8>) -> VecBuffer<'_> {
    VecBuffer::new(vec)
}

/// Creates a [`VecBuffer`] over `vec` bounded to `max_size` bytes.
pub fn dynamic_buffer_with_max(vec: &mut Vec<u8>, max_size: usize) -> VecBuffer<'_> {
    VecBuffer::with_max_size(vec, max_size)
}

impl DynamicBuffer for VecBuffer<'_> {
    fn size(&self) -> usize {
        self.size
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn capacity(&self) -> usize {
        self.vec.capacity()
    }

    fn data(&self) -> ConstBuffer<'_> {
        ConstBuffer::new(&self.vec[..self.size])
    }

    fn prepare(&mut self, n: usize) -> Result<MutableBuffer<'_>, StreamError> {
        let end = check_prepare(self.size, n, self.max_size)?;
        self.vec.resize(end, 0);
        Ok(MutableBuffer::new(&mut self.vec[self.size..]))
    }

    fn commit(&mut self, n: usize) {
        self.size += n.min(self.vec.len() - self.size);
        self.vec.truncate(self.size);
    }

    fn consume(&mut self, n: usize) {
        let m = n.min(self.size);
        self.vec.drain(..m);
        self.size -= m;
    }
}

impl Drop for VecBuffer<'_> {
    fn drop(&mut self) {
        // Prepared but uncommitted bytes never reach the caller
        self.vec.truncate(self.size);
    }
}
