//! Growable buffers with a prepare/commit/consume protocol.
//!
//! A [`DynamicBuffer`] exposes three regions of its backing store:
//!
//! ```text
//! | consumed (gone) | committed: data() | prepared: prepare(n) |
//!                   |<----- size() ---->|
//! ```
//!
//! Bytes become readable only through `commit`, and leave only through
//! `consume`. The size never exceeds `max_size()`; a `prepare` that would
//! break this fails with [`StreamError::LengthExceeded`] and changes nothing.
//!
//! Implementations:
//!
//! - [`VecBuffer`] - borrows a caller's `Vec<u8>`, erases from the front on consume
//! - [`BytesBuffer`] - borrows a caller's [`bytes::BytesMut`], advances on consume
//! - [`OwnedBuffer`] - owns its store, slides a `[start, end)` window and only
//!   compacts when a `prepare` would otherwise need to grow

mod bytes_mut;
mod owned;
mod vec;

pub use bytes_mut::BytesBuffer;
pub use owned::OwnedBuffer;
pub use vec::{VecBuffer, dynamic_buffer, dynamic_buffer_with_max};

use crate::buffer::{ConstBuffer, MutableBuffer};
use crate::error::StreamError;

/// Largest size a buffer may grow to when no explicit bound is given.
pub const UNBOUNDED: usize = isize::MAX as usize;

/// A growable read/write buffer over a backing store.
pub trait DynamicBuffer {
    /// Number of committed, readable bytes.
    fn size(&self) -> usize;

    /// Upper bound on `size()`.
    fn max_size(&self) -> usize;

    /// Bytes the backing store can hold without reallocating.
    fn capacity(&self) -> usize;

    /// The committed bytes.
    fn data(&self) -> ConstBuffer<'_>;

    /// Reserves exactly `n` writable bytes after the committed region.
    ///
    /// Replaces any previously prepared, uncommitted region.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::LengthExceeded`] if `size() + n > max_size()`.
    fn prepare(&mut self, n: usize) -> Result<MutableBuffer<'_>, StreamError>;

    /// Moves `min(n, prepared)` bytes from the prepared region into the committed region.
    fn commit(&mut self, n: usize);

    /// Removes `min(n, size())` bytes from the front of the committed region.
    fn consume(&mut self, n: usize);

    /// Bytes that can still be committed before reaching `max_size()`.
    fn headroom(&self) -> usize {
        self.max_size() - self.size()
    }
}

impl<B: DynamicBuffer + ?Sized> DynamicBuffer for &mut B {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn max_size(&self) -> usize {
        (**self).max_size()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn data(&self) -> ConstBuffer<'_> {
        (**self).data()
    }

    fn prepare(&mut self, n: usize) -> Result<MutableBuffer<'_>, StreamError> {
        (**self).prepare(n)
    }

    fn commit(&mut self, n: usize) {
        (**self).commit(n)
    }

    fn consume(&mut self, n: usize) {
        (**self).consume(n)
    }
}

/// Checks `size + n` against `max`, producing the error `prepare` reports.
pub(crate) fn check_prepare(size: usize, n: usize, max: usize) -> Result<usize, StreamError> {
    match size.checked_add(n) {
        Some(requested) if requested <= max => Ok(requested),
        requested => Err(StreamError::LengthExceeded {
            requested: requested.unwrap_or(usize::MAX),
            max,
        }),
    }
}
