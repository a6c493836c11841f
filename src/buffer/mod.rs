//! Buffer model: non-owning spans, buffer sequences and the algorithms over them.
//!
//! - [`ConstBuffer`] / [`MutableBuffer`] - borrowed byte spans with clamping arithmetic
//! - [`ConstBufferSequence`] / [`MutableBufferSequence`] - scatter/gather sequences
//! - [`buffer_size`], [`buffer_copy`], [`buffer_copy_max`] - sequence algorithms
//!
//! The pooled storage used by the buffered adaptors is
//! an implementation detail and not part of the public API.

mod pool;
mod sequence;
mod span;
pub(crate) mod storage;

pub use sequence::{
    ConstBufferSequence, ConstWindow, MutableBufferSequence, MutableWindow, buffer_copy,
    buffer_copy_max, buffer_size,
};
pub use span::{ConstBuffer, MutableBuffer, buffer, buffer_mut};
