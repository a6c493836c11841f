//! Buffered stream adaptors.
//!
//! - [`BufferedReadStream`] - read-ahead: one fill serves many small reads
//! - [`BufferedWriteStream`] - write-behind: many small writes become one flush
//! - [`BufferedStream`] - both, with the read side layered over the write side
//!
//! Each adaptor owns its wrapped stream and a fixed-capacity store taken from
//! a thread-local pool; moving the adaptor moves both.

mod read;
mod stream;
mod write;

pub use read::BufferedReadStream;
pub use stream::BufferedStream;
pub use write::BufferedWriteStream;
