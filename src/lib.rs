//! spanio
//!
//! Zero-copy buffers and synchronous stream algorithms for Rust.
//!
//! `spanio` lets any byte source or sink (a file, a memory region, a vector,
//! a socket you already own) be driven through one set of borrowed buffer
//! views and one set of generic transfer algorithms, with precise control
//! over partial transfers, growable receive buffers and batching.
//!
//! The crate is made of:
//!
//! - buffer views and scatter/gather sequences with clamping arithmetic
//! - growable dynamic buffers with a prepare/commit/consume protocol
//! - stream capability traits checked at compile time
//! - completion-condition driven `read`, `write` and `read_until`
//! - read-ahead and write-behind adaptors
//!
//! The crate intentionally:
//! - does NOT do asynchronous I/O
//! - does NOT implement sockets
//! - does NOT encode or decode payloads
//! - does NOT lock anything unless asked to ([`Lockable`])
//!
//! # Reading records
//!
//! ```no_run
//! use std::fs::File;
//! use spanio::{
//!     BufferedReadStream, DynamicBuffer, OwnedBuffer, StdStream, StreamError, read_until,
//! };
//!
//! fn main() -> Result<(), StreamError> {
//!     let file = File::open("records.txt")?;
//!     let mut stream = BufferedReadStream::new(StdStream::new(file));
//!     let mut buf = OwnedBuffer::new();
//!
//!     let n = read_until(&mut stream, &mut buf, b'\n')?;
//!     println!("first record {} bytes", n);
//!     buf.consume(n);
//!     Ok(())
//! }
//! ```
//!
//! # Writing gathered buffers
//!
//! ```
//! use spanio::{BufferedWriteStream, VecStream, buffer, write};
//!
//! let mut out = VecStream::new();
//! {
//!     let mut stream = BufferedWriteStream::new(&mut out);
//!     write(&mut stream, &[buffer("key"), buffer("="), buffer("value\n")])?;
//!     stream.flush()?;
//! }
//! assert_eq!(out.get_ref(), b"key=value\n");
//! # Ok::<(), spanio::StreamError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod buffered;
mod config;
mod dynamic;
mod error;
mod lock;
mod reader;
mod stream;
mod streams;
mod transfer;

//
// Public surface
//

pub use buffer::{
    ConstBuffer, ConstBufferSequence, ConstWindow, MutableBuffer, MutableBufferSequence,
    MutableWindow, buffer, buffer_copy, buffer_copy_max, buffer_mut, buffer_size,
};
pub use buffered::{BufferedReadStream, BufferedStream, BufferedWriteStream};
pub use config::{DEFAULT_BUFFER_SIZE, MAX_SINGLE_TRANSFER, MIN_DYNAMIC_CHUNK, StreamConfig};
pub use dynamic::{
    BytesBuffer, DynamicBuffer, OwnedBuffer, UNBOUNDED, VecBuffer, dynamic_buffer,
    dynamic_buffer_with_max,
};
pub use error::StreamError;
pub use lock::{Lockable, LockedStream};
pub use reader::{ByteReader, Lines};
pub use stream::{
    Outcome, ReadStream, SeekMode, Seekable, SeekableReadStream, SeekableWriteStream,
    StreamPosition, WriteStream,
};
pub use streams::{MemoryStream, StdStream, VecStream};
pub use transfer::{
    CompletionCondition, Delimiter, TransferAll, TransferAtLeast, TransferExactly, copy,
    copy_outcome, read, read_all, read_all_outcome, read_dynamic, read_dynamic_outcome,
    read_dynamic_with, read_outcome, read_until, read_until_outcome, read_with, transfer_all,
    transfer_at_least, transfer_exactly, write, write_dynamic, write_dynamic_outcome,
    write_dynamic_with, write_outcome, write_with,
};
