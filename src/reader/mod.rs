//! Iterators over read streams.
//!
//! - [`ByteReader`] - yields a stream one byte at a time
//! - [`Lines`] - yields delimiter-separated records
//!
//! Both issue short reads against the stream they own. Wrap an unbuffered
//! stream in a [`BufferedReadStream`](crate::BufferedReadStream) first when
//! reading byte by byte.
//!
//! # Example
//!
//! ```
//! use spanio::{Lines, MemoryStream};
//!
//! let lines = Lines::new(MemoryStream::new(b"alpha\nbeta\ngamma"), b'\n');
//! let lines: Vec<_> = lines.collect::<Result<_, _>>()?;
//! assert_eq!(lines, ["alpha", "beta", "gamma"].map(|s| s.as_bytes()));
//! # Ok::<(), spanio::StreamError>(())
//! ```

mod byte;
mod lines;

pub use byte::ByteReader;
pub use lines::Lines;
