//! Concrete streams.
//!
//! - [`MemoryStream`] - read and seek over borrowed bytes
//! - [`VecStream`] - read, write and seek over an owned vector
//! - [`StdStream`] - any `std::io` reader, writer or seeker

mod memory;
mod std_io;
mod vec;

pub use memory::MemoryStream;
pub use std_io::StdStream;
pub use vec::VecStream;
