//! Transfer algorithms.
//!
//! Composed operations built from a stream's short reads and writes:
//!
//! - [`read`] / [`read_dynamic`] - loop short reads into a fixed sequence or a
//!   dynamic buffer until a [`CompletionCondition`] is satisfied
//! - [`read_all`] - read until end of stream, treating end of stream as success
//! - [`write`] / [`write_dynamic`] - the symmetric loops for short writes
//! - [`read_until`] - grow a dynamic buffer until it contains a [`Delimiter`]
//! - [`copy`] - pump one stream into another
//!
//! Each algorithm has an `*_outcome` form returning an
//! [`Outcome`](crate::Outcome) with the bytes moved next to the error that
//! stopped it, and `Result` forms wrapping it.
//!
//! Every error ends a transfer. A zero-byte short read on a non-empty request
//! is reported as [`StreamError::Eof`](crate::StreamError::Eof) and a
//! zero-byte short write as an `Io` error of kind `WriteZero`, so no loop
//! can spin on a stream that makes no progress.

mod copy;
mod read;
mod until;
mod write;

pub use copy::{copy, copy_outcome};
pub use read::{
    read, read_all, read_all_outcome, read_dynamic, read_dynamic_outcome, read_dynamic_with,
    read_outcome, read_with,
};
pub use until::{Delimiter, read_until, read_until_outcome};
pub use write::{
    write, write_dynamic, write_dynamic_outcome, write_dynamic_with, write_outcome, write_with,
};

use crate::config::MAX_SINGLE_TRANSFER;

/// Decides how many more bytes a transfer loop should attempt.
///
/// Called before every short operation with the bytes transferred so far;
/// returning 0 ends the transfer.
pub trait CompletionCondition {
    /// Returns the size of the next short operation, or 0 to stop.
    fn next(&mut self, transferred: usize) -> usize;
}

impl<F: FnMut(usize) -> usize> CompletionCondition for F {
    fn next(&mut self, transferred: usize) -> usize {
        self(transferred)
    }
}

/// Transfers until the target is exhausted or an error occurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferAll;

impl CompletionCondition for TransferAll {
    fn next(&mut self, _transferred: usize) -> usize {
        MAX_SINGLE_TRANSFER
    }
}

/// Transfers until at least `n` bytes have moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferAtLeast(pub usize);

impl CompletionCondition for TransferAtLeast {
    fn next(&mut self, transferred: usize) -> usize {
        if transferred >= self.0 {
            0
        } else {
            MAX_SINGLE_TRANSFER
        }
    }
}

/// Transfers exactly `n` bytes, never asking for more than remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferExactly(pub usize);

impl CompletionCondition for TransferExactly {
    fn next(&mut self, transferred: usize) -> usize {
        self.0.saturating_sub(transferred).min(MAX_SINGLE_TRANSFER)
    }
}

/// Shorthand for [`TransferAll`].
pub fn transfer_all() -> TransferAll {
    TransferAll
}

/// Shorthand for [`TransferAtLeast`].
pub fn transfer_at_least(n: usize) -> TransferAtLeast {
    TransferAtLeast(n)
}

/// Shorthand for [`TransferExactly`].
pub fn transfer_exactly(n: usize) -> TransferExactly {
    TransferExactly(n)
}
