//! Mutual exclusion for streams shared between threads.
//!
//! The transfer algorithms hold no locks of their own. To share one stream,
//! put it in a [`Lockable`] and run each composed operation against the
//! [`LockedStream`] handle; nothing else can touch the stream until the
//! handle is dropped.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//! use spanio::{Lockable, VecStream, buffer, write};
//!
//! let shared = Arc::new(Lockable::new(VecStream::new()));
//! let handles: Vec<_> = ["ab", "cd"]
//!     .into_iter()
//!     .map(|token| {
//!         let shared = Arc::clone(&shared);
//!         thread::spawn(move || write(&mut shared.lock(), &buffer(token)))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap()?;
//! }
//! assert_eq!(shared.lock().get_ref().len(), 4);
//! # Ok::<(), spanio::StreamError>(())
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use crate::buffer::{ConstBufferSequence, MutableBufferSequence};
use crate::stream::{Outcome, ReadStream, SeekMode, Seekable, StreamPosition, WriteStream};

/// A stream behind a mutex.
#[derive(Debug, Default)]
pub struct Lockable<S> {
    stream: Mutex<S>,
}

impl<S> Lockable<S> {
    /// Wraps `stream`.
    pub fn new(stream: S) -> Self {
        Self {
            stream: Mutex::new(stream),
        }
    }

    /// Blocks until the stream is free and returns an exclusive handle.
    ///
    /// A thread that panicked while holding the handle does not make the
    /// stream unusable; the handle is still returned.
    pub fn lock(&self) -> LockedStream<'_, S> {
        LockedStream {
            guard: self.stream.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Returns a handle if the stream is free right now.
    pub fn try_lock(&self) -> Option<LockedStream<'_, S>> {
        match self.stream.try_lock() {
            Ok(guard) => Some(LockedStream { guard }),
            Err(TryLockError::Poisoned(poisoned)) => Some(LockedStream {
                guard: poisoned.into_inner(),
            }),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Mutable access without locking, through exclusive ownership.
    pub fn get_mut(&mut self) -> &mut S {
        self.stream
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Unwraps the stream.
    pub fn into_inner(self) -> S {
        self.stream
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive access to a [`Lockable`]'s stream, released on drop.
#[derive(Debug)]
pub struct LockedStream<'a, S> {
    guard: MutexGuard<'a, S>,
}

impl<S> Deref for LockedStream<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.guard
    }
}

impl<S> DerefMut for LockedStream<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.guard
    }
}

impl<S: ReadStream> ReadStream for LockedStream<'_, S> {
    fn read_some_outcome<B>(&mut self, buffers: &mut B) -> Outcome<usize>
    where
        B: MutableBufferSequence + ?Sized,
    {
        self.guard.read_some_outcome(buffers)
    }
}

impl<S: WriteStream> WriteStream for LockedStream<'_, S> {
    fn write_some_outcome<B>(&mut self, buffers: &B) -> Outcome<usize>
    where
        B: ConstBufferSequence + ?Sized,
    {
        self.guard.write_some_outcome(buffers)
    }
}

impl<S: Seekable> Seekable for LockedStream<'_, S> {
    fn seek_outcome(&mut self, offset: i64, mode: SeekMode) -> Outcome<StreamPosition> {
        self.guard.seek_outcome(offset, mode)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::buffer::{buffer, buffer_mut};
    use crate::streams::VecStream;

    #[test]
    fn test_writers_never_interleave() {
        for _ in 0..50 {
            let shared = Arc::new(Lockable::new(VecStream::new()));
            let handles: Vec<_> = [b"11", b"22"]
                .into_iter()
                .map(|token| {
                    let shared = Arc::clone(&shared);
                    thread::spawn(move || {
                        let mut stream = shared.lock();
                        for byte in token.chunks(1) {
                            stream.write_some(&buffer(byte)).unwrap();
                            thread::yield_now();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let content = Arc::try_unwrap(shared).unwrap().into_inner().into_inner();
            assert!(
                content == b"1122" || content == b"2211",
                "interleaved output: {:?}",
                String::from_utf8_lossy(&content)
            );
        }
    }

    #[test]
    fn test_try_lock_while_held() {
        let shared = Lockable::new(VecStream::new());
        let held = shared.lock();
        assert!(shared.try_lock().is_none());
        drop(held);
        assert!(shared.try_lock().is_some());
    }

    #[test]
    fn test_recovers_from_poison() {
        let shared = Arc::new(Lockable::new(VecStream::from(b"ok".to_vec())));
        let poisoner = Arc::clone(&shared);
        let _ = thread::spawn(move || {
            let _held = poisoner.lock();
            panic!("poison the lock");
        })
        .join();

        let mut stream = shared.lock();
        let mut dest = [0u8; 2];
        assert_eq!(stream.read_some(&mut buffer_mut(&mut dest)).unwrap(), 2);
        assert_eq!(&dest, b"ok");
    }
}
