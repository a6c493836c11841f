//! Thread-local pool of adaptor storage allocations.
//!
//! Buffered adaptors are often created and dropped per request (one per
//! opened file, one per parsed record source). Their fixed-size stores are
//! recycled through this pool instead of going back to the allocator.

use std::cell::RefCell;

/// Allocations larger than this are released instead of pooled.
pub const MAX_POOLED_CAPACITY: usize = 128 * 1024;

/// Maximum number of allocations to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// Takes a zero-filled block of exactly `len` bytes, reusing a pooled
/// allocation when one is available.
pub(crate) fn take(len: usize) -> Vec<u8> {
    let reused = THREAD_BUFFER_POOL.with(|pool| {
        let mut pool = pool.borrow_mut();
        let slot = pool.iter().position(|v| v.capacity() >= len)?;
        Some(pool.swap_remove(slot))
    });

    let mut data = reused.unwrap_or_default();
    data.clear();
    data.resize(len, 0);
    data
}

/// Returns an allocation to the pool if it is small enough to keep.
pub(crate) fn give_back(mut data: Vec<u8>) {
    if data.capacity() == 0 || data.capacity() > MAX_POOLED_CAPACITY {
        return;
    }
    data.clear();
    THREAD_BUFFER_POOL.with(|pool| {
        let mut pool = pool.borrow_mut();
        if pool.len() < MAX_POOL_SIZE {
            pool.push(data);
        }
    });
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_is_zeroed() {
        let data = take(64);
        assert_eq!(data.len(), 64);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reuse() {
        // Put a dirty allocation back, then take one of the same size
        let mut data = take(32);
        data.fill(0xFF);
        give_back(data);

        let again = take(32);
        assert_eq!(again.len(), 32);
        assert!(again.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_oversized_not_pooled() {
        give_back(Vec::with_capacity(MAX_POOLED_CAPACITY + 1));
        THREAD_BUFFER_POOL.with(|pool| {
            assert!(
                pool.borrow()
                    .iter()
                    .all(|v| v.capacity() <= MAX_POOLED_CAPACITY)
            );
        });
    }
}
