//! Configuration for buffered adaptors and dynamic reads.
//!
//! - [`StreamConfig`] - Controls adaptor store capacities and the growth bound
//!   of dynamic buffers created on a caller's behalf
//!
//! # Example
//!
//! ```
//! use spanio::StreamConfig;
//!
//! // Custom capacities
//! let config = StreamConfig::new(4096, 8192)?;
//!
//! // Bound line buffers
//! let config = StreamConfig::default().with_max_dynamic_size(64 * 1024);
//!
//! # Ok::<(), spanio::StreamError>(())
//! ```

use crate::error::StreamError;

/// Default store capacity of the buffered adaptors (1 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Largest chunk a completion condition asks for in one short operation (64 KiB).
pub const MAX_SINGLE_TRANSFER: usize = 64 * 1024;

/// First `prepare` size of a dynamic read when the buffer has no spare capacity.
pub const MIN_DYNAMIC_CHUNK: usize = 512;

/// Configuration for buffered streams.
///
/// `StreamConfig` controls:
///
/// - Read-ahead store capacity (`read_capacity`) - Bytes fetched per fill
/// - Write-behind store capacity (`write_capacity`) - Bytes batched per flush
/// - Dynamic buffer bound (`max_dynamic_size`) - Largest record a
///   line reader will accumulate before giving up with `NotFound`
///
/// # Constraints
///
/// - Both capacities must be non-zero
/// - `max_dynamic_size >= read_capacity`
///
/// # Example
///
/// ```
/// use spanio::StreamConfig;
///
/// let config = StreamConfig::default()
///     .with_read_capacity(8192)
///     .with_write_capacity(16384);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamConfig {
    /// Read-ahead store capacity in bytes.
    read_capacity: usize,

    /// Write-behind store capacity in bytes.
    write_capacity: usize,

    /// Upper bound for dynamic buffers.
    max_dynamic_size: usize,
}

impl StreamConfig {
    /// Creates a configuration with the given store capacities.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidConfig`] if either capacity is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use spanio::StreamConfig;
    ///
    /// let config = StreamConfig::new(20, 64)?;
    /// assert_eq!(config.read_capacity(), 20);
    /// # Ok::<(), spanio::StreamError>(())
    /// ```
    pub fn new(read_capacity: usize, write_capacity: usize) -> Result<Self, StreamError> {
        let config = Self {
            read_capacity,
            write_capacity,
            max_dynamic_size: usize::MAX,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the read-ahead store capacity.
    ///
    /// Note: This does not validate the configuration. Use [`StreamConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_read_capacity(mut self, capacity: usize) -> Self {
        self.read_capacity = capacity;
        self
    }

    /// Sets the write-behind store capacity.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_write_capacity(mut self, capacity: usize) -> Self {
        self.write_capacity = capacity;
        self
    }

    /// Sets the dynamic buffer bound.
    ///
    /// Note: This does not validate the configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use spanio::StreamConfig;
    ///
    /// let config = StreamConfig::default().with_max_dynamic_size(100);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn with_max_dynamic_size(mut self, size: usize) -> Self {
        self.max_dynamic_size = size;
        self
    }

    /// Returns the read-ahead store capacity.
    pub fn read_capacity(&self) -> usize {
        self.read_capacity
    }

    /// Returns the write-behind store capacity.
    pub fn write_capacity(&self) -> usize {
        self.write_capacity
    }

    /// Returns the dynamic buffer bound.
    pub fn max_dynamic_size(&self) -> usize {
        self.max_dynamic_size
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), StreamError> {
        if self.read_capacity == 0 || self.write_capacity == 0 {
            return Err(StreamError::InvalidConfig {
                message: "buffer capacities must be non-zero",
            });
        }

        if self.max_dynamic_size < self.read_capacity {
            return Err(StreamError::InvalidConfig {
                message: "max_dynamic_size cannot be smaller than read_capacity",
            });
        }

        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            read_capacity: DEFAULT_BUFFER_SIZE,
            write_capacity: DEFAULT_BUFFER_SIZE,
            max_dynamic_size: usize::MAX,
        }
    }
}
