//! Seek origins and stream positions.

use std::io::SeekFrom;
use std::ops::{Add, AddAssign, Sub};

use crate::error::StreamError;

/// Origin of a seek offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekMode {
    /// From the start of the stream.
    Start,
    /// From the current position.
    Current,
    /// From the end of the stream.
    End,
}

impl SeekMode {
    /// Converts to the standard library's seek origin.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidSeek`] for a negative offset from the start.
    pub fn to_seek_from(self, offset: i64) -> Result<SeekFrom, StreamError> {
        match self {
            SeekMode::Start => u64::try_from(offset)
                .map(SeekFrom::Start)
                .map_err(|_| StreamError::InvalidSeek { offset }),
            SeekMode::Current => Ok(SeekFrom::Current(offset)),
            SeekMode::End => Ok(SeekFrom::End(offset)),
        }
    }

    /// Resolves `offset` against `current` and `len` into an absolute position.
    ///
    /// The result must lie in `[0, len]`.
    pub(crate) fn resolve(self, offset: i64, current: u64, len: u64) -> Result<u64, StreamError> {
        let base = match self {
            SeekMode::Start => 0,
            SeekMode::Current => current,
            SeekMode::End => len,
        };
        let target = i128::from(base) + i128::from(offset);
        if (0..=i128::from(len)).contains(&target) {
            Ok(target as u64)
        } else {
            Err(StreamError::InvalidSeek {
                offset: i64::try_from(target).unwrap_or(i64::MAX),
            })
        }
    }
}

/// An absolute position in a stream, in bytes from the start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamPosition(u64);

impl StreamPosition {
    /// Creates a position `offset` bytes from the start.
    pub const fn new(offset: u64) -> Self {
        Self(offset)
    }

    /// Returns the distance from the start of the stream.
    pub const fn offset_from_start(self) -> u64 {
        self.0
    }
}

impl From<u64> for StreamPosition {
    fn from(offset: u64) -> Self {
        Self(offset)
    }
}

impl From<StreamPosition> for u64 {
    fn from(position: StreamPosition) -> Self {
        position.0
    }
}

impl Add<u64> for StreamPosition {
    type Output = StreamPosition;

    fn add(self, rhs: u64) -> StreamPosition {
        StreamPosition(self.0.saturating_add(rhs))
    }
}

impl AddAssign<u64> for StreamPosition {
    fn add_assign(&mut self, rhs: u64) {
        *self = *self + rhs;
    }
}

impl Sub<u64> for StreamPosition {
    type Output = StreamPosition;

    /// Saturates at the start of the stream.
    fn sub(self, rhs: u64) -> StreamPosition {
        StreamPosition(self.0.saturating_sub(rhs))
    }
}

impl Sub for StreamPosition {
    type Output = i64;

    /// Signed distance between two positions.
    fn sub(self, rhs: StreamPosition) -> i64 {
        let diff = i128::from(self.0) - i128::from(rhs.0);
        diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}
