//! Error types for spanio.

use std::fmt;
use std::io;

/// Errors reported by short operations, transfer algorithms and adaptors.
#[derive(Debug)]
pub enum StreamError {
    /// The stream has no more bytes to produce.
    Eof,

    /// `read_until` filled its buffer to `max_size()` without finding the delimiter.
    NotFound,

    /// A dynamic buffer was asked to grow beyond its `max_size()`.
    LengthExceeded {
        /// The size the buffer would have reached.
        requested: usize,
        /// The maximum allowed size.
        max: usize,
    },

    /// A seek would have moved the position before the start or past the end.
    InvalidSeek {
        /// The resulting position that was rejected.
        offset: i64,
    },

    /// An error passed through from the underlying stream.
    Io(io::Error),

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl StreamError {
    /// Returns true if this is the end-of-stream condition.
    pub fn is_eof(&self) -> bool {
        matches!(self, StreamError::Eof)
    }

    /// Returns true if `read_until` gave up without finding its delimiter.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StreamError::NotFound)
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Eof => write!(f, "end of stream"),
            StreamError::NotFound => write!(f, "delimiter not found"),
            StreamError::LengthExceeded { requested, max } => {
                write!(f, "length exceeded: {} bytes (max {})", requested, max)
            }
            StreamError::InvalidSeek { offset } => {
                write!(f, "invalid seek to offset {}", offset)
            }
            StreamError::Io(e) => write!(f, "io error: {}", e),
            StreamError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(e: io::Error) -> Self {
        StreamError::Io(e)
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(e) => e,
            StreamError::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            StreamError::NotFound => io::Error::new(io::ErrorKind::NotFound, e),
            StreamError::LengthExceeded { .. } => io::Error::new(io::ErrorKind::OutOfMemory, e),
            StreamError::InvalidSeek { .. } | StreamError::InvalidConfig { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "test");
        let err: StreamError = io_err.into();
        assert!(matches!(err, StreamError::Io(_)));
    }

    #[test]
    fn test_display() {
        let err = StreamError::LengthExceeded {
            requested: 100,
            max: 50,
        };
        assert!(err.to_string().contains("length exceeded"));
        assert_eq!(StreamError::Eof.to_string(), "end of stream");
    }

    #[test]
    fn test_into_io_error_kinds() {
        let eof: io::Error = StreamError::Eof.into();
        assert_eq!(eof.kind(), io::ErrorKind::UnexpectedEof);

        let seek: io::Error = StreamError::InvalidSeek { offset: -1 }.into();
        assert_eq!(seek.kind(), io::ErrorKind::InvalidInput);

        let passthrough: io::Error =
            StreamError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")).into();
        assert_eq!(passthrough.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_predicates() {
        assert!(StreamError::Eof.is_eof());
        assert!(!StreamError::NotFound.is_eof());
        assert!(StreamError::NotFound.is_not_found());
    }
}
