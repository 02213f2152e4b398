//! Error types for splitrs.
//!
//! This module defines the error type used throughout the crate.
//!
//! - [`SplitError`] - Represents all possible errors during splitting and
//!   tree construction

use std::fmt;

/// Errors that can occur while splitting a stream or building a tree.
///
/// # Variants
///
/// - [`SplitError::Io`] - The byte source returned an error
/// - [`SplitError::Cancelled`] - The caller cancelled the split
/// - [`SplitError::Transform`] - A tree transform hook failed
/// - [`SplitError::NotFound`] - A seek position lies outside the tree
/// - [`SplitError::InvalidConfig`] - Invalid configuration parameter
///
/// # Example
///
/// ```
/// use splitrs::SplitError;
///
/// fn handle_error(err: SplitError) {
///     match err {
///         SplitError::Io(io_err) => eprintln!("read failed: {}", io_err),
///         SplitError::Cancelled => eprintln!("cancelled"),
///         SplitError::NotFound { pos } => eprintln!("no chunk at {}", pos),
///         _ => eprintln!("other error"),
///     }
/// }
/// ```
#[derive(Debug)]
pub enum SplitError {
    /// The byte source returned an error while reading input data.
    ///
    /// Any chunk buffered at the time of the error is discarded; the chunks
    /// already emitted are valid bytes of the original stream in order.
    Io(std::io::Error),

    /// The caller requested cancellation via a [`CancelToken`].
    ///
    /// The splitter stops at the next byte boundary and discards any
    /// partially accumulated chunk.
    ///
    /// [`CancelToken`]: crate::CancelToken
    Cancelled,

    /// The tree builder's transform hook returned an error.
    ///
    /// The builder becomes unusable; every later call fails with this
    /// variant.
    Transform(Box<dyn std::error::Error + Send + Sync>),

    /// A seek position lies outside the range covered by the tree.
    NotFound {
        /// The requested byte position.
        pos: u64,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::Io(e) => write!(f, "io error: {}", e),
            SplitError::Cancelled => write!(f, "split cancelled"),
            SplitError::Transform(e) => write!(f, "transform failed: {}", e),
            SplitError::NotFound { pos } => {
                write!(f, "position {} not covered by tree", pos)
            }
            SplitError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for SplitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SplitError::Io(e) => Some(e),
            SplitError::Transform(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SplitError {
    fn from(e: std::io::Error) -> Self {
        SplitError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: SplitError = io_err.into();
        assert!(matches!(err, SplitError::Io(_)));
    }

    #[test]
    fn test_display() {
        let err = SplitError::NotFound { pos: 42 };
        assert!(err.to_string().contains("position 42"));

        let err = SplitError::Cancelled;
        assert!(err.to_string().contains("cancelled"));
    }

    #[test]
    fn test_transform_source() {
        use std::error::Error;

        let inner: Box<dyn Error + Send + Sync> = "store unreachable".into();
        let err = SplitError::Transform(inner);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("store unreachable"));
    }
}
