//! Error types for feeds, splitters and scanners.
//!
//! ## Error Categories
//!
//! - **Emptiness violations**: asking an exhausted [`Feed`](crate::Feed) for its head or tail
//! - **Argument errors**: delimiters and splitters reject bad arguments when they are
//!   built, not when they are first forced
//! - **I/O errors**: failures of the character source underneath a [`Scanner`](crate::Scanner),
//!   tagged with the scan operation that hit them
//!
//! Laziness means an emptiness violation can only be reported when a position is forced.
//! Building a combinator chain over an empty feed always succeeds.
//!
//! ## Examples
//!
//! ```rust
//! use feedkit::{Feed, Error};
//!
//! let feed: Feed<i32> = Feed::empty();
//! let err = feed.head().unwrap_err();
//! assert!(matches!(err, Error::EmptyFeed { .. }));
//! assert!(err.to_string().contains("head"));
//! ```

use std::io;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// `head` or `tail` was requested from an exhausted feed
    #[error("Empty feed: cannot take {operation} of an exhausted feed")]
    EmptyFeed { operation: &'static str },

    /// A delimiter or splitter was built with an unusable argument
    #[error("Invalid argument to {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// The character source under a scanner failed
    #[error("IO error during {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    /// The scanner was used after `close`
    #[error("Scanner closed: cannot {operation}")]
    ScannerClosed { operation: &'static str },

    /// A delimiter pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Creates an emptiness violation for the named feed accessor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use feedkit::Error;
    ///
    /// let err = Error::empty_feed("tail");
    /// assert!(err.to_string().contains("tail"));
    /// ```
    pub fn empty_feed(operation: &'static str) -> Self {
        Error::EmptyFeed { operation }
    }

    /// Creates an argument error for the named operation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use feedkit::Error;
    ///
    /// let err = Error::invalid_argument("group", "batch size must be positive");
    /// assert!(err.to_string().contains("group"));
    /// ```
    pub fn invalid_argument<T: Into<String>>(operation: &'static str, reason: T) -> Self {
        Error::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// Wraps an I/O failure raised while performing `operation`.
    pub fn io(operation: &'static str, source: io::Error) -> Self {
        Error::Io { operation, source }
    }

    pub fn scanner_closed(operation: &'static str) -> Self {
        Error::ScannerClosed { operation }
    }

    /// Returns true if this error came from the underlying character source.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_keeps_cause() {
        let err = Error::io("scan_char", io::Error::new(io::ErrorKind::Other, "disk gone"));
        assert!(err.is_io());
        assert!(err.to_string().contains("scan_char"));
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk gone".to_string()));
    }

    #[test]
    fn test_pattern_error_converts() {
        let err: Error = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn test_closed_message() {
        let err = Error::scanner_closed("is_eof");
        assert_eq!(err.to_string(), "Scanner closed: cannot is_eof");
    }
}
