//! Error types for the IRC protocol library.
//!
//! [`ParseError`] covers a single malformed line and is always recoverable:
//! the caller logs it and moves on. [`ProtocolError`] covers the codec layer.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors encountered when parsing a single IRC line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Nothing left after trimming trailing control characters.
    #[error("empty line")]
    EmptyLine,

    /// A `:` prefix with no command after it, or an empty prefix.
    #[error("malformed prefix: {0:?}")]
    MalformedPrefix(String),

    /// No command token before the trailing parameter.
    #[error("missing command")]
    MissingCommand,
}

impl ParseError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLine => "empty_line",
            Self::MalformedPrefix(_) => "malformed_prefix",
            Self::MissingCommand => "missing_command",
        }
    }
}

/// Codec-level errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 bytes in a line.
    #[error("invalid UTF-8 in line at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// The raw line as bytes.
        raw_line: Vec<u8>,
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
        /// Detailed error message from the UTF-8 decoder.
        details: String,
    },

    /// Line exceeded the maximum allowed length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual line length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}

impl ProtocolError {
    /// Whether the stream is still usable after this error.
    ///
    /// Over-long and badly encoded lines have already been consumed from the
    /// buffer, so reading can continue with the next line.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidUtf8 { .. } | Self::MessageTooLong { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::MessageTooLong {
            actual: 9000,
            limit: 8191,
        };
        assert_eq!(format!("{}", err), "line too long: 9000 bytes (limit: 8191)");

        assert_eq!(ParseError::EmptyLine.to_string(), "empty line");
        assert_eq!(
            ParseError::MalformedPrefix(":server".into()).to_string(),
            "malformed prefix: \":server\""
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ParseError::EmptyLine.error_code(), "empty_line");
        assert_eq!(ParseError::MissingCommand.error_code(), "missing_command");
    }

    #[test]
    fn test_recoverable() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let protocol_err: ProtocolError = io_err.into();
        assert!(!protocol_err.is_recoverable());

        let too_long = ProtocolError::MessageTooLong {
            actual: 10,
            limit: 5,
        };
        assert!(too_long.is_recoverable());
    }
}
