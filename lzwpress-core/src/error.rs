//! Error types for bit-level I/O.
//!
//! Codec crates wrap these in their own error enums. The `Io` variant always
//! carries the sink's original `io::Error` untouched.

use std::io;
use thiserror::Error;

/// The error type for bit-level I/O operations.
#[derive(Debug, Error)]
pub enum PressError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bit width outside the supported range was requested.
    #[error("Invalid bit width: {width} (must be 1-{max})")]
    InvalidBitWidth {
        /// The requested width.
        width: u8,
        /// The largest supported width.
        max: u8,
    },

    /// The input ended in the middle of a value.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where the data ran out.
        position: u64,
    },
}

/// Result type alias for bit-level I/O operations.
pub type Result<T> = std::result::Result<T, PressError>;

impl PressError {
    /// Create an invalid bit width error.
    pub fn invalid_bit_width(width: u8, max: u8) -> Self {
        Self::InvalidBitWidth { width, max }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(position: u64) -> Self {
        Self::UnexpectedEof { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PressError::invalid_bit_width(17, 16);
        assert_eq!(err.to_string(), "Invalid bit width: 17 (must be 1-16)");

        let err = PressError::unexpected_eof(42);
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "sink closed");
        let err: PressError = io_err.into();
        assert!(matches!(err, PressError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
