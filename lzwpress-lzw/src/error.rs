//! LZW-specific error types.

use lzwpress_core::PressError;
use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Code size outside the supported range.
    #[error("Invalid code size: {0} (must be 1-8)")]
    InvalidCodeSize(u8),

    /// Invalid LZW code encountered.
    #[error("Invalid LZW code {code} at bit position {position}")]
    InvalidCode {
        /// The offending code.
        code: u16,
        /// Bit position just after the code.
        position: u64,
    },

    /// Input byte that has no literal code at the configured code size.
    #[error("Symbol {symbol} does not fit a {code_size}-bit code size")]
    SymbolOutOfRange {
        /// The input byte.
        symbol: u8,
        /// The configured code size.
        code_size: u8,
    },

    /// `offset`/`length` do not describe a range of the buffer.
    #[error("Range {offset}+{length} is outside a buffer of {len} bytes")]
    InvalidRange {
        /// Requested start.
        offset: usize,
        /// Requested length.
        length: usize,
        /// Buffer length.
        len: usize,
    },

    /// The encoder was used after `finish`.
    #[error("Encoder already finished")]
    Finished,

    /// An earlier write to the sink failed, so the stream is incomplete.
    #[error("Encoder unusable after a failed write")]
    Poisoned,

    /// Decoded output grew past the configured limit.
    #[error("Decoded output exceeds limit of {limit} bytes")]
    OutputLimit {
        /// The configured limit.
        limit: usize,
    },

    /// Unexpected end of data.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where EOF occurred.
        position: u64,
    },

    /// Invalid bit width requested from the bit stream.
    #[error("Invalid bit width: {0}")]
    InvalidBitWidth(u8),

    /// I/O error from the sink or source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PressError> for LzwError {
    fn from(err: PressError) -> Self {
        match err {
            PressError::Io(e) => Self::Io(e),
            PressError::InvalidBitWidth { width, .. } => Self::InvalidBitWidth(width),
            PressError::UnexpectedEof { position } => Self::UnexpectedEof { position },
        }
    }
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
