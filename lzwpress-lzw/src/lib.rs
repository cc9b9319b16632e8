//! # lzwpress-lzw: Streaming LZW Compression
//!
//! This crate provides LZW (Lempel-Ziv-Welch) compression and decompression
//! for the TIFF and GIF flavours of the format, as found in TIFF strips, GIF
//! raster data and PDF `LZWDecode` streams.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Streaming**: feed input in chunks of any size, output goes straight
//!   to any `Write` sink
//! - **TIFF LZW**: MSB-first bit order, early code change
//! - **GIF LZW**: LSB-first bit order, any code size from 1 to 8, optional
//!   data sub-block framing
//!
//! ## Stream Layout
//!
//! - `CLEAR` (`1 << code_size`) at `code_size + 1` bits opens the stream
//! - literal and string codes follow, widening up to 12 bits
//! - whenever the table fills at 12 bits, `CLEAR` is written and the table
//!   starts over
//! - `END_OF_INFORMATION` (`CLEAR + 1`) closes the stream, followed by zero
//!   bits up to the next byte boundary
//!
//! ## Example
//!
//! ```rust
//! use lzwpress_lzw::{compress_tiff, decompress_tiff};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = compress_tiff(original).unwrap();
//! let decompressed = decompress_tiff(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use lzwpress_lzw::{LzwConfig, LzwDecoder, LzwEncoder};
//!
//! let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::gif(4)).unwrap();
//! for row in [[1u8, 2, 3, 4], [1, 2, 3, 4], [5, 5, 5, 5]] {
//!     encoder.compress(&row).unwrap();
//! }
//! encoder.finish().unwrap();
//! let compressed = encoder.into_inner();
//!
//! let mut decoder = LzwDecoder::new(LzwConfig::gif(4)).unwrap();
//! assert_eq!(
//!     decoder.decode(&compressed).unwrap(),
//!     vec![1, 2, 3, 4, 1, 2, 3, 4, 5, 5, 5, 5]
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod encoder;
mod error;
mod table;
mod width;

pub use config::LzwConfig;
pub use decoder::{LzwDecoder, TraceEvent};
pub use encoder::{EncoderState, LzwEncoder};
pub use error::{LzwError, Result};
pub use lzwpress_core::{BitOrder, Framing};
pub use table::{Insertion, Lookup, StringTable};

/// An LZW code point.
pub type Code = u16;

/// Widest code in any stream.
pub const MAX_BITS: u8 = 12;

/// Number of codes available at the widest code size.
pub const MAX_ENTRIES: usize = 1 << MAX_BITS;

/// Compress data with LZW using the given configuration.
///
/// # Example
///
/// ```rust
/// use lzwpress_lzw::{compress, LzwConfig};
///
/// let data = b"TOBEORNOTTOBEORTOBEORNOT";
/// let compressed = compress(data, LzwConfig::TIFF).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(Vec::new(), config)?;
    encoder.compress(data)?;
    encoder.finish()?;
    Ok(encoder.into_inner())
}

/// Decompress a complete LZW stream with the given configuration.
///
/// # Example
///
/// ```rust
/// use lzwpress_lzw::{compress, decompress, LzwConfig};
///
/// let original = b"Hello, World!";
/// let compressed = compress(original, LzwConfig::GIF).unwrap();
/// let decompressed = decompress(&compressed, LzwConfig::GIF).unwrap();
/// assert_eq!(decompressed, original);
/// ```
pub fn decompress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    LzwDecoder::new(config)?.decode(data)
}

/// Compress data with TIFF LZW (convenience function).
///
/// This is equivalent to `compress(data, LzwConfig::TIFF)`.
pub fn compress_tiff(data: &[u8]) -> Result<Vec<u8>> {
    compress(data, LzwConfig::TIFF)
}

/// Decompress TIFF LZW data (convenience function).
///
/// This is equivalent to `decompress(data, LzwConfig::TIFF)`.
pub fn decompress_tiff(data: &[u8]) -> Result<Vec<u8>> {
    decompress(data, LzwConfig::TIFF)
}

/// Compress palette indices with GIF LZW at the given minimum code size.
pub fn compress_gif(data: &[u8], code_size: u8) -> Result<Vec<u8>> {
    compress(data, LzwConfig::gif(code_size))
}

/// Decompress GIF LZW data at the given minimum code size.
pub fn decompress_gif(data: &[u8], code_size: u8) -> Result<Vec<u8>> {
    decompress(data, LzwConfig::gif(code_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_tiff() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let compressed = compress_tiff(original).unwrap();
        let decompressed = decompress_tiff(&compressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_310_byte_no_truncation() {
        let original = b"This is a test of compression! ".repeat(10);
        assert_eq!(original.len(), 310);

        let compressed = compress_tiff(&original).unwrap();
        let decompressed = decompress_tiff(&compressed).unwrap();

        assert_eq!(decompressed.len(), 310);
        assert_eq!(decompressed, &original[..]);
    }

    #[test]
    fn test_empty_input() {
        for config in [LzwConfig::TIFF, LzwConfig::GIF] {
            let compressed = compress(b"", config).unwrap();
            assert!(decompress(&compressed, config).unwrap().is_empty());
        }
    }

    #[test]
    fn test_single_byte() {
        let original = b"A";
        let compressed = compress_gif(original, 8).unwrap();
        assert_eq!(decompress_gif(&compressed, 8).unwrap(), original);
    }

    #[test]
    fn test_all_byte_values() {
        let original: Vec<u8> = (0..=255).collect();
        let compressed = compress_tiff(&original).unwrap();
        assert_eq!(decompress_tiff(&compressed).unwrap(), original);
    }

    #[test]
    fn test_large_input() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
        for config in [LzwConfig::TIFF, LzwConfig::GIF] {
            let compressed = compress(&original, config).unwrap();
            assert_eq!(decompress(&compressed, config).unwrap(), original);
        }
    }

    #[test]
    fn test_invalid_code_size() {
        assert!(matches!(
            compress_gif(b"x", 0),
            Err(LzwError::InvalidCodeSize(0))
        ));
        assert!(matches!(
            decompress_gif(&[], 9),
            Err(LzwError::InvalidCodeSize(9))
        ));
    }
}
