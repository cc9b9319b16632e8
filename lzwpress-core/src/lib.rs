//! # lzwpress Core
//!
//! Core components for the lzwpress LZW codec.
//!
//! This crate provides the byte-level plumbing the codec sits on:
//!
//! - [`bitstream`]: Bit-level I/O for variable-width codes in either bit order
//! - [`framing`]: GIF data sub-block framing
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Codec (lzwpress-lzw)                                    │
//! │     string table, encoder, decoder                      │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitStream (this crate)                                  │
//! │     BitWriter/BitReader (MSB or LSB first)              │
//! ├─────────────────────────────────────────────────────────┤
//! │ Framing (this crate)                                    │
//! │     raw bytes or GIF sub-blocks                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lzwpress_core::{BitOrder, BitWriter, BlockWriter, Framing};
//!
//! let sink = BlockWriter::new(Vec::new(), Framing::SubBlocks);
//! let mut writer = BitWriter::new(sink, BitOrder::Lsb);
//! writer.write_bits(0x1FF, 9).unwrap();
//! writer.flush().unwrap();
//!
//! let framed = writer.into_inner().finish().unwrap();
//! assert_eq!(framed, vec![2, 0xFF, 0x01, 0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod framing;

// Re-exports for convenience
pub use bitstream::{BitOrder, BitReader, BitWriter};
pub use error::{PressError, Result};
pub use framing::{BlockReader, BlockWriter, Framing};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitOrder, BitReader, BitWriter};
    pub use crate::error::{PressError, Result};
    pub use crate::framing::{BlockReader, BlockWriter, Framing};
}
