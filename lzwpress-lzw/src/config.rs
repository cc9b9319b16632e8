//! LZW configuration for different formats (TIFF, GIF).

use crate::Code;
use crate::error::{LzwError, Result};
use lzwpress_core::{BitOrder, Framing};

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Bits per literal symbol (1-8). 8 for byte streams, smaller for
    /// palette indices.
    pub code_size: u8,
    /// TIFF variant: MSB-first bit order and the width grows one code
    /// earlier. GIF otherwise.
    pub tiff: bool,
    /// Byte framing of the compressed stream.
    pub framing: Framing,
}

impl LzwConfig {
    /// Standard TIFF LZW configuration.
    ///
    /// - MSB-first bit order
    /// - 8-bit symbols, 9-12 bit codes
    /// - Early code change
    pub const TIFF: Self = Self {
        code_size: 8,
        tiff: true,
        framing: Framing::Raw,
    };

    /// Standard GIF LZW configuration for 8-bit indices.
    ///
    /// - LSB-first bit order
    /// - 8-bit symbols, 9-12 bit codes
    /// - Standard code change
    pub const GIF: Self = Self {
        code_size: 8,
        tiff: false,
        framing: Framing::Raw,
    };

    /// Create a new LZW configuration.
    pub fn new(code_size: u8, tiff: bool) -> Self {
        Self {
            code_size,
            tiff,
            framing: Framing::Raw,
        }
    }

    /// GIF configuration with the given minimum code size.
    pub fn gif(code_size: u8) -> Self {
        Self::new(code_size, false)
    }

    /// Replace the byte framing.
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Check that the code size is supported.
    pub fn validate(&self) -> Result<()> {
        if !(1..=8).contains(&self.code_size) {
            return Err(LzwError::InvalidCodeSize(self.code_size));
        }
        Ok(())
    }

    /// Get the clear code value (256 for 8-bit symbols).
    pub fn clear_code(&self) -> Code {
        1 << self.code_size
    }

    /// Get the end-of-information code value (clear_code + 1).
    pub fn eoi_code(&self) -> Code {
        self.clear_code() + 1
    }

    /// Get the first available code for dictionary entries.
    pub fn first_code(&self) -> Code {
        self.eoi_code() + 1
    }

    /// Code width right after a clear.
    pub fn initial_bits(&self) -> u8 {
        self.code_size + 1
    }

    /// Bit order of the packed codes.
    pub fn bit_order(&self) -> BitOrder {
        if self.tiff { BitOrder::Msb } else { BitOrder::Lsb }
    }

    /// Whether the width grows one code early.
    pub fn early_change(&self) -> bool {
        self.tiff
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::TIFF
    }
}
