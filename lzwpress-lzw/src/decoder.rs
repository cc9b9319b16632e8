//! LZW decoder (decompression).
//!
//! Reads back the streams written by [`LzwEncoder`](crate::LzwEncoder) and
//! by other TIFF/GIF style encoders. Decoding runs until the
//! end-of-information code; running out of input first is an error.

use crate::config::LzwConfig;
use crate::error::{LzwError, Result};
use crate::table::StringTable;
use crate::width::{CodeWidth, Widen};
use crate::Code;
use log::{trace, warn};
use lzwpress_core::{BitReader, BlockReader};

/// One code read from a stream, as reported by
/// [`LzwDecoder::decode_traced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// A clear code.
    Clear {
        /// Width it was read at.
        bits: u8,
    },
    /// A literal or string code.
    Code {
        /// The code value.
        code: Code,
        /// Width it was read at.
        bits: u8,
    },
    /// The end-of-information code.
    End {
        /// Width it was read at.
        bits: u8,
    },
}

impl TraceEvent {
    /// Width the code was read at.
    pub fn bits(&self) -> u8 {
        match *self {
            Self::Clear { bits } | Self::Code { bits, .. } | Self::End { bits } => bits,
        }
    }
}

/// LZW decoder for decompression.
#[derive(Debug)]
pub struct LzwDecoder {
    /// Configuration.
    config: LzwConfig,
    /// Table for code lookup.
    table: StringTable,
    /// Code width, grown by the same rule as the encoder's.
    width: CodeWidth,
    /// Refuse to produce more than this many bytes.
    output_limit: Option<usize>,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            table: StringTable::new(config.code_size),
            width: CodeWidth::new(config.code_size, config.early_change()),
            output_limit: None,
        })
    }

    /// Fail with [`LzwError::OutputLimit`] once more than `limit` bytes are
    /// decoded.
    pub fn with_output_limit(mut self, limit: usize) -> Self {
        self.output_limit = Some(limit);
        self
    }

    /// Decode a complete LZW stream.
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.run(input, None)
    }

    /// Decode a complete LZW stream and report every code read.
    pub fn decode_traced(&mut self, input: &[u8]) -> Result<(Vec<u8>, Vec<TraceEvent>)> {
        let mut events = Vec::new();
        let output = self.run(input, Some(&mut events))?;
        Ok((output, events))
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.table.clear();
        self.width.reset();
    }

    fn run(&mut self, input: &[u8], mut events: Option<&mut Vec<TraceEvent>>) -> Result<Vec<u8>> {
        self.reset();

        let mut reader = BitReader::new(
            BlockReader::new(input, self.config.framing),
            self.config.bit_order(),
        );
        let clear_code = self.config.clear_code();
        let eoi_code = self.config.eoi_code();

        let mut output = Vec::new();
        let mut prev: Option<Code> = None;
        let mut at_start = true;

        loop {
            let bits = self.width.bits();
            let code = reader.read_bits(bits)?;
            let position = reader.bits_read();

            if code == clear_code {
                if let Some(events) = events.as_mut() {
                    events.push(TraceEvent::Clear { bits });
                }
                self.reset();
                prev = None;
                at_start = false;
                continue;
            }
            if at_start {
                warn!("LZW stream does not start with a clear code");
                at_start = false;
            }
            if code == eoi_code {
                if let Some(events) = events.as_mut() {
                    events.push(TraceEvent::End { bits });
                }
                break;
            }
            if let Some(events) = events.as_mut() {
                events.push(TraceEvent::Code { code, bits });
            }

            let next_code = self.table.next_code();
            match prev {
                None => {
                    self.table
                        .expand_into(code, &mut output)
                        .ok_or(LzwError::InvalidCode { code, position })?;
                }
                Some(prev) => {
                    let first_byte = if code < next_code {
                        self.table.expand_into(code, &mut output)
                    } else if code == next_code {
                        // The string being defined right now: the previous
                        // string plus its own first byte.
                        let first = self.table.expand_into(prev, &mut output);
                        if let Some(byte) = first {
                            output.push(byte);
                        }
                        first
                    } else {
                        None
                    }
                    .ok_or(LzwError::InvalidCode { code, position })?;

                    if !self.table.is_full() {
                        self.table.add(prev, first_byte);
                    }
                }
            }
            prev = Some(code);

            if self.width.is_exceeded_by(self.table.next_code()) {
                if let Widen::Grew(bits) = self.width.widen() {
                    trace!("LZW code width grew to {bits} bits");
                }
            }

            if let Some(limit) = self.output_limit {
                if output.len() > limit {
                    return Err(LzwError::OutputLimit { limit });
                }
            }
        }

        Ok(output)
    }
}
