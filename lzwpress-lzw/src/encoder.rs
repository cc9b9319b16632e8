//! LZW encoder (compression).
//!
//! The encoder is push-style: bytes go in through [`LzwEncoder::compress`]
//! in chunks of any size, codes come out to the sink as soon as they are
//! known, and [`LzwEncoder::finish`] terminates the stream. Only the code of
//! the string matched so far is carried between calls.

use crate::config::LzwConfig;
use crate::error::{LzwError, Result};
use crate::table::{Insertion, Lookup, StringTable};
use crate::width::{CodeWidth, Widen};
use crate::Code;
use log::{debug, trace};
use lzwpress_core::{BitWriter, BlockWriter};
use std::io::{self, Write};

/// Encoder state that survives between `compress` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderState {
    /// Current code width and growth threshold.
    width: CodeWidth,
    /// Code of the longest string matched so far.
    prefix: Option<Code>,
    /// Set once the end code has been written.
    finished: bool,
    /// Set when a write to the sink failed part way through.
    poisoned: bool,
}

impl EncoderState {
    fn new(config: &LzwConfig) -> Self {
        Self {
            width: CodeWidth::new(config.code_size, config.early_change()),
            prefix: None,
            finished: false,
            poisoned: false,
        }
    }

    /// Width of the next code to be written.
    pub fn bits(&self) -> u8 {
        self.width.bits()
    }

    /// Highest code that can be assigned at the current width.
    pub fn limit(&self) -> Code {
        self.width.limit()
    }

    /// Code of the pending match, if any input has been consumed.
    pub fn prefix(&self) -> Option<Code> {
        self.prefix
    }

    /// Whether [`LzwEncoder::finish`] has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether a sink failure left the stream incomplete.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn check_usable(&self) -> Result<()> {
        if self.poisoned {
            Err(LzwError::Poisoned)
        } else if self.finished {
            Err(LzwError::Finished)
        } else {
            Ok(())
        }
    }
}

/// Consume one byte: extend the match or emit it and start a new one.
#[inline]
fn step<S: Write>(
    state: &mut EncoderState,
    table: &mut StringTable,
    writer: &mut BitWriter<S>,
    clear_code: Code,
    byte: u8,
) -> Result<()> {
    if let Lookup::Found(code) = table.find(state.prefix, byte) {
        state.prefix = Some(code);
        return Ok(());
    }

    // A lone literal always matches, so a miss implies a prefix.
    if let Some(prefix) = state.prefix {
        writer.write_bits(prefix, state.width.bits())?;

        let exceeded = match table.add(prefix, byte) {
            Insertion::Assigned(code) => state.width.is_exceeded_by(code),
            Insertion::Full => true,
        };
        if exceeded {
            match state.width.widen() {
                Widen::Grew(bits) => trace!("LZW code width grew to {bits} bits"),
                Widen::Saturated => {
                    writer.write_bits(clear_code, state.width.bits())?;
                    table.clear();
                    state.width.reset();
                    debug!("LZW string table full, emitted clear code");
                }
            }
        }
    }

    state.prefix = Some(Code::from(byte));
    Ok(())
}

/// Streaming LZW encoder writing to `W`.
#[derive(Debug)]
pub struct LzwEncoder<W: Write> {
    /// Configuration.
    config: LzwConfig,
    /// String table for the current epoch.
    table: StringTable,
    /// Packed output.
    writer: BitWriter<BlockWriter<W>>,
    /// State carried between calls.
    state: EncoderState,
}

impl<W: Write> LzwEncoder<W> {
    /// Create a new encoder and write the leading clear code.
    pub fn new(sink: W, config: LzwConfig) -> Result<Self> {
        config.validate()?;

        let writer = BitWriter::new(BlockWriter::new(sink, config.framing), config.bit_order());
        let mut encoder = Self {
            config,
            table: StringTable::new(config.code_size),
            writer,
            state: EncoderState::new(&config),
        };
        encoder
            .writer
            .write_bits(config.clear_code(), encoder.state.bits())?;

        Ok(encoder)
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Get the state carried between calls.
    pub fn state(&self) -> &EncoderState {
        &self.state
    }

    /// Get a reference to the sink.
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref().get_ref()
    }

    /// Consume the encoder and return the sink.
    ///
    /// Call [`finish`](Self::finish) first, or the stream is incomplete.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().into_inner()
    }

    /// Compress a chunk of input.
    ///
    /// May be called any number of times; the pending match carries over
    /// into the next call.
    ///
    /// If the sink fails, bits already taken from the input are lost and
    /// every later call returns [`LzwError::Poisoned`].
    pub fn compress(&mut self, data: &[u8]) -> Result<()> {
        self.state.check_usable()?;

        let clear_code = self.config.clear_code();
        if self.config.code_size < 8 {
            if let Some(&symbol) = data.iter().find(|&&b| Code::from(b) >= clear_code) {
                return Err(LzwError::SymbolOutOfRange {
                    symbol,
                    code_size: self.config.code_size,
                });
            }
        }

        for &byte in data {
            let stepped = step(
                &mut self.state,
                &mut self.table,
                &mut self.writer,
                clear_code,
                byte,
            );
            if stepped.is_err() {
                self.state.poisoned = true;
                return stepped;
            }
        }
        Ok(())
    }

    /// Compress `length` bytes of `buf` starting at `offset`.
    pub fn compress_range(&mut self, buf: &[u8], offset: usize, length: usize) -> Result<()> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= buf.len())
            .ok_or(LzwError::InvalidRange {
                offset,
                length,
                len: buf.len(),
            })?;
        self.compress(&buf[offset..end])
    }

    /// Terminate the stream.
    ///
    /// Writes the pending match, the end-of-information code, and zero bits
    /// up to the next byte boundary, then flushes the sink. The encoder
    /// accepts no further input afterwards.
    ///
    /// The end code is written at the width a decoder expects after reading
    /// the pending match. A decoder reserves the next code at that point, so
    /// when that code passes the limit the end code is one bit wider than
    /// the last data code. libtiff, giflib and weezl all read it that way.
    ///
    /// A sink failure here poisons the encoder like one in
    /// [`compress`](Self::compress).
    pub fn finish(&mut self) -> Result<()> {
        self.state.check_usable()?;

        if let Err(err) = self.write_trailer() {
            self.state.poisoned = true;
            return Err(err);
        }
        self.state.finished = true;

        debug!(
            "LZW stream finished after {} bits",
            self.writer.bits_written()
        );
        Ok(())
    }

    fn write_trailer(&mut self) -> Result<()> {
        if let Some(prefix) = self.state.prefix.take() {
            self.writer.write_bits(prefix, self.state.bits())?;
            if self.state.width.is_exceeded_by(self.table.next_code()) {
                self.state.width.widen();
            }
        }
        self.writer
            .write_bits(self.config.eoi_code(), self.state.bits())?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Write for LzwEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.compress(buf).map_err(|err| match err {
            LzwError::Io(e) => e,
            other => io::Error::other(other),
        })?;
        Ok(buf.len())
    }

    /// Flushes the sink without terminating the stream.
    fn flush(&mut self) -> io::Result<()> {
        self.writer.get_mut().get_mut().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::LzwDecoder;

    fn roundtrip(config: LzwConfig, original: &[u8]) -> Vec<u8> {
        let mut encoder = LzwEncoder::new(Vec::new(), config).unwrap();
        encoder.compress(original).unwrap();
        encoder.finish().unwrap();
        let compressed = encoder.into_inner();

        let mut decoder = LzwDecoder::new(config).unwrap();
        decoder.decode(&compressed).unwrap()
    }

    #[test]
    fn test_clear_code_written_on_construction() {
        let encoder = LzwEncoder::new(Vec::new(), LzwConfig::TIFF).unwrap();
        // 9 bits pending, one full byte out: the top of 256 in MSB order.
        assert_eq!(encoder.get_ref(), &vec![0x80]);
        assert_eq!(encoder.state().bits(), 9);
        assert_eq!(encoder.state().limit(), 510);
        assert_eq!(encoder.state().prefix(), None);
    }

    #[test]
    fn test_first_byte_is_deferred() {
        let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::GIF).unwrap();
        let before = encoder.get_ref().len();
        encoder.compress(b"A").unwrap();

        assert_eq!(encoder.get_ref().len(), before);
        assert_eq!(encoder.state().prefix(), Some(65));
    }

    #[test]
    fn test_encode_simple() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        for config in [LzwConfig::TIFF, LzwConfig::GIF] {
            assert_eq!(roundtrip(config, original), original);
        }
    }

    #[test]
    fn test_encode_empty() {
        let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::TIFF).unwrap();
        encoder.finish().unwrap();
        let compressed = encoder.into_inner();

        // CLEAR + EOI at 9 bits, padded: 18 bits -> 3 bytes
        assert_eq!(compressed, vec![0x80, 0x40, 0x40]);
    }

    #[test]
    fn test_encode_repeating() {
        let original = vec![b'X'; 500];
        let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::TIFF).unwrap();
        encoder.compress(&original).unwrap();
        encoder.finish().unwrap();
        let compressed = encoder.into_inner();

        // Highly repetitive data should compress well
        assert!(compressed.len() < original.len() / 2);
    }

    #[test]
    fn test_encode_small_code_size() {
        let original: Vec<u8> = (0..300u32).map(|i| (i * 7 % 4) as u8).collect();
        for tiff in [false, true] {
            assert_eq!(roundtrip(LzwConfig::new(2, tiff), &original), original);
        }
    }

    #[test]
    fn test_symbol_out_of_range() {
        let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::gif(2)).unwrap();
        encoder.compress(&[0, 1, 2]).unwrap();
        let state = *encoder.state();

        let err = encoder.compress(&[3, 4]).unwrap_err();
        assert!(matches!(
            err,
            LzwError::SymbolOutOfRange {
                symbol: 4,
                code_size: 2
            }
        ));
        // Rejected chunks leave the state alone.
        assert_eq!(*encoder.state(), state);
    }

    #[test]
    fn test_compress_range() {
        let buf = b"..ABAB..";
        let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::GIF).unwrap();
        encoder.compress_range(buf, 2, 4).unwrap();
        encoder.finish().unwrap();
        let compressed = encoder.into_inner();
        assert_eq!(
            LzwDecoder::new(LzwConfig::GIF).unwrap().decode(&compressed).unwrap(),
            b"ABAB"
        );

        let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::GIF).unwrap();
        assert!(matches!(
            encoder.compress_range(buf, 6, 3),
            Err(LzwError::InvalidRange { len: 8, .. })
        ));
        assert!(matches!(
            encoder.compress_range(buf, usize::MAX, 2),
            Err(LzwError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_use_after_finish() {
        let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::TIFF).unwrap();
        encoder.compress(b"abc").unwrap();
        encoder.finish().unwrap();
        assert!(encoder.state().is_finished());

        assert!(matches!(encoder.compress(b"d"), Err(LzwError::Finished)));
        assert!(matches!(encoder.finish(), Err(LzwError::Finished)));
    }

    #[test]
    fn test_write_impl() {
        let original = b"This is a test of compression! ".repeat(10);
        let mut encoder = LzwEncoder::new(Vec::new(), LzwConfig::TIFF).unwrap();
        io::copy(&mut &original[..], &mut encoder).unwrap();
        encoder.finish().unwrap();
        let compressed = encoder.into_inner();

        let decoded = LzwDecoder::new(LzwConfig::TIFF)
            .unwrap()
            .decode(&compressed)
            .unwrap();
        assert_eq!(decoded, original);
    }
}
