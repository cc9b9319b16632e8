//! Bit-level I/O for variable-width codes.
//!
//! This module provides `BitWriter` and `BitReader` for packing and
//! unpacking integer codes of 1 to 16 bits into a byte stream.
//!
//! # Bit Ordering
//!
//! LZW streams come in two flavours that differ only in how code bits are
//! laid out inside each byte:
//!
//! - [`BitOrder::Msb`]: codes are packed from the most significant bit of
//!   each byte downwards (TIFF, PDF `LZWDecode`).
//! - [`BitOrder::Lsb`]: codes are packed from the least significant bit
//!   upwards (GIF).
//!
//! The order is chosen once at construction; both directions share one
//! accumulator.
//!
//! # Example
//!
//! ```
//! use lzwpress_core::bitstream::{BitOrder, BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output, BitOrder::Msb);
//!     writer.write_bits(256, 9).unwrap();
//!     writer.write_bits(65, 9).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0x80, 0x10, 0x40]);
//!
//! let mut reader = BitReader::new(Cursor::new(&output), BitOrder::Msb);
//! assert_eq!(reader.read_bits(9).unwrap(), 256);
//! assert_eq!(reader.read_bits(9).unwrap(), 65);
//! ```

use crate::error::{PressError, Result};
use std::io::{self, Read, Write};

/// The widest code that can be written or read in one call.
pub const MAX_WIDTH: u8 = 16;

/// The order of bits within each byte of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Most significant bit first (TIFF).
    Msb,
    /// Least significant bit first (GIF).
    Lsb,
}

#[inline]
fn check_width(count: u8) -> Result<()> {
    if count == 0 || count > MAX_WIDTH {
        return Err(PressError::invalid_bit_width(count, MAX_WIDTH));
    }
    Ok(())
}

#[inline]
fn low_mask(count: u8) -> u32 {
    (1u32 << count) - 1
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// Complete bytes are handed to the underlying writer as soon as they are
/// assembled; at most seven bits stay pending between calls. Call
/// [`flush`](Self::flush) at the end to pad and write the final byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Packing order.
    order: BitOrder,
    /// Pending bits. For `Msb` the valid bits sit at the bottom with the
    /// oldest bit highest; for `Lsb` the oldest bit is bit 0.
    buffer: u32,
    /// Number of pending bits.
    bits_in_buffer: u8,
    /// Total bits written, padding included.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W, order: BitOrder) -> Self {
        Self {
            writer,
            order,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the packing order.
    pub fn order(&self) -> BitOrder {
        self.order
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume this `BitWriter` and return the underlying writer.
    ///
    /// Pending bits are discarded; call [`flush`](Self::flush) first.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of bits waiting for a byte to complete (0-7).
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Write the low `count` bits of `value`.
    ///
    /// # Arguments
    ///
    /// * `value` - The code to write; bits above `count` are ignored
    /// * `count` - Number of bits to write (1-16)
    #[inline]
    pub fn write_bits(&mut self, value: u16, count: u8) -> Result<()> {
        check_width(count)?;

        let value = u32::from(value) & low_mask(count);
        match self.order {
            BitOrder::Msb => self.buffer = (self.buffer << count) | value,
            BitOrder::Lsb => self.buffer |= value << self.bits_in_buffer,
        }
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        self.flush_bytes()
    }

    /// Pad the partial byte with zero bits, write it, and flush the
    /// underlying writer.
    ///
    /// Calling this again without writing more bits emits nothing.
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            if self.order == BitOrder::Msb {
                self.buffer <<= padding;
            }
            self.bits_in_buffer += padding;
            self.total_bits_written += u64::from(padding);
            self.flush_bytes()?;
        }

        self.writer.flush()?;
        Ok(())
    }

    /// Hand every complete byte to the writer in one call.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        // 7 pending bits plus one 16-bit code never exceed three bytes.
        let mut bytes = [0u8; 3];
        let mut count = 0;
        while self.bits_in_buffer >= 8 {
            bytes[count] = self.take_byte();
            count += 1;
        }

        if count > 0 {
            self.writer.write_all(&bytes[..count])?;
        }
        Ok(())
    }

    #[inline]
    fn take_byte(&mut self) -> u8 {
        self.bits_in_buffer -= 8;
        match self.order {
            BitOrder::Msb => {
                let byte = (self.buffer >> self.bits_in_buffer) as u8;
                self.buffer &= low_mask(self.bits_in_buffer);
                byte
            }
            BitOrder::Lsb => {
                let byte = self.buffer as u8;
                self.buffer >>= 8;
                byte
            }
        }
    }
}

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled one at a time, so the reader never consumes more input
/// than the codes read so far require.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Unpacking order.
    order: BitOrder,
    /// Buffered bits, same layout as in `BitWriter`.
    buffer: u32,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R, order: BitOrder) -> Self {
        Self {
            reader,
            order,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Read a code of `count` bits (1-16).
    pub fn read_bits(&mut self, count: u8) -> Result<u16> {
        check_width(count)?;

        while self.bits_in_buffer < count {
            let byte = self
                .next_byte()?
                .ok_or(PressError::unexpected_eof(self.total_bits_read))?;
            match self.order {
                BitOrder::Msb => self.buffer = (self.buffer << 8) | u32::from(byte),
                BitOrder::Lsb => self.buffer |= u32::from(byte) << self.bits_in_buffer,
            }
            self.bits_in_buffer += 8;
        }

        let value = match self.order {
            BitOrder::Msb => {
                self.bits_in_buffer -= count;
                let value = self.buffer >> self.bits_in_buffer;
                self.buffer &= low_mask(self.bits_in_buffer);
                value
            }
            BitOrder::Lsb => {
                let value = self.buffer & low_mask(count);
                self.buffer >>= count;
                self.bits_in_buffer -= count;
                value
            }
        };
        self.total_bits_read += u64::from(count);

        Ok(value as u16)
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
