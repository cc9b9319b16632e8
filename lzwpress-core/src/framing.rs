//! GIF data sub-block framing.
//!
//! GIF image data is stored as a sequence of sub-blocks, each a length byte
//! (1-255) followed by that many bytes, closed by a zero-length block.
//! [`BlockWriter`] and [`BlockReader`] add and remove that framing around a
//! byte stream; with [`Framing::Raw`] they pass bytes through untouched.

use std::io::{self, Read, Write};

/// Largest payload of a single sub-block.
pub const MAX_BLOCK_LEN: usize = 255;

/// How a byte stream is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Plain bytes.
    #[default]
    Raw,
    /// Length-prefixed sub-blocks of at most 255 bytes.
    SubBlocks,
}

/// A writer that applies a [`Framing`] to everything written through it.
#[derive(Debug)]
pub struct BlockWriter<W: Write> {
    writer: W,
    framing: Framing,
    block: [u8; MAX_BLOCK_LEN],
    len: usize,
}

impl<W: Write> BlockWriter<W> {
    /// Create a new `BlockWriter`.
    pub fn new(writer: W, framing: Framing) -> Self {
        Self {
            writer,
            framing,
            block: [0; MAX_BLOCK_LEN],
            len: 0,
        }
    }

    /// Get the framing mode.
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consume this `BlockWriter` and return the underlying writer.
    ///
    /// A partially filled block is discarded; call `flush` first.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Flush the pending block, write the zero-length terminator (in
    /// sub-block mode), and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush()?;
        if self.framing == Framing::SubBlocks {
            self.writer.write_all(&[0])?;
            self.writer.flush()?;
        }
        Ok(self.writer)
    }

    fn emit_block(&mut self) -> io::Result<()> {
        if self.len == 0 {
            return Ok(());
        }
        self.writer.write_all(&[self.len as u8])?;
        self.writer.write_all(&self.block[..self.len])?;
        self.len = 0;
        Ok(())
    }
}

impl<W: Write> Write for BlockWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.framing == Framing::Raw {
            return self.writer.write(buf);
        }

        let take = buf.len().min(MAX_BLOCK_LEN - self.len);
        self.block[self.len..self.len + take].copy_from_slice(&buf[..take]);
        self.len += take;
        if self.len == MAX_BLOCK_LEN {
            self.emit_block()?;
        }
        Ok(take)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit_block()?;
        self.writer.flush()
    }
}

/// A reader that strips a [`Framing`] from the underlying stream.
///
/// In sub-block mode the data ends at a zero-length block or at a clean end
/// of input where a length byte was expected.
#[derive(Debug)]
pub struct BlockReader<R: Read> {
    reader: R,
    framing: Framing,
    remaining: usize,
    ended: bool,
}

impl<R: Read> BlockReader<R> {
    /// Create a new `BlockReader`.
    pub fn new(reader: R, framing: Framing) -> Self {
        Self {
            reader,
            framing,
            remaining: 0,
            ended: false,
        }
    }

    /// Consume this `BlockReader` and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_block(&mut self) -> io::Result<()> {
        let mut len = [0u8; 1];
        loop {
            match self.reader.read(&mut len) {
                Ok(0) => {
                    self.ended = true;
                    return Ok(());
                }
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        if len[0] == 0 {
            self.ended = true;
        }
        self.remaining = usize::from(len[0]);
        Ok(())
    }
}

impl<R: Read> Read for BlockReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.framing == Framing::Raw {
            return self.reader.read(buf);
        }
        if buf.is_empty() {
            return Ok(0);
        }

        while self.remaining == 0 {
            if self.ended {
                return Ok(0);
            }
            self.next_block()?;
        }

        let want = buf.len().min(self.remaining);
        let got = self.reader.read(&mut buf[..want])?;
        if got == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "sub-block truncated",
            ));
        }
        self.remaining -= got;
        Ok(got)
    }
}
