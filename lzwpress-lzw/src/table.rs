//! LZW string table.
//!
//! Every string in the table is a previously assigned code (its prefix)
//! extended by one byte, so the encoder only ever needs to look up
//! `(prefix, byte)` pairs. The decoder walks the same prefix links backwards
//! to expand a code into bytes.

use crate::{Code, MAX_ENTRIES};
use std::collections::HashMap;

/// Result of looking up a `(prefix, byte)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The string has this code.
    Found(Code),
    /// The string is not in the table.
    NotFound,
}

/// Result of adding a `(prefix, byte)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The string was given this code.
    Assigned(Code),
    /// All 4096 codes are in use; nothing was added.
    Full,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    prefix: Option<Code>,
    byte: u8,
    /// Length of the expanded string; 0 marks the CLEAR and EOI slots.
    len: u16,
}

impl Entry {
    const RESERVED: Self = Self {
        prefix: None,
        byte: 0,
        len: 0,
    };
}

/// Code table for one epoch of an LZW stream.
#[derive(Debug)]
pub struct StringTable {
    /// Bits per literal symbol.
    code_size: u8,
    /// `(prefix, byte) -> code` for encoding.
    links: HashMap<(Code, u8), Code>,
    /// `code -> (prefix, byte)` for decoding, indexed by code.
    entries: Vec<Entry>,
}

impl StringTable {
    /// Create a cleared table for `code_size`-bit symbols.
    pub fn new(code_size: u8) -> Self {
        let mut table = Self {
            code_size,
            links: HashMap::with_capacity(MAX_ENTRIES),
            entries: Vec::with_capacity(MAX_ENTRIES),
        };
        table.clear();
        table
    }

    fn clear_code(&self) -> Code {
        1 << self.code_size
    }

    /// Drop every dynamic string.
    ///
    /// Afterwards only the literal codes and the two reserved control codes
    /// exist, and the next assigned code is `clear_code + 2`.
    pub fn clear(&mut self) {
        self.links.clear();
        self.entries.clear();

        for byte in 0..self.clear_code() {
            self.entries.push(Entry {
                prefix: None,
                byte: byte as u8,
                len: 1,
            });
        }
        // CLEAR and END-OF-INFORMATION
        self.entries.push(Entry::RESERVED);
        self.entries.push(Entry::RESERVED);
    }

    /// Find the code for `prefix` extended by `byte`.
    ///
    /// Without a prefix the string is the single byte, whose code is the
    /// byte itself when it fits the code size.
    #[inline]
    pub fn find(&self, prefix: Option<Code>, byte: u8) -> Lookup {
        match prefix {
            None if Code::from(byte) < self.clear_code() => Lookup::Found(Code::from(byte)),
            None => Lookup::NotFound,
            Some(prefix) => match self.links.get(&(prefix, byte)) {
                Some(&code) => Lookup::Found(code),
                None => Lookup::NotFound,
            },
        }
    }

    /// Assign the next code to `prefix` extended by `byte`.
    pub fn add(&mut self, prefix: Code, byte: u8) -> Insertion {
        if self.is_full() {
            return Insertion::Full;
        }

        let code = self.next_code();
        let len = self
            .entries
            .get(usize::from(prefix))
            .map_or(1, |entry| entry.len + 1);
        self.entries.push(Entry {
            prefix: Some(prefix),
            byte,
            len,
        });
        self.links.insert((prefix, byte), code);

        Insertion::Assigned(code)
    }

    /// Append the string for `code` to `out` and return its first byte.
    ///
    /// Returns `None` for reserved and unassigned codes.
    pub fn expand_into(&self, code: Code, out: &mut Vec<u8>) -> Option<u8> {
        let entry = self.entries.get(usize::from(code))?;
        if entry.len == 0 {
            return None;
        }

        let start = out.len();
        let mut pos = start + usize::from(entry.len);
        out.resize(pos, 0);

        let mut cursor = Some(code);
        while let Some(current) = cursor {
            let entry = self.entries[usize::from(current)];
            pos -= 1;
            out[pos] = entry.byte;
            cursor = entry.prefix;
        }

        Some(out[start])
    }

    /// The code the next [`add`](Self::add) will assign.
    pub fn next_code(&self) -> Code {
        self.entries.len() as Code
    }

    /// Number of codes in use, reserved codes included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds only literal and reserved codes.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Whether all 4096 codes are in use.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_ENTRIES
    }
}
