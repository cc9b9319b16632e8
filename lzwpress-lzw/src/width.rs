//! Code width policy shared by the encoder and decoder.
//!
//! Both sides must agree exactly on when the width grows, so the rule lives
//! in one place. The encoder checks the code it just assigned; the decoder,
//! which assigns each entry one code later, checks the code it will assign
//! next. Those are the same value.

use crate::{Code, MAX_BITS};

/// Outcome of [`CodeWidth::widen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widen {
    /// The width grew to the contained number of bits.
    Grew(u8),
    /// Already at the maximum width; the table must be cleared.
    Saturated,
}

/// Current code width and the threshold that triggers growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeWidth {
    initial: u8,
    bits: u8,
    limit: Code,
    early_change: bool,
}

impl CodeWidth {
    /// Width policy for `code_size`-bit symbols.
    pub fn new(code_size: u8, early_change: bool) -> Self {
        let initial = code_size + 1;
        Self {
            initial,
            bits: initial,
            limit: Self::limit_for(initial, early_change),
            early_change,
        }
    }

    /// Largest code representable at `bits` under the TIFF/GIF rule.
    ///
    /// TIFF treats the all-ones code of each width as unusable.
    fn limit_for(bits: u8, early_change: bool) -> Code {
        let limit = (1 << bits) - 1;
        if early_change { limit - 1 } else { limit }
    }

    /// Current width in bits.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Highest code that may be assigned before the width must grow.
    pub fn limit(&self) -> Code {
        self.limit
    }

    /// Whether `code` has passed the current limit.
    pub fn is_exceeded_by(&self, code: Code) -> bool {
        code > self.limit
    }

    /// Grow by one bit, unless already at 12 bits.
    pub fn widen(&mut self) -> Widen {
        if self.bits >= MAX_BITS {
            return Widen::Saturated;
        }
        self.bits += 1;
        self.limit = Self::limit_for(self.bits, self.early_change);
        Widen::Grew(self.bits)
    }

    /// Back to the width used right after a clear.
    pub fn reset(&mut self) {
        self.bits = self.initial;
        self.limit = Self::limit_for(self.initial, self.early_change);
    }
}
