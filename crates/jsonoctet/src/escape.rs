//! Decoding of `\uXXXX` escapes without buffering the digits.
//!
//! [`UnicodeEscape`] accumulates exactly four ASCII hexadecimal digits into a
//! 16-bit code unit as they arrive. [`encode_utf8`] turns that code unit into
//! its one, two or three byte UTF-8 form.
//!
//! Surrogate code units (`D800..=DFFF`) are not paired up: each one is encoded
//! on its own into three bytes. Strings carrying such escapes are therefore
//! not valid UTF-8, and it is left to the consumer to decide what to do with
//! them.

use crate::ParseError;

/// Accumulates four hexadecimal digits into a UTF-16 code unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct UnicodeEscape {
    acc: u16,
    len: u8,
}

impl UnicodeEscape {
    pub(crate) const fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    /// Convert a single ASCII hex digit into its 0..=15 value.
    #[inline]
    fn hex_val(octet: u8) -> Option<u16> {
        match octet {
            b'0'..=b'9' => Some(u16::from(octet - b'0')),
            b'a'..=b'f' => Some(u16::from(octet - b'a' + 10)),
            b'A'..=b'F' => Some(u16::from(octet - b'A' + 10)),
            _ => None,
        }
    }

    /// Feeds one digit.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been seen.
    /// - Returns `Ok(Some(code))` with the fourth digit.
    /// - Returns [`ParseError::MalformedEscape`] for anything that is not a
    ///   hex digit.
    pub(crate) fn feed(&mut self, octet: u8) -> Result<Option<u16>, ParseError> {
        let digit = Self::hex_val(octet).ok_or(ParseError::MalformedEscape)?;
        self.acc = (self.acc << 4) | digit;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let code = self.acc;
        *self = Self::new();
        Ok(Some(code))
    }
}

/// A code unit encoded as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Encoded {
    bytes: [u8; 3],
    len: usize,
}

impl Encoded {
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Encodes a BMP code unit as 1, 2 or 3 UTF-8 bytes.
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn encode_utf8(code: u16) -> Encoded {
    if code < 0x80 {
        Encoded {
            bytes: [code as u8, 0, 0],
            len: 1,
        }
    } else if code < 0x800 {
        Encoded {
            bytes: [0xC0 | (code >> 6) as u8, 0x80 | (code & 0x3F) as u8, 0],
            len: 2,
        }
    } else {
        Encoded {
            bytes: [
                0xE0 | (code >> 12) as u8,
                0x80 | ((code >> 6) & 0x3F) as u8,
                0x80 | (code & 0x3F) as u8,
            ],
            len: 3,
        }
    }
}
