//! String sub-machine: copies and unescapes string content into the decode
//! buffer one octet at a time.
//!
//! The decoded bytes always trail the input position, which is what allows
//! the one-shot driver to decode over the input it is still reading.

use core::ops::Range;

use crate::{
    ParseError,
    escape::{UnicodeEscape, encode_utf8},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    Pending,
    Unicode(UnicodeEscape),
}

/// What the lexer should do after handing one octet to the string decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringStep {
    Continue,
    /// The closing quote was consumed.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StringDecoder {
    start: usize,
    end: usize,
    escape: Escape,
}

impl StringDecoder {
    /// Starts a string whose decoded bytes begin at `origin`.
    pub(crate) const fn new(origin: usize) -> Self {
        Self {
            start: origin,
            end: origin,
            escape: Escape::None,
        }
    }

    /// The decoded bytes so far, as a range of the decode buffer.
    pub(crate) const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Advances by one octet.
    ///
    /// Decoded bytes may not extend past `limit`. On completion the byte at
    /// the end of the range is set to NUL.
    pub(crate) fn step(
        &mut self,
        octet: u8,
        buffer: &mut [u8],
        limit: usize,
    ) -> Result<StringStep, ParseError> {
        match self.escape {
            Escape::None => match octet {
                b'"' => {
                    let nul = buffer.get_mut(self.end).ok_or(ParseError::StringOverflow)?;
                    *nul = 0;
                    return Ok(StringStep::Complete);
                }
                b'\\' => self.escape = Escape::Pending,
                0x20.. => self.write(&[octet], buffer, limit)?,
                _ => return Err(ParseError::MalformedString),
            },
            Escape::Pending => {
                let unescaped = match octet {
                    b'u' => {
                        self.escape = Escape::Unicode(UnicodeEscape::new());
                        return Ok(StringStep::Continue);
                    }
                    b'"' => b'"',
                    b'\\' => b'\\',
                    b'/' => b'/',
                    b'b' => 0x08,
                    b't' => b'\t',
                    b'n' => b'\n',
                    b'f' => 0x0C,
                    b'r' => b'\r',
                    _ => return Err(ParseError::MalformedEscape),
                };
                self.escape = Escape::None;
                self.write(&[unescaped], buffer, limit)?;
            }
            Escape::Unicode(mut pending) => {
                match pending.feed(octet)? {
                    Some(code) => {
                        self.escape = Escape::None;
                        self.write(encode_utf8(code).as_slice(), buffer, limit)?;
                    }
                    None => self.escape = Escape::Unicode(pending),
                }
            }
        }
        Ok(StringStep::Continue)
    }

    fn write(&mut self, bytes: &[u8], buffer: &mut [u8], limit: usize) -> Result<(), ParseError> {
        let end = self.end + bytes.len();
        if end > limit {
            return Err(ParseError::StringOverflow);
        }
        buffer
            .get_mut(self.end..end)
            .ok_or(ParseError::StringOverflow)?
            .copy_from_slice(bytes);
        self.end = end;
        Ok(())
    }
}
