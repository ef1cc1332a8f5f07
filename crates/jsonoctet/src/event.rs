//! Events delivered to the parser callback.
//!
//! Every callback invocation receives the container depth and one [`Event`].
//! String payloads borrow the parser's decode buffer and are only valid for
//! the duration of the call; numbers are copied out.
//!
//! # Examples
//!
//! ```
//! use jsonoctet::{Event, EventKind, parse_in_place};
//!
//! let mut data = *br#"{"a":1}"#;
//! let mut kinds = [EventKind::Null; 4];
//! let mut count = 0;
//! parse_in_place(&mut data, |depth, event| {
//!     if let Event::Key(key) = &event {
//!         assert_eq!(key.as_bytes(), b"a");
//!         assert_eq!(depth, 1);
//!     }
//!     kinds[count] = event.kind();
//!     count += 1;
//!     Ok(())
//! })
//! .unwrap();
//! assert_eq!(
//!     kinds,
//!     [
//!         EventKind::ObjectOpen,
//!         EventKind::Key,
//!         EventKind::Number,
//!         EventKind::ObjectClose,
//!     ]
//! );
//! ```

use core::{fmt, str::Utf8Error};

use bstr::{BStr, ByteSlice};

use crate::{literal::Literal, number::Number};

/// One parse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// `{`, reported at the depth outside the new object.
    ObjectOpen,
    /// `}`, reported at the depth outside the closed object.
    ObjectClose,
    /// `[`, reported at the depth outside the new array.
    ArrayOpen,
    /// `]`, reported at the depth outside the closed array.
    ArrayClose,
    /// Object member name.
    Key(StringValue<'a>),
    /// String value.
    String(StringValue<'a>),
    /// Number value.
    Number(Number),
    /// `null`
    Null,
    /// `true`
    True,
    /// `false`
    False,
}

impl<'a> Event<'a> {
    /// The numeric tag of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ObjectOpen => EventKind::ObjectOpen,
            Self::ObjectClose => EventKind::ObjectClose,
            Self::ArrayOpen => EventKind::ArrayOpen,
            Self::ArrayClose => EventKind::ArrayClose,
            Self::Key(_) => EventKind::Key,
            Self::String(_) => EventKind::String,
            Self::Number(_) => EventKind::Number,
            Self::Null => EventKind::Null,
            Self::True => EventKind::True,
            Self::False => EventKind::False,
        }
    }

    pub(crate) const fn literal(literal: Literal) -> Self {
        match literal {
            Literal::Null => Self::Null,
            Literal::True => Self::True,
            Literal::False => Self::False,
        }
    }

    /// The literal carried by a `null`, `true` or `false` event.
    #[must_use]
    pub const fn as_literal(&self) -> Option<Literal> {
        match self {
            Self::Null => Some(Literal::Null),
            Self::True => Some(Literal::True),
            Self::False => Some(Literal::False),
            _ => None,
        }
    }

    /// The decoded bytes of a key or string event.
    #[must_use]
    pub const fn as_string(&self) -> Option<StringValue<'a>> {
        match self {
            Self::Key(value) | Self::String(value) => Some(*value),
            _ => None,
        }
    }

    /// The value of a number event.
    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }
}

/// Stable numeric event tags.
///
/// Tag `7` is unused; the three constants follow at `8..=10`.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[cfg_attr(any(test, feature = "serde"), serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    /// `{`
    ObjectOpen = 0,
    /// `}`
    ObjectClose = 1,
    /// `[`
    ArrayOpen = 2,
    /// `]`
    ArrayClose = 3,
    /// Object member name.
    Key = 4,
    /// String value.
    String = 5,
    /// Number value.
    Number = 6,
    /// `null`
    Null = 8,
    /// `true`
    True = 9,
    /// `false`
    False = 10,
}

impl EventKind {
    /// The numeric tag.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether the event carries a value reference (key, string or number).
    #[must_use]
    pub const fn has_value(self) -> bool {
        matches!(self, Self::Key | Self::String | Self::Number)
    }
}

/// Decoded string bytes, borrowed from the decode buffer.
///
/// The bytes are escape-resolved and normally valid UTF-8. `\u` escapes of
/// lone surrogates are encoded as three bytes each, which [`as_str`] rejects
/// but [`as_bytes`] and [`as_bstr`] still expose.
///
/// [`as_str`]: StringValue::as_str
/// [`as_bytes`]: StringValue::as_bytes
/// [`as_bstr`]: StringValue::as_bstr
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringValue<'a>(&'a [u8]);

impl<'a> StringValue<'a> {
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    /// The decoded bytes, without the NUL terminator.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// The bytes as `&str`, if they are valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the UTF-8 error for strings carrying surrogate escapes or
    /// invalid raw bytes.
    pub fn as_str(&self) -> Result<&'a str, Utf8Error> {
        core::str::from_utf8(self.0)
    }

    /// The bytes as a [`BStr`], for lossless display.
    #[must_use]
    pub fn as_bstr(&self) -> &'a BStr {
        self.0.as_bstr()
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string is `""`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for StringValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl fmt::Display for StringValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl PartialEq<[u8]> for StringValue<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<str> for StringValue<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for StringValue<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}
