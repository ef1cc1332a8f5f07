use thiserror::Error;

/// Every way a parse can stop short of success.
///
/// The numeric value of each variant (see [`ParseError::code`]) is a stable
/// contract: `0` is reserved for success, `1..=12` are raised by the parser
/// itself and `128..=255` belong to the callback.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// Unknown character after `\`, or a non-hex digit in a `\u` escape.
    #[error("malformed escape sequence")]
    MalformedEscape,
    /// Number does not follow the JSON number grammar.
    #[error("malformed number")]
    MalformedNumber,
    /// Unescaped control character inside a string.
    #[error("malformed string")]
    MalformedString,
    /// Character that cannot start any token.
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// Token arrived in a position the JSON grammar does not allow.
    #[error("bad grammar")]
    BadGrammar,
    /// Data after the end of the top-level value.
    #[error("trailing data after end of document")]
    TrailingData,
    /// Input ended before the document was complete.
    #[error("unexpected end of document")]
    UnexpectedEnd,
    /// Lowercase word other than `null`, `true` or `false`.
    #[error("bad constant")]
    BadConstant,
    /// Containers nested deeper than the configured limit.
    #[error("nesting too deep")]
    TooDeep,
    /// Mantissa, fraction zero run or exponent exceeded its configured width.
    #[error("number overflow")]
    NumberOverflow,
    /// Decoded string does not fit the decode buffer.
    #[error("string overflow")]
    StringOverflow,
    /// The parser was used in a state it can never legally reach.
    #[error("bad parser state")]
    BadState,
    /// Error raised by the event callback, carried verbatim.
    #[error("callback error {0}")]
    Custom(u8),
}

/// First code available to callbacks.
pub const CUSTOM_ERROR_BASE: u8 = 128;

impl ParseError {
    /// Builds a callback error, or `None` if `code` lies outside `128..=255`.
    #[must_use]
    pub const fn custom(code: u8) -> Option<Self> {
        if code >= CUSTOM_ERROR_BASE {
            Some(Self::Custom(code))
        } else {
            None
        }
    }

    /// The stable numeric status code of this error.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::MalformedEscape => 1,
            Self::MalformedNumber => 2,
            Self::MalformedString => 3,
            Self::UnexpectedCharacter => 4,
            Self::BadGrammar => 5,
            Self::TrailingData => 6,
            Self::UnexpectedEnd => 7,
            Self::BadConstant => 8,
            Self::TooDeep => 9,
            Self::NumberOverflow => 10,
            Self::StringOverflow => 11,
            Self::BadState => 12,
            Self::Custom(code) => code,
        }
    }

    /// Whether the error came from the callback rather than the parser.
    #[must_use]
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// Status code that is neither success nor a known error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown status code {0}")]
pub struct UnknownCode(pub u8);

impl TryFrom<u8> for ParseError {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Self::MalformedEscape,
            2 => Self::MalformedNumber,
            3 => Self::MalformedString,
            4 => Self::UnexpectedCharacter,
            5 => Self::BadGrammar,
            6 => Self::TrailingData,
            7 => Self::UnexpectedEnd,
            8 => Self::BadConstant,
            9 => Self::TooDeep,
            10 => Self::NumberOverflow,
            11 => Self::StringOverflow,
            12 => Self::BadState,
            c if c >= CUSTOM_ERROR_BASE => Self::Custom(c),
            c => return Err(UnknownCode(c)),
        })
    }
}
