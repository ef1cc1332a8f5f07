//! The octet-at-a-time lexer and the two drivers built on it.
//!
//! [`Parser`] owns every piece of parse state: the active lexer sub-machine,
//! the grammar with its nesting stack, and a mutable borrow of the decode
//! buffer that strings are unescaped into. Each call to [`Parser::feed`]
//! consumes exactly one octet. When a sub-machine finishes on an octet that
//! belongs to the next token (a number ended by `,`, a literal ended by `]`),
//! that octet is dispatched again under the new state, at most
//! `MAX_DISPATCH` times per call.
//!
//! [`parse_in_place`] runs the same machine over a complete document, using
//! the document itself as the decode buffer. Decoded strings never grow, so
//! the write position can never overtake the read position.

use core::{fmt, ops::Range};

use tracing::{debug, trace, warn};

use crate::{
    ParseError, ParserOptions,
    event::{Event, StringValue},
    grammar::{Emit, Grammar, GrammarState, Token},
    literal::ConstantBuffer,
    number::{Number, NumberDecoder, NumberStep},
    string::{StringDecoder, StringStep},
};

/// Smallest usable decode buffer: four hex digits of a `\u` escape plus the
/// NUL terminator.
pub const MIN_BUFFER_LEN: usize = 5;

const MAX_DISPATCH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexer {
    Entity,
    String(StringDecoder),
    Number(NumberDecoder),
    Constant(ConstantBuffer),
    /// The decode buffer was too small.
    Invalid,
    Failed(ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BufferMode {
    Stream,
    /// The buffer is the document; `cursor` is the index of the octet being
    /// fed.
    InPlace { cursor: usize },
}

enum Payload {
    None,
    String(Range<usize>),
    Number(Number),
}

/// Streaming JSON validator fed one octet at a time.
///
/// Events go to the callback as soon as they are recognized, together with
/// the nesting depth. A callback error aborts the parse and is returned from
/// [`feed`](Self::feed) unchanged.
///
/// `STACK_BYTES` sizes the nesting stack at eight levels per byte.
///
/// # Examples
///
/// ```
/// use jsonoctet::{Event, Parser};
///
/// let mut buffer = [0u8; 16];
/// let mut sum = 0;
/// let mut parser = Parser::new(&mut buffer, |_, event| {
///     if let Event::Number(number) = event {
///         sum += number.to_i64().unwrap_or(0);
///     }
///     Ok(())
/// });
/// for &octet in b"[1, 2, 39]" {
///     parser.feed(octet).unwrap();
/// }
/// assert!(parser.is_complete());
/// parser.finish().unwrap();
/// assert_eq!(sum, 42);
/// ```
pub struct Parser<'buf, F, const STACK_BYTES: usize = 1> {
    buffer: &'buf mut [u8],
    mode: BufferMode,
    lexer: Lexer,
    grammar: Grammar<STACK_BYTES>,
    options: ParserOptions,
    callback: F,
}

impl<'buf, F> Parser<'buf, F>
where
    F: FnMut(u16, Event<'_>) -> Result<(), ParseError>,
{
    /// Creates a parser with default options and an eight-level stack.
    ///
    /// A `buffer` shorter than [`MIN_BUFFER_LEN`] yields a parser that
    /// rejects every octet with [`ParseError::BadState`]; check
    /// [`is_valid`](Self::is_valid).
    pub fn new(buffer: &'buf mut [u8], callback: F) -> Self {
        Self::with_options(buffer, ParserOptions::default(), callback)
    }
}

impl<'buf, F, const STACK_BYTES: usize> Parser<'buf, F, STACK_BYTES>
where
    F: FnMut(u16, Event<'_>) -> Result<(), ParseError>,
{
    /// Creates a parser with explicit options.
    pub fn with_options(buffer: &'buf mut [u8], options: ParserOptions, callback: F) -> Self {
        let lexer = if buffer.len() < MIN_BUFFER_LEN {
            warn!(
                len = buffer.len(),
                min = MIN_BUFFER_LEN,
                "decode buffer too small, parser will reject all input"
            );
            Lexer::Invalid
        } else {
            Lexer::Entity
        };
        Self {
            buffer,
            mode: BufferMode::Stream,
            lexer,
            grammar: Grammar::new(options.max_depth),
            options,
            callback,
        }
    }

    fn in_place(data: &'buf mut [u8], options: ParserOptions, callback: F) -> Self {
        Self {
            buffer: data,
            mode: BufferMode::InPlace { cursor: 0 },
            lexer: Lexer::Entity,
            grammar: Grammar::new(options.max_depth),
            options,
            callback,
        }
    }

    /// Consumes one octet.
    ///
    /// # Errors
    ///
    /// Returns the first parse or callback error. The parser is halted
    /// afterwards and returns the same error for every later octet.
    pub fn feed(&mut self, octet: u8) -> Result<(), ParseError> {
        match self.lexer {
            Lexer::Invalid => return Err(ParseError::BadState),
            Lexer::Failed(err) => return Err(err),
            _ => {}
        }
        self.dispatch(octet).map_err(|err| self.fail(err, octet))
    }

    /// Feeds every octet of `octets`, stopping at the first error.
    ///
    /// # Errors
    ///
    /// See [`feed`](Self::feed).
    pub fn feed_slice(&mut self, octets: &[u8]) -> Result<(), ParseError> {
        octets.iter().try_for_each(|&octet| self.feed(octet))
    }

    /// Whether a complete document has been seen and no token is pending.
    ///
    /// A bare top-level number is only complete once a delimiter follows it;
    /// [`finish`](Self::finish) supplies that delimiter.
    pub fn is_complete(&self) -> bool {
        self.lexer == Lexer::Entity && self.grammar.state() == GrammarState::Exit
    }

    /// Ends the input.
    ///
    /// Feeds one whitespace octet to close a pending number or literal,
    /// unless a string is open, then checks that the document is complete.
    ///
    /// # Errors
    ///
    /// [`ParseError::UnexpectedEnd`] if the document is incomplete, or any
    /// error raised by the flushed token.
    pub fn finish(mut self) -> Result<(), ParseError> {
        if !matches!(self.lexer, Lexer::String(_)) {
            self.feed(b' ')?;
        }
        if self.is_complete() {
            Ok(())
        } else {
            Err(ParseError::UnexpectedEnd)
        }
    }

    /// Whether the decode buffer was large enough to parse with.
    pub fn is_valid(&self) -> bool {
        self.lexer != Lexer::Invalid
    }

    /// The error that halted the parser, if any.
    pub fn error(&self) -> Option<ParseError> {
        match self.lexer {
            Lexer::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> u16 {
        self.grammar.depth()
    }

    fn fail(&mut self, err: ParseError, octet: u8) -> ParseError {
        debug!(
            code = err.code(),
            octet,
            depth = self.grammar.depth(),
            "parse failed: {err}"
        );
        self.lexer = Lexer::Failed(err);
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        err
    }

    fn dispatch(&mut self, octet: u8) -> Result<(), ParseError> {
        for _ in 0..MAX_DISPATCH {
            if !self.step(octet)? {
                return Ok(());
            }
        }
        Err(ParseError::BadState)
    }

    /// Runs the current sub-machine once. Returns `true` if the octet must be
    /// dispatched again.
    fn step(&mut self, octet: u8) -> Result<bool, ParseError> {
        match self.lexer {
            Lexer::Entity => self.entity(octet),
            Lexer::String(mut decoder) => {
                let limit = self.string_limit();
                match decoder.step(octet, self.buffer, limit)? {
                    StringStep::Continue => self.lexer = Lexer::String(decoder),
                    StringStep::Complete => {
                        self.lexer = Lexer::Entity;
                        self.deliver(Token::String, Payload::String(decoder.range()))?;
                    }
                }
                Ok(false)
            }
            Lexer::Number(mut decoder) => match decoder.step(octet, &self.options)? {
                NumberStep::Continue => {
                    self.lexer = Lexer::Number(decoder);
                    Ok(false)
                }
                NumberStep::Replay => {
                    self.lexer = Lexer::Number(decoder);
                    Ok(true)
                }
                NumberStep::Complete => {
                    self.lexer = Lexer::Entity;
                    self.deliver(Token::Number, Payload::Number(decoder.value()))?;
                    Ok(true)
                }
            },
            Lexer::Constant(mut word) => {
                if octet.is_ascii_lowercase() {
                    word.push(octet)?;
                    self.lexer = Lexer::Constant(word);
                    Ok(false)
                } else {
                    self.lexer = Lexer::Entity;
                    self.deliver(Token::Constant(word.resolve()), Payload::None)?;
                    Ok(true)
                }
            }
            Lexer::Invalid | Lexer::Failed(_) => Err(ParseError::BadState),
        }
    }

    fn entity(&mut self, octet: u8) -> Result<bool, ParseError> {
        match octet {
            b' ' | b'\t' | b'\r' | b'\n' => Ok(false),
            b'"' => {
                self.lexer = Lexer::String(StringDecoder::new(self.string_origin()));
                Ok(false)
            }
            b'-' | b'0'..=b'9' => {
                self.lexer = Lexer::Number(NumberDecoder::new());
                Ok(true)
            }
            b'a'..=b'z' => {
                self.lexer = Lexer::Constant(ConstantBuffer::new());
                Ok(true)
            }
            _ => {
                let token = Token::structural(octet).ok_or(ParseError::UnexpectedCharacter)?;
                self.deliver(token, Payload::None)?;
                Ok(false)
            }
        }
    }

    /// Where a string's decoded bytes start. In place, that is right after
    /// the opening quote, so undecorated strings stay where they are.
    const fn string_origin(&self) -> usize {
        match self.mode {
            BufferMode::Stream => 0,
            BufferMode::InPlace { cursor } => cursor + 1,
        }
    }

    /// Largest end offset a decoded string may reach. Streaming keeps the
    /// last byte free for the terminator; in place the closing quote's slot
    /// takes it.
    const fn string_limit(&self) -> usize {
        match self.mode {
            BufferMode::Stream => self.buffer.len().saturating_sub(1),
            BufferMode::InPlace { .. } => self.buffer.len(),
        }
    }

    fn deliver(&mut self, token: Token, payload: Payload) -> Result<(), ParseError> {
        let (depth, emit) = self.grammar.accept(token)?;
        let event = match (emit, payload) {
            (Emit::None, _) => return Ok(()),
            (Emit::ObjectOpen, _) => Event::ObjectOpen,
            (Emit::ObjectClose, _) => Event::ObjectClose,
            (Emit::ArrayOpen, _) => Event::ArrayOpen,
            (Emit::ArrayClose, _) => Event::ArrayClose,
            (Emit::Key, Payload::String(range)) => Event::Key(string_value(self.buffer, range)?),
            (Emit::String, Payload::String(range)) => {
                Event::String(string_value(self.buffer, range)?)
            }
            (Emit::Number, Payload::Number(number)) => Event::Number(number),
            (Emit::Literal(literal), _) => Event::literal(literal),
            (Emit::Key | Emit::String | Emit::Number, _) => return Err(ParseError::BadState),
        };
        if matches!(
            emit,
            Emit::ObjectOpen | Emit::ObjectClose | Emit::ArrayOpen | Emit::ArrayClose
        ) {
            trace!(depth, kind = ?event.kind(), "container");
        }
        (self.callback)(depth, event)
    }
}

fn string_value(buffer: &[u8], range: Range<usize>) -> Result<StringValue<'_>, ParseError> {
    buffer
        .get(range)
        .map(StringValue::new)
        .ok_or(ParseError::BadState)
}

impl<F, const STACK_BYTES: usize> fmt::Debug for Parser<'_, F, STACK_BYTES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("lexer", &self.lexer)
            .field("grammar", &self.grammar.state())
            .field("depth", &self.grammar.depth())
            .field("buffer_len", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

/// Parses a complete document, decoding strings over the input itself.
///
/// After the call, `data` holds the decoded strings at arbitrary offsets and
/// should be treated as scratch.
///
/// # Errors
///
/// The first parse or callback error, or [`ParseError::UnexpectedEnd`] if
/// `data` ends before the document does.
///
/// # Examples
///
/// ```
/// use jsonoctet::{Event, ParseError, parse_in_place};
///
/// let mut data = *br#"["caf\u00e9"]"#;
/// parse_in_place(&mut data, |_, event| {
///     if let Event::String(value) = event {
///         assert_eq!(value.as_str(), Ok("café"));
///     }
///     Ok(())
/// })
/// .unwrap();
///
/// let mut truncated = *b"[1, 2";
/// assert_eq!(
///     parse_in_place(&mut truncated, |_, _| Ok(())),
///     Err(ParseError::UnexpectedEnd)
/// );
/// ```
pub fn parse_in_place(
    data: &mut [u8],
    callback: impl FnMut(u16, Event<'_>) -> Result<(), ParseError>,
) -> Result<(), ParseError> {
    parse_in_place_with::<1>(data, ParserOptions::default(), callback)
}

/// [`parse_in_place`] with explicit options and stack width.
///
/// # Errors
///
/// See [`parse_in_place`].
pub fn parse_in_place_with<const STACK_BYTES: usize>(
    data: &mut [u8],
    options: ParserOptions,
    callback: impl FnMut(u16, Event<'_>) -> Result<(), ParseError>,
) -> Result<(), ParseError> {
    let len = data.len();
    let mut parser = Parser::<_, STACK_BYTES>::in_place(data, options, callback);
    for cursor in 0..len {
        parser.mode = BufferMode::InPlace { cursor };
        let octet = parser.buffer[cursor];
        parser.feed(octet)?;
    }
    parser.mode = BufferMode::InPlace { cursor: len };
    parser.finish()
}
