//! Constant-memory JSON validation, one octet at a time.
//!
//! The parser never allocates. All of its state lives in a [`Parser`] value:
//! a lexer sub-machine for strings, numbers and literals, a grammar with a
//! bit-packed nesting stack, and a borrowed decode buffer that string escapes
//! are resolved into. Every recognized token reaches a callback as an
//! [`Event`] together with its nesting depth.
//!
//! Numbers are reported in fixed point ([`Number`]) and only converted to
//! floating point on request.
//!
//! Two entry points share the same machine:
//!
//! - [`Parser::new`] and [`Parser::feed`] for input that arrives an octet at
//!   a time, with a caller-owned decode buffer of at least
//!   [`MIN_BUFFER_LEN`] bytes.
//! - [`parse_in_place`] for a complete document held in a mutable buffer,
//!   which doubles as the decode buffer.
//!
//! ```
//! use jsonoctet::{Event, ParseError, Parser};
//!
//! let mut buffer = [0u8; 32];
//! let mut keys = 0;
//! let mut parser = Parser::new(&mut buffer, |depth, event| match event {
//!     Event::Key(key) if key == "secret" => Err(ParseError::Custom(200)),
//!     Event::Key(_) => {
//!         assert_eq!(depth, 1);
//!         keys += 1;
//!         Ok(())
//!     }
//!     _ => Ok(()),
//! });
//! parser.feed_slice(br#"{"a": 1, "b": [true, null]}"#).unwrap();
//! parser.finish().unwrap();
//! assert_eq!(keys, 2);
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

mod error;
mod escape;
mod event;
mod grammar;
mod literal;
mod nesting;
mod number;
mod options;
mod parser;
mod string;

#[cfg(test)]
mod tests;

pub use error::{CUSTOM_ERROR_BASE, ParseError, UnknownCode};
pub use event::{Event, EventKind, StringValue};
pub use literal::Literal;
pub use number::Number;
pub use options::ParserOptions;
pub use parser::{MIN_BUFFER_LEN, Parser, parse_in_place, parse_in_place_with};
