use std::{
    fmt,
    string::{String, ToString},
    vec,
    vec::Vec,
};

use bstr::ByteSlice;

use crate::{
    Event, MIN_BUFFER_LEN, Number, ParseError, Parser, ParserOptions, parse_in_place_with,
};

mod property_equivalence;

/// An event copied out of the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Owned {
    ObjectOpen,
    ObjectClose,
    ArrayOpen,
    ArrayClose,
    Key(Vec<u8>),
    String(Vec<u8>),
    Number(Number),
    Null,
    True,
    False,
}

impl From<Event<'_>> for Owned {
    fn from(event: Event<'_>) -> Self {
        match event {
            Event::ObjectOpen => Self::ObjectOpen,
            Event::ObjectClose => Self::ObjectClose,
            Event::ArrayOpen => Self::ArrayOpen,
            Event::ArrayClose => Self::ArrayClose,
            Event::Key(key) => Self::Key(key.as_bytes().to_vec()),
            Event::String(value) => Self::String(value.as_bytes().to_vec()),
            Event::Number(number) => Self::Number(number),
            Event::Null => Self::Null,
            Event::True => Self::True,
            Event::False => Self::False,
        }
    }
}

impl fmt::Display for Owned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectOpen => f.write_str("{"),
            Self::ObjectClose => f.write_str("}"),
            Self::ArrayOpen => f.write_str("["),
            Self::ArrayClose => f.write_str("]"),
            Self::Key(key) => write!(f, "key {:?}", key.as_bstr()),
            Self::String(value) => write!(f, "{:?}", value.as_bstr()),
            Self::Number(number) => write!(f, "{number}"),
            Self::Null => f.write_str("null"),
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
        }
    }
}

pub(crate) type Recorded = Vec<(u16, Owned)>;

/// One line per event, `depth: token`.
pub(crate) fn render(events: &Recorded) -> Vec<String> {
    events
        .iter()
        .map(|(depth, event)| std::format!("{depth}: {event}"))
        .collect()
}

pub(crate) fn strict() -> ParserOptions {
    ParserOptions {
        panic_on_error: true,
        ..Default::default()
    }
}

/// Streams `doc` octet by octet through a decode buffer of `buffer_len`
/// bytes, then finishes.
pub(crate) fn stream_with<const N: usize>(
    doc: &[u8],
    buffer_len: usize,
    options: ParserOptions,
) -> (Result<(), ParseError>, Recorded) {
    let mut buffer = vec![0u8; buffer_len];
    let mut events = Vec::new();
    let result = {
        let mut parser = Parser::<_, N>::with_options(&mut buffer, options, |depth, event| {
            events.push((depth, Owned::from(event)));
            Ok(())
        });
        doc.iter()
            .try_for_each(|&octet| parser.feed(octet))
            .and_then(|()| parser.finish())
    };
    (result, events)
}

/// Streams with a decode buffer large enough for any string in `doc`.
pub(crate) fn stream(doc: &[u8], options: ParserOptions) -> (Result<(), ParseError>, Recorded) {
    stream_with::<1>(doc, (doc.len() + 2).max(MIN_BUFFER_LEN), options)
}

pub(crate) fn one_shot_with<const N: usize>(
    doc: &[u8],
    options: ParserOptions,
) -> (Result<(), ParseError>, Recorded) {
    let mut data = doc.to_vec();
    let mut events = Vec::new();
    let result = parse_in_place_with::<N>(&mut data, options, |depth, event| {
        events.push((depth, Owned::from(event)));
        Ok(())
    });
    (result, events)
}

pub(crate) fn one_shot(doc: &[u8], options: ParserOptions) -> (Result<(), ParseError>, Recorded) {
    one_shot_with::<1>(doc, options)
}

/// Runs both drivers, checks they agree and returns the shared outcome.
#[track_caller]
pub(crate) fn both(doc: &[u8], options: ParserOptions) -> (Result<(), ParseError>, Recorded) {
    let streamed = stream(doc, options);
    let in_place = one_shot(doc, options);
    assert_eq!(
        streamed,
        in_place,
        "drivers disagree on {:?}",
        doc.as_bstr().to_string()
    );
    streamed
}
