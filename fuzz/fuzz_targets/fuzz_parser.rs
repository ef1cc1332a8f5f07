#![no_main]

use arbitrary::Arbitrary;
use jsonoctet::{Event, EventKind, Number, ParseError, Parser, ParserOptions, parse_in_place_with};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    max_depth: u8,
    wide_mantissa: bool,
    max_exponent: u16,
    /// Spare bytes of decode buffer beyond the document length.
    slack: u8,
    data: Vec<u8>,
}

impl Input {
    fn options(&self) -> ParserOptions {
        ParserOptions {
            max_depth: u16::from(self.max_depth),
            max_mantissa: if self.wide_mantissa {
                u64::MAX
            } else {
                u64::from(u32::MAX)
            },
            max_exponent: self.max_exponent,
            panic_on_error: false,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Recorded {
    Bare(EventKind),
    Text(EventKind, Vec<u8>),
    Number(Number),
}

fn record(event: Event<'_>) -> Recorded {
    match event {
        Event::Key(s) | Event::String(s) => Recorded::Text(event.kind(), s.as_bytes().to_vec()),
        Event::Number(n) => Recorded::Number(n),
        other => Recorded::Bare(other.kind()),
    }
}

type Outcome = (Result<(), ParseError>, Vec<(u16, Recorded)>);

fn stream(input: &Input) -> Outcome {
    let mut buffer = vec![0u8; (input.data.len() + 2).max(5) + usize::from(input.slack)];
    let mut events = Vec::new();
    let mut parser = Parser::<_, 32>::with_options(&mut buffer, input.options(), |depth, event| {
        events.push((depth, record(event)));
        Ok(())
    });
    let mut result = Ok(());
    for &octet in &input.data {
        result = parser.feed(octet);
        if let Err(err) = result {
            // Errors are sticky.
            assert_eq!(parser.feed(b' '), Err(err));
            assert!(parser.is_valid());
            assert_eq!(parser.error(), Some(err));
            assert!(!parser.is_complete());
            break;
        }
    }
    if result.is_ok() {
        result = parser.finish();
    }
    (result, events)
}

fn one_shot(input: &Input) -> Outcome {
    let mut data = input.data.clone();
    let mut events = Vec::new();
    let result = parse_in_place_with::<32>(&mut data, input.options(), |depth, event| {
        events.push((depth, record(event)));
        Ok(())
    });
    (result, events)
}

fn differential(input: &Input) {
    let streamed = stream(input);
    let in_place = one_shot(input);
    assert_eq!(streamed, in_place, "drivers disagree on {:?}", input.data);

    for (depth, _) in &streamed.1 {
        assert!(*depth <= u16::from(input.max_depth));
    }
    if let Err(err) = streamed.0 {
        assert!(!err.is_custom());
    }
}

fuzz_target!(|input: Input| differential(&input));
