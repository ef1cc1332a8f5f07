#![allow(missing_docs)]
#![allow(dead_code)]

use std::fmt::Write;

use jsonoctet::{Event, ParseError, Parser, ParserOptions};

pub const DOCUMENT: &str = r#"
{
    "moderation": {"decision": "allow", "reason": null},
    "request": {
        "filename": "example.rs",
        "options": {"opt_level": 2, "features": ["serde", "tokio"]}
    },
    "snippets": ["fn main() {}", "println!(\"hi\")"],
    "scores": [0.5, -1e3, 12.250],
    "flags": [true, false],
    "escaped": "tab\there \u00e9"
}
"#;

pub fn render_event(out: &mut String, depth: u16, event: &Event<'_>) {
    let indent = usize::from(depth) * 2;
    match event {
        Event::ObjectOpen => writeln!(out, "{:indent$}{{", ""),
        Event::ObjectClose => writeln!(out, "{:indent$}}}", ""),
        Event::ArrayOpen => writeln!(out, "{:indent$}[", ""),
        Event::ArrayClose => writeln!(out, "{:indent$}]", ""),
        Event::Key(key) => writeln!(out, "{:indent$}{key:?}:", ""),
        Event::String(value) => writeln!(out, "{:indent$}{value:?}", ""),
        Event::Number(number) => writeln!(out, "{:indent$}{number}", ""),
        Event::Null => writeln!(out, "{:indent$}null", ""),
        Event::True => writeln!(out, "{:indent$}true", ""),
        Event::False => writeln!(out, "{:indent$}false", ""),
    }
    .unwrap();
}

/// Streams `doc` one octet at a time and renders every event, one per line,
/// indented by depth. An error ends the output with `error: ...`.
pub fn render_stream(doc: &[u8], buffer_len: usize) -> String {
    let mut out = String::new();
    let mut buffer = vec![0u8; buffer_len];
    let result = {
        let mut parser = Parser::new(&mut buffer, |depth, event| {
            render_event(&mut out, depth, &event);
            Ok(())
        });
        parser.feed_slice(doc).and_then(|()| parser.finish())
    };
    if let Err(err) = result {
        writeln!(out, "error: {err} ({})", err.code()).unwrap();
    }
    out
}

/// Collects `(depth, rendered event)` pairs from a streaming parse.
pub fn collect_stream(
    doc: &[u8],
    buffer_len: usize,
    options: ParserOptions,
) -> (Result<(), ParseError>, Vec<(u16, String)>) {
    let mut buffer = vec![0u8; buffer_len];
    let mut events = Vec::new();
    let result = {
        let mut parser = Parser::<_, 1>::with_options(&mut buffer, options, |depth, event| {
            let mut line = String::new();
            render_event(&mut line, 0, &event);
            events.push((depth, line));
            Ok(())
        });
        parser.feed_slice(doc).and_then(|()| parser.finish())
    };
    (result, events)
}
