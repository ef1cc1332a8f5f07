#![expect(missing_docs)]

mod common;

use std::fmt::Write;

use crate::common::{DOCUMENT, render_stream};

#[test]
#[allow(clippy::too_many_lines)]
fn snapshot_document_events() {
    insta::assert_snapshot!(render_stream(DOCUMENT.as_bytes(), 32), @r#"
    {
      "moderation":
      {
        "decision":
        "allow"
        "reason":
        null
      }
      "request":
      {
        "filename":
        "example.rs"
        "options":
        {
          "opt_level":
          2
          "features":
          [
            "serde"
            "tokio"
          ]
        }
      }
      "snippets":
      [
        "fn main() {}"
        "println!(\"hi\")"
      ]
      "scores":
      [
        5e-1
        -1e3
        1225e-2
      ]
      "flags":
      [
        true
        false
      ]
      "escaped":
      "tab\there é"
    }
    "#);
}

#[test]
fn snapshot_truncated_document() {
    let cut = DOCUMENT.find("\"scores\"").unwrap_or(DOCUMENT.len());
    insta::assert_snapshot!(render_stream(&DOCUMENT.as_bytes()[..cut], 32), @r#"
    {
      "moderation":
      {
        "decision":
        "allow"
        "reason":
        null
      }
      "request":
      {
        "filename":
        "example.rs"
        "options":
        {
          "opt_level":
          2
          "features":
          [
            "serde"
            "tokio"
          ]
        }
      }
      "snippets":
      [
        "fn main() {}"
        "println!(\"hi\")"
      ]
    error: unexpected end of document (7)
    "#);
}

#[test]
fn snapshot_error_messages() {
    let mut out = String::new();
    for doc in [
        "[1,2,]",
        "1 2",
        "{",
        "nul",
        "\"\\x\"",
        "-",
        "?",
        "4294967296",
        "\"0123456789\"",
        "[[[[[[[[[",
    ] {
        let rendered = render_stream(doc.as_bytes(), 8);
        let last = rendered.lines().last().unwrap_or_default();
        writeln!(out, "{doc:<12} {last}").unwrap();
    }
    insta::assert_snapshot!(out, @r#"
    [1,2,]       error: bad grammar (5)
    1 2          error: trailing data after end of document (6)
    {            error: unexpected end of document (7)
    nul          error: bad constant (8)
    "\x"         error: malformed escape sequence (1)
    -            error: malformed number (2)
    ?            error: unexpected character (4)
    4294967296   error: number overflow (10)
    "0123456789" error: string overflow (11)
    [[[[[[[[[    error: nesting too deep (9)
    "#);
}
