use std::vec::Vec;

use quickcheck::{QuickCheck, TestResult};

use super::{Owned, arbitrary::Document, one_shot, stream, stream_with};
use crate::{MIN_BUFFER_LEN, ParseError, ParserOptions};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: a well-formed document is accepted by both drivers, and they
/// report the same events at the same depths.
#[test]
fn well_formed_documents_agree() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document) -> bool {
        let streamed = stream(&doc.0, ParserOptions::default());
        let in_place = one_shot(&doc.0, ParserOptions::default());
        streamed.0.is_ok() && streamed == in_place
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document) -> bool);
}

/// Property: on arbitrary bytes the drivers fail (or succeed) identically and
/// deliver the same events up to that point.
#[test]
fn arbitrary_bytes_agree() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>) -> bool {
        stream(&bytes, ParserOptions::default()) == one_shot(&bytes, ParserOptions::default())
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

/// Property: mutating one byte of a well-formed document never makes the
/// drivers disagree.
#[test]
fn corrupted_documents_agree() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, at: usize, octet: u8) -> TestResult {
        let mut bytes = doc.0;
        if bytes.is_empty() {
            return TestResult::discard();
        }
        let len = bytes.len();
        bytes[at % len] = octet;
        TestResult::from_bool(
            stream(&bytes, ParserOptions::default()) == one_shot(&bytes, ParserOptions::default()),
        )
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document, usize, u8) -> TestResult);
}

/// Property: the smallest streaming buffer that works is one byte longer than
/// the longest decoded string; one byte less overflows.
#[test]
fn decode_buffer_fits_the_longest_string() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document) -> TestResult {
        let (result, events) = one_shot(&doc.0, ParserOptions::default());
        if result.is_err() {
            return TestResult::failed();
        }
        let longest = events
            .iter()
            .filter_map(|(_, event)| match event {
                Owned::Key(bytes) | Owned::String(bytes) => Some(bytes.len()),
                _ => None,
            })
            .max();
        let Some(longest) = longest else {
            return TestResult::discard();
        };
        let needed = (longest + 1).max(MIN_BUFFER_LEN);
        let (fits, _) = stream_with::<1>(&doc.0, needed, ParserOptions::default());
        if fits.is_err() {
            return TestResult::failed();
        }
        if needed == MIN_BUFFER_LEN {
            return TestResult::passed();
        }
        let (short, _) = stream_with::<1>(&doc.0, needed - 1, ParserOptions::default());
        TestResult::from_bool(short == Err(ParseError::StringOverflow))
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Document) -> TestResult);
}
