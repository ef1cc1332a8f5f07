#![allow(missing_docs)]
#![cfg(feature = "serde")]

use jsonoctet::{Event, EventKind, Literal, Number, parse_in_place};

fn numbers(doc: &str) -> Vec<Number> {
    let mut data = doc.as_bytes().to_vec();
    let mut out = Vec::new();
    parse_in_place(&mut data, |_, event| {
        out.extend(event.as_number());
        Ok(())
    })
    .unwrap();
    out
}

#[test]
fn number_serializes_its_fixed_point_fields() {
    let parsed = numbers("[1.500, -25e-3]");
    assert_eq!(
        serde_json::to_value(parsed).unwrap(),
        serde_json::json!([
            {
                "mantissa": 15,
                "decimals": 1,
                "exponent": 0,
                "negative": false,
                "exponent_negative": false
            },
            {
                "mantissa": 25,
                "decimals": 0,
                "exponent": 3,
                "negative": true,
                "exponent_negative": true
            }
        ])
    );
}

#[test]
fn event_kinds_and_literals_serialize_as_names() {
    let kinds = [
        Event::ObjectOpen.kind(),
        Event::ArrayClose.kind(),
        EventKind::Number,
    ];
    assert_eq!(
        serde_json::to_string(&kinds).unwrap(),
        r#"["object_open","array_close","number"]"#
    );
    assert_eq!(
        serde_json::to_string(&[Literal::Null, Literal::True, Literal::False]).unwrap(),
        r#"["null","true","false"]"#
    );
}
