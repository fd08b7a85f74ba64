//! Conversion of arbitrary JSON values into byte-string trees.
//!
//! The canonical codec only understands byte strings and lists, so payloads
//! are first mapped onto [`Hexlified`] with one fixed rule per JSON type:
//!
//! | JSON                  | leaf bytes                               |
//! |-----------------------|------------------------------------------|
//! | string                | UTF-8                                     |
//! | non-negative integer  | minimal big-endian, zero is empty        |
//! | integral float <= 2^53| same as the integer (`1.0` is `1`)       |
//! | negative / fractional | UTF-8 of the number's decimal text       |
//! | bool                  | `0x01` / `0x00`                           |
//! | null                  | empty                                     |
//!
//! Objects keep their key order (`serde_json` is built with
//! `preserve_order`) and encode as the list of their values.

use serde_json::Value;

use super::rlp::{self, RlpItem};
use super::serial::{number_to_hex, string_to_hex, HexString};

/// Largest integer a double holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A JSON value whose leaves have been replaced by byte strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hexlified {
    Hex(HexString),
    List(Vec<Hexlified>),
    Object(Vec<(String, Hexlified)>),
}

impl Hexlified {
    /// The encodable tree. Object keys are dropped; values keep their order.
    pub fn to_rlp(&self) -> RlpItem {
        match self {
            Hexlified::Hex(h) => RlpItem::Bytes(h.as_bytes().to_vec()),
            Hexlified::List(items) => RlpItem::List(items.iter().map(Self::to_rlp).collect()),
            Hexlified::Object(fields) => {
                RlpItem::List(fields.iter().map(|(_, v)| v.to_rlp()).collect())
            }
        }
    }
}

/// Maps a JSON value onto its hexlified form. Total.
pub fn hexlify(value: &Value) -> Hexlified {
    match value {
        Value::Null => Hexlified::Hex(HexString::default()),
        Value::Bool(b) => Hexlified::Hex(HexString::new(vec![u8::from(*b)])),
        Value::Number(n) => Hexlified::Hex(hexlify_number(n)),
        Value::String(s) => Hexlified::Hex(string_to_hex(s)),
        Value::Array(items) => Hexlified::List(items.iter().map(hexlify).collect()),
        Value::Object(map) => Hexlified::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), hexlify(v)))
                .collect(),
        ),
    }
}

fn hexlify_number(n: &serde_json::Number) -> HexString {
    if let Some(u) = n.as_u64() {
        return number_to_hex(u);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= MAX_SAFE_INTEGER => {
            number_to_hex(f as u64)
        }
        _ => string_to_hex(&n.to_string()),
    }
}

/// Canonical bytes of a hexlified structure.
pub fn encode(structure: &Hexlified) -> Vec<u8> {
    rlp::encode(&structure.to_rlp())
}

/// `hexlify` followed by `encode`.
pub fn encode_value(value: &Value) -> Vec<u8> {
    encode(&hexlify(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(bytes: &[u8]) -> Hexlified {
        Hexlified::Hex(HexString::from(bytes))
    }

    fn field<'a>(h: &'a Hexlified, key: &str) -> Option<&'a Hexlified> {
        match h {
            Hexlified::Object(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    #[test]
    fn primitives_follow_fixed_rules() {
        assert_eq!(hexlify(&json!(null)), leaf(&[]));
        assert_eq!(hexlify(&json!(true)), leaf(&[0x01]));
        assert_eq!(hexlify(&json!(false)), leaf(&[0x00]));
        assert_eq!(hexlify(&json!(0)), leaf(&[]));
        assert_eq!(hexlify(&json!(1)), leaf(&[0x01]));
        assert_eq!(hexlify(&json!(1024)), leaf(&[0x04, 0x00]));
        assert_eq!(hexlify(&json!("hi")), leaf(b"hi"));
        assert_eq!(hexlify(&json!("")), leaf(&[]));
    }

    #[test]
    fn negative_and_fractional_numbers_use_decimal_text() {
        assert_eq!(hexlify(&json!(-5)), leaf(b"-5"));
        assert_eq!(hexlify(&json!(1.5)), leaf(b"1.5"));
        assert_eq!(hexlify(&json!(-2.0)), leaf(b"-2.0"));
    }

    #[test]
    fn integral_floats_take_the_integer_rule() {
        let float: Value = serde_json::from_str(r#"{"a": 1.0}"#).unwrap();
        assert_eq!(encode_value(&float), encode_value(&json!({"a": 1})));
        assert_eq!(encode_value(&float), vec![0xc1, 0x01]);

        assert_eq!(hexlify(&json!(0.0)), leaf(&[]));
        assert_eq!(hexlify(&json!(1024.0)), leaf(&[0x04, 0x00]));
        assert_eq!(hexlify(&json!(9007199254740992.0)), leaf(&[0x20, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn floats_beyond_exact_range_use_decimal_text() {
        let big = json!(1e300);
        assert_eq!(hexlify(&big), leaf(big.to_string().as_bytes()));
    }

    #[test]
    fn object_keeps_insertion_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        match hexlify(&value) {
            Hexlified::Object(fields) => {
                let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["zeta", "alpha"]);
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn nested_structure_is_isomorphic() {
        let value = json!({ "dbid": "x", "arguments": [[1, "a"], []] });
        let h = hexlify(&value);
        assert_eq!(field(&h, "dbid"), Some(&leaf(b"x")));
        assert_eq!(
            field(&h, "arguments"),
            Some(&Hexlified::List(vec![
                Hexlified::List(vec![leaf(&[0x01]), leaf(b"a")]),
                Hexlified::List(vec![]),
            ]))
        );
        assert_eq!(field(&h, "missing"), None);
    }

    #[test]
    fn single_field_object_encoding() {
        // {"a": 1} -> list [0x01]
        assert_eq!(encode_value(&json!({"a": 1})), vec![0xc1, 0x01]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let value = json!({
            "dbid": "xf617af1ca774ebbd6d23e8fe12c56d41d25a22d81e88f67c6c6ee0d4",
            "action": "create_user",
            "arguments": [["satoshi", 42, true, null, -7]],
        });
        let first = encode_value(&value);
        for _ in 0..10 {
            assert_eq!(encode_value(&value), first);
        }
        let reparsed: Value = serde_json::from_str(&value.to_string()).unwrap();
        assert_eq!(encode_value(&reparsed), first);
    }

    #[test]
    fn key_order_changes_the_encoding() {
        let a: Value = serde_json::from_str(r#"{"x": "1", "y": "2"}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": "2", "x": "1"}"#).unwrap();
        assert_ne!(encode_value(&a), encode_value(&b));
    }
}
