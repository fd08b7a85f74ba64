//! Scalar field representations.
//!
//! A body field moves between three forms while a transaction is built:
//! its logical value (a decimal fee string, an integer nonce, ...), a
//! [`HexString`] wire-scalar form that the canonical codec accepts, and the
//! base64 "portable text" form used in JSON transport.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::rlp::minimal_be_bytes;
use super::CodecError;

/// A byte string displayed as `0x`-prefixed lowercase hex.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct HexString(Vec<u8>);

impl HexString {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for HexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexString({})", self)
    }
}

impl FromStr for HexString {
    type Err = CodecError;

    /// Accepts hex with or without the `0x` prefix. Odd lengths are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        hex::decode(digits)
            .map(HexString)
            .map_err(|e| CodecError::InvalidHex(e.to_string()))
    }
}

impl From<Vec<u8>> for HexString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for HexString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Serialize for HexString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HexString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// UTF-8 bytes of `s`.
pub fn string_to_hex(s: &str) -> HexString {
    HexString(s.as_bytes().to_vec())
}

pub fn hex_to_string(hex: &HexString) -> Result<String, CodecError> {
    String::from_utf8(hex.0.clone()).map_err(|_| CodecError::InvalidUtf8)
}

/// Minimal big-endian bytes; zero is the empty string.
pub fn number_to_hex(n: u64) -> HexString {
    HexString(minimal_be_bytes(n))
}

pub fn hex_to_number(hex: &HexString) -> Result<u64, CodecError> {
    let bytes = hex.as_bytes();
    if bytes.len() > 8 {
        return Err(CodecError::IntegerOverflow(bytes.len()));
    }
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

pub fn bytes_to_hex(bytes: &[u8]) -> HexString {
    HexString(bytes.to_vec())
}

/// Base64 (standard alphabet, padded).
pub fn to_portable(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn from_portable(text: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(text)
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_string_display_is_prefixed() {
        let h = HexString::new(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(h.to_string(), "0xdeadbeef");
        assert_eq!(HexString::default().to_string(), "0x");
    }

    #[test]
    fn hex_string_parses_with_and_without_prefix() {
        let a: HexString = "0x0102".parse().unwrap();
        let b: HexString = "0102".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), &[0x01, 0x02]);
    }

    #[test]
    fn hex_string_rejects_odd_length() {
        assert!("0x123".parse::<HexString>().is_err());
        assert!("zz".parse::<HexString>().is_err());
    }

    #[test]
    fn nonce_round_trip() {
        for n in [0u64, 1, 6, 255, 256, 1_000_000, u64::MAX] {
            assert_eq!(hex_to_number(&number_to_hex(n)).unwrap(), n);
        }
        assert!(number_to_hex(0).is_empty());
    }

    #[test]
    fn fee_round_trip() {
        for fee in ["0", "100", "340282366920938463463374607431768211455"] {
            assert_eq!(hex_to_string(&string_to_hex(fee)).unwrap(), fee);
        }
    }

    #[test]
    fn oversized_number_is_rejected() {
        let nine = HexString::new(vec![1; 9]);
        assert!(matches!(
            hex_to_number(&nine),
            Err(CodecError::IntegerOverflow(9))
        ));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bad = HexString::new(vec![0xff, 0xfe]);
        assert!(matches!(hex_to_string(&bad), Err(CodecError::InvalidUtf8)));
    }

    #[test]
    fn portable_round_trip() {
        let bytes = vec![0u8, 1, 2, 250, 251, 252];
        let text = to_portable(&bytes);
        assert_eq!(from_portable(&text).unwrap(), bytes);
        assert_eq!(to_portable(b"hello"), "aGVsbG8=");
    }

    #[test]
    fn hex_string_serde_uses_text_form() {
        let h = HexString::new(vec![0x0a]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, "\"0x0a\"");
        let back: HexString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
