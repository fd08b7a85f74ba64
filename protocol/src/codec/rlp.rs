//! Length-prefixed byte-string/list encoding (RLP).
//!
//! Only the encode direction exists. Every structure that is signed goes
//! through [`encode`], so the output for a given [`RlpItem`] tree must never
//! change between releases.
//!
//! ```text
//! single byte 0x00..=0x7f        -> the byte itself
//! byte string, len <= 55        -> 0x80 + len, bytes
//! byte string, len  > 55        -> 0xb7 + len(len), len (big-endian), bytes
//! list, payload len <= 55       -> 0xc0 + len, payload
//! list, payload len  > 55       -> 0xf7 + len(len), len (big-endian), payload
//! ```
//!
//! Headers and leaf strings are written by `alloy_rlp`. This module only
//! adds the dynamic tree shape that JSON payloads need.

use alloy_rlp::{BufMut, Encodable, Header};

/// A node in an encodable tree: leaves are byte strings, branches are lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty byte string. Also the encoding of integer zero.
    pub fn empty() -> Self {
        RlpItem::Bytes(Vec::new())
    }

    /// Integer as its minimal big-endian byte string.
    pub fn uint(value: u64) -> Self {
        RlpItem::Bytes(minimal_be_bytes(value))
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        RlpItem::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::Bytes(bytes.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            RlpItem::Bytes(bytes) => bytes.as_slice().encode(out),
            RlpItem::List(items) => {
                Header {
                    list: true,
                    payload_length: list_payload_length(items),
                }
                .encode(out);
                for child in items {
                    child.encode(out);
                }
            }
        }
    }

    fn length(&self) -> usize {
        match self {
            RlpItem::Bytes(bytes) => bytes.as_slice().length(),
            RlpItem::List(items) => {
                let payload_length = list_payload_length(items);
                payload_length + alloy_rlp::length_of_length(payload_length)
            }
        }
    }
}

fn list_payload_length(items: &[RlpItem]) -> usize {
    items.iter().map(Encodable::length).sum()
}

/// Encodes an item tree into its canonical bytes.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    alloy_rlp::encode(item)
}

/// Big-endian bytes of `value` with leading zeros stripped. Zero is empty.
pub fn minimal_be_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}
