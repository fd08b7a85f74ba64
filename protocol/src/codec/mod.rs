//! # Canonical Codec
//!
//! Deterministic byte encoding for everything that gets signed. A signer
//! and an independent verifier must derive identical bytes from the same
//! logical data, so nothing in here depends on map iteration order, locale
//! or platform integer width.
//!
//! ```text
//! rlp.rs     - length-prefixed byte-string/list encoder
//! hexlify.rs - JSON value -> byte-string tree
//! serial.rs  - scalar field conversions, HexString, base64 portable text
//! ```

pub mod hexlify;
pub mod rlp;
pub mod serial;

use thiserror::Error;

pub use hexlify::{encode, encode_value, hexlify, Hexlified};
pub use rlp::RlpItem;
pub use serial::{from_portable, to_portable, HexString};

/// Failures when turning a wire-scalar or portable-text field back into its
/// logical value. Encoding itself cannot fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("field is not valid UTF-8")]
    InvalidUtf8,

    #[error("integer of {0} bytes does not fit in u64")]
    IntegerOverflow(usize),

    #[error("{0}")]
    UnknownTag(String),
}
