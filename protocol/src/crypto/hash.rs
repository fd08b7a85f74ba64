//! # Hashing
//!
//! Keccak-256 and the personal-message digest that secp256k1 signatures are
//! computed over. Wallets sign `keccak256(prefix || len || message)` rather
//! than the raw message so that a signed transaction can never be replayed
//! as a signed chain transaction.

use tiny_keccak::{Hasher, Keccak};

/// Prefix prepended to every personal message before hashing.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Keccak-256 (the pre-standard SHA-3 padding), 32-byte digest.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// `keccak256("\x19Ethereum Signed Message:\n" || decimal(len) || message)`.
pub fn personal_message_digest(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}
