//! # Cryptographic Primitives
//!
//! Everything the signing path needs besides the signer itself:
//!
//! - **Keccak-256** and the personal-message digest wallets sign over.
//! - **secp256k1 public-key recovery** from a 65-byte signature (k256).
//! - **Salt** generation from the OS CSPRNG.
//!
//! These are thin wrappers around audited implementations. No curve
//! arithmetic is done by hand.

pub mod hash;
pub mod recovery;
pub mod salt;

pub use hash::{keccak256, personal_message_digest};
pub use recovery::{address_from_public_key, recover_public_key, RecoveryError};
pub use salt::{OsSalt, SaltSource};
