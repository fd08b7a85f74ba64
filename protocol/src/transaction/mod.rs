//! # Transaction Module
//!
//! Construction, signing and verification of provider transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        - PayloadType and SignatureType tags
//! record.rs       - Transaction (JSON form) and HexlifiedTxBody (signed form)
//! state.rs        - UnsignedDraft and EstimatedTx intermediate states
//! builder.rs      - TxnBuilder, drives a build from inputs to signature
//! signing.rs      - salt, encode, sign, recover
//! verification.rs - independent check of a signed record
//! error.rs        - BuildError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Unbuilt**: [`TxnBuilder`] collects payload, payload type and signer.
//! 2. **Estimating**: sender resolved, account nonce read ([`UnsignedDraft`]).
//! 3. **Estimated**: fee merged, nonce fixed ([`EstimatedTx`]).
//! 4. **Signed**: salted, encoded, signed and sender recovered
//!    ([`Transaction`]).
//!
//! ## Notes
//!
//! - The nonce is read once per build and never re-checked. Two concurrent
//!   builds for the same account can observe the same nonce, and the
//!   provider will accept only one of them.
//! - The final `sender` is the base64 recovered public key, while the
//!   account lookup and the estimate draft use the lowercased address.

pub mod builder;
pub mod error;
pub mod record;
pub mod signing;
pub mod state;
pub mod types;
pub mod verification;

pub use builder::{Payload, TxnBuilder};
pub use error::BuildError;
pub use record::{HexlifiedTxBody, MissingField, Transaction, TxBody, TxSignature};
pub use signing::sign_estimated;
pub use state::{EstimatedTx, UnsignedDraft};
pub use types::{PayloadType, SignatureType, UnknownTag};
pub use verification::{verify_transaction, VerificationError};
