//! Error types for transaction construction.
//!
//! Every failure is terminal for the current `build()` call: nothing is
//! retried, nothing partial is returned. The remote reads are read-only, so
//! the caller may always retry the whole build from scratch.

use thiserror::Error;

use crate::codec::CodecError;
use crate::crypto::RecoveryError;
use crate::signer::SignerError;

#[derive(Debug, Error)]
pub enum BuildError {
    /// No payload or payload supplier was configured.
    #[error("transaction payload is required")]
    MissingPayload,

    #[error("transaction payload type is required")]
    MissingPayloadType,

    #[error("a signer is required to build a transaction")]
    MissingSigner,

    /// The account lookup returned a non-success status, no nonce, or the
    /// call itself failed.
    #[error("could not retrieve account {address}: {reason}")]
    AccountLookup { address: String, reason: String },

    /// The fee estimate returned a non-success status, no fee, or the call
    /// itself failed.
    #[error("could not estimate transaction cost: {0}")]
    Estimation(String),

    /// The signer refused or failed, either resolving its address or
    /// producing the signature.
    #[error("signer failed: {0}")]
    Signing(#[from] SignerError),

    /// The signature does not yield a public key over the signed bytes.
    #[error("could not recover public key from signature: {0}")]
    Recovery(#[from] RecoveryError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}
