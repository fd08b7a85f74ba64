//! Independent verification of signed transactions.
//!
//! A verifier holds only the signed record. It rebuilds the hex body from
//! the logical fields, re-derives the signed bytes, recovers the public key
//! from the attached signature and compares it with `sender`. Nothing from
//! the signing session is needed, which is what makes the canonical
//! encoding worth having.
//!
//! Checks run cheapest first: field presence, then decoding, then curve
//! recovery.

use thiserror::Error;

use super::record::{MissingField, Transaction};
use crate::codec::from_portable;
use crate::crypto::{recover_public_key, RecoveryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("transaction is unsigned")]
    MissingSignature,

    #[error(transparent)]
    MissingField(#[from] MissingField),

    /// Nonces are account nonce plus one, so zero is never issued.
    #[error("invalid nonce: must be > 0")]
    ZeroNonce,

    #[error("malformed signature: {reason}")]
    MalformedSignature { reason: String },

    #[error("malformed sender: {reason}")]
    MalformedSender { reason: String },

    #[error("signature does not recover a public key: {0}")]
    Recovery(#[from] RecoveryError),

    /// The recovered key is not the one named in `sender`.
    #[error("signature was produced by a different key than sender {sender}")]
    SenderMismatch { sender: String },
}

/// Verifies that `tx` is signed by the key in its `sender` field.
pub fn verify_transaction(tx: &Transaction) -> Result<(), VerificationError> {
    let signature = tx
        .signature
        .as_ref()
        .ok_or(VerificationError::MissingSignature)?;

    if tx.body.nonce == Some(0) {
        return Err(VerificationError::ZeroNonce);
    }
    let message = tx.signable_bytes()?;

    let signature_bytes = from_portable(&signature.signature_bytes).map_err(|e| {
        VerificationError::MalformedSignature {
            reason: e.to_string(),
        }
    })?;
    let sender_key =
        from_portable(&tx.sender).map_err(|e| VerificationError::MalformedSender {
            reason: e.to_string(),
        })?;

    let recovered = recover_public_key(&message, &signature_bytes)?;
    if recovered.as_slice() != sender_key.as_slice() {
        return Err(VerificationError::SenderMismatch {
            sender: tx.sender.clone(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
