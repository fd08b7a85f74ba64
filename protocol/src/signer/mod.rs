//! # Signer Capability
//!
//! The transaction builder never touches key material. It talks to a
//! [`TxSigner`], which can be a local private key, a browser wallet bridge,
//! a hardware device or a remote signing service. All of them expose the
//! same two operations:
//!
//! - `address()`: the identifier the account is looked up by. May suspend
//!   while a user approves the connection.
//! - `sign(bytes)`: a recoverable signature over the personal-message
//!   digest of `bytes`.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::DEFAULT_SIGNATURE_TYPE;
use crate::transaction::types::SignatureType;

pub mod local;

pub use local::LocalSigner;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The user or device declined the request.
    #[error("signing request rejected: {0}")]
    Rejected(String),

    #[error("invalid private key")]
    InvalidKey,

    #[error("signer unavailable: {0}")]
    Unavailable(String),

    #[error("signing failed: {0}")]
    Failed(String),
}

/// Capability set required to sign a transaction.
#[async_trait]
pub trait TxSigner: Send + Sync {
    /// Account identifier of the signing key.
    async fn address(&self) -> Result<String, SignerError>;

    /// Signs `message` and returns the raw signature bytes.
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;

    /// Scheme of the signatures `sign` produces.
    fn signature_type(&self) -> SignatureType {
        DEFAULT_SIGNATURE_TYPE
    }
}

#[async_trait]
impl<T: TxSigner + ?Sized> TxSigner for Arc<T> {
    async fn address(&self) -> Result<String, SignerError> {
        (**self).address().await
    }

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        (**self).sign(message).await
    }

    fn signature_type(&self) -> SignatureType {
        (**self).signature_type()
    }
}

#[async_trait]
impl<T: TxSigner + ?Sized> TxSigner for Box<T> {
    async fn address(&self) -> Result<String, SignerError> {
        (**self).address().await
    }

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        (**self).sign(message).await
    }

    fn signature_type(&self) -> SignatureType {
        (**self).signature_type()
    }
}
