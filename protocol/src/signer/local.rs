//! Local secp256k1 private-key signer.
//!
//! Holds the key in memory. Suitable for tests, scripts and servers that
//! manage their own keys; browser and hardware wallets get their own
//! [`TxSigner`] adapters.

use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

use super::{SignerError, TxSigner};
use crate::crypto::hash::personal_message_digest;
use crate::crypto::recovery::{address_from_public_key, UNCOMPRESSED_PUBLIC_KEY_LENGTH};

/// Offset added to the recovery id in the `v` byte.
const RECOVERY_ID_OFFSET: u8 = 27;

/// A secp256k1 key held in process memory.
///
/// Does not implement `Debug` with key bytes or `Serialize`; exporting the
/// key is not supported.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.eth_address())
            .finish()
    }
}

impl LocalSigner {
    /// Fresh key from the OS CSPRNG.
    pub fn random() -> Self {
        Self {
            key: SigningKey::random(&mut OsRng),
        }
    }

    pub fn from_bytes(secret: &[u8]) -> Result<Self, SignerError> {
        SigningKey::from_slice(secret)
            .map(|key| Self { key })
            .map_err(|_| SignerError::InvalidKey)
    }

    /// Parses a 32-byte hex key, `0x` prefix optional.
    pub fn from_hex(secret_hex: &str) -> Result<Self, SignerError> {
        let digits = secret_hex.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits).map_err(|_| SignerError::InvalidKey)?;
        Self::from_bytes(&bytes)
    }

    /// SEC1 uncompressed public key.
    pub fn public_key(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH] {
        let point = self.key.verifying_key().to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Lowercase `0x` address derived from the public key.
    pub fn eth_address(&self) -> String {
        address_from_public_key(&self.public_key())
    }

    /// 65-byte `r || s || v` signature over the personal digest of
    /// `message`, with `v` in `{27, 28}` and low-s form.
    pub fn sign_personal(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        let digest = personal_message_digest(message);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| SignerError::Failed(e.to_string()))?;

        let mut out = Vec::with_capacity(65);
        out.extend_from_slice(&signature.to_bytes());
        out.push(recovery_id.to_byte() + RECOVERY_ID_OFFSET);
        Ok(out)
    }
}

#[async_trait]
impl TxSigner for LocalSigner {
    async fn address(&self) -> Result<String, SignerError> {
        Ok(self.eth_address())
    }

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.sign_personal(message)
    }
}
