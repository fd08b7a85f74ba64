//! # Public-Key Recovery
//!
//! Derives the signer's secp256k1 public key from a personal-message
//! signature and the exact signed bytes. The transaction record carries
//! the recovered key as its sender, so recovery has to agree bit-for-bit
//! with every wallet that produced the signature.
//!
//! Signatures are 65 bytes, `r || s || v`. Wallets disagree on whether `v`
//! is `{0, 1}` or `{27, 28}`; both are accepted.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use thiserror::Error;

use super::hash::{keccak256, personal_message_digest};

/// Length of a recoverable signature: 32-byte r, 32-byte s, 1-byte v.
pub const RECOVERABLE_SIGNATURE_LENGTH: usize = 65;

/// Length of a SEC1 uncompressed public key (`0x04 || x || y`).
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("malformed signature scalars")]
    MalformedSignature,

    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// Recovers the uncompressed public key that signed `message` under the
/// personal-message digest.
pub fn recover_public_key(
    message: &[u8],
    signature: &[u8],
) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH], RecoveryError> {
    if signature.len() != RECOVERABLE_SIGNATURE_LENGTH {
        return Err(RecoveryError::InvalidLength(signature.len()));
    }

    let v = signature[64];
    let normalized = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        other => return Err(RecoveryError::InvalidRecoveryId(other)),
    };
    let recovery_id =
        RecoveryId::from_byte(normalized).ok_or(RecoveryError::InvalidRecoveryId(v))?;
    let sig =
        Signature::from_slice(&signature[..64]).map_err(|_| RecoveryError::MalformedSignature)?;

    let digest = personal_message_digest(message);
    let key = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|_| RecoveryError::RecoveryFailed)?;

    let point = key.to_encoded_point(false);
    let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

/// Ethereum-style address of an uncompressed public key: the last 20
/// bytes of `keccak256(x || y)`, as lowercase `0x` hex.
pub fn address_from_public_key(public_key: &[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH]) -> String {
    let hash = keccak256(&public_key[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::LocalSigner;

    /// SEC1 encoding of the secp256k1 generator point, i.e. the public key
    /// of private key 1.
    const GENERATOR_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
         483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    /// `web3.eth.accounts.sign("Some data", 0x4c0883a6...3f362318)` from the
    /// web3.js documentation.
    const WEB3_SIGNATURE: &str = "b91467e570a6466aa9e9876cbcd013baba02900b8979d43fe208a4a4f339f5fd\
         6007e74cd82e037b800186422fc2da167c747ef045e5d18a5f5d4300f8e1a0291c";

    const WEB3_MESSAGE_HASH: &str =
        "1da44b586eb0729ff70a73c326926f6ed5a25f5b056e7f47fbc6e58d86871655";

    const WEB3_PUBLIC_KEY: &str = "044e3b81af9c2234cad09d679ce6035ed1392347ce64ce405f5dcd36228a25de6e\
         47fd35c4215d1edf53e6f83de344615ce719bdb0fd878f6ed76f06dd277956de";

    #[test]
    fn recovers_web3_signature() {
        let message = b"Some data";
        assert_eq!(hex::encode(personal_message_digest(message)), WEB3_MESSAGE_HASH);

        let signature = hex::decode(WEB3_SIGNATURE).unwrap();
        let recovered = recover_public_key(message, &signature).unwrap();
        assert_eq!(hex::encode(recovered), WEB3_PUBLIC_KEY);
        assert_eq!(
            address_from_public_key(&recovered),
            "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23"
        );
    }

    #[test]
    fn recovers_generator_for_private_key_one() {
        let signer = LocalSigner::from_hex(KEY_ONE).unwrap();
        let message = b"canonical body bytes";
        let signature = signer.sign_personal(message).unwrap();

        let recovered = recover_public_key(message, &signature).unwrap();
        assert_eq!(hex::encode(recovered), GENERATOR_UNCOMPRESSED);
    }

    #[test]
    fn accepts_both_recovery_id_conventions() {
        let signer = LocalSigner::from_hex(KEY_ONE).unwrap();
        let message = b"v convention";
        let mut signature = signer.sign_personal(message).unwrap();
        let with_27 = recover_public_key(message, &signature).unwrap();

        signature[64] -= 27;
        let with_0 = recover_public_key(message, &signature).unwrap();
        assert_eq!(with_27, with_0);
    }

    #[test]
    fn recovery_is_deterministic() {
        let signer = LocalSigner::random();
        let message = b"repeat";
        let signature = signer.sign_personal(message).unwrap();
        let a = recover_public_key(message, &signature).unwrap();
        let b = recover_public_key(message, &signature).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, signer.public_key());
    }

    #[test]
    fn different_message_recovers_different_key() {
        let signer = LocalSigner::random();
        let signature = signer.sign_personal(b"original").unwrap();
        match recover_public_key(b"tampered", &signature) {
            Ok(key) => assert_ne!(key, signer.public_key()),
            Err(e) => assert_eq!(e, RecoveryError::RecoveryFailed),
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            recover_public_key(b"m", &[0u8; 64]),
            Err(RecoveryError::InvalidLength(64))
        );
    }

    #[test]
    fn rejects_unknown_recovery_id() {
        let mut sig = [1u8; 65];
        sig[64] = 5;
        assert_eq!(
            recover_public_key(b"m", &sig),
            Err(RecoveryError::InvalidRecoveryId(5))
        );
    }

    #[test]
    fn rejects_zero_scalars() {
        let mut sig = [0u8; 65];
        sig[64] = 27;
        assert_eq!(
            recover_public_key(b"m", &sig),
            Err(RecoveryError::MalformedSignature)
        );
    }

    #[test]
    fn address_of_known_key() {
        let signer = LocalSigner::from_hex(
            "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        )
        .unwrap();
        assert_eq!(
            address_from_public_key(&signer.public_key()),
            "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23"
        );
    }
}
