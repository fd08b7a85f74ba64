//! The `Estimated → Signing → Signed` transition.
//!
//! Signing is separate from the builder so it can be exercised without a
//! provider: give it an [`EstimatedTx`], a signer and a salt source.
//!
//! The procedure:
//! 1. Draw a fresh [`SALT_LENGTH`]-byte salt.
//! 2. Convert every body field to its wire-scalar form.
//! 3. Canonically encode the body. These are the signed bytes.
//! 4. Ask the signer for a signature over them.
//! 5. Recover the public key from signature and signed bytes.
//! 6. Restore the logical body, put the recovered key in `sender` and
//!    attach the signature.

use super::error::BuildError;
use super::record::{HexlifiedTxBody, Transaction, TxSignature};
use super::state::EstimatedTx;
use crate::codec::to_portable;
use crate::config::SALT_LENGTH;
use crate::crypto::{recover_public_key, SaltSource};
use crate::signer::TxSigner;

/// Signs an estimated transaction and returns the final record.
pub async fn sign_estimated<S>(
    tx: EstimatedTx,
    signer: &S,
    salt_source: &dyn SaltSource,
) -> Result<Transaction, BuildError>
where
    S: TxSigner + ?Sized,
{
    let salt = salt_source.generate(SALT_LENGTH);
    let hex_body = HexlifiedTxBody::new(
        tx.payload(),
        tx.payload_type(),
        tx.fee(),
        tx.nonce(),
        &salt,
    );
    let message = hex_body.encode();

    let signature = signer.sign(&message).await?;
    let public_key = recover_public_key(&message, &signature)?;

    Ok(Transaction {
        sender: to_portable(&public_key),
        body: hex_body.to_body()?,
        signature: Some(TxSignature {
            signature_bytes: to_portable(&signature),
            signature_type: signer.signature_type(),
        }),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::from_portable;
    use crate::crypto::OsSalt;
    use crate::signer::{LocalSigner, SignerError};
    use crate::transaction::types::{PayloadType, SignatureType};
    use async_trait::async_trait;
    use std::collections::HashSet;

    struct FixedSalt(u8);

    impl SaltSource for FixedSalt {
        fn fill(&self, buf: &mut [u8]) {
            buf.fill(self.0);
        }
    }

    struct RefusingSigner;

    #[async_trait]
    impl TxSigner for RefusingSigner {
        async fn address(&self) -> Result<String, SignerError> {
            Ok("0xrefuse".into())
        }

        async fn sign(&self, _message: &[u8]) -> Result<Vec<u8>, SignerError> {
            Err(SignerError::Rejected("user closed the prompt".into()))
        }
    }

    struct GarbageSigner;

    #[async_trait]
    impl TxSigner for GarbageSigner {
        async fn address(&self) -> Result<String, SignerError> {
            Ok("0xgarbage".into())
        }

        async fn sign(&self, _message: &[u8]) -> Result<Vec<u8>, SignerError> {
            Ok(vec![0xab; 12])
        }
    }

    fn estimated() -> EstimatedTx {
        EstimatedTx::new("0xabc", vec![0xc1, 0x01], PayloadType::Execute, "100", 6)
    }

    #[tokio::test]
    async fn signed_record_carries_logical_fields() {
        let signer = LocalSigner::random();
        let tx = sign_estimated(estimated(), &signer, &FixedSalt(9)).await.unwrap();

        assert_eq!(tx.body.payload, "wQE=");
        assert_eq!(tx.body.payload_type, PayloadType::Execute);
        assert_eq!(tx.body.fee.as_deref(), Some("100"));
        assert_eq!(tx.body.nonce, Some(6));
        assert_eq!(
            from_portable(tx.body.salt.as_deref().unwrap()).unwrap(),
            vec![9u8; 16]
        );

        let sig = tx.signature.as_ref().unwrap();
        assert_eq!(sig.signature_type, SignatureType::Secp256k1Personal);
        assert_eq!(from_portable(&sig.signature_bytes).unwrap().len(), 65);
    }

    #[tokio::test]
    async fn sender_is_the_recovered_public_key() {
        let signer = LocalSigner::random();
        let tx = sign_estimated(estimated(), &signer, &OsSalt).await.unwrap();
        assert_eq!(
            from_portable(&tx.sender).unwrap(),
            signer.public_key().to_vec()
        );
    }

    #[tokio::test]
    async fn signed_bytes_are_the_hex_body_encoding() {
        let signer = LocalSigner::random();
        let tx = sign_estimated(estimated(), &signer, &FixedSalt(1)).await.unwrap();

        let expected =
            HexlifiedTxBody::new(&[0xc1, 0x01], PayloadType::Execute, "100", 6, &[1u8; 16])
                .encode();
        assert_eq!(tx.signable_bytes().unwrap(), expected);

        let sig = from_portable(&tx.signature.unwrap().signature_bytes).unwrap();
        assert_eq!(sig, signer.sign_personal(&expected).unwrap());
    }

    #[tokio::test]
    async fn salts_differ_across_signing_attempts() {
        let signer = LocalSigner::random();
        let mut salts = HashSet::new();
        for _ in 0..100 {
            let tx = sign_estimated(estimated(), &signer, &OsSalt).await.unwrap();
            salts.insert(tx.body.salt.unwrap());
        }
        assert_eq!(salts.len(), 100);
    }

    #[tokio::test]
    async fn signer_refusal_is_a_signing_error() {
        let err = sign_estimated(estimated(), &RefusingSigner, &OsSalt)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Signing(SignerError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn unrecoverable_signature_is_a_recovery_error() {
        let err = sign_estimated(estimated(), &GarbageSigner, &OsSalt)
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Recovery(_)));
    }
}
