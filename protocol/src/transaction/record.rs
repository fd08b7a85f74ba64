//! The transaction record and its wire-scalar body.
//!
//! A [`Transaction`] is what travels as JSON: the estimate draft (no fee,
//! nonce, salt or signature) and the final signed record share this shape.
//! [`HexlifiedTxBody`] is the same body with every field as a byte string,
//! which is the only form the canonical codec accepts and therefore the
//! form that gets signed.
//!
//! # Signed Byte Format
//!
//! `rlp([payload, payload_type, fee, nonce, salt])` where
//!
//! - `payload`: raw canonical encoding of the hexlified payload
//! - `payload_type`: UTF-8 of the tag (`"execute"`, ...)
//! - `fee`: UTF-8 of the decimal fee string
//! - `nonce`: minimal big-endian integer, zero is empty
//! - `salt`: the 16 raw salt bytes
//!
//! Sender and signature are not part of the signed bytes.

use serde::{Deserialize, Serialize};

use super::types::{PayloadType, SignatureType};
use crate::codec::serial::{
    bytes_to_hex, from_portable, hex_to_number, hex_to_string, number_to_hex, string_to_hex,
    to_portable, HexString,
};
use crate::codec::{rlp, CodecError, RlpItem};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction in its logical (JSON transport) representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Draft: lowercased account address. Signed: base64 of the recovered
    /// 65-byte public key.
    pub sender: String,

    pub body: TxBody,

    /// `None` until signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<TxSignature>,
}

/// Body fields of a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxBody {
    /// Base64 of the canonical payload encoding.
    pub payload: String,

    pub payload_type: PayloadType,

    /// Decimal fee string from the provider's estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,

    /// Base64 of the salt bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

/// Signature attached to a signed [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSignature {
    /// Base64 of the raw signature bytes.
    pub signature_bytes: String,
    pub signature_type: SignatureType,
}

impl Transaction {
    /// Unsigned draft for fee estimation: no fee, nonce, salt or signature.
    pub fn draft(sender: impl Into<String>, payload: &[u8], payload_type: PayloadType) -> Self {
        Self {
            sender: sender.into(),
            body: TxBody {
                payload: to_portable(payload),
                payload_type,
                fee: None,
                nonce: None,
                salt: None,
            },
            signature: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Rebuilds the wire-scalar body from the logical fields.
    pub fn hexlified_body(&self) -> Result<HexlifiedTxBody, MissingField> {
        let fee = self.body.fee.as_deref().ok_or(MissingField("fee"))?;
        let nonce = self.body.nonce.ok_or(MissingField("nonce"))?;
        let salt = self.body.salt.as_deref().ok_or(MissingField("salt"))?;

        let payload = from_portable(&self.body.payload).map_err(|_| MissingField("payload"))?;
        let salt = from_portable(salt).map_err(|_| MissingField("salt"))?;

        Ok(HexlifiedTxBody::new(
            &payload,
            self.body.payload_type,
            fee,
            nonce,
            &salt,
        ))
    }

    /// The exact bytes a signer signs for this record.
    pub fn signable_bytes(&self) -> Result<Vec<u8>, MissingField> {
        Ok(self.hexlified_body()?.encode())
    }
}

/// A body field required for signing is absent or not decodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing or malformed body field `{0}`")]
pub struct MissingField(pub &'static str);

// ---------------------------------------------------------------------------
// HexlifiedTxBody
// ---------------------------------------------------------------------------

/// The transaction body in wire-scalar form: every field a byte string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexlifiedTxBody {
    pub payload: HexString,
    pub payload_type: HexString,
    pub fee: HexString,
    pub nonce: HexString,
    pub salt: HexString,
}

impl HexlifiedTxBody {
    pub fn new(
        payload: &[u8],
        payload_type: PayloadType,
        fee: &str,
        nonce: u64,
        salt: &[u8],
    ) -> Self {
        Self {
            payload: bytes_to_hex(payload),
            payload_type: string_to_hex(payload_type.as_str()),
            fee: string_to_hex(fee),
            nonce: number_to_hex(nonce),
            salt: bytes_to_hex(salt),
        }
    }

    /// `[payload, payload_type, fee, nonce, salt]`.
    pub fn to_rlp(&self) -> RlpItem {
        RlpItem::List(vec![
            RlpItem::from(self.payload.as_bytes()),
            RlpItem::from(self.payload_type.as_bytes()),
            RlpItem::from(self.fee.as_bytes()),
            RlpItem::from(self.nonce.as_bytes()),
            RlpItem::from(self.salt.as_bytes()),
        ])
    }

    /// Canonical bytes to sign.
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode(&self.to_rlp())
    }

    /// Restores the logical body (portable payload and salt, decimal fee,
    /// integer nonce, parsed payload type).
    pub fn to_body(&self) -> Result<TxBody, CodecError> {
        let payload_type = hex_to_string(&self.payload_type)?
            .parse::<PayloadType>()
            .map_err(|e| CodecError::UnknownTag(e.to_string()))?;

        Ok(TxBody {
            payload: to_portable(self.payload.as_bytes()),
            payload_type,
            fee: Some(hex_to_string(&self.fee)?),
            nonce: Some(hex_to_number(&self.nonce)?),
            salt: Some(to_portable(self.salt.as_bytes())),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
