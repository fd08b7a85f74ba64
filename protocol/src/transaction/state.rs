//! Intermediate build states.
//!
//! ```text
//! Unbuilt ──▶ Estimating ──▶ Estimated ──▶ Signing ──▶ Signed
//! TxnBuilder  UnsignedDraft  EstimatedTx   (signing)   Transaction
//! ```
//!
//! Each transition consumes the previous state and returns a new value, so
//! a state can neither be revisited nor mutated after the fact.

use super::error::BuildError;
use super::record::Transaction;
use super::types::PayloadType;

/// Sender resolved and account nonce observed; awaiting a fee estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedDraft {
    sender: String,
    payload: Vec<u8>,
    payload_type: PayloadType,
    account_nonce: u64,
}

impl UnsignedDraft {
    /// `payload` is the canonical encoding of the hexlified payload.
    pub fn new(
        sender: impl Into<String>,
        payload: Vec<u8>,
        payload_type: PayloadType,
        account_nonce: u64,
    ) -> Self {
        Self {
            sender: sender.into(),
            payload,
            payload_type,
            account_nonce,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn account_nonce(&self) -> u64 {
        self.account_nonce
    }

    /// The record sent to the fee estimator: sender, portable payload and
    /// payload type only.
    pub fn estimate_request(&self) -> Transaction {
        Transaction::draft(self.sender.clone(), &self.payload, self.payload_type)
    }

    /// Merges the estimated fee. The nonce is fixed here as the observed
    /// account nonce plus one and is not re-read before signing.
    pub fn into_estimated(self, fee: String) -> Result<EstimatedTx, BuildError> {
        let nonce = self
            .account_nonce
            .checked_add(1)
            .ok_or_else(|| BuildError::AccountLookup {
                address: self.sender.clone(),
                reason: "account nonce overflows".to_string(),
            })?;

        Ok(EstimatedTx {
            sender: self.sender,
            payload: self.payload,
            payload_type: self.payload_type,
            fee,
            nonce,
        })
    }
}

/// Fee and nonce merged; ready to be salted and signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatedTx {
    sender: String,
    payload: Vec<u8>,
    payload_type: PayloadType,
    fee: String,
    nonce: u64,
}

impl EstimatedTx {
    pub fn new(
        sender: impl Into<String>,
        payload: Vec<u8>,
        payload_type: PayloadType,
        fee: impl Into<String>,
        nonce: u64,
    ) -> Self {
        Self {
            sender: sender.into(),
            payload,
            payload_type,
            fee: fee.into(),
            nonce,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Raw canonical payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_type(&self) -> PayloadType {
        self.payload_type
    }

    pub fn fee(&self) -> &str {
        &self.fee
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}
