//! # Provider Client
//!
//! The two remote reads the transaction builder depends on, behind the
//! [`TxnClient`] trait:
//!
//! 1. **Account lookup**: the current nonce of the sender.
//! 2. **Fee estimate**: the price of an unsigned draft.
//!
//! Both are read-only. A failed call never leaves remote state half-changed,
//! so retrying a whole build from scratch is always safe.
//!
//! [`HttpClient`] is the JSON-RPC adapter for a real provider node. Tests
//! and embedders can implement [`TxnClient`] directly.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::SUCCESS_STATUS;
use crate::transaction::Transaction;

pub mod http;
pub mod rpc;

pub use http::HttpClient;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

/// A status-tagged remote result.
///
/// A response only counts as a success when `status` is
/// [`SUCCESS_STATUS`] *and* `data` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericResponse<T> {
    pub status: u16,
    pub data: Option<T>,
}

impl<T> GenericResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: SUCCESS_STATUS,
            data: Some(data),
        }
    }

    pub fn with_status(status: u16, data: Option<T>) -> Self {
        Self { status, data }
    }

    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS && self.data.is_some()
    }

    /// The data of a successful response, `None` otherwise.
    pub fn into_success(self) -> Option<T> {
        if self.is_success() {
            self.data
        } else {
            None
        }
    }
}

/// Account state as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub identifier: String,
    #[serde(default)]
    pub balance: String,
    /// Last nonce used by the account. Providers send it as a JSON number
    /// or a decimal string.
    #[serde(deserialize_with = "nonce_from_number_or_string")]
    pub nonce: u64,
}

fn nonce_from_number_or_string<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(d)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Remote collaborator for account state and fee estimation.
#[async_trait]
pub trait TxnClient: Send + Sync {
    async fn get_account(&self, address: &str) -> Result<GenericResponse<Account>, ClientError>;

    /// `tx` is an unsigned draft: sender, portable payload and payload type.
    async fn estimate_cost(&self, tx: &Transaction) -> Result<GenericResponse<String>, ClientError>;
}

#[async_trait]
impl<T: TxnClient + ?Sized> TxnClient for std::sync::Arc<T> {
    async fn get_account(&self, address: &str) -> Result<GenericResponse<Account>, ClientError> {
        (**self).get_account(address).await
    }

    async fn estimate_cost(&self, tx: &Transaction) -> Result<GenericResponse<String>, ClientError> {
        (**self).estimate_cost(tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_requires_status_and_data() {
        assert!(GenericResponse::ok(1).is_success());
        assert!(!GenericResponse::<u8>::with_status(200, None).is_success());
        assert!(!GenericResponse::with_status(404, Some(1)).is_success());
        assert_eq!(GenericResponse::with_status(500, Some(1)).into_success(), None);
    }

    #[test]
    fn account_nonce_accepts_number_and_string() {
        let a: Account =
            serde_json::from_str(r#"{"identifier":"0xab","balance":"10","nonce":5}"#).unwrap();
        let b: Account =
            serde_json::from_str(r#"{"identifier":"0xab","balance":"10","nonce":"5"}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.nonce, 5);
    }

    #[test]
    fn account_nonce_rejects_garbage() {
        assert!(serde_json::from_str::<Account>(r#"{"identifier":"x","nonce":"five"}"#).is_err());
        assert!(serde_json::from_str::<Account>(r#"{"identifier":"x"}"#).is_err());
    }
}
