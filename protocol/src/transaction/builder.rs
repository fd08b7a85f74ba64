//! Transaction construction via the builder pattern.
//!
//! [`TxnBuilder`] collects the caller's inputs and drives one transaction
//! through the full lifecycle on `.build()`:
//!
//! 1. Check that payload, payload type and signer are set.
//! 2. Resolve the sender address and read its account nonce.
//! 3. Canonically encode the payload and request a fee estimate.
//! 4. Fix `nonce = account nonce + 1` and hand off to [`sign_estimated`].
//!
//! The builder holds no key material and no provider state. Everything it
//! needs arrives through [`TxSigner`] and [`TxnClient`], so any wallet or
//! provider integration plugs in without changes here.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use super::error::BuildError;
use super::record::Transaction;
use super::signing::sign_estimated;
use super::state::UnsignedDraft;
use super::types::PayloadType;
use crate::client::TxnClient;
use crate::codec::encode_value;
use crate::crypto::{OsSalt, SaltSource};
use crate::signer::TxSigner;

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The payload argument: a value now, or a function producing it later.
///
/// Either way it is resolved exactly once per `build()`.
pub enum Payload {
    Literal(Value),
    Supplier(Box<dyn FnOnce() -> Value + Send>),
}

impl Payload {
    pub fn supplier<F>(f: F) -> Self
    where
        F: FnOnce() -> Value + Send + 'static,
    {
        Payload::Supplier(Box::new(f))
    }

    pub fn resolve(self) -> Value {
        match self {
            Payload::Literal(value) => value,
            Payload::Supplier(f) => f(),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Literal(value)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Payload::Supplier(_) => f.write_str("Supplier(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// TxnBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for signed transactions.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> Result<(), kwil_tx::transaction::BuildError> {
/// use kwil_tx::client::HttpClient;
/// use kwil_tx::config::ClientConfig;
/// use kwil_tx::signer::LocalSigner;
/// use kwil_tx::transaction::{PayloadType, TxnBuilder};
///
/// let client = HttpClient::new(&ClientConfig::default()).expect("client");
/// let tx = TxnBuilder::new(&client)
///     .payload(serde_json::json!({ "a": 1 }))
///     .payload_type(PayloadType::Execute)
///     .signer(LocalSigner::random())
///     .build()
///     .await?;
/// assert!(tx.is_signed());
/// # Ok(())
/// # }
/// ```
pub struct TxnBuilder<'a, C: TxnClient + ?Sized> {
    client: &'a C,
    payload: Option<Payload>,
    payload_type: Option<PayloadType>,
    signer: Option<Box<dyn TxSigner>>,
    salt_source: Box<dyn SaltSource>,
}

impl<'a, C: TxnClient + ?Sized> TxnBuilder<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            payload: None,
            payload_type: None,
            signer: None,
            salt_source: Box::new(OsSalt),
        }
    }

    /// Sets the payload from a value (or an already-built [`Payload`]).
    pub fn payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Sets a deferred payload, produced when `build()` runs.
    pub fn payload_with<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Value + Send + 'static,
    {
        self.payload = Some(Payload::supplier(f));
        self
    }

    pub fn payload_type(mut self, payload_type: PayloadType) -> Self {
        self.payload_type = Some(payload_type);
        self
    }

    pub fn signer(mut self, signer: impl TxSigner + 'static) -> Self {
        self.signer = Some(Box::new(signer));
        self
    }

    /// Replaces the OS-backed salt source.
    pub fn salt_source(mut self, source: impl SaltSource + 'static) -> Self {
        self.salt_source = Box::new(source);
        self
    }

    /// Runs the whole lifecycle and returns the signed transaction.
    ///
    /// Fails fast: the first failing step aborts the build and nothing after
    /// it runs. In particular a failed account lookup means no fee estimate
    /// is requested.
    pub async fn build(self) -> Result<Transaction, BuildError> {
        let payload = self.payload.ok_or(BuildError::MissingPayload)?;
        let payload_type = self.payload_type.ok_or(BuildError::MissingPayloadType)?;
        let signer = self.signer.ok_or(BuildError::MissingSigner)?;
        let payload = payload.resolve();

        // Unbuilt -> Estimating
        let address = signer.address().await?.to_lowercase();
        debug!(address = %address, "looking up account");

        let account = match self.client.get_account(&address).await {
            Ok(resp) => resp.into_success().ok_or_else(|| BuildError::AccountLookup {
                address: address.clone(),
                reason: "unsuccessful response or missing account data".to_string(),
            })?,
            Err(e) => {
                return Err(BuildError::AccountLookup {
                    address,
                    reason: e.to_string(),
                })
            }
        };
        debug!(address = %address, nonce = account.nonce, "account resolved");

        // Estimating -> Estimated
        let draft = UnsignedDraft::new(
            address,
            encode_value(&payload),
            payload_type,
            account.nonce,
        );

        let fee = self
            .client
            .estimate_cost(&draft.estimate_request())
            .await
            .map_err(|e| BuildError::Estimation(e.to_string()))?
            .into_success()
            .ok_or_else(|| {
                BuildError::Estimation("unsuccessful response or missing fee".to_string())
            })?;
        debug!(sender = %draft.sender(), fee = %fee, "fee estimated");

        let estimated = draft.into_estimated(fee)?;

        // Estimated -> Signing -> Signed
        sign_estimated(estimated, signer.as_ref(), self.salt_source.as_ref()).await
    }
}

impl<C: TxnClient + ?Sized> fmt::Debug for TxnBuilder<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxnBuilder")
            .field("payload", &self.payload)
            .field("payload_type", &self.payload_type)
            .field("signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
