//! JSON-RPC over HTTP adapter for [`TxnClient`].

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::rpc::{
    AccountParams, EstimatePriceParams, EstimatePriceResult, RpcMethod, RpcRequest, RpcResponse,
};
use super::{Account, ClientError, GenericResponse, TxnClient};
use crate::config::{ClientConfig, SUCCESS_STATUS};
use crate::transaction::Transaction;

/// Provider client speaking JSON-RPC 2.0 at `{provider}/rpc/v1`.
#[derive(Debug)]
pub struct HttpClient {
    rpc_url: String,
    client: Client,
    next_id: AtomicU64,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(config, client))
    }

    /// Uses a caller-configured reqwest client (proxies, TLS roots, ...).
    pub fn with_client(config: &ClientConfig, client: Client) -> Self {
        Self {
            rpc_url: config.rpc_url(),
            client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Issues one call. Returns the HTTP status with the decoded result, or
    /// `None` data when the provider answered without a result.
    async fn call<P, R>(&self, method: RpcMethod, params: &P) -> Result<(u16, Option<R>), ClientError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let params = serde_json::to_value(params)
            .map_err(|e| ClientError::Malformed(format!("params: {}", e)))?;
        let request = RpcRequest::new(id.into(), method, params);

        debug!(method = method.as_str(), id, url = %self.rpc_url, "rpc request");

        let response = self.client.post(&self.rpc_url).json(&request).send().await?;
        let status = response.status().as_u16();
        if status != SUCCESS_STATUS {
            debug!(method = method.as_str(), status, "rpc non-success status");
            return Ok((status, None));
        }

        let body: RpcResponse = response.json().await?;
        if let Some(err) = body.error {
            return Err(ClientError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let data = match body.result {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(
                serde_json::from_value(value)
                    .map_err(|e| ClientError::Malformed(format!("{}: {}", method.as_str(), e)))?,
            ),
        };
        Ok((status, data))
    }
}

#[async_trait]
impl TxnClient for HttpClient {
    async fn get_account(&self, address: &str) -> Result<GenericResponse<Account>, ClientError> {
        let params = AccountParams {
            identifier: address.to_string(),
        };
        let (status, data) = self.call(RpcMethod::Account, &params).await?;
        Ok(GenericResponse::with_status(status, data))
    }

    async fn estimate_cost(&self, tx: &Transaction) -> Result<GenericResponse<String>, ClientError> {
        let params = EstimatePriceParams { tx };
        let (status, data): (u16, Option<EstimatePriceResult>) =
            self.call(RpcMethod::EstimatePrice, &params).await?;
        let price = data.and_then(|r| r.price).filter(|p| !p.is_empty());
        Ok(GenericResponse::with_status(status, price))
    }
}
