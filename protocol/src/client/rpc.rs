//! # JSON-RPC Wire Types
//!
//! Request/response envelopes for the provider's JSON-RPC 2.0 endpoint and
//! the typed parameters/results of the two methods the transaction builder
//! needs.
//!
//! | Method               | Params                 | Result                      |
//! |----------------------|------------------------|-----------------------------|
//! | `user.account`       | `{ "identifier": .. }` | `{ identifier, balance, nonce }` |
//! | `user.estimate_price`| `{ "tx": Transaction }`| `{ "price": "<decimal>" }`  |

use serde::{Deserialize, Serialize};

use crate::config::{METHOD_ACCOUNT, METHOD_ESTIMATE_PRICE};
use crate::transaction::Transaction;

// ---------------------------------------------------------------------------
// RPC Method Enumeration
// ---------------------------------------------------------------------------

/// Supported JSON-RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RpcMethod {
    /// Account state for an identifier.
    #[serde(rename = "user.account")]
    Account,
    /// Fee estimate for an unsigned transaction draft.
    #[serde(rename = "user.estimate_price")]
    EstimatePrice,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => METHOD_ACCOUNT,
            Self::EstimatePrice => METHOD_ESTIMATE_PRICE,
        }
    }
}

// ---------------------------------------------------------------------------
// RPC Request / Response
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    /// JSON-RPC version. Always "2.0".
    pub jsonrpc: String,
    /// Request identifier. Echoed back in the response.
    pub id: serde_json::Value,
    pub method: RpcMethod,
    pub params: serde_json::Value,
}

impl RpcRequest {
    pub fn new(id: serde_json::Value, method: RpcMethod, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method,
            params,
        }
    }
}

/// A JSON-RPC 2.0 response.
///
/// Exactly one of `result` or `error` is set by a conforming provider.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: serde_json::Value,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

// ---------------------------------------------------------------------------
// RPC Errors
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 error object.
///
/// Standard codes: `-32700` parse error, `-32600` invalid request, `-32601`
/// method not found, `-32602` invalid params, `-32603` internal error.
/// Provider-specific codes are in `-32000..=-32099`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Typed Params / Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AccountParams {
    pub identifier: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimatePriceParams<'a> {
    pub tx: &'a Transaction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatePriceResult {
    /// Decimal fee string. Absent or empty means the provider had no price.
    #[serde(default)]
    pub price: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rpc_request_serialization() {
        let req = RpcRequest::new(
            json!(1),
            RpcMethod::Account,
            json!({ "identifier": "0xabc" }),
        );

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "user.account",
                "params": { "identifier": "0xabc" },
            })
        );
    }

    #[test]
    fn method_tags_match_constants() {
        for method in [RpcMethod::Account, RpcMethod::EstimatePrice] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
    }

    #[test]
    fn error_response_parses() {
        let raw = r#"{
            "jsonrpc": "2.0",
            "id": 7,
            "error": { "code": -32002, "message": "account not found: 0xabc" }
        }"#;
        let back: RpcResponse = serde_json::from_str(raw).unwrap();
        assert!(back.result.is_none());
        assert_eq!(back.id, json!(7));

        let err = back.error.unwrap();
        assert_eq!(err.code, -32002);
        assert_eq!(err.message, "account not found: 0xabc");
        assert!(err.data.is_none());
    }

    #[test]
    fn response_without_result_or_error_parses() {
        let back: RpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(back.result.is_none());
        assert!(back.error.is_none());
    }

    #[test]
    fn estimate_result_tolerates_missing_price() {
        let r: EstimatePriceResult = serde_json::from_str("{}").unwrap();
        assert!(r.price.is_none());
        let r: EstimatePriceResult = serde_json::from_str(r#"{"price":"100"}"#).unwrap();
        assert_eq!(r.price.as_deref(), Some("100"));
    }
}
