//! Enum tags carried in every transaction body and signature.
//!
//! The tag strings are part of the signed bytes (`payload_type` is hexlified
//! from its tag), so renaming a variant's tag is a breaking change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// PayloadType
// ---------------------------------------------------------------------------

/// What the payload of a transaction asks the network to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadType {
    DeploySchema,
    DropSchema,
    /// Execute a database action.
    Execute,
    CallAction,
    ValidatorJoin,
    ValidatorApprove,
    ValidatorLeave,
    ValidatorRemove,
    Transfer,
}

impl PayloadType {
    pub const ALL: [PayloadType; 9] = [
        Self::DeploySchema,
        Self::DropSchema,
        Self::Execute,
        Self::CallAction,
        Self::ValidatorJoin,
        Self::ValidatorApprove,
        Self::ValidatorLeave,
        Self::ValidatorRemove,
        Self::Transfer,
    ];

    /// The wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeploySchema => "deploy_schema",
            Self::DropSchema => "drop_schema",
            Self::Execute => "execute",
            Self::CallAction => "call_action",
            Self::ValidatorJoin => "validator_join",
            Self::ValidatorApprove => "validator_approve",
            Self::ValidatorLeave => "validator_leave",
            Self::ValidatorRemove => "validator_remove",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized enum tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} tag: {tag:?}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub tag: String,
}

impl FromStr for PayloadType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTag {
                kind: "payload type",
                tag: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// SignatureType
// ---------------------------------------------------------------------------

/// Scheme a signature was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignatureType {
    /// secp256k1 ECDSA over the personal-message digest, 65 bytes `r||s||v`.
    #[default]
    #[serde(rename = "secp256k1_ep")]
    Secp256k1Personal,
}

impl SignatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secp256k1Personal => "secp256k1_ep",
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureType {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "secp256k1_ep" => Ok(Self::Secp256k1Personal),
            other => Err(UnknownTag {
                kind: "signature type",
                tag: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
