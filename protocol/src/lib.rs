// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # kwil-tx - Transaction Construction Library
//!
//! Builds, signs and verifies transactions for a Kwil provider node. The
//! hard part is not talking to the node. It is making sure that the bytes a
//! wallet signs are exactly the bytes a verifier re-derives, on any
//! platform, from nothing but the JSON record.
//!
//! ## Architecture
//!
//! - **codec**: RLP, JSON-to-bytes hexlify, scalar conversions, base64.
//! - **crypto**: Keccak-256, personal-message digest, secp256k1 recovery, salt.
//! - **signer**: The `TxSigner` capability and a local-key adapter.
//! - **client**: The `TxnClient` provider seam and its JSON-RPC adapter.
//! - **transaction**: Build state machine, signing, verification.
//! - **action**: Case-insensitive action inputs and the execute payload.
//! - **config**: Protocol constants and client configuration.
//!
//! ## Quick Look
//!
//! ```text
//! payload ─▶ hexlify ─▶ rlp ─▶ base64 ─▶ estimate ─▶ fee, nonce+1
//!                                                       │
//!            Transaction ◀─ recover ◀─ sign ◀─ rlp ◀─ salt
//! ```

pub mod action;
pub mod client;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod signer;
pub mod transaction;

pub use action::{ActionBody, ActionInput};
pub use client::{HttpClient, TxnClient};
pub use signer::{LocalSigner, TxSigner};
pub use transaction::{verify_transaction, BuildError, PayloadType, Transaction, TxnBuilder};
