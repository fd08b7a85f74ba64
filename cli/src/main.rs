// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # kwil-tx
//!
//! Entry point for the `kwil-tx` binary. Parses CLI arguments, loads the
//! client configuration, initializes logging and dispatches:
//!
//! - `address`: print the address and public key of a private key
//! - `sign`: build and sign a transaction from a JSON payload
//! - `execute`: build and sign an action call
//! - `verify`: check a signed transaction offline
//! - `version`: print build version information

mod cli;
mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use kwil_tx::action::{ActionBody, ActionInput};
use kwil_tx::client::HttpClient;
use kwil_tx::codec::{from_portable, to_portable};
use kwil_tx::config::{ClientConfig, DEFAULT_SIGNATURE_TYPE, RPC_PATH};
use kwil_tx::crypto::address_from_public_key;
use kwil_tx::signer::LocalSigner;
use kwil_tx::transaction::{verify_transaction, Payload, PayloadType, Transaction, TxnBuilder};

use cli::{Commands, KwilTxCli, ProviderArgs};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = KwilTxCli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::default(),
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    logging::init_logging(level, LogFormat::from_str_lossy(&cli.log_format));

    match cli.command {
        Commands::Address(args) => print_address(&args.key),
        Commands::Sign(args) => {
            let payload = read_payload(args.payload.as_deref(), args.payload_file.as_deref())?;
            let config = apply_overrides(config, &args.provider)?;
            build_and_print(&config, &args.key.key, payload.into(), args.payload_type).await
        }
        Commands::Execute(args) => {
            let body = action_body(&args.namespace, &args.action, &args.inputs);
            let config = apply_overrides(config, &args.provider)?;
            let payload = Payload::supplier(move || body.to_payload());
            build_and_print(&config, &args.key.key, payload, PayloadType::Execute).await
        }
        Commands::Verify(args) => verify(args.file.as_deref()),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn print_address(key_hex: &str) -> Result<()> {
    let signer = LocalSigner::from_hex(key_hex).context("invalid private key")?;
    println!("address    : {}", signer.eth_address());
    println!("public key : {}", to_portable(&signer.public_key()));
    Ok(())
}

fn apply_overrides(mut config: ClientConfig, args: &ProviderArgs) -> Result<ClientConfig> {
    if let Some(provider) = &args.provider {
        config.provider = provider.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    config.validate().context("invalid client configuration")?;
    Ok(config)
}

fn read_payload(inline: Option<&str>, file: Option<&Path>) -> Result<Value> {
    let raw = match (inline, file) {
        (Some(json), _) => json.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload from {}", path.display()))?,
        (None, None) => anyhow::bail!("a payload is required"),
    };
    serde_json::from_str(&raw).context("payload is not valid JSON")
}

fn action_body(namespace: &str, action: &str, inputs: &[(String, String)]) -> ActionBody {
    let input: ActionInput = inputs
        .iter()
        .map(|(name, raw)| {
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()));
            (name.as_str(), value)
        })
        .collect();
    ActionBody::new(namespace, action).with_input(input)
}

async fn build_and_print(
    config: &ClientConfig,
    key_hex: &str,
    payload: Payload,
    payload_type: PayloadType,
) -> Result<()> {
    let signer = LocalSigner::from_hex(key_hex).context("invalid private key")?;
    let client = HttpClient::new(config).context("failed to create provider client")?;

    tracing::info!(
        provider = %config.provider,
        payload_type = %payload_type,
        sender = %signer.eth_address(),
        "building transaction"
    );

    let tx = TxnBuilder::new(&client)
        .payload(payload)
        .payload_type(payload_type)
        .signer(signer)
        .build()
        .await
        .context("failed to build transaction")?;

    tracing::info!(nonce = ?tx.body.nonce, fee = ?tx.body.fee, "transaction signed");
    println!("{}", serde_json::to_string_pretty(&tx)?);
    Ok(())
}

fn verify(file: Option<&Path>) -> Result<()> {
    let raw = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transaction from {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read transaction from stdin")?;
            buf
        }
    };

    let tx: Transaction = serde_json::from_str(&raw).context("not a transaction record")?;
    verify_transaction(&tx).context("verification failed")?;

    let key: [u8; 65] = from_portable(&tx.sender)
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .context("sender is not a public key")?;
    println!("valid, signed by {}", address_from_public_key(&key));
    Ok(())
}

fn print_version() {
    println!("kwil-tx   {}", env!("CARGO_PKG_VERSION"));
    println!("signature {}", DEFAULT_SIGNATURE_TYPE);
    println!("rpc path  {}", RPC_PATH);
}
