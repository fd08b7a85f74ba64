//! # CLI Interface
//!
//! Argument structure for `kwil-tx` using `clap` derive. Subcommands:
//! `address`, `sign`, `execute`, `verify` and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use kwil_tx::transaction::PayloadType;

/// Build, sign and verify Kwil transactions.
#[derive(Parser, Debug)]
#[command(
    name = "kwil-tx",
    about = "Build, sign and verify Kwil transactions",
    version,
    propagate_version = true
)]
pub struct KwilTxCli {
    /// Client configuration file (JSON).
    #[arg(long, short = 'c', global = true, env = "KWIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `kwil_tx=debug`. Overrides the config file.
    #[arg(long, global = true, env = "KWIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "KWIL_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the address and public key of a private key.
    Address(KeyArgs),
    /// Build and sign a transaction from a raw JSON payload.
    Sign(SignArgs),
    /// Build and sign an `execute` transaction for a database action.
    Execute(ExecuteArgs),
    /// Verify a signed transaction read from a file or stdin.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Hex-encoded secp256k1 private key.
    ///
    /// Prefer the environment variable over the flag so the key stays out of
    /// shell history.
    #[arg(long, env = "KWIL_PRIVATE_KEY", hide_env_values = true)]
    pub key: String,
}

/// Provider overrides shared by the building commands.
#[derive(Args, Debug)]
pub struct ProviderArgs {
    /// Provider base URL. Overrides the config file.
    #[arg(long, env = "KWIL_PROVIDER")]
    pub provider: Option<String>,

    /// Request timeout in milliseconds. Overrides the config file.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Payload as inline JSON.
    #[arg(long, conflicts_with = "payload_file", required_unless_present = "payload_file")]
    pub payload: Option<String>,

    /// Payload read from a JSON file.
    #[arg(long)]
    pub payload_file: Option<PathBuf>,

    /// Payload type tag, e.g. `execute` or `deploy_schema`.
    #[arg(long, default_value = "execute")]
    pub payload_type: PayloadType,
}

#[derive(Args, Debug)]
pub struct ExecuteArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Database namespace the action belongs to.
    #[arg(long)]
    pub namespace: String,

    /// Action name.
    #[arg(long)]
    pub action: String,

    /// Input as `name=value`. Values that parse as JSON are used as such,
    /// anything else is a string. Repeat for more inputs.
    #[arg(long = "input", short = 'i', value_parser = parse_input)]
    pub inputs: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Signed transaction JSON. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
}

fn parse_input(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        KwilTxCli::command().debug_assert();
    }

    #[test]
    fn sign_parses_payload_type() {
        let cli = KwilTxCli::try_parse_from([
            "kwil-tx",
            "sign",
            "--key",
            "01",
            "--payload",
            "{\"a\":1}",
            "--payload-type",
            "deploy_schema",
        ])
        .unwrap();
        match cli.command {
            Commands::Sign(args) => assert_eq!(args.payload_type, PayloadType::DeploySchema),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn sign_requires_a_payload_source() {
        assert!(KwilTxCli::try_parse_from(["kwil-tx", "sign", "--key", "01"]).is_err());
    }

    #[test]
    fn input_pairs_split_on_first_equals() {
        assert_eq!(
            parse_input("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert!(parse_input("novalue").is_err());
        assert!(parse_input("=1").is_err());
    }
}
