//! CLI commands module.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::io::Read;

mod decode;
mod encode;
mod keygen;
mod schema;
mod sign;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a key pair and write it to a key file
    Keygen(keygen::KeygenArgs),
    /// Encode an unsigned transaction
    Encode(encode::EncodeArgs),
    /// Build and sign a transaction with a key file
    Sign(sign::SignArgs),
    /// Decode a transaction from hex
    Decode(decode::DecodeArgs),
    /// Show registered type layouts
    Schema(schema::SchemaArgs),
}

pub async fn run(cmd: Commands, network_id: &str) -> Result<()> {
    match cmd {
        Commands::Keygen(args) => keygen::run(args),
        Commands::Encode(args) => encode::run(args),
        Commands::Sign(args) => sign::run(args, network_id).await,
        Commands::Decode(args) => decode::run(args),
        Commands::Schema(args) => schema::run(args),
    }
}

/// Resolve a text argument: `-` reads stdin, `@path` reads a file,
/// anything else is taken literally.
pub(crate) fn read_input(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else if let Some(path) = arg.strip_prefix('@') {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
    } else {
        Ok(arg.to_string())
    }
}

/// Decode hex, tolerating surrounding whitespace and a `0x` prefix.
pub(crate) fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).context("Invalid hex input")
}
