//! Transaction decoding command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use nearlite_codec::Decode;
use nearlite_core::{SignedTransaction, Transaction};

use super::{decode_hex, read_input};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Transaction,
    Signed,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Hex-encoded bytes, `@file` or `-`
    input: String,

    /// What the bytes hold
    #[arg(long, value_enum, default_value_t = Kind::Signed)]
    kind: Kind,
}

pub fn run(args: DecodeArgs) -> Result<()> {
    let bytes = decode_hex(&read_input(&args.input)?)?;

    match args.kind {
        Kind::Transaction => {
            let transaction = Transaction::decode(&bytes).context("Not a transaction")?;
            println!("{}", serde_json::to_string_pretty(&transaction)?);
            println!();
            println!("  Hash: {}", transaction.hash()?.to_string().bright_yellow());
        }
        Kind::Signed => {
            let signed = SignedTransaction::decode(&bytes).context("Not a signed transaction")?;
            println!("{}", serde_json::to_string_pretty(&signed)?);
            println!();
            println!("  Hash: {}", signed.hash()?.to_string().bright_yellow());
            match signed.verify() {
                Ok(()) => println!("  {}  signature valid", "✓".green().bold()),
                Err(e) => println!("  {}  {}", "✗".red().bold(), e),
            }
        }
    }

    Ok(())
}
