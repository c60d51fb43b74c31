//! Unsigned transaction encoding command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use nearlite_core::{actions_from_json, create_transaction, CryptoHash, PublicKey};

use super::read_input;

#[derive(Args)]
pub struct EncodeArgs {
    /// Signing account
    #[arg(long)]
    signer_id: String,

    /// Access key of the signer, as ed25519:<base58>
    #[arg(long)]
    public_key: PublicKey,

    /// Receiving account
    #[arg(long)]
    receiver_id: String,

    /// Access key nonce
    #[arg(long)]
    nonce: u64,

    /// Recent block hash (base58 or hex)
    #[arg(long)]
    block_hash: CryptoHash,

    /// Actions as a JSON list of builder argument lists, `@file` or `-`
    #[arg(long)]
    actions: String,

    /// Print the transaction as JSON too
    #[arg(long)]
    json: bool,
}

pub fn run(args: EncodeArgs) -> Result<()> {
    let actions = actions_from_json(&read_input(&args.actions)?).context("Invalid actions")?;
    let transaction = create_transaction(
        args.signer_id,
        args.public_key,
        args.receiver_id,
        args.nonce,
        actions,
        args.block_hash,
    );
    let (digest, bytes) = transaction.hash_and_encode()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&transaction)?);
        println!();
    }
    println!("  Hash:   {}", digest.to_string().bright_yellow());
    println!("  Length: {} bytes", bytes.len());
    println!("{}", hex::encode(&bytes));

    Ok(())
}
