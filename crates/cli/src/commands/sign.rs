//! Transaction signing command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use nearlite_codec::Encode;
use nearlite_core::{actions_from_json, sign_transaction, CryptoHash, KeyPairSigner};
use std::path::PathBuf;

use super::read_input;
use crate::keyfile::KeyFile;

#[derive(Args)]
pub struct SignArgs {
    /// Key file of the signing account
    #[arg(long, env = "NEARLITE_KEY_FILE")]
    key_file: PathBuf,

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

    /// Print the signed transaction as JSON too
    #[arg(long)]
    json: bool,
}

pub async fn run(args: SignArgs, network_id: &str) -> Result<()> {
    let key_file = KeyFile::load(&args.key_file)?;
    let keypair = key_file.keypair()?;
    let actions = actions_from_json(&read_input(&args.actions)?).context("Invalid actions")?;

    let signer = KeyPairSigner::for_account(keypair, &key_file.account_id);
    let (digest, signed) = sign_transaction(
        args.receiver_id,
        args.nonce,
        actions,
        args.block_hash,
        &signer,
        &key_file.account_id,
        Some(network_id),
    )
    .await
    .context("Signing failed")?;
    let bytes = signed.encode()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&signed)?);
        println!();
    }
    println!(
        "{}  Signed by {} on {}",
        "✓".green().bold(),
        key_file.account_id.bright_yellow(),
        network_id
    );
    println!("  Hash:   {}", digest.to_string().bright_yellow());
    println!("  Length: {} bytes", bytes.len());
    println!("{}", hex::encode(&bytes));

    Ok(())
}
