//! Key generation command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nearlite_core::Keypair;
use std::path::PathBuf;

use crate::keyfile::KeyFile;

#[derive(Args)]
pub struct KeygenArgs {
    /// Account the key belongs to
    account_id: String,

    /// Where to write the key file (default: <ACCOUNT_ID>.json)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub fn run(args: KeygenArgs) -> Result<()> {
    let keypair = Keypair::generate();
    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", args.account_id)));

    let key_file = KeyFile::new(&args.account_id, &keypair);
    key_file.save(&path)?;
    tracing::info!(account_id = %args.account_id, path = %path.display(), "key file written");

    println!("{}", "Generated new keypair:".bold().cyan());
    println!();
    println!("  Account:    {}", args.account_id.bright_yellow());
    println!("  Public Key: {}", key_file.public_key.to_string().bright_yellow());
    println!();
    println!(
        "{}  Saved to: {}",
        "✓".green().bold(),
        path.display().to_string().bright_black()
    );
    println!("{}", "Keep your private key safe!".yellow().bold());

    Ok(())
}
