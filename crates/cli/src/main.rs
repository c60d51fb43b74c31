//! nearlite CLI entry point.

use clap::Parser;

mod commands;
mod keyfile;
mod logging;

use logging::LogFormat;

#[derive(Parser)]
#[command(name = "nearlite")]
#[command(about = "Build, encode and sign NEAR transactions offline", long_about = None)]
struct Cli {
    /// Network the keys and transactions belong to
    #[arg(long, global = true, env = "NEARLITE_NETWORK", default_value = "testnet")]
    network_id: String,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Some(cmd) => {
            if let Err(e) = commands::run(cmd, &cli.network_id).await {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("nearlite - offline NEAR transaction encoder and signer");
            println!("Run 'nearlite --help' for usage information.");
        }
    }
}
