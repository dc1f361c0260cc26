//! editionmint CLI - mint NFT editions from the command line.
//!
//! Interactive tool that pins artwork and metadata to IPFS, calls the
//! editions contract over JSON-RPC and records the result.

pub mod commands;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod publish;
pub mod record;

use clap::Parser;
use colored::Colorize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = commands::Cli::parse();

    if let Err(e) = commands::execute(cli).await {
        eprintln!("{}", format!("Error: {e:#}").red());
        std::process::exit(1);
    }

    Ok(())
}
