//! CLI command implementations.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use editionmint_sdk::{ChainClient, RpcClient};
use editionmint_types::Address;
use std::path::PathBuf;

use crate::config::{CliConfig, NetworkConfig};
use crate::output::*;
use crate::pipeline::{MintPipeline, MintRun};
use crate::prompt::TermPrompt;
use crate::publish::PinataClient;

/// Main CLI.
#[derive(Parser)]
#[command(name = "editionmint")]
#[command(about = "Mint NFT editions with IPFS-pinned metadata")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Network name from the config file
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// RPC endpoint URL, overriding the selected network's
    #[arg(long, global = true)]
    pub rpc: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Mint a new edition interactively
    Mint {
        /// Editions contract address, overriding the configured one
        #[arg(short, long)]
        contract: Option<String>,

        /// Directory the mint record is written into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Check an account balance
    Balance {
        /// Address (defaults to the node's first account)
        address: Option<String>,
    },

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config commands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set a config value
    Set {
        /// Key (network, contract, gateway, pinning_api_key,
        /// pinning_secret_api_key, rpc.<network>)
        key: String,
        /// Value
        value: String,
    },
    /// Get a config value
    Get {
        /// Key
        key: String,
    },
    /// Reset to defaults
    Reset,
}

/// Execute a CLI command.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load()?;
    let (network_name, network) = config.network(cli.network.as_deref())?;
    let rpc_url = cli.rpc.unwrap_or_else(|| network.rpc_url.clone());

    match cli.command {
        Commands::Mint {
            contract,
            output_dir,
        } => execute_mint(&config, &network_name, &network, &rpc_url, contract, output_dir).await,
        Commands::Balance { address } => execute_balance(&rpc_url, address).await,
        Commands::Config(cmd) => execute_config(cmd),
    }
}

/// Run the interactive mint pipeline.
async fn execute_mint(
    config: &CliConfig,
    network_name: &str,
    network: &NetworkConfig,
    rpc_url: &str,
    contract: Option<String>,
    output_dir: PathBuf,
) -> anyhow::Result<()> {
    let contract_input = contract
        .or_else(|| config.contract_address.clone())
        .context(
            "No contract address configured; pass --contract or run: \
             editionmint config set contract <addr>",
        )?;
    let contract_address: Address = contract_input
        .parse()
        .map_err(|e| anyhow!("Invalid contract address {contract_input:?}: {e}"))?;

    let (api_key, secret_api_key) = config.pinning_credentials()?;

    let chain = RpcClient::new(rpc_url);
    match chain.chain_id().await {
        Ok(chain_id) if chain_id != network.chain_id => {
            print_warning(&format!(
                "Node reports chain ID {chain_id}, but network '{network_name}' expects {}",
                network.chain_id
            ));
        }
        Ok(_) => {}
        Err(e) => return Err(anyhow!("Cannot reach the node at {rpc_url}: {e}")),
    }

    let store = PinataClient::new(&config.pinning_api_url, api_key, secret_api_key);
    let pipeline = MintPipeline::new(
        chain,
        store,
        TermPrompt,
        network_name,
        contract_address,
        &config.gateway_url,
        output_dir,
    );

    match pipeline.run().await? {
        MintRun::Minted { .. } => Ok(()),
        MintRun::Declined => {
            print_info("Mint aborted; nothing was submitted.");
            Ok(())
        }
    }
}

/// Query and print a balance.
async fn execute_balance(rpc_url: &str, address: Option<String>) -> anyhow::Result<()> {
    let chain = RpcClient::new(rpc_url);

    let address = match address {
        Some(s) => s
            .parse::<Address>()
            .map_err(|e| anyhow!("Invalid address {s:?}: {e}"))?,
        None => *chain
            .accounts()
            .await?
            .first()
            .context("The node manages no accounts; pass an address explicitly")?,
    };

    let balance = chain.balance(&address).await?;
    println!("Address: {}", address.to_string().bright_cyan());
    println!("Balance: {}", format_eth(balance).bright_green());
    Ok(())
}

/// Execute config commands.
fn execute_config(cmd: ConfigCommands) -> anyhow::Result<()> {
    let mut config = CliConfig::load()?;

    match cmd {
        ConfigCommands::Show => {
            print_heading("CLI Configuration");
            println!("Default network: {}", config.default_network.bright_cyan());
            println!(
                "Contract:        {}",
                config
                    .contract_address
                    .as_deref()
                    .unwrap_or("(not set)")
                    .bright_green()
            );
            println!("Gateway:         {}", config.gateway_url.bright_cyan());
            println!("Pinning API:     {}", config.pinning_api_url.bright_cyan());
            println!(
                "Pinning key:     {}",
                if config.pinning_api_key.is_some() {
                    "(set)".green()
                } else {
                    "(not set, will use PINATA_API_KEY)".yellow()
                }
            );
            println!();
            println!("{}", "Networks:".bold());
            for (name, network) in &config.networks {
                let default_marker = if *name == config.default_network {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "  • {} - {} (chain {}){}",
                    name.bright_green(),
                    network.rpc_url.bright_cyan(),
                    network.chain_id,
                    default_marker.yellow()
                );
            }
        }

        ConfigCommands::Set { key, value } => {
            let value_clone = value.clone();
            match key.as_str() {
                "network" | "default_network" => {
                    if !config.networks.contains_key(&value) {
                        anyhow::bail!(
                            "Unknown network '{}'; known networks: {}",
                            value,
                            config.networks.keys().cloned().collect::<Vec<_>>().join(", ")
                        );
                    }
                    config.default_network = value;
                }
                "contract" | "contract_address" => {
                    value
                        .parse::<Address>()
                        .map_err(|e| anyhow!("Invalid contract address {value:?}: {e}"))?;
                    config.contract_address = Some(value);
                }
                "gateway" | "gateway_url" => config.gateway_url = value,
                "pinning_api_key" => config.pinning_api_key = Some(value),
                "pinning_secret_api_key" => config.pinning_secret_api_key = Some(value),
                k if k.starts_with("rpc.") => {
                    let name = &k[4..];
                    let network = config
                        .networks
                        .get_mut(name)
                        .with_context(|| format!("Unknown network '{name}'"))?;
                    network.rpc_url = value;
                }
                _ => {
                    print_error(&format!("Unknown config key: {key}"));
                    return Ok(());
                }
            }

            config.save()?;
            print_success(&format!("Set {} = {}", key, value_clone));
        }

        ConfigCommands::Get { key } => {
            let value = match key.as_str() {
                "network" | "default_network" => config.default_network.clone(),
                "contract" | "contract_address" => config
                    .contract_address
                    .clone()
                    .unwrap_or_else(|| "(not set)".to_string()),
                "gateway" | "gateway_url" => config.gateway_url.clone(),
                k if k.starts_with("rpc.") => {
                    let name = &k[4..];
                    config
                        .networks
                        .get(name)
                        .with_context(|| format!("Unknown network '{name}'"))?
                        .rpc_url
                        .clone()
                }
                _ => {
                    print_error(&format!("Unknown config key: {key}"));
                    return Ok(());
                }
            };
            println!("{} = {}", key.bright_cyan(), value.bright_green());
        }

        ConfigCommands::Reset => {
            let confirm = Confirm::new()
                .with_prompt("Reset all configuration to defaults?")
                .default(false)
                .interact()?;

            if confirm {
                config = CliConfig::default();
                config.save()?;
                print_success("Configuration reset to defaults");
            }
        }
    }

    Ok(())
}
