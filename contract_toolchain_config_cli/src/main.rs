use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use contract_toolchain_config::types::{KnownNetwork, ToolchainConfig};
use ethers::{providers::Middleware, types::U256};

/// Print, export or check the contract toolchain config assembled from env.
#[derive(Debug, Parser)]
#[command(name = "contract-toolchain-config", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the config with credentials redacted
    Show {
        /// Only print this network
        #[arg(long)]
        network: Option<KnownNetwork>,
    },
    /// Write the config as JSON to stdout
    Export {
        /// Include signing credentials instead of redacting them
        #[arg(long)]
        include_secrets: bool,
    },
    /// Ask the network's node for its chain id and compare it with the config
    Check {
        #[arg(long)]
        network: KnownNetwork,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = ToolchainConfig::load();

    let output = match cli.command {
        Command::Show { network } => show(&config, network)?,
        Command::Export { include_secrets } => export(&config, include_secrets)?,
        Command::Check { network } => check(&config, network).await?,
    };

    println!("{output}");
    Ok(())
}

fn show(config: &ToolchainConfig, network: Option<KnownNetwork>) -> Result<String> {
    let rendered = match network {
        Some(network) => {
            let entry = config
                .network(network)
                .with_context(|| format!("network `{network}` is not configured"))?;
            serde_json::to_string_pretty(&entry.redacted())?
        }
        None => serde_json::to_string_pretty(&config.redacted())?,
    };

    Ok(rendered)
}

fn export(config: &ToolchainConfig, include_secrets: bool) -> Result<String> {
    if include_secrets {
        config.to_json()
    } else {
        config.redacted().to_json()
    }
    .context("failed to serialize config")
}

async fn check(config: &ToolchainConfig, network: KnownNetwork) -> Result<String> {
    let entry = config
        .network(network)
        .with_context(|| format!("network `{network}` is not configured"))?;

    let provider = entry
        .provider()
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("cannot connect to `{network}`"))?;

    let remote_chain_id = provider
        .get_chainid()
        .await
        .with_context(|| format!("failed to query chain id of `{network}`"))?;
    log::debug!("{network} reports chain id {remote_chain_id}");

    compare_chain_id(network, entry.chain_id, remote_chain_id)
}

/// A configured chain id of `0` (or none) means the network isn't pinned.
fn compare_chain_id(network: KnownNetwork, expected: Option<u64>, remote: U256) -> Result<String> {
    match expected {
        Some(expected) if expected != 0 => {
            if remote != U256::from(expected) {
                bail!(
                    "`{network}` is configured for chain {expected} but the node reports {remote}"
                );
            }
            Ok(format!("{network}: chain id {remote} matches"))
        }
        _ => Ok(format!("{network}: reachable, chain id {remote} (not pinned)")),
    }
}
