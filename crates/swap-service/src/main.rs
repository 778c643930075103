use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use swap_config::{load_config, ConfigLoader, SwapConfig};
use swap_core::{do_single_swap, estimate_swap, SwapOutcome};
use swap_delivery::EvmProvider;
use swap_quote::ThornodeClient;
use swap_types::{SwapError, SwapParams};
use tracing::info;

mod cli;
mod logging;

use cli::{Cli, Command};

/// Exit status for a swap error that was rejected before any network call.
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_FAILURE: u8 = 1;

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let cli = Cli::parse();

	let mut config = logging::with_bootstrap_logging(cli.log_level.as_deref(), || {
		match &cli.config {
			Some(path) => ConfigLoader::from_env_and_file(Some(path.as_path())),
			None => load_config(),
		}
	})
	.context("Failed to load configuration")?;

	if let Some(level) = &cli.log_level {
		config.logging.level = level.clone();
	}
	logging::init_tracing(&config.logging)?;

	match cli.command {
		Command::Estimate(args) => run_estimate(&config, args.into()).await,
		Command::Swap(args) => run_swap(&config, args.into()).await,
		Command::Validate => {
			validate_config(&config);
			Ok(ExitCode::SUCCESS)
		}
	}
}

// The flows log their own failures; only the exit status is left to set.
fn exit_status(error: &SwapError) -> u8 {
	if error.is_input_error() {
		EXIT_INVALID_INPUT
	} else {
		EXIT_FAILURE
	}
}

async fn run_estimate(config: &SwapConfig, params: SwapParams) -> Result<ExitCode> {
	let thornode =
		ThornodeClient::new(&config.thornode).context("Failed to create THORNode client")?;
	info!("Using THORNode at {}", thornode.base_url());

	match estimate_swap(&thornode, &config.swap, &params).await {
		Ok(details) if details.estimate.can_swap => info!("Swap can be executed"),
		Ok(_) => info!("Swap cannot be executed"),
		Err(e) => return Ok(ExitCode::from(exit_status(&e))),
	}
	Ok(ExitCode::SUCCESS)
}

async fn run_swap(config: &SwapConfig, params: SwapParams) -> Result<ExitCode> {
	let thornode =
		ThornodeClient::new(&config.thornode).context("Failed to create THORNode client")?;
	let provider = EvmProvider::new(config.chains.clone());
	info!("Using THORNode at {}", thornode.base_url());

	match do_single_swap(&thornode, &provider, &config.swap, &params).await {
		Ok(SwapOutcome::Submitted { swap, .. }) => {
			info!("Swap complete, track it at {}", swap.url)
		}
		Ok(SwapOutcome::Infeasible(_)) => info!("Swap was not submitted"),
		Err(e) => return Ok(ExitCode::from(exit_status(&e))),
	}
	Ok(ExitCode::SUCCESS)
}

fn validate_config(config: &SwapConfig) {
	info!("Configuration is valid");
	info!(
		"THORNode: {} ({})",
		config.thornode.endpoint(),
		config.thornode.network
	);
	info!(
		"Tolerance: estimate {} bps, execute {} bps",
		config.swap.estimate_tolerance_bps, config.swap.execute_tolerance_bps
	);

	for (chain, chain_config) in &config.chains {
		let signer = if chain_config.private_key.is_some() {
			"signer configured"
		} else {
			"no signer"
		};
		info!(
			"  {}: {} (chain id {}, {})",
			chain, chain_config.rpc_url, chain_config.chain_id, signer
		);
	}
	if config.chains.is_empty() {
		info!("No EVM chains configured; swaps cannot be submitted");
	}
}
