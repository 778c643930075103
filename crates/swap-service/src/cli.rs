//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use swap_types::SwapParams;

#[derive(Parser, Debug)]
#[command(name = "swapper")]
#[command(about = "Estimate and execute THORChain swaps", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
	/// Path to configuration file (TOML, JSON or YAML)
	#[arg(short, long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Log level override (trace, debug, info, warn, error)
	#[arg(short, long)]
	pub log_level: Option<String>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Ask THORNode for a quote without executing it
	Estimate(SwapArgs),
	/// Quote, submit the deposit and wait for the outbound
	Swap(SwapArgs),
	/// Validate the configuration and exit
	Validate,
}

#[derive(Args, Debug, Clone)]
pub struct SwapArgs {
	/// Amount to swap, in whole units of the source asset
	#[arg(long)]
	pub amount: Decimal,

	/// Decimal precision the amount is expressed in
	#[arg(long)]
	pub decimals: u8,

	/// Source asset, e.g. ETH.ETH or ETH.USDC-0xA0b8...
	#[arg(long = "from")]
	pub from_asset: String,

	/// Destination asset, e.g. BTC.BTC
	#[arg(long = "to")]
	pub to_asset: String,

	/// Address receiving the destination asset
	#[arg(long)]
	pub destination: String,
}

impl From<SwapArgs> for SwapParams {
	fn from(args: SwapArgs) -> Self {
		SwapParams {
			amount: args.amount,
			decimals: args.decimals,
			from_asset: args.from_asset,
			to_asset: args.to_asset,
			destination_address: args.destination,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_estimate() {
		let cli = Cli::try_parse_from([
			"swapper",
			"--log-level",
			"debug",
			"estimate",
			"--amount",
			"0.25",
			"--decimals",
			"18",
			"--from",
			"ETH.ETH",
			"--to",
			"BTC.BTC",
			"--destination",
			"bc1qdestination",
		])
		.unwrap();

		assert_eq!(cli.log_level.as_deref(), Some("debug"));
		let Command::Estimate(args) = cli.command else {
			panic!("expected estimate");
		};
		let params = SwapParams::from(args);
		assert_eq!(params.amount, "0.25".parse::<Decimal>().unwrap());
		assert_eq!(params.decimals, 18);
		assert_eq!(params.from_asset, "ETH.ETH");
		assert_eq!(params.to_asset, "BTC.BTC");
		assert_eq!(params.destination_address, "bc1qdestination");
	}

	#[test]
	fn test_parse_validate_with_config() {
		let cli = Cli::try_parse_from(["swapper", "-c", "swapper.yaml", "validate"]).unwrap();
		assert_eq!(cli.config, Some(PathBuf::from("swapper.yaml")));
		assert!(matches!(cli.command, Command::Validate));
	}

	#[test]
	fn test_swap_requires_amount() {
		let result = Cli::try_parse_from([
			"swapper",
			"swap",
			"--decimals",
			"8",
			"--from",
			"BTC.BTC",
			"--to",
			"ETH.ETH",
			"--destination",
			"0xabc",
		]);
		assert!(result.is_err());
	}

	#[test]
	fn test_rejects_malformed_amount() {
		let result = Cli::try_parse_from([
			"swapper",
			"estimate",
			"--amount",
			"lots",
			"--decimals",
			"8",
			"--from",
			"BTC.BTC",
			"--to",
			"ETH.ETH",
			"--destination",
			"0xabc",
		]);
		assert!(result.is_err());
	}
}
