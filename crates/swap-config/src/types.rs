//! Configuration types.

use crate::serde_helpers::{deserialize_chain_map, serialize_chain_map};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use swap_types::Chain;

/// Slippage tolerance used when only estimating.
pub const DEFAULT_ESTIMATE_TOLERANCE_BPS: u32 = 300;
/// Slippage tolerance used when the quote is going to be executed.
pub const DEFAULT_EXECUTE_TOLERANCE_BPS: u32 = 1000;
/// Outbound delays at or below this many seconds get the minimum wait.
pub const DEFAULT_FAST_OUTBOUND_THRESHOLD_SECS: u64 = 6;
/// Minimum confirmation wait after a submission.
pub const DEFAULT_MIN_WAIT_MS: u64 = 12_000;
/// Interval between progress lines.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
/// Value of the `x-client-id` header sent to THORNode.
pub const DEFAULT_CLIENT_ID: &str = "swapper";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapConfig {
	#[serde(default)]
	pub thornode: ThornodeConfig,
	#[serde(default)]
	pub swap: SwapSettings,
	#[serde(
		default,
		deserialize_with = "deserialize_chain_map",
		serialize_with = "serialize_chain_map"
	)]
	pub chains: BTreeMap<Chain, EvmChainConfig>,
	#[serde(default)]
	pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	#[default]
	Mainnet,
	Stagenet,
}

impl Network {
	pub fn default_thornode_url(&self) -> &'static str {
		match self {
			Network::Mainnet => "https://thornode.ninerealms.com",
			Network::Stagenet => "https://stagenet-thornode.ninerealms.com",
		}
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Network::Mainnet => f.write_str("mainnet"),
			Network::Stagenet => f.write_str("stagenet"),
		}
	}
}

/// Where and how to reach THORNode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThornodeConfig {
	#[serde(default)]
	pub network: Network,
	/// Overrides the network's default endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(default = "default_client_id")]
	pub client_id: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

impl ThornodeConfig {
	pub fn endpoint(&self) -> &str {
		self.url
			.as_deref()
			.unwrap_or_else(|| self.network.default_thornode_url())
			.trim_end_matches('/')
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

impl Default for ThornodeConfig {
	fn default() -> Self {
		Self {
			network: Network::default(),
			url: None,
			client_id: default_client_id(),
			timeout_ms: default_timeout_ms(),
		}
	}
}

/// Tunables for the estimate and execute flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapSettings {
	#[serde(default = "default_estimate_tolerance_bps")]
	pub estimate_tolerance_bps: u32,
	#[serde(default = "default_execute_tolerance_bps")]
	pub execute_tolerance_bps: u32,
	#[serde(default = "default_fast_outbound_threshold_secs")]
	pub fast_outbound_threshold_secs: u64,
	#[serde(default = "default_min_wait_ms")]
	pub min_wait_ms: u64,
	#[serde(default = "default_poll_interval_ms")]
	pub poll_interval_ms: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub affiliate_address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub affiliate_bps: Option<u32>,
}

impl SwapSettings {
	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms)
	}
}

impl Default for SwapSettings {
	fn default() -> Self {
		Self {
			estimate_tolerance_bps: DEFAULT_ESTIMATE_TOLERANCE_BPS,
			execute_tolerance_bps: DEFAULT_EXECUTE_TOLERANCE_BPS,
			fast_outbound_threshold_secs: DEFAULT_FAST_OUTBOUND_THRESHOLD_SECS,
			min_wait_ms: DEFAULT_MIN_WAIT_MS,
			poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
			affiliate_address: None,
			affiliate_bps: None,
		}
	}
}

/// Connection settings for an EVM source chain.
#[derive(Clone, Serialize, Deserialize)]
pub struct EvmChainConfig {
	pub rpc_url: String,
	pub chain_id: u64,
	/// Hex-encoded signing key. Usually injected through the environment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub private_key: Option<String>,
	/// Transaction explorer prefix, the hash is appended.
	pub explorer_url: String,
}

impl fmt::Debug for EvmChainConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EvmChainConfig")
			.field("rpc_url", &self.rpc_url)
			.field("chain_id", &self.chain_id)
			.field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
			.field("explorer_url", &self.explorer_url)
			.finish()
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
	#[serde(default = "default_log_level")]
	pub level: String,
	#[serde(default)]
	pub json: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: default_log_level(),
			json: false,
		}
	}
}

fn default_client_id() -> String {
	DEFAULT_CLIENT_ID.to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_estimate_tolerance_bps() -> u32 {
	DEFAULT_ESTIMATE_TOLERANCE_BPS
}

fn default_execute_tolerance_bps() -> u32 {
	DEFAULT_EXECUTE_TOLERANCE_BPS
}

fn default_fast_outbound_threshold_secs() -> u64 {
	DEFAULT_FAST_OUTBOUND_THRESHOLD_SECS
}

fn default_min_wait_ms() -> u64 {
	DEFAULT_MIN_WAIT_MS
}

fn default_poll_interval_ms() -> u64 {
	DEFAULT_POLL_INTERVAL_MS
}

fn default_log_level() -> String {
	"info".to_string()
}
