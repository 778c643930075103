//! THORNode response payloads.
//!
//! Amounts are decimal strings in 1e8 units regardless of the asset's own
//! precision.

use serde::Deserialize;

/// Response of `GET /thorchain/quote/swap`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSwapResponse {
	#[serde(default)]
	pub inbound_address: Option<String>,
	#[serde(default)]
	pub inbound_confirmation_seconds: Option<u64>,
	#[serde(default)]
	pub outbound_delay_seconds: Option<u64>,
	pub fees: QuoteFees,
	#[serde(default)]
	pub router: Option<String>,
	pub expiry: u64,
	#[serde(default)]
	pub warning: Option<String>,
	#[serde(default)]
	pub notes: Option<String>,
	#[serde(default)]
	pub recommended_min_amount_in: Option<String>,
	#[serde(default)]
	pub memo: Option<String>,
	pub expected_amount_out: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteFees {
	pub asset: String,
	#[serde(default)]
	pub affiliate: Option<String>,
	#[serde(default)]
	pub outbound: Option<String>,
	#[serde(default)]
	pub liquidity: Option<String>,
	#[serde(default)]
	pub total: Option<String>,
	#[serde(default)]
	pub slippage_bps: i64,
	#[serde(default)]
	pub total_bps: Option<i64>,
}

/// One entry of `GET /thorchain/inbound_addresses`.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundAddress {
	pub chain: String,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub router: Option<String>,
	#[serde(default)]
	pub halted: bool,
	#[serde(default)]
	pub global_trading_paused: bool,
	#[serde(default)]
	pub chain_trading_paused: bool,
}

/// Error body returned by THORNode; older nodes use `error`, newer ones the
/// gRPC gateway `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
	#[serde(default)]
	pub error: Option<String>,
	#[serde(default)]
	pub message: Option<String>,
}

impl ErrorResponse {
	pub fn reason(&self) -> Option<&str> {
		self.error
			.as_deref()
			.or(self.message.as_deref())
			.filter(|reason| !reason.is_empty())
	}
}
