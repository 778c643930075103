//! Human-readable dump of a quote.

use chrono::{DateTime, Utc};
use serde::Serialize;
use swap_types::{CryptoAmount, SwapEstimate, TxDetails};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct SwapSummary {
	pub memo: String,
	pub expiry: String,
	pub to_address: String,
	pub estimate: EstimateSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateSummary {
	pub input: String,
	pub total_fees: FeesSummary,
	pub slip_bps: i64,
	pub net_output: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inbound_confirmation_seconds: Option<u64>,
	pub outbound_delay_seconds: u64,
	pub can_swap: bool,
	pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeesSummary {
	pub asset: String,
	pub outbound_fee: String,
	pub affiliate_fee: String,
}

impl SwapSummary {
	pub fn new(details: &TxDetails, input: &CryptoAmount) -> Self {
		Self {
			memo: details.memo.clone(),
			expiry: format_expiry(details.expiry),
			to_address: details.to_address.clone(),
			estimate: EstimateSummary::new(&details.estimate, input),
		}
	}

	pub fn to_pretty_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}

	/// Logs the summary, then each reason the swap cannot go ahead.
	pub fn log(&self) {
		match self.to_pretty_json() {
			Ok(json) => info!("Swap estimate:\n{}", json),
			Err(e) => warn!("Failed to render swap estimate: {}", e),
		}
		for reason in &self.estimate.errors {
			warn!("Swap not possible: {}", reason);
		}
	}
}

impl EstimateSummary {
	fn new(estimate: &SwapEstimate, input: &CryptoAmount) -> Self {
		let fees = &estimate.total_fees;
		Self {
			input: input.to_string(),
			total_fees: FeesSummary {
				asset: fees.asset.to_string(),
				outbound_fee: fees.outbound_fee.to_string(),
				affiliate_fee: fees.affiliate_fee.to_string(),
			},
			slip_bps: estimate.slip_bps,
			net_output: estimate.net_output.to_string(),
			inbound_confirmation_seconds: estimate.inbound_confirmation_seconds,
			outbound_delay_seconds: estimate.outbound_delay_seconds,
			can_swap: estimate.can_swap,
			errors: estimate.errors.clone(),
		}
	}
}

// Refused quotes carry no expiry.
fn format_expiry(expiry: u64) -> String {
	if expiry == 0 {
		return String::new();
	}
	i64::try_from(expiry)
		.ok()
		.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
		.map(|at| at.to_rfc3339())
		.unwrap_or_else(|| expiry.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{feasible_details, request};

	#[test]
	fn test_summary_fields() {
		let req = request("ETH.ETH", "0.5", 18);
		let summary = SwapSummary::new(&feasible_details(12), &req.amount);

		assert_eq!(summary.expiry, "2023-11-14T22:13:20+00:00");
		assert_eq!(summary.estimate.input, "0.5 ETH");
		assert_eq!(summary.estimate.total_fees.asset, "BTC.BTC");
		assert_eq!(summary.estimate.outbound_delay_seconds, 12);
		assert!(summary.estimate.can_swap);
	}

	#[test]
	fn test_summary_json() {
		let req = request("ETH.ETH", "0.5", 18);
		let json = SwapSummary::new(&feasible_details(12), &req.amount)
			.to_pretty_json()
			.unwrap();
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();

		assert_eq!(value["memo"], "=:BTC.BTC:bc1qdestination");
		assert_eq!(value["estimate"]["slip_bps"], 5);
		assert_eq!(value["estimate"]["errors"], serde_json::json!([]));
		assert!(value["estimate"].get("inbound_confirmation_seconds").is_none());
	}

	#[test]
	fn test_format_expiry() {
		assert_eq!(format_expiry(0), "");
		assert_eq!(format_expiry(86_400), "1970-01-02T00:00:00+00:00");
		assert_eq!(format_expiry(u64::MAX), u64::MAX.to_string());
	}
}
