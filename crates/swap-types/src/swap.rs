//! Swap request, estimate and submission types.

use crate::amount::CryptoAmount;
use crate::asset::Asset;
use crate::errors::{Result, SwapError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Basis points in 100%.
pub const MAX_BASIS_POINTS: u32 = 10_000;

/// Caller-supplied swap parameters before any parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapParams {
	pub amount: Decimal,
	pub decimals: u8,
	pub from_asset: String,
	pub to_asset: String,
	pub destination_address: String,
}

/// A fully validated quote request.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
	pub from_asset: Asset,
	pub destination_asset: Asset,
	pub amount: CryptoAmount,
	pub destination_address: String,
	pub tolerance_bps: u32,
	pub affiliate_address: Option<String>,
	pub affiliate_bps: Option<u32>,
}

impl SwapRequest {
	/// Parses and validates `params` into a request.
	///
	/// Fails with `InvalidAsset`/`InvalidAmount` without touching the network.
	pub fn from_params(params: &SwapParams, tolerance_bps: u32) -> Result<Self> {
		let from_asset: Asset = params.from_asset.parse()?;
		let destination_asset: Asset = params.to_asset.parse()?;
		if tolerance_bps > MAX_BASIS_POINTS {
			return Err(SwapError::Config(format!(
				"tolerance of {} bps exceeds {}",
				tolerance_bps, MAX_BASIS_POINTS
			)));
		}

		let amount = CryptoAmount::from_decimal(params.amount, params.decimals, from_asset.clone())?;

		Ok(Self {
			from_asset,
			destination_asset,
			amount,
			destination_address: params.destination_address.trim().to_string(),
			tolerance_bps,
			affiliate_address: None,
			affiliate_bps: None,
		})
	}

	pub fn with_affiliate(mut self, address: impl Into<String>, bps: u32) -> Self {
		self.affiliate_address = Some(address.into());
		self.affiliate_bps = Some(bps);
		self
	}
}

/// Fees charged on the outbound leg, denominated in `asset`.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalFees {
	pub asset: Asset,
	pub outbound_fee: CryptoAmount,
	pub affiliate_fee: CryptoAmount,
}

/// Projection of a swap's outcome as computed by the quoting service.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapEstimate {
	pub can_swap: bool,
	pub total_fees: TotalFees,
	pub slip_bps: i64,
	pub net_output: CryptoAmount,
	pub inbound_confirmation_seconds: Option<u64>,
	pub outbound_delay_seconds: u64,
	pub errors: Vec<String>,
}

/// Everything needed to submit the quoted swap on the source chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TxDetails {
	pub memo: String,
	/// Unix timestamp after which the quote must not be used.
	pub expiry: u64,
	/// Inbound vault the deposit is sent to.
	pub to_address: String,
	/// Router contract for EVM source chains.
	pub router: Option<String>,
	pub estimate: SwapEstimate,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedSwap {
	pub hash: String,
	pub url: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;

	fn params(from: &str, to: &str) -> SwapParams {
		SwapParams {
			amount: Decimal::from_str("0.5").unwrap(),
			decimals: 18,
			from_asset: from.to_string(),
			to_asset: to.to_string(),
			destination_address: " bc1qexample ".to_string(),
		}
	}

	#[test]
	fn test_from_params() {
		let request = SwapRequest::from_params(&params("ETH.ETH", "BTC.BTC"), 300).unwrap();
		assert_eq!(request.tolerance_bps, 300);
		assert_eq!(request.amount.base_units(), 500_000_000_000_000_000);
		assert_eq!(request.destination_address, "bc1qexample");
		assert!(request.affiliate_address.is_none());
	}

	#[test]
	fn test_from_params_rejects_bad_assets() {
		let err = SwapRequest::from_params(&params("not-an-asset", "BTC.BTC"), 300).unwrap_err();
		assert!(matches!(err, SwapError::InvalidAsset(_)));

		let err = SwapRequest::from_params(&params("ETH.ETH", "ETH/"), 300).unwrap_err();
		assert!(matches!(err, SwapError::InvalidAsset(_)));
	}

	#[test]
	fn test_same_asset_pair_is_left_to_the_quote() {
		let request = SwapRequest::from_params(&params("ETH.ETH", "ETH.ETH"), 300).unwrap();
		assert_eq!(request.from_asset, request.destination_asset);
	}

	#[test]
	fn test_from_params_rejects_tolerance_overflow() {
		let err = SwapRequest::from_params(&params("ETH.ETH", "BTC.BTC"), 10_001).unwrap_err();
		assert!(matches!(err, SwapError::Config(_)));
	}

	#[test]
	fn test_with_affiliate() {
		let request = SwapRequest::from_params(&params("ETH.ETH", "BTC.BTC"), 1000)
			.unwrap()
			.with_affiliate("thor1affiliate", 25);
		assert_eq!(request.affiliate_address.as_deref(), Some("thor1affiliate"));
		assert_eq!(request.affiliate_bps, Some(25));
	}
}
