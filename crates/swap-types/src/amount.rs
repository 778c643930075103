//! Exact asset quantities.
//!
//! Amounts are held as an integer count of base units together with the
//! decimal precision they were expressed in, so that `amount × 10^decimals`
//! is always exact and converts back without loss.

use crate::asset::Asset;
use crate::errors::{Result, SwapError};
use rust_decimal::Decimal;
use std::fmt;

/// THORChain normalizes every asset to 8 decimals internally.
pub const THOR_DECIMALS: u8 = 8;

/// An amount of an asset in base units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoAmount {
	base_units: u128,
	decimals: u8,
	asset: Asset,
}

impl CryptoAmount {
	/// Builds an amount from a human-readable decimal quantity.
	///
	/// Rejects non-positive amounts, precisions above what the asset
	/// supports, and amounts with more fractional digits than `decimals`.
	pub fn from_decimal(amount: Decimal, decimals: u8, asset: Asset) -> Result<Self> {
		if amount <= Decimal::ZERO {
			return Err(SwapError::InvalidAmount(format!(
				"amount must be positive, got {}",
				amount
			)));
		}
		if decimals > asset.max_decimals() {
			return Err(SwapError::InvalidAmount(format!(
				"{} supports at most {} decimals, got {}",
				asset,
				asset.max_decimals(),
				decimals
			)));
		}

		let normalized = amount.normalize();
		let scale = normalized.scale();
		if scale > u32::from(decimals) {
			return Err(SwapError::InvalidAmount(format!(
				"{} has more than {} decimal places",
				amount, decimals
			)));
		}

		let mantissa = u128::try_from(normalized.mantissa())
			.map_err(|_| SwapError::InvalidAmount(format!("{} is out of range", amount)))?;
		let base_units = 10u128
			.checked_pow(u32::from(decimals) - scale)
			.and_then(|factor| mantissa.checked_mul(factor))
			.ok_or_else(|| SwapError::InvalidAmount(format!("{} overflows base units", amount)))?;

		Ok(Self {
			base_units,
			decimals,
			asset,
		})
	}

	pub fn from_base_units(base_units: u128, decimals: u8, asset: Asset) -> Self {
		Self {
			base_units,
			decimals,
			asset,
		}
	}

	/// Amount expressed in THORChain's 8-decimal units.
	pub fn from_thor_units(units: u128, asset: Asset) -> Self {
		Self::from_base_units(units, THOR_DECIMALS, asset)
	}

	pub fn zero(asset: Asset) -> Self {
		Self::from_thor_units(0, asset)
	}

	pub fn base_units(&self) -> u128 {
		self.base_units
	}

	pub fn decimals(&self) -> u8 {
		self.decimals
	}

	pub fn asset(&self) -> &Asset {
		&self.asset
	}

	pub fn is_zero(&self) -> bool {
		self.base_units == 0
	}

	/// Converts back to the human-readable quantity.
	pub fn to_decimal(&self) -> Result<Decimal> {
		let mantissa = i128::try_from(self.base_units).map_err(|_| {
			SwapError::InvalidAmount(format!("{} base units out of range", self.base_units))
		})?;
		Decimal::try_from_i128_with_scale(mantissa, u32::from(self.decimals))
			.map(|d| d.normalize())
			.map_err(|e| SwapError::InvalidAmount(e.to_string()))
	}

	/// Re-expresses the amount with THORChain's precision, truncating any
	/// digits finer than 1e-8.
	pub fn to_thor_units(&self) -> u128 {
		match self.decimals.cmp(&THOR_DECIMALS) {
			std::cmp::Ordering::Equal => self.base_units,
			std::cmp::Ordering::Greater => {
				self.base_units / 10u128.pow(u32::from(self.decimals - THOR_DECIMALS))
			}
			std::cmp::Ordering::Less => self
				.base_units
				.saturating_mul(10u128.pow(u32::from(THOR_DECIMALS - self.decimals))),
		}
	}
}

impl fmt::Display for CryptoAmount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.to_decimal() {
			Ok(amount) => write!(f, "{} {}", amount, self.asset.ticker),
			Err(_) => write!(
				f,
				"{}e-{} {}",
				self.base_units, self.decimals, self.asset.ticker
			),
		}
	}
}
