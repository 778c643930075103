//! Asset identifiers as understood by THORChain.
//!
//! An asset string is `CHAIN<delimiter>SYMBOL`, where the delimiter tells
//! where the asset lives:
//!
//! | delimiter | kind      | example                 |
//! |-----------|-----------|-------------------------|
//! | `.`       | native    | `ETH.USDT-0xdAC17F95…`  |
//! | `/`       | synthetic | `BTC/BTC`               |
//! | `~`       | trade     | `ETH~ETH`               |
//! | `-`       | secured   | `BTC-BTC`               |
//!
//! The ticker is the symbol up to the first `-`, the remainder (if any) is
//! the token contract.

use crate::errors::SwapError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Chains THORChain can route through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Chain {
	Btc,
	Eth,
	Bch,
	Ltc,
	Doge,
	Avax,
	Bsc,
	Gaia,
	Thor,
	Base,
	Xrp,
}

impl Chain {
	pub const ALL: [Chain; 11] = [
		Chain::Btc,
		Chain::Eth,
		Chain::Bch,
		Chain::Ltc,
		Chain::Doge,
		Chain::Avax,
		Chain::Bsc,
		Chain::Gaia,
		Chain::Thor,
		Chain::Base,
		Chain::Xrp,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Chain::Btc => "BTC",
			Chain::Eth => "ETH",
			Chain::Bch => "BCH",
			Chain::Ltc => "LTC",
			Chain::Doge => "DOGE",
			Chain::Avax => "AVAX",
			Chain::Bsc => "BSC",
			Chain::Gaia => "GAIA",
			Chain::Thor => "THOR",
			Chain::Base => "BASE",
			Chain::Xrp => "XRP",
		}
	}

	/// Decimal precision of the chain's native representation.
	pub fn native_decimals(&self) -> u8 {
		match self {
			Chain::Eth | Chain::Avax | Chain::Bsc | Chain::Base => 18,
			Chain::Gaia | Chain::Xrp => 6,
			Chain::Btc | Chain::Bch | Chain::Ltc | Chain::Doge | Chain::Thor => 8,
		}
	}

	/// Symbol of the asset used to pay fees on this chain.
	pub fn gas_symbol(&self) -> &'static str {
		match self {
			Chain::Btc => "BTC",
			Chain::Eth | Chain::Base => "ETH",
			Chain::Bch => "BCH",
			Chain::Ltc => "LTC",
			Chain::Doge => "DOGE",
			Chain::Avax => "AVAX",
			Chain::Bsc => "BNB",
			Chain::Gaia => "ATOM",
			Chain::Thor => "RUNE",
			Chain::Xrp => "XRP",
		}
	}

	pub fn is_evm(&self) -> bool {
		matches!(self, Chain::Eth | Chain::Avax | Chain::Bsc | Chain::Base)
	}
}

impl fmt::Display for Chain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Chain {
	type Err = SwapError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let upper = s.to_ascii_uppercase();
		Chain::ALL
			.into_iter()
			.find(|chain| chain.as_str() == upper)
			.ok_or_else(|| SwapError::InvalidAsset(format!("unrecognized chain '{}'", s)))
	}
}

/// Where an asset is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
	Native,
	Synth,
	Trade,
	Secured,
}

impl AssetKind {
	fn delimiter(&self) -> char {
		match self {
			AssetKind::Native => '.',
			AssetKind::Synth => '/',
			AssetKind::Trade => '~',
			AssetKind::Secured => '-',
		}
	}

	fn from_delimiter(c: char) -> Option<Self> {
		match c {
			'.' => Some(AssetKind::Native),
			'/' => Some(AssetKind::Synth),
			'~' => Some(AssetKind::Trade),
			'-' => Some(AssetKind::Secured),
			_ => None,
		}
	}
}

/// A parsed chain/symbol/ticker triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
	pub chain: Chain,
	pub symbol: String,
	pub ticker: String,
	pub kind: AssetKind,
}

impl Asset {
	/// Largest decimal precision an amount of this asset may carry.
	///
	/// Synthetic, trade and secured assets live on THORChain itself and use
	/// its fixed 8-decimal precision.
	pub fn max_decimals(&self) -> u8 {
		match self.kind {
			AssetKind::Native => self.chain.native_decimals(),
			_ => crate::amount::THOR_DECIMALS,
		}
	}

	/// True for the asset used to pay fees on its own chain (ETH.ETH, BTC.BTC, ...).
	pub fn is_gas_asset(&self) -> bool {
		self.kind == AssetKind::Native && self.symbol.eq_ignore_ascii_case(self.chain.gas_symbol())
	}

	/// Token contract encoded in the symbol, if any.
	pub fn contract(&self) -> Option<&str> {
		self.symbol
			.split_once('-')
			.map(|(_, contract)| contract)
			.filter(|contract| !contract.is_empty())
	}
}

impl fmt::Display for Asset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}{}", self.chain, self.kind.delimiter(), self.symbol)
	}
}

impl FromStr for Asset {
	type Err = SwapError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let raw = s.trim();
		let (idx, delimiter) = raw
			.char_indices()
			.find(|(_, c)| AssetKind::from_delimiter(*c).is_some())
			.ok_or_else(|| SwapError::InvalidAsset(format!("'{}' has no chain delimiter", s)))?;

		let kind = AssetKind::from_delimiter(delimiter)
			.ok_or_else(|| SwapError::InvalidAsset(format!("'{}' has no chain delimiter", s)))?;
		let chain: Chain = raw[..idx]
			.parse()
			.map_err(|_| SwapError::InvalidAsset(format!("'{}' has an unrecognized chain", s)))?;

		let symbol = &raw[idx + delimiter.len_utf8()..];
		let ticker = symbol.split('-').next().unwrap_or_default();
		if symbol.is_empty() || ticker.is_empty() {
			return Err(SwapError::InvalidAsset(format!("'{}' has no symbol", s)));
		}
		if symbol.chars().any(char::is_whitespace) {
			return Err(SwapError::InvalidAsset(format!("'{}' contains whitespace", s)));
		}

		Ok(Asset {
			chain,
			symbol: symbol.to_string(),
			ticker: ticker.to_string(),
			kind,
		})
	}
}

impl Serialize for Asset {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Asset {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_native_token() {
		let asset: Asset = "ETH.USDT-0xdAC17F958D2ee523a2206206994597C13D831ec7"
			.parse()
			.unwrap();
		assert_eq!(asset.chain, Chain::Eth);
		assert_eq!(asset.kind, AssetKind::Native);
		assert_eq!(asset.ticker, "USDT");
		assert_eq!(
			asset.contract(),
			Some("0xdAC17F958D2ee523a2206206994597C13D831ec7")
		);
		assert!(!asset.is_gas_asset());
		assert_eq!(asset.max_decimals(), 18);
	}

	#[test]
	fn test_parse_gas_assets() {
		let btc: Asset = "BTC.BTC".parse().unwrap();
		assert!(btc.is_gas_asset());
		assert_eq!(btc.contract(), None);

		let bnb: Asset = "bsc.BNB".parse().unwrap();
		assert_eq!(bnb.chain, Chain::Bsc);
		assert!(bnb.is_gas_asset());
	}

	#[test]
	fn test_parse_other_kinds() {
		let synth: Asset = "BTC/BTC".parse().unwrap();
		assert_eq!(synth.kind, AssetKind::Synth);
		assert_eq!(synth.max_decimals(), 8);

		let trade: Asset = "ETH~ETH".parse().unwrap();
		assert_eq!(trade.kind, AssetKind::Trade);

		let secured: Asset = "BTC-BTC".parse().unwrap();
		assert_eq!(secured.kind, AssetKind::Secured);
		assert_eq!(secured.to_string(), "BTC-BTC");
	}

	#[test]
	fn test_parse_rejects_garbage() {
		assert!(matches!(
			"not-an-asset".parse::<Asset>(),
			Err(SwapError::InvalidAsset(_))
		));
		assert!("ETH".parse::<Asset>().is_err());
		assert!("ETH.".parse::<Asset>().is_err());
		assert!("FOO.BAR".parse::<Asset>().is_err());
		assert!("ETH.-0xabc".parse::<Asset>().is_err());
		assert!("".parse::<Asset>().is_err());
	}

	#[test]
	fn test_display_matches_input() {
		for raw in ["THOR.RUNE", "ETH.USDC-0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "BTC/BTC"] {
			let asset: Asset = raw.parse().unwrap();
			assert_eq!(asset.to_string(), raw);
		}
	}

	#[test]
	fn test_serde_as_string() {
		let asset: Asset = "AVAX.AVAX".parse().unwrap();
		let json = serde_json::to_string(&asset).unwrap();
		assert_eq!(json, "\"AVAX.AVAX\"");
		let back: Asset = serde_json::from_str(&json).unwrap();
		assert_eq!(back, asset);
	}
}
