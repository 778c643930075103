//! THORNode-backed quote service.
//!
//! Quotes come from `GET /thorchain/quote/swap`. Before asking for the quote
//! the client checks `GET /thorchain/inbound_addresses` so a halted source
//! chain shows up as an infeasible estimate rather than a failed deposit.

use crate::types::{ErrorResponse, InboundAddress, QuoteSwapResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use swap_config::ThornodeConfig;
use swap_types::{
	Asset, AssetKind, Chain, CryptoAmount, QuoteService, Result, SwapError, SwapEstimate,
	SwapRequest, TotalFees, TxDetails,
};
use tracing::{debug, info, warn};

const CLIENT_ID_HEADER: &str = "x-client-id";

/// HTTP client for a single THORNode endpoint.
#[derive(Debug, Clone)]
pub struct ThornodeClient {
	http: reqwest::Client,
	base_url: String,
}

impl ThornodeClient {
	pub fn new(config: &ThornodeConfig) -> Result<Self> {
		let mut headers = HeaderMap::new();
		let client_id = HeaderValue::from_str(&config.client_id)
			.map_err(|e| SwapError::Config(format!("Invalid client id: {}", e)))?;
		headers.insert(CLIENT_ID_HEADER, client_id);

		let http = reqwest::Client::builder()
			.timeout(config.timeout())
			.default_headers(headers)
			.build()
			.map_err(|e| SwapError::Config(format!("Failed to create HTTP client: {}", e)))?;

		Ok(Self {
			http,
			base_url: config.endpoint().to_string(),
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Fetches the inbound vaults and their halt flags.
	pub async fn inbound_addresses(&self) -> Result<Vec<InboundAddress>> {
		let url = format!("{}/thorchain/inbound_addresses", self.base_url);
		debug!("Fetching inbound addresses from {}", url);

		let response = self
			.http
			.get(&url)
			.send()
			.await
			.map_err(|e| SwapError::Quote(format!("Inbound addresses request failed: {}", e)))?;

		let status = response.status();
		if !status.is_success() {
			return Err(SwapError::Quote(format!(
				"Inbound addresses request returned {}",
				status
			)));
		}

		response
			.json()
			.await
			.map_err(|e| SwapError::Quote(format!("Failed to decode inbound addresses: {}", e)))
	}

	fn quote_query(request: &SwapRequest) -> Result<Vec<(&'static str, String)>> {
		let amount = request.amount.to_thor_units();
		if amount == 0 {
			return Err(SwapError::InvalidAmount(format!(
				"{} is below THORChain's 1e-8 precision",
				request.amount
			)));
		}

		let mut query = vec![
			("from_asset", request.from_asset.to_string()),
			("to_asset", request.destination_asset.to_string()),
			("amount", amount.to_string()),
			("tolerance_bps", request.tolerance_bps.to_string()),
		];
		if !request.destination_address.is_empty() {
			query.push(("destination", request.destination_address.clone()));
		}
		if let Some(affiliate) = &request.affiliate_address {
			query.push(("affiliate", affiliate.clone()));
		}
		if let Some(bps) = request.affiliate_bps {
			query.push(("affiliate_bps", bps.to_string()));
		}

		Ok(query)
	}

	async fn fetch_quote(&self, query: &[(&'static str, String)]) -> Result<QuoteOutcome> {
		let url = format!("{}/thorchain/quote/swap", self.base_url);
		debug!("Requesting quote from {} with {:?}", url, query);

		let response = self
			.http
			.get(&url)
			.query(query)
			.send()
			.await
			.map_err(|e| SwapError::Quote(format!("Quote request failed: {}", e)))?;

		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|e| SwapError::Quote(format!("Failed to read quote response: {}", e)))?;

		parse_quote_body(status, &body)
	}
}

/// What THORNode answered to a quote request.
#[derive(Debug)]
enum QuoteOutcome {
	Quote(Box<QuoteSwapResponse>),
	Refused(String),
}

fn parse_quote_body(status: StatusCode, body: &str) -> Result<QuoteOutcome> {
	let error = serde_json::from_str::<ErrorResponse>(body).unwrap_or_default();

	if status.is_success() {
		if let Some(reason) = error.reason() {
			return Ok(QuoteOutcome::Refused(reason.to_string()));
		}
		let quote = serde_json::from_str(body)
			.map_err(|e| SwapError::Quote(format!("Failed to decode quote: {}", e)))?;
		return Ok(QuoteOutcome::Quote(Box::new(quote)));
	}

	match (status.is_client_error(), error.reason()) {
		(true, Some(reason)) => Ok(QuoteOutcome::Refused(reason.to_string())),
		_ => Err(SwapError::Quote(format!(
			"Quote request returned {}: {}",
			status,
			body.trim()
		))),
	}
}

fn parse_units(field: &str, value: Option<&str>) -> Result<u128> {
	match value {
		None => Ok(0),
		Some(raw) => raw
			.parse()
			.map_err(|_| SwapError::Quote(format!("Invalid {} amount '{}'", field, raw))),
	}
}

/// Whether the deposit for `asset` is made on its own chain, as opposed to
/// THORChain itself.
fn deposits_on_external_chain(asset: &Asset) -> bool {
	asset.kind == AssetKind::Native && asset.chain != Chain::Thor
}

/// Diagnostics for the source chain's inbound vault.
pub fn inbound_errors(asset: &Asset, inbound: &[InboundAddress]) -> Vec<String> {
	if !deposits_on_external_chain(asset) {
		return Vec::new();
	}

	let Some(entry) = inbound
		.iter()
		.find(|entry| entry.chain.eq_ignore_ascii_case(asset.chain.as_str()))
	else {
		return vec![format!("No inbound address available for {}", asset.chain)];
	};

	let mut errors = Vec::new();
	if entry.halted {
		errors.push(format!("{} chain is halted", asset.chain));
	}
	if entry.global_trading_paused {
		errors.push("Global trading is paused".to_string());
	}
	if entry.chain_trading_paused {
		errors.push(format!("Trading is paused on {}", asset.chain));
	}
	errors
}

/// Shapes a THORNode quote into [`TxDetails`].
pub fn tx_details_from_quote(
	request: &SwapRequest,
	quote: &QuoteSwapResponse,
	mut errors: Vec<String>,
) -> Result<TxDetails> {
	let fee_asset: Asset = quote
		.fees
		.asset
		.parse()
		.map_err(|e| SwapError::Quote(format!("Quote fee asset: {}", e)))?;

	let outbound = parse_units("outbound fee", quote.fees.outbound.as_deref())?;
	let affiliate = parse_units("affiliate fee", quote.fees.affiliate.as_deref())?;
	let expected_out = parse_units("expected output", Some(&quote.expected_amount_out))?;

	if let Some(min) = quote.recommended_min_amount_in.as_deref() {
		let min = parse_units("recommended minimum", Some(min))?;
		if request.amount.to_thor_units() < min {
			let min_amount = CryptoAmount::from_thor_units(min, request.from_asset.clone());
			errors.push(format!(
				"Error amount in: {} is less than recommended min amount in: {}",
				request.amount, min_amount
			));
		}
	}
	if expected_out == 0 {
		errors.push("Expected amount out is zero".to_string());
	}

	let estimate = SwapEstimate {
		can_swap: errors.is_empty(),
		total_fees: TotalFees {
			outbound_fee: CryptoAmount::from_thor_units(outbound, fee_asset.clone()),
			affiliate_fee: CryptoAmount::from_thor_units(affiliate, fee_asset.clone()),
			asset: fee_asset,
		},
		slip_bps: quote.fees.slippage_bps,
		net_output: CryptoAmount::from_thor_units(expected_out, request.destination_asset.clone()),
		inbound_confirmation_seconds: quote.inbound_confirmation_seconds,
		outbound_delay_seconds: quote.outbound_delay_seconds.unwrap_or(0),
		errors,
	};

	Ok(TxDetails {
		memo: quote.memo.clone().unwrap_or_default(),
		expiry: quote.expiry,
		to_address: quote.inbound_address.clone().unwrap_or_default(),
		router: quote.router.clone(),
		estimate,
	})
}

/// Infeasible details for a quote the service declined.
pub fn refused_tx_details(request: &SwapRequest, reason: &str) -> TxDetails {
	let fee_asset = request.destination_asset.clone();
	TxDetails {
		memo: String::new(),
		expiry: 0,
		to_address: String::new(),
		router: None,
		estimate: SwapEstimate {
			can_swap: false,
			total_fees: TotalFees {
				outbound_fee: CryptoAmount::zero(fee_asset.clone()),
				affiliate_fee: CryptoAmount::zero(fee_asset.clone()),
				asset: fee_asset,
			},
			slip_bps: 0,
			net_output: CryptoAmount::zero(request.destination_asset.clone()),
			inbound_confirmation_seconds: None,
			outbound_delay_seconds: 0,
			errors: vec![format!("Thornode request quote: {}", reason)],
		},
	}
}

#[async_trait]
impl QuoteService for ThornodeClient {
	fn name(&self) -> &str {
		"thornode"
	}

	async fn quote_swap(&self, request: &SwapRequest) -> Result<TxDetails> {
		let query = Self::quote_query(request)?;

		let inbound_errors = if deposits_on_external_chain(&request.from_asset) {
			inbound_errors(&request.from_asset, &self.inbound_addresses().await?)
		} else {
			Vec::new()
		};

		let details = match self.fetch_quote(&query).await? {
			QuoteOutcome::Quote(quote) => {
				if let Some(warning) = &quote.warning {
					debug!("THORNode warning: {}", warning);
				}
				if let Some(notes) = &quote.notes {
					debug!("THORNode notes: {}", notes);
				}
				tx_details_from_quote(request, &quote, inbound_errors)?
			}
			QuoteOutcome::Refused(reason) => {
				warn!(
					"THORNode refused quote {} -> {}: {}",
					request.from_asset, request.destination_asset, reason
				);
				refused_tx_details(request, &reason)
			}
		};

		info!(
			from = %request.from_asset,
			to = %request.destination_asset,
			can_swap = details.estimate.can_swap,
			"Received quote"
		);
		Ok(details)
	}
}
