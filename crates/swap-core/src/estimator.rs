//! Quote-only flow.

use crate::summary::SwapSummary;
use swap_config::SwapSettings;
use swap_types::{QuoteService, Result, SwapParams, SwapRequest, TxDetails};
use tracing::{debug, error};

/// Parses `params` into a request at `tolerance_bps` and attaches the
/// configured affiliate, if any.
pub(crate) fn build_request(
	settings: &SwapSettings,
	params: &SwapParams,
	tolerance_bps: u32,
) -> Result<SwapRequest> {
	let request = SwapRequest::from_params(params, tolerance_bps)?;
	Ok(match (&settings.affiliate_address, settings.affiliate_bps) {
		(Some(address), Some(bps)) => request.with_affiliate(address.clone(), bps),
		(Some(address), None) => request.with_affiliate(address.clone(), 0),
		_ => request,
	})
}

/// Requests a quote for `params` at the estimate tolerance and logs its
/// summary.
///
/// An infeasible swap is returned as `Ok` with `can_swap = false`; only
/// invalid input and failures reaching the quote service are errors.
pub async fn estimate_swap(
	quotes: &dyn QuoteService,
	settings: &SwapSettings,
	params: &SwapParams,
) -> Result<TxDetails> {
	let result = quote(quotes, settings, params).await;
	if let Err(e) = &result {
		error!(kind = e.kind(), "Estimate failed: {}", e);
	}
	result
}

async fn quote(
	quotes: &dyn QuoteService,
	settings: &SwapSettings,
	params: &SwapParams,
) -> Result<TxDetails> {
	let request = build_request(settings, params, settings.estimate_tolerance_bps)?;
	debug!(
		service = quotes.name(),
		from = %request.from_asset,
		to = %request.destination_asset,
		tolerance_bps = request.tolerance_bps,
		"Requesting estimate"
	);

	let details = quotes.quote_swap(&request).await?;
	SwapSummary::new(&details, &request.amount).log();
	Ok(details)
}
