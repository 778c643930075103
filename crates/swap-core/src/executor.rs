//! Quote, submit and wait.

use crate::estimator::build_request;
use crate::progress::{wait_duration, ProgressReporter};
use crate::summary::SwapSummary;
use std::time::Duration;
use swap_config::SwapSettings;
use swap_types::{ChainProvider, QuoteService, Result, SubmittedSwap, SwapParams, TxDetails};
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SwapOutcome {
	/// The quote said the swap cannot go ahead; nothing was submitted.
	Infeasible(TxDetails),
	Submitted {
		details: TxDetails,
		swap: SubmittedSwap,
		wait: Duration,
	},
}

impl SwapOutcome {
	pub fn details(&self) -> &TxDetails {
		match self {
			SwapOutcome::Infeasible(details) => details,
			SwapOutcome::Submitted { details, .. } => details,
		}
	}

	pub fn submitted(&self) -> Option<&SubmittedSwap> {
		match self {
			SwapOutcome::Infeasible(_) => None,
			SwapOutcome::Submitted { swap, .. } => Some(swap),
		}
	}
}

/// Quotes `params` at the execute tolerance and, when feasible, submits the
/// deposit through a client from `provider` and reports progress until the
/// expected outbound delay has passed.
///
/// The countdown is not cancellable once started. Nothing is retried.
pub async fn do_single_swap(
	quotes: &dyn QuoteService,
	provider: &dyn ChainProvider,
	settings: &SwapSettings,
	params: &SwapParams,
) -> Result<SwapOutcome> {
	let result = execute(quotes, provider, settings, params).await;
	if let Err(e) = &result {
		error!(kind = e.kind(), "Swap failed: {}", e);
	}
	result
}

async fn execute(
	quotes: &dyn QuoteService,
	provider: &dyn ChainProvider,
	settings: &SwapSettings,
	params: &SwapParams,
) -> Result<SwapOutcome> {
	let request = build_request(settings, params, settings.execute_tolerance_bps)?;
	let details = quotes.quote_swap(&request).await?;
	SwapSummary::new(&details, &request.amount).log();

	if !details.estimate.can_swap {
		warn!("Skipping submission, quote is not executable");
		return Ok(SwapOutcome::Infeasible(details));
	}

	let client = provider.connect(request.from_asset.chain).await?;
	let swap = client.submit(&request, &details).await?;

	let reporter = ProgressReporter::new(
		wait_duration(details.estimate.outbound_delay_seconds, settings),
		settings.poll_interval(),
	);
	let wait = reporter.total();
	info!(
		tx_hash = %swap.hash,
		url = %swap.url,
		outbound_delay_secs = details.estimate.outbound_delay_seconds,
		wait_secs = wait.as_secs(),
		"Swap submitted"
	);
	info!("Waiting for transaction to be confirmed...");

	reporter
		.run(|event| info!("{} ({})", swap.hash, event))
		.await;

	Ok(SwapOutcome::Submitted {
		details,
		swap,
		wait,
	})
}
