//! Collaborator traits for the swap flows.
//!
//! The quoting engine and the chain clients are external systems; the flows
//! only see them through these traits so each invocation can be handed its
//! own instances.

use crate::asset::Chain;
use crate::errors::Result;
use crate::swap::{SubmittedSwap, SwapRequest, TxDetails};
use async_trait::async_trait;

/// Source of swap quotes.
#[async_trait]
pub trait QuoteService: Send + Sync {
	/// Human-readable name used in logs.
	fn name(&self) -> &str;

	/// Asks the service for a quote. A quote the service refuses is still
	/// returned, with `can_swap = false` and the reason in `errors`.
	async fn quote_swap(&self, request: &SwapRequest) -> Result<TxDetails>;
}

/// Client able to submit a quoted swap on one chain.
#[async_trait]
pub trait SwapClient: Send + Sync {
	fn chain(&self) -> Chain;

	/// Sends the inbound deposit described by `details`.
	async fn submit(&self, request: &SwapRequest, details: &TxDetails) -> Result<SubmittedSwap>;

	/// Explorer link for a transaction hash on this chain.
	fn explorer_tx_url(&self, hash: &str) -> String;
}

/// Externally supplied connection handle that builds chain clients.
#[async_trait]
pub trait ChainProvider: Send + Sync {
	async fn connect(&self, chain: Chain) -> Result<Box<dyn SwapClient>>;
}
