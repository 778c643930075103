use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use swap_types::{
	Asset, Chain, ChainProvider, CryptoAmount, QuoteService, Result, SubmittedSwap, SwapClient,
	SwapError, SwapEstimate, SwapParams, SwapRequest, TotalFees, TxDetails,
};

pub fn params(from: &str, amount: &str, decimals: u8) -> SwapParams {
	SwapParams {
		amount: amount.parse().unwrap(),
		decimals,
		from_asset: from.to_string(),
		to_asset: "BTC.BTC".to_string(),
		destination_address: "bc1qdestination".to_string(),
	}
}

pub fn request(from: &str, amount: &str, decimals: u8) -> SwapRequest {
	SwapRequest::from_params(&params(from, amount, decimals), 300).unwrap()
}

pub fn feasible_details(outbound_delay_seconds: u64) -> TxDetails {
	let btc: Asset = "BTC.BTC".parse().unwrap();
	TxDetails {
		memo: "=:BTC.BTC:bc1qdestination".to_string(),
		expiry: 1_700_000_000,
		to_address: "0x1111111111111111111111111111111111111111".to_string(),
		router: Some("0xD37BbE5744D730a1d98d8DC97c42F0Ca46aD7146".to_string()),
		estimate: SwapEstimate {
			can_swap: true,
			total_fees: TotalFees {
				asset: btc.clone(),
				outbound_fee: CryptoAmount::from_thor_units(2_000, btc.clone()),
				affiliate_fee: CryptoAmount::zero(btc.clone()),
			},
			slip_bps: 5,
			net_output: CryptoAmount::from_thor_units(1_234_567, btc),
			inbound_confirmation_seconds: None,
			outbound_delay_seconds,
			errors: Vec::new(),
		},
	}
}

pub fn infeasible_details(reason: &str) -> TxDetails {
	let mut details = feasible_details(0);
	details.estimate.can_swap = false;
	details.estimate.errors = vec![reason.to_string()];
	details
}

/// Quote service answering every request with the same result.
pub struct MockQuotes {
	response: Result<TxDetails>,
	calls: AtomicUsize,
	last_request: Mutex<Option<SwapRequest>>,
}

impl MockQuotes {
	pub fn returning(details: TxDetails) -> Self {
		Self::with_response(Ok(details))
	}

	pub fn failing(error: SwapError) -> Self {
		Self::with_response(Err(error))
	}

	fn with_response(response: Result<TxDetails>) -> Self {
		Self {
			response,
			calls: AtomicUsize::new(0),
			last_request: Mutex::new(None),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn last_request(&self) -> Option<SwapRequest> {
		self.last_request.lock().unwrap().clone()
	}
}

#[async_trait]
impl QuoteService for MockQuotes {
	fn name(&self) -> &str {
		"mock"
	}

	async fn quote_swap(&self, request: &SwapRequest) -> Result<TxDetails> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		*self.last_request.lock().unwrap() = Some(request.clone());
		self.response.clone()
	}
}

#[derive(Default)]
pub struct Counters {
	pub connects: AtomicUsize,
	pub submits: AtomicUsize,
}

/// Chain provider whose clients record submissions instead of sending them.
#[derive(Default)]
pub struct MockProvider {
	pub counters: Arc<Counters>,
	pub refuse_connect: bool,
	pub refuse_submit: bool,
}

impl MockProvider {
	pub fn connects(&self) -> usize {
		self.counters.connects.load(Ordering::SeqCst)
	}

	pub fn submits(&self) -> usize {
		self.counters.submits.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ChainProvider for MockProvider {
	async fn connect(&self, chain: Chain) -> Result<Box<dyn SwapClient>> {
		self.counters.connects.fetch_add(1, Ordering::SeqCst);
		if self.refuse_connect {
			return Err(SwapError::Provider(format!("No RPC configured for {}", chain)));
		}
		Ok(Box::new(MockClient {
			chain,
			counters: self.counters.clone(),
			refuse_submit: self.refuse_submit,
		}))
	}
}

struct MockClient {
	chain: Chain,
	counters: Arc<Counters>,
	refuse_submit: bool,
}

#[async_trait]
impl SwapClient for MockClient {
	fn chain(&self) -> Chain {
		self.chain
	}

	async fn submit(&self, _request: &SwapRequest, _details: &TxDetails) -> Result<SubmittedSwap> {
		self.counters.submits.fetch_add(1, Ordering::SeqCst);
		if self.refuse_submit {
			return Err(SwapError::Submission("execution reverted".to_string()));
		}
		let hash = "0xfeedbeef".to_string();
		Ok(SubmittedSwap {
			url: self.explorer_tx_url(&hash),
			hash,
		})
	}

	fn explorer_tx_url(&self, hash: &str) -> String {
		format!("https://explorer.test/tx/{}", hash)
	}
}
