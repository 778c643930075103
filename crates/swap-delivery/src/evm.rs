//! EVM swap submission using the Alloy library.
//!
//! A THORChain swap from an EVM chain is a call to the router's
//! `depositWithExpiry` with the quoted vault and memo. Gas assets are sent as
//! call value; ERC-20 tokens are first approved for the router when the
//! current allowance does not cover the amount.

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use alloy::sol;
use async_trait::async_trait;
use std::collections::BTreeMap;
use swap_config::EvmChainConfig;
use swap_types::{
	Chain, ChainProvider, Result, SubmittedSwap, SwapClient, SwapError, SwapRequest, TxDetails,
};
use tracing::{debug, info};

sol! {
	#[sol(rpc)]
	interface IThorchainRouter {
		function depositWithExpiry(address vault, address asset, uint256 amount, string memo, uint256 expiration) external payable;
	}

	#[sol(rpc)]
	interface IERC20 {
		function decimals() external view returns (uint8);
		function allowance(address owner, address spender) external view returns (uint256);
		function approve(address spender, uint256 amount) external returns (bool);
	}
}

/// Utility function to truncate a transaction hash for display.
fn truncate_hash(hash: &str) -> String {
	if hash.len() <= 10 {
		hash.to_string()
	} else {
		format!("{}..", &hash[..10])
	}
}

fn parse_address(label: &str, raw: &str) -> Result<Address> {
	raw.parse()
		.map_err(|e| SwapError::Submission(format!("Invalid {} address '{}': {}", label, raw, e)))
}

/// Arguments of the router deposit derived from a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositPlan {
	pub router: Address,
	pub vault: Address,
	/// Zero address for the chain's gas asset.
	pub asset: Address,
	pub amount: U256,
	pub value: U256,
	pub memo: String,
	pub expiration: U256,
}

impl DepositPlan {
	pub fn token(&self) -> Option<Address> {
		(self.asset != Address::ZERO).then_some(self.asset)
	}

	/// Validates the quote against the request and lays out the deposit call.
	pub fn from_quote(chain: Chain, request: &SwapRequest, details: &TxDetails) -> Result<Self> {
		let asset = &request.from_asset;
		if asset.chain != chain {
			return Err(SwapError::Submission(format!(
				"{} cannot be deposited from {}",
				asset, chain
			)));
		}
		if details.memo.is_empty() {
			return Err(SwapError::Submission(
				"Quote has no memo; a destination address is required".to_string(),
			));
		}
		if details.to_address.is_empty() {
			return Err(SwapError::Submission(
				"Quote has no inbound address".to_string(),
			));
		}
		let router = details
			.router
			.as_deref()
			.ok_or_else(|| SwapError::Submission(format!("Quote has no router for {}", chain)))?;

		let amount = U256::from(request.amount.base_units());
		let (asset_address, value) = if asset.is_gas_asset() {
			if request.amount.decimals() != chain.native_decimals() {
				return Err(SwapError::InvalidAmount(format!(
					"{} amounts must use {} decimals",
					asset,
					chain.native_decimals()
				)));
			}
			(Address::ZERO, amount)
		} else {
			let contract = asset.contract().ok_or_else(|| {
				SwapError::Submission(format!("{} has no token contract", asset))
			})?;
			(parse_address("token", contract)?, U256::ZERO)
		};

		Ok(Self {
			router: parse_address("router", router)?,
			vault: parse_address("vault", &details.to_address)?,
			asset: asset_address,
			amount,
			value,
			memo: details.memo.clone(),
			expiration: U256::from(details.expiry),
		})
	}
}

/// Alloy-backed client for one EVM chain.
pub struct EvmSwapClient {
	chain: Chain,
	provider: DynProvider,
	sender: Address,
	explorer_url: String,
}

impl EvmSwapClient {
	/// Connects to `config.rpc_url` and checks the node serves `config.chain_id`.
	pub async fn connect(chain: Chain, config: &EvmChainConfig) -> Result<Self> {
		let key = config
			.private_key
			.as_deref()
			.ok_or_else(|| SwapError::Provider(format!("No private key configured for {}", chain)))?;
		let signer: PrivateKeySigner = key
			.parse()
			.map_err(|e| SwapError::Provider(format!("Invalid private key for {}: {}", chain, e)))?;
		let signer = signer.with_chain_id(Some(config.chain_id));
		let sender = signer.address();

		let url = config
			.rpc_url
			.parse()
			.map_err(|e| SwapError::Provider(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new()
			.wallet(EthereumWallet::from(signer))
			.connect_http(url)
			.erased();

		let remote_chain_id = provider
			.get_chain_id()
			.await
			.map_err(|e| SwapError::Provider(format!("Failed to reach {} RPC: {}", chain, e)))?;
		if remote_chain_id != config.chain_id {
			return Err(SwapError::Provider(format!(
				"{} RPC serves chain id {}, expected {}",
				chain, remote_chain_id, config.chain_id
			)));
		}

		info!(chain = %chain, sender = %sender, "Connected EVM client");

		Ok(Self {
			chain,
			provider,
			sender,
			explorer_url: config.explorer_url.clone(),
		})
	}

	async fn ensure_allowance(&self, token: Address, plan: &DepositPlan, decimals: u8) -> Result<()> {
		let erc20 = IERC20::new(token, &self.provider);

		let on_chain_decimals = erc20
			.decimals()
			.call()
			.await
			.map_err(|e| SwapError::Submission(format!("Failed to read token decimals: {}", e)))?;
		if on_chain_decimals != decimals {
			return Err(SwapError::InvalidAmount(format!(
				"token uses {} decimals, amount was given with {}",
				on_chain_decimals, decimals
			)));
		}

		let allowance = erc20
			.allowance(self.sender, plan.router)
			.call()
			.await
			.map_err(|e| SwapError::Submission(format!("Failed to read allowance: {}", e)))?;
		if allowance >= plan.amount {
			debug!("Router allowance {} covers {}", allowance, plan.amount);
			return Ok(());
		}

		info!("Approving router {} for {}", plan.router, plan.amount);
		let approval = erc20
			.approve(plan.router, plan.amount)
			.send()
			.await
			.map_err(|e| SwapError::Submission(format!("Failed to send approval: {}", e)))?
			.watch()
			.await
			.map_err(|e| SwapError::Submission(format!("Approval not confirmed: {}", e)))?;
		info!(tx_hash = %truncate_hash(&approval.to_string()), "Router approved");

		Ok(())
	}
}

#[async_trait]
impl SwapClient for EvmSwapClient {
	fn chain(&self) -> Chain {
		self.chain
	}

	async fn submit(&self, request: &SwapRequest, details: &TxDetails) -> Result<SubmittedSwap> {
		let plan = DepositPlan::from_quote(self.chain, request, details)?;

		if let Some(token) = plan.token() {
			self.ensure_allowance(token, &plan, request.amount.decimals())
				.await?;
		}

		let router = IThorchainRouter::new(plan.router, &self.provider);
		let pending = router
			.depositWithExpiry(
				plan.vault,
				plan.asset,
				plan.amount,
				plan.memo.clone(),
				plan.expiration,
			)
			.value(plan.value)
			.send()
			.await
			.map_err(|e| SwapError::Submission(format!("Failed to send deposit: {}", e)))?;

		let hash = pending.tx_hash().to_string();
		info!(tx_hash = %truncate_hash(&hash), "Submitted deposit");

		Ok(SubmittedSwap {
			url: self.explorer_tx_url(&hash),
			hash,
		})
	}

	fn explorer_tx_url(&self, hash: &str) -> String {
		explorer_tx_url(&self.explorer_url, hash)
	}
}

fn explorer_tx_url(prefix: &str, hash: &str) -> String {
	if prefix.ends_with('/') {
		format!("{}{}", prefix, hash)
	} else {
		format!("{}/{}", prefix, hash)
	}
}

/// Builds [`EvmSwapClient`]s from the configured EVM chains.
#[derive(Debug, Clone, Default)]
pub struct EvmProvider {
	chains: BTreeMap<Chain, EvmChainConfig>,
}

impl EvmProvider {
	pub fn new(chains: BTreeMap<Chain, EvmChainConfig>) -> Self {
		Self { chains }
	}
}

#[async_trait]
impl ChainProvider for EvmProvider {
	async fn connect(&self, chain: Chain) -> Result<Box<dyn SwapClient>> {
		if !chain.is_evm() {
			return Err(SwapError::Provider(format!(
				"{} deposits are not supported, only EVM chains are",
				chain
			)));
		}
		let config = self
			.chains
			.get(&chain)
			.ok_or_else(|| SwapError::Provider(format!("No RPC configured for {}", chain)))?;

		let client = EvmSwapClient::connect(chain, config).await?;
		Ok(Box::new(client))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use swap_types::{CryptoAmount, SwapEstimate, SwapParams, TotalFees};

	const USDC: &str = "ETH.USDC-0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
	const VAULT: &str = "0x1111111111111111111111111111111111111111";
	const ROUTER: &str = "0xD37BbE5744D730a1d98d8DC97c42F0Ca46aD7146";

	fn request(from: &str, amount: &str, decimals: u8) -> SwapRequest {
		let params = SwapParams {
			amount: amount.parse().unwrap(),
			decimals,
			from_asset: from.to_string(),
			to_asset: "BTC.BTC".to_string(),
			destination_address: "bc1qdestination".to_string(),
		};
		SwapRequest::from_params(&params, 1000).unwrap()
	}

	fn details(router: Option<&str>, memo: &str) -> TxDetails {
		let btc: swap_types::Asset = "BTC.BTC".parse().unwrap();
		TxDetails {
			memo: memo.to_string(),
			expiry: 1_700_000_000,
			to_address: VAULT.to_string(),
			router: router.map(str::to_string),
			estimate: SwapEstimate {
				can_swap: true,
				total_fees: TotalFees {
					asset: btc.clone(),
					outbound_fee: CryptoAmount::zero(btc.clone()),
					affiliate_fee: CryptoAmount::zero(btc.clone()),
				},
				slip_bps: 5,
				net_output: CryptoAmount::from_thor_units(1_000_000, btc),
				inbound_confirmation_seconds: None,
				outbound_delay_seconds: 12,
				errors: Vec::new(),
			},
		}
	}

	fn chain_config(key: Option<&str>) -> EvmChainConfig {
		EvmChainConfig {
			rpc_url: "http://127.0.0.1:8545".to_string(),
			chain_id: 1,
			private_key: key.map(str::to_string),
			explorer_url: "https://etherscan.io/tx/".to_string(),
		}
	}

	#[test]
	fn test_gas_asset_deposit_plan() {
		let req = request("ETH.ETH", "0.5", 18);
		let plan = DepositPlan::from_quote(Chain::Eth, &req, &details(Some(ROUTER), "=:BTC.BTC:bc1q"))
			.unwrap();

		assert_eq!(plan.asset, Address::ZERO);
		assert_eq!(plan.token(), None);
		assert_eq!(plan.amount, U256::from(500_000_000_000_000_000u128));
		assert_eq!(plan.value, plan.amount);
		assert_eq!(plan.vault, VAULT.parse::<Address>().unwrap());
		assert_eq!(plan.expiration, U256::from(1_700_000_000u64));
	}

	#[test]
	fn test_token_deposit_plan() {
		let req = request(USDC, "250", 6);
		let plan =
			DepositPlan::from_quote(Chain::Eth, &req, &details(Some(ROUTER), "=:BTC.BTC:bc1q"))
				.unwrap();

		assert_eq!(
			plan.token(),
			Some("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse().unwrap())
		);
		assert_eq!(plan.amount, U256::from(250_000_000u64));
		assert_eq!(plan.value, U256::ZERO);
	}

	#[test]
	fn test_deposit_plan_rejections() {
		let req = request("ETH.ETH", "0.5", 18);
		assert!(DepositPlan::from_quote(Chain::Eth, &req, &details(None, "=:BTC.BTC:bc1q")).is_err());
		assert!(DepositPlan::from_quote(Chain::Eth, &req, &details(Some(ROUTER), "")).is_err());
		assert!(
			DepositPlan::from_quote(Chain::Avax, &req, &details(Some(ROUTER), "=:BTC.BTC:bc1q"))
				.is_err()
		);

		let wrong_precision = request("ETH.ETH", "0.5", 8);
		let err = DepositPlan::from_quote(
			Chain::Eth,
			&wrong_precision,
			&details(Some(ROUTER), "=:BTC.BTC:bc1q"),
		)
		.unwrap_err();
		assert!(matches!(err, SwapError::InvalidAmount(_)));
	}

	#[test]
	fn test_explorer_tx_url() {
		assert_eq!(
			explorer_tx_url("https://etherscan.io/tx/", "0xabc"),
			"https://etherscan.io/tx/0xabc"
		);
		assert_eq!(
			explorer_tx_url("https://snowtrace.io/tx", "0xabc"),
			"https://snowtrace.io/tx/0xabc"
		);
		assert_eq!(truncate_hash("0x0123456789abcdef"), "0x01234567..");
	}

	#[tokio::test]
	async fn test_provider_rejects_unusable_chains() {
		let mut chains = BTreeMap::new();
		chains.insert(Chain::Eth, chain_config(None));
		let provider = EvmProvider::new(chains);

		let err = provider.connect(Chain::Btc).await.err().unwrap();
		assert!(matches!(err, SwapError::Provider(_)));

		let err = provider.connect(Chain::Avax).await.err().unwrap();
		assert!(err.to_string().contains("No RPC configured for AVAX"));

		let err = provider.connect(Chain::Eth).await.err().unwrap();
		assert!(err.to_string().contains("No private key configured for ETH"));
	}
}
