//! Chain clients that submit quoted swaps.
//!
//! Only EVM chains are supported; deposits are made through the THORChain
//! router contract using Alloy.

pub mod evm;

pub use evm::{DepositPlan, EvmProvider, EvmSwapClient};
