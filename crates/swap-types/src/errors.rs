//! Error types for the swap flows.
//!
//! Every entry point returns a [`SwapError`] instead of swallowing the
//! failure, so callers can tell a malformed asset string apart from an
//! unreachable quoting service or a rejected submission. An infeasible
//! swap is not an error: it is reported through `SwapEstimate::errors`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SwapError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
	#[error("Invalid asset: {0}")]
	InvalidAsset(String),

	#[error("Invalid amount: {0}")]
	InvalidAmount(String),

	#[error("Quote error: {0}")]
	Quote(String),

	#[error("Provider error: {0}")]
	Provider(String),

	#[error("Submission error: {0}")]
	Submission(String),

	#[error("Configuration error: {0}")]
	Config(String),
}

impl SwapError {
	/// Short machine-friendly tag for the failure class.
	pub fn kind(&self) -> &'static str {
		match self {
			SwapError::InvalidAsset(_) => "invalid_asset",
			SwapError::InvalidAmount(_) => "invalid_amount",
			SwapError::Quote(_) => "quote",
			SwapError::Provider(_) => "provider",
			SwapError::Submission(_) => "submission",
			SwapError::Config(_) => "config",
		}
	}

	/// Whether the failure was detected before any external call was made.
	pub fn is_input_error(&self) -> bool {
		matches!(
			self,
			SwapError::InvalidAsset(_) | SwapError::InvalidAmount(_)
		)
	}
}
