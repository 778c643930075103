//! Configuration for the swap tools.
//!
//! Files may be TOML, JSON or YAML. `${VAR}` references are substituted
//! from the environment before parsing and a handful of `SWAP_*` variables
//! override individual settings afterwards.

use thiserror::Error;

pub mod loader;
pub mod serde_helpers;
pub mod types;

pub use loader::{load_config, ConfigLoader};
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}
