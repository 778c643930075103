//! Configuration loading from files and environment.

use crate::types::*;
use crate::ConfigError;
use regex::Regex;
use std::path::Path;
use swap_types::{Chain, MAX_BASIS_POINTS};
use tracing::{debug, info};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from file
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SwapConfig, ConfigError> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		if !path.exists() {
			return Err(ConfigError::FileNotFound(path.display().to_string()));
		}
		let raw = std::fs::read_to_string(path)?;
		let contents = Self::substitute_env_vars(&raw, |name| std::env::var(name).ok())?;

		let config = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents)?,
			Some("json") => Self::from_json(&contents)?,
			Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
			_ => {
				return Err(ConfigError::ParseError(format!(
					"Unsupported config format: {:?}",
					path
				)))
			}
		};

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Load from TOML string
	pub fn from_toml(contents: &str) -> Result<SwapConfig, ConfigError> {
		toml::from_str(contents)
			.map_err(|e| ConfigError::ParseError(format!("Failed to parse TOML: {}", e)))
	}

	/// Load from JSON string
	pub fn from_json(contents: &str) -> Result<SwapConfig, ConfigError> {
		serde_json::from_str(contents)
			.map_err(|e| ConfigError::ParseError(format!("Failed to parse JSON: {}", e)))
	}

	/// Load from YAML string
	pub fn from_yaml(contents: &str) -> Result<SwapConfig, ConfigError> {
		serde_yaml::from_str(contents)
			.map_err(|e| ConfigError::ParseError(format!("Failed to parse YAML: {}", e)))
	}

	/// Load from environment variables with optional file override
	pub fn from_env_and_file(file_path: Option<&Path>) -> Result<SwapConfig, ConfigError> {
		let mut config = match file_path {
			Some(path) => Self::from_file(path)?,
			None => SwapConfig::default(),
		};

		Self::apply_overrides(&mut config, std::env::vars())?;

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Replaces `${VAR_NAME}` patterns using `lookup`.
	pub fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let re = Regex::new(r"\$\{([^}]+)\}")
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;
		let mut result = content.to_string();

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let value =
				lookup(var_name).ok_or_else(|| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &value);
		}

		Ok(result)
	}

	/// Applies `SWAP_*` overrides from the given variables.
	pub fn apply_overrides<I>(config: &mut SwapConfig, vars: I) -> Result<(), ConfigError>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		for (name, value) in vars {
			match name.as_str() {
				"SWAP_LOG_LEVEL" => {
					debug!("Overriding log level from environment");
					config.logging.level = value;
				}
				"SWAP_THORNODE_URL" => {
					debug!("Overriding THORNode URL from environment");
					config.thornode.url = Some(value);
				}
				"SWAP_PRIVATE_KEY" => {
					debug!("Overriding private key from environment");
					for chain in config.chains.values_mut() {
						chain.private_key = Some(value.clone());
					}
				}
				_ => {
					if let Some(chain) = name.strip_prefix("SWAP_RPC_URL_") {
						let chain: Chain = chain.parse().map_err(|_| {
							ConfigError::ValidationError(format!("Unknown chain in {}", name))
						})?;
						debug!("Overriding RPC URL for {} from environment", chain);
						if let Some(chain_config) = config.chains.get_mut(&chain) {
							chain_config.rpc_url = value;
						}
					}
				}
			}
		}

		Ok(())
	}

	/// Validate configuration
	pub fn validate_config(config: &SwapConfig) -> Result<(), ConfigError> {
		if let Some(url) = &config.thornode.url {
			if !is_http_url(url) {
				return Err(ConfigError::ValidationError(
					"THORNode URL must start with http:// or https://".to_string(),
				));
			}
		}

		let swap = &config.swap;
		for (name, bps) in [
			("estimate_tolerance_bps", swap.estimate_tolerance_bps),
			("execute_tolerance_bps", swap.execute_tolerance_bps),
		] {
			if bps > MAX_BASIS_POINTS {
				return Err(ConfigError::ValidationError(format!(
					"{} must be at most {}, got {}",
					name, MAX_BASIS_POINTS, bps
				)));
			}
		}

		if swap.poll_interval_ms == 0 {
			return Err(ConfigError::ValidationError(
				"poll_interval_ms must be greater than zero".to_string(),
			));
		}

		match (&swap.affiliate_address, swap.affiliate_bps) {
			(None, Some(_)) => {
				return Err(ConfigError::ValidationError(
					"affiliate_bps is set without affiliate_address".to_string(),
				))
			}
			(_, Some(bps)) if bps > MAX_BASIS_POINTS => {
				return Err(ConfigError::ValidationError(format!(
					"affiliate_bps must be at most {}",
					MAX_BASIS_POINTS
				)))
			}
			_ => {}
		}

		for (chain, chain_config) in &config.chains {
			if !chain.is_evm() {
				return Err(ConfigError::ValidationError(format!(
					"{} is not an EVM chain",
					chain
				)));
			}
			if !is_http_url(&chain_config.rpc_url) {
				return Err(ConfigError::ValidationError(format!(
					"RPC URL for {} must start with http:// or https://",
					chain
				)));
			}
			if let Some(key) = &chain_config.private_key {
				let key = key.strip_prefix("0x").unwrap_or(key);
				if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
					return Err(ConfigError::ValidationError(format!(
						"Private key for {} must be 64 hex characters (32 bytes)",
						chain
					)));
				}
			}
		}

		Ok(())
	}
}

fn is_http_url(url: &str) -> bool {
	url.starts_with("http://") || url.starts_with("https://")
}

/// Load configuration from standard locations
pub fn load_config() -> Result<SwapConfig, ConfigError> {
	// Check for config file in order:
	// 1. Environment variable SWAP_CONFIG
	// 2. ./swapper.toml
	// 3. ./config/swapper.toml
	// 4. Default config with env overrides

	if let Ok(path) = std::env::var("SWAP_CONFIG") {
		return ConfigLoader::from_env_and_file(Some(Path::new(&path)));
	}

	for path in ["./swapper.toml", "./config/swapper.toml"] {
		if Path::new(path).exists() {
			return ConfigLoader::from_env_and_file(Some(Path::new(path)));
		}
	}

	ConfigLoader::from_env_and_file(None)
}
