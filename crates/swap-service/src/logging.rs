//! Tracing subscriber setup.

use anyhow::{Context, Result};
use swap_config::LoggingConfig;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used before the configuration has been read.
const BOOTSTRAP_LEVEL: &str = "info";

/// Filter directive in effect: `RUST_LOG` when set, otherwise the
/// configured level.
fn filter_directive(rust_log: Option<String>, level: &str) -> String {
	rust_log
		.filter(|directive| !directive.trim().is_empty())
		.unwrap_or_else(|| level.to_string())
}

fn bootstrap_subscriber<W>(directive: &str, writer: W) -> impl tracing::Subscriber + Send + Sync
where
	W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::new(directive))
		.with_writer(writer)
		.with_target(false)
		.finish()
}

/// Runs `f` under a temporary stderr subscriber, so configuration loading is
/// logged before the configured subscriber exists.
pub fn with_bootstrap_logging<T>(level: Option<&str>, f: impl FnOnce() -> T) -> T {
	let directive = filter_directive(
		std::env::var(EnvFilter::DEFAULT_ENV).ok(),
		level.unwrap_or(BOOTSTRAP_LEVEL),
	);
	tracing::subscriber::with_default(bootstrap_subscriber(&directive, std::io::stderr), f)
}

pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
	let directive = filter_directive(std::env::var(EnvFilter::DEFAULT_ENV).ok(), &config.level);
	let env_filter = EnvFilter::try_new(&directive)
		.with_context(|| format!("Invalid log filter '{}'", directive))?;

	let registry = tracing_subscriber::registry().with(env_filter);
	let initialized = if config.json {
		registry
			.with(tracing_subscriber::fmt::layer().json().with_target(false))
			.try_init()
	} else {
		registry
			.with(tracing_subscriber::fmt::layer().with_target(false))
			.try_init()
	};

	initialized.context("Failed to initialize tracing")
}
