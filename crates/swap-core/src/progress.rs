//! Countdown reporting while an outbound transaction is pending.

use std::fmt;
use std::time::Duration;
use swap_config::SwapSettings;
use tokio::time::{sleep, Instant};

/// Longest countdown the reporter will run, whatever delay the quote claims.
pub const MAX_PROGRESS_WAIT: Duration = Duration::from_secs(24 * 60 * 60);

/// How long to wait after submission for a quote with the given outbound
/// delay.
pub fn wait_duration(outbound_delay_secs: u64, settings: &SwapSettings) -> Duration {
	if outbound_delay_secs <= settings.fast_outbound_threshold_secs {
		Duration::from_millis(settings.min_wait_ms)
	} else {
		Duration::from_secs(outbound_delay_secs)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
	Tick {
		elapsed_secs: u64,
		remaining_secs: u64,
		percent: u8,
	},
	Done,
}

impl fmt::Display for ProgressEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProgressEvent::Tick {
				elapsed_secs,
				remaining_secs,
				percent,
			} => write!(f, "{}s/{}s {}%", elapsed_secs, remaining_secs, percent),
			ProgressEvent::Done => f.write_str("Done!"),
		}
	}
}

/// Polls the clock until `total` has passed, emitting one tick per wake and
/// a single [`ProgressEvent::Done`] at the end.
///
/// Waits longer than [`MAX_PROGRESS_WAIT`] are clamped to it.
///
/// Remaining time is measured against a fixed deadline on every wake, so a
/// late wake-up shortens the wait instead of extending it.
#[derive(Debug, Clone, Copy)]
pub struct ProgressReporter {
	total: Duration,
	poll_interval: Duration,
}

impl ProgressReporter {
	pub fn new(total: Duration, poll_interval: Duration) -> Self {
		Self {
			total: total.min(MAX_PROGRESS_WAIT),
			poll_interval,
		}
	}

	pub fn total(&self) -> Duration {
		self.total
	}

	pub async fn run<F>(&self, mut sink: F)
	where
		F: FnMut(ProgressEvent),
	{
		let start = Instant::now();
		let end = start.checked_add(self.total).unwrap_or(start);
		let mut remaining = self.total;

		while !remaining.is_zero() {
			sink(self.tick(remaining));
			sleep(self.poll_interval).await;
			remaining = end.saturating_duration_since(Instant::now());
		}

		sink(ProgressEvent::Done);
	}

	fn tick(&self, remaining: Duration) -> ProgressEvent {
		let elapsed = self.total.saturating_sub(remaining);
		let percent = elapsed.as_nanos() * 100 / self.total.as_nanos().max(1);

		ProgressEvent::Tick {
			elapsed_secs: elapsed.as_secs(),
			remaining_secs: remaining.as_nanos().div_ceil(1_000_000_000) as u64,
			percent: percent.min(100) as u8,
		}
	}
}
