//! Estimate and execute flows.
//!
//! Both flows are stateless: every call parses its own request and receives
//! the quote service and chain provider it should talk to.

pub mod estimator;
pub mod executor;
pub mod progress;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

pub use estimator::estimate_swap;
pub use executor::{do_single_swap, SwapOutcome};
pub use progress::{wait_duration, ProgressEvent, ProgressReporter, MAX_PROGRESS_WAIT};
pub use summary::SwapSummary;
