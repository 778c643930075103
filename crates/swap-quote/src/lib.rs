//! Swap quotes from THORNode.

pub mod thornode;
pub mod types;

pub use thornode::ThornodeClient;
pub use types::{InboundAddress, QuoteFees, QuoteSwapResponse};
