//! Shared types for the swap estimator and executor.

pub mod amount;
pub mod asset;
pub mod errors;
pub mod services;
pub mod swap;

pub use amount::*;
pub use asset::*;
pub use errors::*;
pub use services::*;
pub use swap::*;
