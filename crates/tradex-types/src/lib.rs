mod error;
mod request;
mod result;

pub use error::{TradexError, Result};
pub use request::{OptimizationRequest, DEFAULT_ITERATIONS};
pub use result::{CanonicalResult, RawResult, SupplyDemand, Triple};

#[cfg(test)]
mod tests;
