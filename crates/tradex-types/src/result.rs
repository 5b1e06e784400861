use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, TradexError};

/// Per-iteration snapshot of the three tracked prices or generator outputs
pub type Triple = [f64; 3];

/// Per-iteration (total supply, total demand) pair
pub type SupplyDemand = [f64; 2];

/// Undecoded ledger payload.
/// Field names are not interpreted until normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResult(pub Value);

impl RawResult {
    /// Decode the byte-string response of a ledger transaction
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map(RawResult)
            .map_err(|e| TradexError::MalformedResult(format!("ledger payload is not JSON: {}", e)))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawResult {
    fn from(value: Value) -> Self {
        RawResult(value)
    }
}

/// The single representation every wire shape is normalized into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalResult {
    /// Final social-welfare value
    pub objective: f64,
    /// Clearing prices at convergence
    pub prices: Vec<f64>,
    /// Output per generator at convergence
    pub productions: Vec<f64>,
    /// Allocation matrix, one row per consumer, one column per generator
    pub demands: Vec<Vec<f64>>,
    pub iterations_performed: u32,
    pub max_iterations_requested: u32,
    pub objective_plot: Vec<f64>,
    pub price_plot: Vec<Triple>,
    pub production_plot: Vec<Triple>,
    pub supply_demand_plot: Vec<SupplyDemand>,
}

impl CanonicalResult {
    /// Length shared by all four convergence plots
    pub fn plot_len(&self) -> usize {
        self.objective_plot.len()
    }

    pub fn total_supply(&self) -> f64 {
        self.productions.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demands.iter().flatten().sum()
    }

    /// True when the result carries no iteration traces beyond the converged point.
    /// Such results may still report `iterations_performed > 0`, so plot
    /// x-axes must come from [`plot_len`](Self::plot_len), not the iteration count.
    pub fn is_single_point(&self) -> bool {
        self.plot_len() == 1
    }
}
