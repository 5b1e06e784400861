use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, TradexError};

/// Iteration cap used when the caller does not ask for one
pub const DEFAULT_ITERATIONS: u32 = 1000;

/// A request to run the market-clearing optimization on the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub iterations_to_run: u32,
}

impl OptimizationRequest {
    /// Create a request, rejecting a zero iteration count
    pub fn new(iterations_to_run: u32) -> Result<Self> {
        if iterations_to_run == 0 {
            return Err(TradexError::Validation(
                "iterations_to_run must be a positive integer.".to_string(),
            ));
        }
        Ok(OptimizationRequest { iterations_to_run })
    }

    /// Parse the `iterations_to_run` field of a JSON request body.
    ///
    /// An absent field means [`DEFAULT_ITERATIONS`]. Integers and numeric
    /// strings are accepted; anything else (null, fractions, negatives,
    /// values beyond `u32`) is a validation error.
    pub fn from_field(field: Option<&Value>) -> Result<Self> {
        let Some(value) = field else {
            return Ok(Self::default());
        };

        let parsed = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        match parsed.and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Self::new(n),
            None => Err(TradexError::Validation(
                "iterations_to_run must be a positive integer.".to_string(),
            )),
        }
    }

    /// Parse a raw request body. An empty body is the default request.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| TradexError::Validation(format!("invalid JSON body: {}", e)))?;

        match value {
            Value::Object(map) => Self::from_field(map.get("iterations_to_run")),
            _ => Err(TradexError::Validation(
                "request body must be a JSON object".to_string(),
            )),
        }
    }

    /// The single string argument the ledger's `Optimize` entry point expects
    pub fn to_argument(&self) -> String {
        self.iterations_to_run.to_string()
    }
}

impl Default for OptimizationRequest {
    fn default() -> Self {
        OptimizationRequest {
            iterations_to_run: DEFAULT_ITERATIONS,
        }
    }
}
