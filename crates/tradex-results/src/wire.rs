use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tradex_types::{RawResult, Result, SupplyDemand, TradexError, Triple};

/// Which of the known payload layouts a raw result uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireShape {
    /// `prices` / `productions` / `demands`, no iteration traces
    Legacy,
    /// `l` / `p` / `q` plus `*_plot` traces
    Current,
}

const CURRENT_FIELDS: [&str; 3] = ["l", "p", "q"];
const LEGACY_FIELDS: [&str; 3] = ["prices", "productions", "demands"];

impl WireShape {
    /// Detect the layout from field presence. Current wins if both match.
    pub fn detect(value: &Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(TradexError::MalformedResult(
                "ledger payload is not a JSON object".to_string(),
            ));
        };

        let has_all = |fields: &[&str]| fields.iter().all(|f| object.contains_key(*f));

        if has_all(&CURRENT_FIELDS) {
            Ok(WireShape::Current)
        } else if has_all(&LEGACY_FIELDS) {
            Ok(WireShape::Legacy)
        } else {
            Err(TradexError::MalformedResult(
                "payload has neither l/p/q nor prices/productions/demands".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentWire {
    pub objective: f64,
    pub l: Vec<f64>,
    pub p: Vec<f64>,
    pub q: Vec<Vec<f64>>,
    #[serde(default)]
    pub iterations_performed: Option<u32>,
    #[serde(default)]
    pub max_iterations_requested: Option<u32>,
    #[serde(default)]
    pub objective_plot: Option<Vec<f64>>,
    #[serde(default)]
    pub l_plot: Option<Vec<Triple>>,
    #[serde(default)]
    pub p_plot: Option<Vec<Triple>>,
    #[serde(default)]
    pub sd_plot: Option<Vec<SupplyDemand>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LegacyWire {
    pub objective: f64,
    pub prices: Vec<f64>,
    pub productions: Vec<f64>,
    pub demands: Vec<Vec<f64>>,
    #[serde(default)]
    pub iterations_performed: Option<u32>,
    #[serde(default)]
    pub max_iterations_requested: Option<u32>,
}

/// A raw payload decoded into the variant matching its shape
#[derive(Debug, Clone)]
pub(crate) enum WireResult {
    Current(CurrentWire),
    Legacy(LegacyWire),
}

impl WireResult {
    pub fn decode(raw: &RawResult) -> Result<Self> {
        let value = raw.as_value();
        match WireShape::detect(value)? {
            WireShape::Current => decode_as(value, WireShape::Current).map(WireResult::Current),
            WireShape::Legacy => decode_as(value, WireShape::Legacy).map(WireResult::Legacy),
        }
    }

    pub fn shape(&self) -> WireShape {
        match self {
            WireResult::Current(_) => WireShape::Current,
            WireResult::Legacy(_) => WireShape::Legacy,
        }
    }
}

fn decode_as<T: DeserializeOwned>(value: &Value, shape: WireShape) -> Result<T> {
    T::deserialize(value).map_err(|e| {
        TradexError::MalformedResult(format!("invalid {:?}-shape payload: {}", shape, e))
    })
}
