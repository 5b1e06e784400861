use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::axis::{tick_interval, AxisDomain};

/// The four convergence charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Objective,
    PriceConvergence,
    ProductionConvergence,
    SupplyDemand,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Objective,
        SeriesKind::PriceConvergence,
        SeriesKind::ProductionConvergence,
        SeriesKind::SupplyDemand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Objective => "objective",
            SeriesKind::PriceConvergence => "price_convergence",
            SeriesKind::ProductionConvergence => "production_convergence",
            SeriesKind::SupplyDemand => "supply_demand",
        }
    }

    /// Chart heading
    pub fn title(&self) -> &'static str {
        match self {
            SeriesKind::Objective => "Objective Function Convergence",
            SeriesKind::PriceConvergence => "Price Convergence (₹)",
            SeriesKind::ProductionConvergence => "Generator Production Convergence",
            SeriesKind::SupplyDemand => "Supply-Demand Balance",
        }
    }

    /// Y-axis caption
    pub fn y_label(&self) -> &'static str {
        match self {
            SeriesKind::Objective => "Objective",
            SeriesKind::PriceConvergence => "Price (₹)",
            SeriesKind::ProductionConvergence => "Power (MW)",
            SeriesKind::SupplyDemand => "MWh",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown series kind '{0}' (expected objective, price_convergence, production_convergence or supply_demand)")]
pub struct UnknownSeriesKind(pub String);

impl FromStr for SeriesKind {
    type Err = UnknownSeriesKind;

    /// Accepts snake_case, kebab-case and camelCase spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "objective" => Ok(SeriesKind::Objective),
            "priceconvergence" | "price" => Ok(SeriesKind::PriceConvergence),
            "productionconvergence" | "production" => Ok(SeriesKind::ProductionConvergence),
            "supplydemand" => Ok(SeriesKind::SupplyDemand),
            _ => Err(UnknownSeriesKind(s.to_string())),
        }
    }
}

/// Where a series' numbers came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrigin {
    /// Derived from a result stored on the ledger
    Ledger,
    /// Synthetic curves for rendering without a live result
    Demo,
}

/// A plotted quantity: record key plus legend label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesField {
    pub key: String,
    pub label: String,
}

impl SeriesField {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        SeriesField {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One x position: the iteration index and a value per field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub iteration: usize,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

/// Chart-ready data for one convergence plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: SeriesKind,
    pub origin: SeriesOrigin,
    pub title: String,
    pub y_label: String,
    pub fields: Vec<SeriesField>,
    pub points: Vec<SeriesPoint>,
    pub domain: AxisDomain,
    pub tick_interval: usize,
}

impl ChartSeries {
    /// Build a series from one row of values per iteration, in `fields`
    /// order. Iterations are numbered densely from 0; the domain is fitted
    /// to the data.
    pub fn from_rows<R>(kind: SeriesKind, origin: SeriesOrigin, fields: Vec<SeriesField>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: AsRef<[f64]>,
    {
        let points: Vec<SeriesPoint> = rows
            .into_iter()
            .enumerate()
            .map(|(iteration, row)| SeriesPoint {
                iteration,
                values: fields
                    .iter()
                    .zip(row.as_ref())
                    .map(|(field, value)| (field.key.clone(), *value))
                    .collect(),
            })
            .collect();

        let domain = AxisDomain::fit(points.iter().flat_map(|p| p.values.values().copied()))
            .unwrap_or_default();

        ChartSeries {
            kind,
            origin,
            title: kind.title().to_string(),
            y_label: kind.y_label().to_string(),
            tick_interval: tick_interval(points.len()),
            fields,
            points,
            domain,
        }
    }

    /// Replace the fitted domain with fixed bounds
    pub fn with_fixed_domain(mut self, domain: AxisDomain) -> Self {
        self.domain = domain;
        self
    }}
