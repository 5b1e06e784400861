use serde::{Deserialize, Serialize};

/// Upper bound on labelled x-axis ticks per chart
pub const TARGET_TICKS: usize = 10;

/// Closed y-axis range
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl AxisDomain {
    pub fn new(min: f64, max: f64) -> Self {
        AxisDomain { min, max }
    }

    /// Tightest range containing every value, without padding.
    /// `None` for an empty input.
    pub fn fit<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().fold(None, |domain, v| match domain {
            None => Some(AxisDomain::new(v, v)),
            Some(d) => Some(AxisDomain::new(d.min.min(v), d.max.max(v))),
        })
    }
}

/// Label every n-th iteration so that at most about [`TARGET_TICKS`] labels
/// render. Never below 1.
pub fn tick_interval(series_len: usize) -> usize {
    (series_len / TARGET_TICKS).max(1)
}
