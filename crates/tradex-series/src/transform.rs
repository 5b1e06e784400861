use tradex_types::CanonicalResult;

use crate::series::{ChartSeries, SeriesField, SeriesKind, SeriesOrigin};

/// Supplier of chart series. Live ledger data and the demo curves are
/// interchangeable behind this trait; every series says which it is via
/// [`ChartSeries::origin`].
pub trait ConvergenceSource {
    fn origin(&self) -> SeriesOrigin;

    fn series(&self, kind: SeriesKind) -> ChartSeries;

    /// All four charts in display order
    fn all_series(&self) -> Vec<ChartSeries> {
        SeriesKind::ALL.iter().map(|kind| self.series(*kind)).collect()
    }
}

/// Series derived from a normalized ledger result
#[derive(Debug, Clone, Copy)]
pub struct LiveSource<'a> {
    result: &'a CanonicalResult,
}

impl<'a> LiveSource<'a> {
    pub fn new(result: &'a CanonicalResult) -> Self {
        LiveSource { result }
    }
}

impl ConvergenceSource for LiveSource<'_> {
    fn origin(&self) -> SeriesOrigin {
        SeriesOrigin::Ledger
    }

    fn series(&self, kind: SeriesKind) -> ChartSeries {
        to_series(self.result, kind)
    }
}

fn numbered(prefix: &str, label: &str) -> Vec<SeriesField> {
    (1..=3)
        .map(|n| SeriesField::new(format!("{}{}", prefix, n), format!("{} {}", label, n)))
        .collect()
}

/// Turn one of a result's convergence traces into chart data.
///
/// Works on every plot length, including the single converged point that
/// legacy payloads degrade to; axis domain and tick interval are computed
/// from this series alone.
pub fn to_series(result: &CanonicalResult, kind: SeriesKind) -> ChartSeries {
    let origin = SeriesOrigin::Ledger;
    match kind {
        SeriesKind::Objective => ChartSeries::from_rows(
            kind,
            origin,
            vec![SeriesField::new("objective", "Objective")],
            result.objective_plot.iter().map(|v| [*v]),
        ),
        SeriesKind::PriceConvergence => ChartSeries::from_rows(
            kind,
            origin,
            numbered("price", "Price"),
            &result.price_plot,
        ),
        SeriesKind::ProductionConvergence => ChartSeries::from_rows(
            kind,
            origin,
            numbered("generator", "Generator"),
            &result.production_plot,
        ),
        SeriesKind::SupplyDemand => ChartSeries::from_rows(
            kind,
            origin,
            vec![
                SeriesField::new("supply", "Total Generation"),
                SeriesField::new("demand", "Total Demand"),
            ],
            &result.supply_demand_plot,
        ),
    }
}
