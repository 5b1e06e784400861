mod axis;
mod series;
mod transform;
mod fallback;

pub use axis::{tick_interval, AxisDomain, TARGET_TICKS};
pub use series::{ChartSeries, SeriesField, SeriesKind, SeriesOrigin, SeriesPoint, UnknownSeriesKind};
pub use transform::{to_series, ConvergenceSource, LiveSource};
pub use fallback::{
    demo_objective, demo_price, demo_production, demo_supply_demand, DemoSource, DEMO_ITERATIONS,
    DEMO_PRODUCTION_ITERATIONS,
};
