//! Synthetic convergence curves for rendering charts when no ledger result
//! is available. Shapes are representative of a typical run and carry no
//! statistical meaning; every series produced here is tagged
//! [`SeriesOrigin::Demo`].

use crate::axis::AxisDomain;
use crate::series::{ChartSeries, SeriesField, SeriesKind, SeriesOrigin};
use crate::transform::ConvergenceSource;

/// Last iteration of the objective, price and supply/demand curves
pub const DEMO_ITERATIONS: usize = 120;

/// Last iteration of the generator production curves
pub const DEMO_PRODUCTION_ITERATIONS: usize = 110;

const OBJECTIVE_START: f64 = 3600.0;
const OBJECTIVE_FINAL: f64 = 1750.0;
const OBJECTIVE_SETTLE: usize = 5;

const SUPPLY_START: f64 = 450.0;
const DEMAND_START: f64 = 850.0;
const BALANCE_FINAL: f64 = 610.0;
const BALANCE_SETTLE: usize = 8;

const PRICE_START: f64 = 350.0;
const PRICE_FINAL: f64 = 424.0;

const PRODUCTION_START: [f64; 3] = [38.0, 35.0, 42.0];
const PRODUCTION_FINAL: [f64; 3] = [203.0, 201.0, 206.0];
const PRODUCTION_OFFSET: [f64; 3] = [0.0, -0.8, 0.8];
const LOGISTIC_CENTER: f64 = 17.0;
const LOGISTIC_SCALE: f64 = 8.0;

/// `1 − e^(−i/2)`
fn approach(iteration: usize) -> f64 {
    1.0 - (-(iteration as f64) / 2.0).exp()
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-(x - LOGISTIC_CENTER) / LOGISTIC_SCALE).exp())
}

/// Linear decay from 3600 to 1750 over the first five iterations
pub fn demo_objective(iteration: usize) -> f64 {
    if iteration < OBJECTIVE_SETTLE {
        OBJECTIVE_START
            - (OBJECTIVE_START - OBJECTIVE_FINAL) * iteration as f64 / OBJECTIVE_SETTLE as f64
    } else {
        OBJECTIVE_FINAL
    }
}

/// (total supply, total demand), meeting at 610 from iteration 8
pub fn demo_supply_demand(iteration: usize) -> [f64; 2] {
    if iteration < BALANCE_SETTLE {
        let k = approach(iteration);
        [
            SUPPLY_START + (BALANCE_FINAL - SUPPLY_START) * k,
            DEMAND_START - (DEMAND_START - BALANCE_FINAL) * k,
        ]
    } else {
        [BALANCE_FINAL, BALANCE_FINAL]
    }
}

/// Clearing price rising from 350 to 424
pub fn demo_price(iteration: usize) -> f64 {
    if iteration < BALANCE_SETTLE {
        PRICE_START + (PRICE_FINAL - PRICE_START) * approach(iteration)
    } else {
        PRICE_FINAL
    }
}

/// S-shaped ramp of the three generators' output
pub fn demo_production(iteration: usize) -> [f64; 3] {
    let mut out = [0.0; 3];
    for g in 0..3 {
        let progress = logistic(iteration as f64 + PRODUCTION_OFFSET[g]);
        out[g] = PRODUCTION_START[g] + (PRODUCTION_FINAL[g] - PRODUCTION_START[g]) * progress;
    }
    out
}

/// The demo curves as a [`ConvergenceSource`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

impl ConvergenceSource for DemoSource {
    fn origin(&self) -> SeriesOrigin {
        SeriesOrigin::Demo
    }

    fn series(&self, kind: SeriesKind) -> ChartSeries {
        let origin = SeriesOrigin::Demo;
        match kind {
            SeriesKind::Objective => ChartSeries::from_rows(
                kind,
                origin,
                vec![SeriesField::new("objective", "Objective")],
                (0..=DEMO_ITERATIONS).map(|i| [demo_objective(i)]),
            )
            .with_fixed_domain(AxisDomain::new(1600.0, 3700.0)),
            SeriesKind::PriceConvergence => ChartSeries::from_rows(
                kind,
                origin,
                vec![SeriesField::new("price", "Price")],
                (0..=DEMO_ITERATIONS).map(|i| [demo_price(i)]),
            )
            .with_fixed_domain(AxisDomain::new(350.0, 440.0)),
            SeriesKind::ProductionConvergence => ChartSeries::from_rows(
                kind,
                origin,
                (1..=3)
                    .map(|n| SeriesField::new(format!("generator{}", n), format!("Generator {}", n)))
                    .collect(),
                (0..=DEMO_PRODUCTION_ITERATIONS).map(demo_production),
            )
            .with_fixed_domain(AxisDomain::new(0.0, 220.0)),
            SeriesKind::SupplyDemand => ChartSeries::from_rows(
                kind,
                origin,
                vec![
                    SeriesField::new("supply", "Total Generation"),
                    SeriesField::new("demand", "Total Demand"),
                ],
                (0..=DEMO_ITERATIONS).map(demo_supply_demand),
            )
            .with_fixed_domain(AxisDomain::new(450.0, 900.0)),
        }
    }
}
