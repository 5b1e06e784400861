use tradex_types::{
    CanonicalResult, OptimizationRequest, RawResult, Result, SupplyDemand, TradexError, Triple,
};

use crate::wire::{WireResult, WireShape};

/// Convergence traces as they arrive off the wire, each possibly absent
struct WirePlots {
    objective: Option<Vec<f64>>,
    prices: Option<Vec<Triple>>,
    productions: Option<Vec<Triple>>,
    supply_demand: Option<Vec<SupplyDemand>>,
}

/// Shape-independent view of a decoded payload
struct Fields {
    objective: f64,
    prices: Vec<f64>,
    productions: Vec<f64>,
    demands: Vec<Vec<f64>>,
    iterations_performed: Option<u32>,
    max_iterations_requested: Option<u32>,
    plots: WirePlots,
}

impl From<WireResult> for Fields {
    fn from(wire: WireResult) -> Self {
        match wire {
            WireResult::Current(w) => Fields {
                objective: w.objective,
                prices: w.l,
                productions: w.p,
                demands: w.q,
                iterations_performed: w.iterations_performed,
                max_iterations_requested: w.max_iterations_requested,
                plots: WirePlots {
                    objective: w.objective_plot,
                    prices: w.l_plot,
                    productions: w.p_plot,
                    supply_demand: w.sd_plot,
                },
            },
            WireResult::Legacy(w) => Fields {
                objective: w.objective,
                prices: w.prices,
                productions: w.productions,
                demands: w.demands,
                iterations_performed: w.iterations_performed,
                max_iterations_requested: w.max_iterations_requested,
                plots: WirePlots {
                    objective: None,
                    prices: None,
                    productions: None,
                    supply_demand: None,
                },
            },
        }
    }
}

/// Normalize a ledger payload of either shape into a [`CanonicalResult`].
///
/// `max_iterations_requested` is taken from the payload when present and
/// otherwise equals `iterations_performed`.
pub fn normalize(raw: &RawResult) -> Result<CanonicalResult> {
    normalize_inner(raw, None)
}

/// Normalize the response to a submission made with `request`
pub fn normalize_submission(raw: &RawResult, request: OptimizationRequest) -> Result<CanonicalResult> {
    normalize_inner(raw, Some(request.iterations_to_run))
}

fn normalize_inner(raw: &RawResult, requested: Option<u32>) -> Result<CanonicalResult> {
    let wire = WireResult::decode(raw)?;
    let shape = wire.shape();
    let fields = Fields::from(wire);

    check_demand_widths(&fields.demands, fields.productions.len())?;

    let traces = complete_plots(fields.plots)?;
    let iterations_performed = match &traces {
        Some((objective, ..)) => {
            let derived = iterations_from_len(objective.len())?;
            if let Some(reported) = fields.iterations_performed {
                if reported != derived {
                    return Err(TradexError::MalformedResult(format!(
                        "iterations_performed is {} but plots hold {} points",
                        reported,
                        objective.len()
                    )));
                }
            }
            derived
        }
        None => fields.iterations_performed.unwrap_or(0),
    };

    let max_iterations_requested = requested
        .or(fields.max_iterations_requested)
        .unwrap_or(iterations_performed);

    let mut result = CanonicalResult {
        objective: fields.objective,
        prices: fields.prices,
        productions: fields.productions,
        demands: fields.demands,
        iterations_performed,
        max_iterations_requested,
        objective_plot: Vec::new(),
        price_plot: Vec::new(),
        production_plot: Vec::new(),
        supply_demand_plot: Vec::new(),
    };

    match traces {
        Some((objective, prices, productions, supply_demand)) => {
            result.objective_plot = objective;
            result.price_plot = prices;
            result.production_plot = productions;
            result.supply_demand_plot = supply_demand;
        }
        None => {
            tracing::debug!(
                "{:?}-shape payload has no convergence traces, using converged values only",
                shape
            );
            result.objective_plot = vec![result.objective];
            result.price_plot = vec![leading_triple(&result.prices)];
            result.production_plot = vec![leading_triple(&result.productions)];
            result.supply_demand_plot = vec![[result.total_supply(), result.total_demand()]];
        }
    }

    Ok(result)
}

type Plots = (Vec<f64>, Vec<Triple>, Vec<Triple>, Vec<SupplyDemand>);

/// All four traces, none of them, or an error. Present traces must share
/// one non-zero length.
fn complete_plots(plots: WirePlots) -> Result<Option<Plots>> {
    match (plots.objective, plots.prices, plots.productions, plots.supply_demand) {
        (None, None, None, None) => Ok(None),
        (Some(objective), Some(prices), Some(productions), Some(supply_demand)) => {
            let lens = [
                ("objective_plot", objective.len()),
                ("l_plot", prices.len()),
                ("p_plot", productions.len()),
                ("sd_plot", supply_demand.len()),
            ];
            if lens.iter().any(|(_, len)| *len != objective.len()) {
                let described: Vec<String> =
                    lens.iter().map(|(name, len)| format!("{}={}", name, len)).collect();
                return Err(TradexError::MalformedResult(format!(
                    "plot lengths differ: {}",
                    described.join(", ")
                )));
            }
            Ok(Some((objective, prices, productions, supply_demand)))
        }
        (objective, prices, productions, supply_demand) => {
            let missing: Vec<&str> = [
                ("objective_plot", objective.is_none()),
                ("l_plot", prices.is_none()),
                ("p_plot", productions.is_none()),
                ("sd_plot", supply_demand.is_none()),
            ]
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| *name)
            .collect();
            Err(TradexError::MalformedResult(format!(
                "incomplete convergence traces, missing {}",
                missing.join(", ")
            )))
        }
    }
}

fn iterations_from_len(len: usize) -> Result<u32> {
    if len == 0 {
        return Err(TradexError::MalformedResult(
            "convergence traces are empty".to_string(),
        ));
    }
    u32::try_from(len - 1).map_err(|_| {
        TradexError::MalformedResult(format!("convergence traces too long: {} points", len))
    })
}

fn check_demand_widths(demands: &[Vec<f64>], generators: usize) -> Result<()> {
    match demands.iter().position(|row| row.len() != generators) {
        Some(consumer) => Err(TradexError::MalformedResult(format!(
            "demand row {} has {} entries, expected one per generator ({})",
            consumer,
            demands[consumer].len(),
            generators
        ))),
        None => Ok(()),
    }
}

/// First three values, or zeros when fewer than three exist
fn leading_triple(values: &[f64]) -> Triple {
    match values {
        [a, b, c, ..] => [*a, *b, *c],
        _ => [0.0; 3],
    }
}

/// Detect the wire shape of a payload without normalizing it
pub fn detect_shape(raw: &RawResult) -> Result<WireShape> {
    WireShape::detect(raw.as_value())
}
