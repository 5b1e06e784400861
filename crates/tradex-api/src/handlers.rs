use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tradex_gateway::adapter;
use tradex_results::{normalize, normalize_submission};
use tradex_series::{ChartSeries, ConvergenceSource, DemoSource, LiveSource, SeriesKind};
use tradex_types::{CanonicalResult, OptimizationRequest, SupplyDemand, TradexError, Triple};

use crate::error::ApiError;
use crate::state::AppState;

pub const SUBMITTED_MESSAGE: &str = "Optimization submitted and completed successfully.";
pub const RETRIEVED_MESSAGE: &str = "Latest optimization result retrieved successfully.";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ledger: String,
}

/// Result body of both the optimize and result endpoints. Field names are
/// the ones the web client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultResponse {
    pub message: String,
    /// Only present in the response to a submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations_requested: Option<u32>,
    pub iterations_performed: u32,
    pub objective: f64,
    pub l: Vec<f64>,
    pub p: Vec<f64>,
    pub q: Vec<Vec<f64>>,
    pub objective_plot: Vec<f64>,
    pub l_plot: Vec<Triple>,
    pub p_plot: Vec<Triple>,
    pub sd_plot: Vec<SupplyDemand>,
}

impl ResultResponse {
    fn from_result(message: &str, result: CanonicalResult, with_requested: bool) -> Self {
        ResultResponse {
            message: message.to_string(),
            max_iterations_requested: with_requested.then_some(result.max_iterations_requested),
            iterations_performed: result.iterations_performed,
            objective: result.objective,
            l: result.prices,
            p: result.productions,
            q: result.demands,
            objective_plot: result.objective_plot,
            l_plot: result.price_plot,
            p_plot: result.production_plot,
            sd_plot: result.supply_demand_plot,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SeriesQuery {
    #[serde(default)]
    pub demo: bool,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ledger: if state.ledger_configured() { "configured" } else { "demo" }.to_string(),
    })
}

/// Run the optimization on the ledger and return the committed result.
///
/// The body is validated before any session is opened.
pub async fn optimize(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResultResponse>, ApiError> {
    let request = OptimizationRequest::from_body(&body).map_err(ApiError::optimize)?;
    let sessions = state.sessions().map_err(ApiError::optimize)?;

    let raw = sessions
        .with_session(move |session| Box::pin(adapter::submit_optimization(session, request)))
        .await
        .map_err(ApiError::optimize)?;
    let result = normalize_submission(&raw, request).map_err(ApiError::optimize)?;

    tracing::info!(
        "Optimization finished: {} of {} iterations, objective {}",
        result.iterations_performed,
        request.iterations_to_run,
        result.objective
    );

    Ok(Json(ResultResponse::from_result(SUBMITTED_MESSAGE, result, true)))
}

async fn latest_result(state: &AppState) -> tradex_types::Result<CanonicalResult> {
    let raw = state
        .sessions()?
        .with_session(|session| Box::pin(adapter::query_latest_result(session)))
        .await?;
    normalize(&raw)
}

/// Latest result stored on the ledger
pub async fn result(State(state): State<AppState>) -> Result<Json<ResultResponse>, ApiError> {
    let result = latest_result(&state).await.map_err(ApiError::retrieve)?;
    Ok(Json(ResultResponse::from_result(RETRIEVED_MESSAGE, result, false)))
}

/// Chart data for one convergence plot.
///
/// Falls back to the demo curves when no ledger is configured or nothing
/// has been stored yet; `?demo=true` always selects them.
pub async fn series(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<ChartSeries>, ApiError> {
    let kind: SeriesKind = kind
        .parse()
        .map_err(|e: tradex_series::UnknownSeriesKind| ApiError::series(TradexError::Validation(e.to_string())))?;

    if query.demo || !state.ledger_configured() {
        return Ok(Json(DemoSource.series(kind)));
    }

    match latest_result(&state).await {
        Ok(result) => Ok(Json(LiveSource::new(&result).series(kind))),
        Err(TradexError::NotFound(_)) => {
            tracing::info!("No ledger result yet, serving demo {} series", kind);
            Ok(Json(DemoSource.series(kind)))
        }
        Err(e) => Err(ApiError::series(e)),
    }
}
