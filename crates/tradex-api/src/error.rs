use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradex_types::TradexError;

/// Body of every 404 from the result endpoint
pub const NO_RESULT_MESSAGE: &str =
    "No optimization result found on the ledger. Run optimization first.";

/// Which endpoint an error surfaced from; decides the 500 message prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Optimize,
    Retrieve,
    Series,
}

impl Operation {
    fn route(&self) -> &'static str {
        match self {
            Operation::Optimize => "POST /api/optimize",
            Operation::Retrieve => "GET /api/result",
            Operation::Series => "GET /api/series",
        }
    }

    fn failure(&self) -> &'static str {
        match self {
            Operation::Optimize => "Failed to submit optimization",
            Operation::Retrieve => "Failed to retrieve result",
            Operation::Series => "Failed to build series",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A [`TradexError`] tagged with the endpoint it came from
#[derive(Debug, Error)]
#[error("[{}] {error}", .operation.route())]
pub struct ApiError {
    pub operation: Operation,
    #[source]
    pub error: TradexError,
}

impl ApiError {
    pub fn new(operation: Operation, error: TradexError) -> Self {
        ApiError { operation, error }
    }

    pub fn optimize(error: TradexError) -> Self {
        Self::new(Operation::Optimize, error)
    }

    pub fn retrieve(error: TradexError) -> Self {
        Self::new(Operation::Retrieve, error)
    }

    pub fn series(error: TradexError) -> Self {
        Self::new(Operation::Series, error)
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            TradexError::Validation(_) => StatusCode::BAD_REQUEST,
            TradexError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message sent to the client
    pub fn message(&self) -> String {
        match &self.error {
            TradexError::Validation(message) => message.clone(),
            TradexError::NotFound(_) => NO_RESULT_MESSAGE.to_string(),
            other => format!("{}: {}", self.operation.failure(), other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.error.is_client_error() {
            tracing::warn!("{}", self);
        } else {
            tracing::error!("{}", self);
        }
        let status = self.status();

        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}
