use tradex_types::{OptimizationRequest, RawResult, Result, TradexError};

use crate::gateway::{LedgerError, LedgerErrorKind};
use crate::session::Session;

/// State-changing entry point that runs the optimization and stores its result
pub const OPTIMIZE_TRANSACTION: &str = "Optimize";

/// Read-only entry point returning the last stored result
pub const QUERY_TRANSACTION: &str = "QueryResult";

/// Messages the contract uses when nothing has been stored yet
const NO_RESULT_MESSAGES: [&str; 2] = [
    "no optimization result found",
    "no optimisation result found",
];

/// Run the optimization with `request.iterations_to_run` as the single,
/// string-encoded argument. Waits for the ledger to commit.
pub async fn submit_optimization(
    session: &Session,
    request: OptimizationRequest,
) -> Result<RawResult> {
    tracing::info!(
        "Submitting {} transaction with {} max iterations (session {})",
        OPTIMIZE_TRANSACTION,
        request.iterations_to_run,
        session.id()
    );

    let bytes = session
        .submit_transaction(OPTIMIZE_TRANSACTION, &[request.to_argument()])
        .await
        .map_err(|e| TradexError::TransactionSubmit(e.to_string()))?;

    RawResult::from_bytes(&bytes)
}

/// Fetch the latest stored optimization result
pub async fn query_latest_result(session: &Session) -> Result<RawResult> {
    tracing::info!(
        "Querying for the latest optimization result (session {})",
        session.id()
    );

    match session.evaluate_transaction(QUERY_TRANSACTION, &[]).await {
        Ok(bytes) => RawResult::from_bytes(&bytes),
        Err(e) if is_no_result(&e) => Err(TradexError::NotFound(e.message)),
        Err(e) => Err(TradexError::TransactionQuery(e.to_string())),
    }
}

/// A ledger error means "nothing stored yet" when it is typed as such, or,
/// for gateways that only forward text, when the message says so.
pub fn is_no_result(error: &LedgerError) -> bool {
    if error.kind == LedgerErrorKind::NoResult {
        return true;
    }
    let message = error.message.to_lowercase();
    NO_RESULT_MESSAGES.iter().any(|m| message.contains(m))
}
