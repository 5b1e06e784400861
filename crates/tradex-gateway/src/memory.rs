use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::adapter::{OPTIMIZE_TRANSACTION, QUERY_TRANSACTION};
use crate::gateway::{GatewayConnection, LedgerError, LedgerGateway, LedgerResult};
use crate::profile::ConnectionProfile;
use crate::wallet::Identity;

/// Key the contract stores its latest result under
pub const LATEST_RESULT_KEY: &str = "LATEST_OPTIMIZATION_RESULT";

/// Produces the contract's response for a given iteration cap
pub type Optimizer = dyn Fn(u32) -> Value + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Submit,
    Evaluate,
}

/// A transaction as seen by the stub ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionCall {
    pub kind: TransactionKind,
    pub channel: String,
    pub contract: String,
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Default)]
struct LedgerState {
    latest: Option<Vec<u8>>,
    calls: Vec<TransactionCall>,
    connects: usize,
    disconnects: usize,
    connect_failure: Option<LedgerError>,
    submit_failure: Option<LedgerError>,
    evaluate_failure: Option<LedgerError>,
}

/// In-memory ledger standing in for the contract.
/// Suitable for testing and local runs without a network.
#[derive(Clone)]
pub struct MemoryGateway {
    state: Arc<Mutex<LedgerState>>,
    optimizer: Option<Arc<Optimizer>>,
}

impl MemoryGateway {
    /// Create an empty ledger with no optimizer; `Optimize` fails
    pub fn new() -> Self {
        MemoryGateway {
            state: Arc::new(Mutex::new(LedgerState::default())),
            optimizer: None,
        }
    }

    /// Create a ledger whose `Optimize` answers with `optimizer(max_iterations)`
    pub fn with_optimizer<F>(optimizer: F) -> Self
    where
        F: Fn(u32) -> Value + Send + Sync + 'static,
    {
        MemoryGateway {
            state: Arc::new(Mutex::new(LedgerState::default())),
            optimizer: Some(Arc::new(optimizer)),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed the stored result returned by `QueryResult`
    pub fn store(&self, result: &Value) {
        self.state().latest = Some(result.to_string().into_bytes());
    }

    /// Seed raw bytes, e.g. a payload that is not JSON
    pub fn store_bytes(&self, bytes: Vec<u8>) {
        self.state().latest = Some(bytes);
    }

    pub fn fail_connect(&self, error: LedgerError) {
        self.state().connect_failure = Some(error);
    }

    pub fn fail_submit(&self, error: LedgerError) {
        self.state().submit_failure = Some(error);
    }

    pub fn fail_evaluate(&self, error: LedgerError) {
        self.state().evaluate_failure = Some(error);
    }

    /// Every transaction received so far, oldest first
    pub fn calls(&self) -> Vec<TransactionCall> {
        self.state().calls.clone()
    }

    pub fn connects(&self) -> usize {
        self.state().connects
    }

    pub fn disconnects(&self) -> usize {
        self.state().disconnects
    }

    /// Connections opened but not yet closed
    pub fn open_connections(&self) -> usize {
        let state = self.state();
        state.connects - state.disconnects
    }

    fn record(&self, kind: TransactionKind, channel: &str, contract: &str, name: &str, args: &[String]) {
        self.state().calls.push(TransactionCall {
            kind,
            channel: channel.to_string(),
            contract: contract.to_string(),
            name: name.to_string(),
            args: args.to_vec(),
        });
    }

    fn optimize(&self, args: &[String]) -> LedgerResult<Vec<u8>> {
        let [max_iterations] = args else {
            return Err(LedgerError::chaincode(format!(
                "{} expects 1 argument, got {}",
                OPTIMIZE_TRANSACTION,
                args.len()
            )));
        };

        let max_iterations: u32 = max_iterations.parse().map_err(|e| {
            LedgerError::chaincode(format!(
                "failed to parse maxIterations '{}': {}",
                max_iterations, e
            ))
        })?;
        if max_iterations == 0 {
            return Err(LedgerError::chaincode(
                "maxIterations must be a positive integer, got 0",
            ));
        }

        let optimizer = self
            .optimizer
            .as_ref()
            .ok_or_else(|| LedgerError::chaincode("no optimizer installed on this ledger"))?;

        let bytes = optimizer(max_iterations).to_string().into_bytes();
        self.state().latest = Some(bytes.clone());
        Ok(bytes)
    }

    fn query(&self) -> LedgerResult<Vec<u8>> {
        self.state().latest.clone().ok_or_else(|| {
            LedgerError::no_result(format!(
                "no optimization result found for key '{}'. Run Optimize first",
                LATEST_RESULT_KEY
            ))
        })
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerGateway for MemoryGateway {
    async fn connect(
        &self,
        _profile: &ConnectionProfile,
        _identity: &Identity,
    ) -> LedgerResult<Box<dyn GatewayConnection>> {
        let mut state = self.state();
        if let Some(error) = state.connect_failure.clone() {
            return Err(error);
        }
        state.connects += 1;
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl GatewayConnection for MemoryGateway {
    async fn submit_transaction(
        &self,
        channel: &str,
        contract: &str,
        name: &str,
        args: &[String],
    ) -> LedgerResult<Vec<u8>> {
        self.record(TransactionKind::Submit, channel, contract, name, args);

        let failure = self.state().submit_failure.clone();
        if let Some(error) = failure {
            return Err(error);
        }

        match name {
            OPTIMIZE_TRANSACTION => self.optimize(args),
            other => Err(LedgerError::chaincode(format!(
                "function {} not found in contract",
                other
            ))),
        }
    }

    async fn evaluate_transaction(
        &self,
        channel: &str,
        contract: &str,
        name: &str,
        args: &[String],
    ) -> LedgerResult<Vec<u8>> {
        self.record(TransactionKind::Evaluate, channel, contract, name, args);

        let failure = self.state().evaluate_failure.clone();
        if let Some(error) = failure {
            return Err(error);
        }

        match name {
            QUERY_TRANSACTION => self.query(),
            other => Err(LedgerError::chaincode(format!(
                "function {} not found in contract",
                other
            ))),
        }
    }

    async fn disconnect(&self) {
        self.state().disconnects += 1;
    }
}
