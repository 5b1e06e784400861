use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::ConnectionProfile;
use crate::wallet::Identity;

/// Failure category reported by a ledger gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerErrorKind {
    /// The query entry point has no stored result
    NoResult,
    /// Peers refused to endorse the proposal
    Endorsement,
    /// The orderer rejected or failed to commit the transaction
    Ordering,
    /// Gateway or peer could not be reached
    Unavailable,
    /// Contract returned an error, or the kind is unknown
    Chaincode,
}

/// Error returned by the ledger collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LedgerError {
    pub kind: LedgerErrorKind,
    pub message: String,
}

impl LedgerError {
    pub fn new(kind: LedgerErrorKind, message: impl Into<String>) -> Self {
        LedgerError {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(LedgerErrorKind::Unavailable, message)
    }

    pub fn chaincode(message: impl Into<String>) -> Self {
        Self::new(LedgerErrorKind::Chaincode, message)
    }

    pub fn no_result(message: impl Into<String>) -> Self {
        Self::new(LedgerErrorKind::NoResult, message)
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Ledger gateway: opens connections on behalf of a wallet identity.
/// Implemented by the REST gateway client and the in-memory stub ledger.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Connect to the network described by `profile` as `identity`
    async fn connect(
        &self,
        profile: &ConnectionProfile,
        identity: &Identity,
    ) -> LedgerResult<Box<dyn GatewayConnection>>;
}

/// An open connection to the ledger network
#[async_trait]
pub trait GatewayConnection: Send + Sync {
    /// Invoke a state-changing contract function. Blocks until the
    /// transaction is endorsed, ordered and committed.
    async fn submit_transaction(
        &self,
        channel: &str,
        contract: &str,
        name: &str,
        args: &[String],
    ) -> LedgerResult<Vec<u8>>;

    /// Invoke a read-only contract function
    async fn evaluate_transaction(
        &self,
        channel: &str,
        contract: &str,
        name: &str,
        args: &[String],
    ) -> LedgerResult<Vec<u8>>;

    /// Close the connection. Never fails; problems are only logged.
    async fn disconnect(&self);
}
