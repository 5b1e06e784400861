use thiserror::Error;

#[derive(Debug, Error)]
pub enum TradexError {
    #[error("Identity \"{0}\" not found in wallet. Register the user first.")]
    IdentityNotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transaction submit failed: {0}")]
    TransactionSubmit(String),

    #[error("Transaction query failed: {0}")]
    TransactionQuery(String),

    #[error("No optimization result found: {0}")]
    NotFound(String),

    #[error("Malformed result: {0}")]
    MalformedResult(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl TradexError {
    /// True for errors caused by the caller's input rather than the ledger
    pub fn is_client_error(&self) -> bool {
        matches!(self, TradexError::Validation(_) | TradexError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, TradexError>;
