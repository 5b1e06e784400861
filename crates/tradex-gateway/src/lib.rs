mod gateway;
mod wallet;
mod profile;
mod session;
mod memory;
mod rest;
pub mod adapter;

pub use gateway::{GatewayConnection, LedgerError, LedgerErrorKind, LedgerGateway, LedgerResult};
pub use wallet::{Credentials, Identity, Wallet};
pub use profile::{ConnectionProfile, PeerConfig};
pub use session::{Session, SessionConfig, SessionFuture, SessionManager};
pub use memory::{MemoryGateway, TransactionCall, TransactionKind, LATEST_RESULT_KEY};
pub use rest::RestGateway;
