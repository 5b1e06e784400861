use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tradex_types::{Result, TradexError};

use crate::gateway::{GatewayConnection, LedgerGateway, LedgerResult};
use crate::profile::ConnectionProfile;
use crate::wallet::Wallet;

/// Where and as whom sessions are opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Wallet directory holding `<label>.id` files
    pub wallet_path: PathBuf,
    /// Connection profile JSON
    pub profile_path: PathBuf,
    pub channel: String,
    pub contract: String,
    /// Identity label used by [`SessionManager::with_session`]
    pub identity: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            wallet_path: PathBuf::from("wallet"),
            profile_path: PathBuf::from("connection-org1.json"),
            channel: "testchannel".to_string(),
            contract: "property".to_string(),
            identity: "appUser".to_string(),
        }
    }
}

/// An open, identity-bound connection scoped to one channel and contract
pub struct Session {
    id: u64,
    identity_label: String,
    channel: String,
    contract: String,
    opened_at: DateTime<Utc>,
    connection: Arc<dyn GatewayConnection>,
    released: bool,
}

impl Session {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn identity_label(&self) -> &str {
        &self.identity_label
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub async fn submit_transaction(&self, name: &str, args: &[String]) -> LedgerResult<Vec<u8>> {
        self.connection
            .submit_transaction(&self.channel, &self.contract, name, args)
            .await
    }

    pub async fn evaluate_transaction(&self, name: &str, args: &[String]) -> LedgerResult<Vec<u8>> {
        self.connection
            .evaluate_transaction(&self.channel, &self.contract, name, args)
            .await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("identity_label", &self.identity_label)
            .field("channel", &self.channel)
            .field("contract", &self.contract)
            .field("opened_at", &self.opened_at)
            .field("released", &self.released)
            .finish()
    }
}

/// A session dropped without [`SessionManager::release`] (caller deadline,
/// client gone, panic) still disconnects, on a background task.
impl Drop for Session {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!("Session {} dropped before release, disconnecting in background", self.id);
                let connection = Arc::clone(&self.connection);
                handle.spawn(async move {
                    connection.disconnect().await;
                });
            }
            Err(_) => {
                tracing::warn!("Session {} dropped outside a runtime, connection left open", self.id);
            }
        }
    }
}

/// Future returned by an operation run inside [`SessionManager::with_session`]
pub type SessionFuture<'s, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 's>>;

/// Opens one ledger session per logical request. No pooling.
#[derive(Clone)]
pub struct SessionManager {
    config: SessionConfig,
    gateway: Arc<dyn LedgerGateway>,
    next_id: Arc<AtomicU64>,
}

impl SessionManager {
    pub fn new(config: SessionConfig, gateway: Arc<dyn LedgerGateway>) -> Self {
        SessionManager {
            config,
            gateway,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Open a session as `identity_label`.
    ///
    /// The identity is resolved before anything touches the network, so a
    /// missing credential never produces a connection attempt.
    pub async fn acquire(&self, identity_label: &str) -> Result<Session> {
        let wallet = Wallet::open(&self.config.wallet_path);
        let identity = wallet.require(identity_label).await?;
        let profile = ConnectionProfile::load(&self.config.profile_path).await?;

        let connection = self
            .gateway
            .connect(&profile, &identity)
            .await
            .map_err(|e| TradexError::Connection(e.to_string()))?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            "Session {} opened on {}/{} as {} (cert {})",
            id,
            self.config.channel,
            self.config.contract,
            identity_label,
            identity.fingerprint()
        );

        Ok(Session {
            id,
            identity_label: identity_label.to_string(),
            channel: self.config.channel.clone(),
            contract: self.config.contract.clone(),
            opened_at: Utc::now(),
            connection: Arc::from(connection),
            released: false,
        })
    }

    /// Close a session
    pub async fn release(&self, mut session: Session) {
        session.connection.disconnect().await;
        session.released = true;
        let held_ms = (Utc::now() - session.opened_at).num_milliseconds();
        tracing::debug!("Session {} released after {}ms", session.id, held_ms);
    }

    /// Run `op` inside a session opened as the configured identity.
    /// The session is released on every exit path of `op`, including this
    /// future being dropped and `op` panicking.
    pub async fn with_session<T, F>(&self, op: F) -> Result<T>
    where
        T: Send,
        F: for<'s> FnOnce(&'s Session) -> SessionFuture<'s, T> + Send,
    {
        let session = self.acquire(&self.config.identity).await?;
        let outcome = op(&session).await;
        self.release(session).await;
        outcome
    }
}
