use std::sync::Arc;
use tradex_gateway::{LedgerGateway, RestGateway, SessionManager};
use tradex_types::{Result, TradexError};

use crate::config::ApiConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    /// `None` in demo mode
    pub sessions: Option<SessionManager>,
}

impl AppState {
    /// State backed by `gateway`
    pub fn new(config: ApiConfig, gateway: Arc<dyn LedgerGateway>) -> Self {
        let sessions = SessionManager::new(config.session.clone(), gateway);
        AppState {
            config: Arc::new(config),
            sessions: Some(sessions),
        }
    }

    /// State without a ledger
    pub fn demo(config: ApiConfig) -> Self {
        AppState {
            config: Arc::new(config),
            sessions: None,
        }
    }

    /// Connect to the REST ledger gateway when `config.ledger_url` is set,
    /// otherwise run in demo mode
    pub fn from_config(config: ApiConfig) -> Result<Self> {
        let Some(url) = config.ledger_url.clone() else {
            return Ok(Self::demo(config));
        };

        let gateway = RestGateway::new(url, config.ledger_timeout())
            .map_err(|e| TradexError::Connection(e.to_string()))?;
        Ok(Self::new(config, Arc::new(gateway)))
    }

    pub fn ledger_configured(&self) -> bool {
        self.sessions.is_some()
    }

    /// The session manager, or a connection error in demo mode
    pub fn sessions(&self) -> Result<&SessionManager> {
        self.sessions.as_ref().ok_or_else(|| {
            TradexError::Connection("no ledger gateway configured (running in demo mode)".to_string())
        })
    }
}
