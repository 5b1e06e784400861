use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tradex_gateway::SessionConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

/// Server configuration.
///
/// Built from defaults, then an optional JSON file, then environment
/// variables; command-line flags are applied last by the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Ledger channel, contract, identity, wallet and connection profile
    pub session: SessionConfig,
    /// Base URL of the REST ledger gateway. Without one the server runs in
    /// demo mode: optimization requests fail and charts use demo series.
    pub ledger_url: Option<String>,
    /// Request timeout for the ledger gateway client, in seconds
    pub ledger_timeout_secs: Option<u64>,
    /// Built web client, served at `/` when the directory exists
    pub client_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session: SessionConfig::default(),
            ledger_url: None,
            ledger_timeout_secs: None,
            client_dir: PathBuf::from("client/dist"),
        }
    }
}

impl ApiConfig {
    /// Defaults overlaid with `path` (when given) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override fields from environment variables looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            let port: u16 = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT",
                value: port.clone(),
            })?;
            self.bind.set_port(port);
        }
        if let Some(channel) = lookup("CHANNEL_NAME") {
            self.session.channel = channel;
        }
        if let Some(contract) = lookup("CHAINCODE_NAME") {
            self.session.contract = contract;
        }
        if let Some(identity) = lookup("ORG1_USER_ID") {
            self.session.identity = identity;
        }
        if let Some(path) = lookup("CCP_PATH") {
            self.session.profile_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("WALLET_PATH") {
            self.session.wallet_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("LEDGER_GATEWAY_URL") {
            self.ledger_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Some(dir) = lookup("CLIENT_DIR") {
            self.client_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn ledger_timeout(&self) -> Option<Duration> {
        self.ledger_timeout_secs.map(Duration::from_secs)
    }
}
