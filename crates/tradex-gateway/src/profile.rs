use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tradex_types::{Result, TradexError};

/// Endpoint of a single peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConfig {
    pub url: String,
}

/// Network connection profile (the `connection-<org>.json` document)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub peers: BTreeMap<String, PeerConfig>,
}

impl ConnectionProfile {
    /// Parse a profile from JSON; it must name at least one peer
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let profile: ConnectionProfile = serde_json::from_slice(bytes)
            .map_err(|e| TradexError::Connection(format!("invalid connection profile: {}", e)))?;

        if profile.peers.is_empty() {
            return Err(TradexError::Connection(format!(
                "connection profile '{}' defines no peers",
                profile.name
            )));
        }

        Ok(profile)
    }

    /// Load a profile from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            TradexError::Connection(format!(
                "failed to load connection profile {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&bytes)
    }

    /// Peer names in profile order
    pub fn peer_names(&self) -> Vec<&str> {
        self.peers.keys().map(String::as_str).collect()
    }
}
