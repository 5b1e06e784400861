use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::PathBuf;
use tradex_types::{Result, TradexError};

/// File extension of identity files inside a wallet directory
pub const IDENTITY_EXTENSION: &str = "id";

/// X.509 key material of an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub certificate: String,
    pub private_key: String,
}

/// A registered ledger identity, as stored in `<label>.id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "type")]
    pub kind: String,
    pub msp_id: String,
    pub credentials: Credentials,
    #[serde(default)]
    pub version: Option<u32>,
}

impl Identity {
    /// Hex SHA-256 of the certificate, safe to log
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.credentials.certificate.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// File-system credential store: one JSON identity file per label
#[derive(Debug, Clone)]
pub struct Wallet {
    root: PathBuf,
}

impl Wallet {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Wallet { root: root.into() }
    }

    fn identity_path(&self, label: &str) -> PathBuf {
        self.root.join(format!("{}.{}", label, IDENTITY_EXTENSION))
    }

    /// Look up an identity by label. `Ok(None)` when the label is absent.
    pub async fn get(&self, label: &str) -> Result<Option<Identity>> {
        let path = self.identity_path(label);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(TradexError::Connection(format!(
                    "failed to read identity file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            TradexError::Connection(format!(
                "invalid identity file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Resolve a label, failing with `IdentityNotFound` when absent
    pub async fn require(&self, label: &str) -> Result<Identity> {
        self.get(label)
            .await?
            .ok_or_else(|| TradexError::IdentityNotFound(label.to_string()))
    }

    /// Store an identity under `label`, creating the wallet directory if needed
    pub async fn put(&self, label: &str, identity: &Identity) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            TradexError::Connection(format!("failed to create wallet {}: {}", self.root.display(), e))
        })?;

        let json = serde_json::to_vec_pretty(identity)
            .map_err(|e| TradexError::Connection(format!("failed to encode identity: {}", e)))?;

        tokio::fs::write(self.identity_path(label), json)
            .await
            .map_err(|e| TradexError::Connection(format!("failed to write identity {}: {}", label, e)))
    }
}
