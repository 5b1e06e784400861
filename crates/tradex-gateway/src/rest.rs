use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::gateway::{GatewayConnection, LedgerError, LedgerErrorKind, LedgerGateway, LedgerResult};
use crate::profile::ConnectionProfile;
use crate::wallet::Identity;

/// Body of a transaction proposal sent to the REST gateway
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionProposal<'a> {
    function: &'a str,
    args: &'a [String],
    identity: &'a str,
    msp_id: &'a str,
}

/// Error body returned by the REST gateway
#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: String,
    #[serde(default)]
    code: Option<LedgerErrorKind>,
}

/// Client for a REST ledger gateway that fronts the peer network
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
}

impl RestGateway {
    /// `timeout` bounds each HTTP round trip; `None` leaves it unbounded
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> LedgerResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LedgerError::unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(RestGateway {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LedgerGateway for RestGateway {
    async fn connect(
        &self,
        profile: &ConnectionProfile,
        identity: &Identity,
    ) -> LedgerResult<Box<dyn GatewayConnection>> {
        let health = format!("{}/health", self.base_url);
        let response = self.client.get(&health).send().await.map_err(|e| {
            LedgerError::unavailable(format!("ledger gateway {} unreachable: {}", self.base_url, e))
        })?;

        if !response.status().is_success() {
            return Err(LedgerError::unavailable(format!(
                "ledger gateway {} unhealthy: HTTP {}",
                self.base_url,
                response.status()
            )));
        }

        tracing::debug!(
            "Connected to ledger gateway {} for network '{}' (peers: {})",
            self.base_url,
            profile.name,
            profile.peer_names().join(", ")
        );

        Ok(Box::new(RestConnection {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            identity: identity.credentials.certificate.clone(),
            msp_id: identity.msp_id.clone(),
        }))
    }
}

struct RestConnection {
    client: reqwest::Client,
    base_url: String,
    /// PEM certificate presented with every proposal
    identity: String,
    msp_id: String,
}

impl RestConnection {
    async fn invoke(
        &self,
        mode: &str,
        channel: &str,
        contract: &str,
        name: &str,
        args: &[String],
    ) -> LedgerResult<Vec<u8>> {
        let url = format!(
            "{}/channels/{}/contracts/{}/{}",
            self.base_url, channel, contract, mode
        );
        let proposal = TransactionProposal {
            function: name,
            args,
            identity: &self.identity,
            msp_id: &self.msp_id,
        };

        let response = self
            .client
            .post(&url)
            .json(&proposal)
            .send()
            .await
            .map_err(|e| LedgerError::unavailable(format!("{} {} failed: {}", mode, name, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LedgerError::unavailable(format!("failed to read {} response: {}", name, e)))?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        Err(match serde_json::from_slice::<GatewayErrorBody>(&body) {
            Ok(err) => LedgerError::new(err.code.unwrap_or(LedgerErrorKind::Chaincode), err.error),
            Err(_) => LedgerError::chaincode(format!(
                "{} {} returned HTTP {}: {}",
                mode,
                name,
                status,
                String::from_utf8_lossy(&body)
            )),
        })
    }
}

#[async_trait]
impl GatewayConnection for RestConnection {
    async fn submit_transaction(
        &self,
        channel: &str,
        contract: &str,
        name: &str,
        args: &[String],
    ) -> LedgerResult<Vec<u8>> {
        self.invoke("submit", channel, contract, name, args).await
    }

    async fn evaluate_transaction(
        &self,
        channel: &str,
        contract: &str,
        name: &str,
        args: &[String],
    ) -> LedgerResult<Vec<u8>> {
        self.invoke("evaluate", channel, contract, name, args).await
    }

    async fn disconnect(&self) {
        tracing::trace!("Disconnected from ledger gateway {}", self.base_url);
    }
}
