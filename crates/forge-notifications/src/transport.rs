//! Notification Transport
//!
//! Carries a validated notification to the Forge API. The trait is the seam
//! tests use to replace the network.

use async_trait::async_trait;
use http::header::ACCEPT;
use http::StatusCode;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::TransportError;
use crate::types::OutboundNotification;

/// Default request timeout for the reqwest transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of a completed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Perform one call. `Err` means no response was received.
    async fn send(
        &self,
        notification: &OutboundNotification,
    ) -> Result<TransportResponse, TransportError>;

    /// Get the name of this transport (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}

/// Sends notifications over HTTP as Connect-style JSON RPC calls
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Forge-Notify/1.0")
            .build()
            .map_err(|e| {
                error!("Failed to create HTTP client: {}", e);
                TransportError::Http(e)
            })?;

        Ok(Self { client })
    }

    /// Use a preconfigured client (proxies, custom TLS roots, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationTransport for ReqwestTransport {
    async fn send(
        &self,
        notification: &OutboundNotification,
    ) -> Result<TransportResponse, TransportError> {
        debug!("POST {}", notification.endpoint);

        let response = self
            .client
            .post(notification.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header("connect-protocol-version", "1")
            .bearer_auth(&notification.api_key)
            .json(&notification.payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        Ok(TransportResponse { status, body })
    }

    fn transport_name(&self) -> &'static str {
        "reqwest"
    }
}
