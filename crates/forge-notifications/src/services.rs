//! Owner notification service
//!
//! Validates a payload against the current Forge configuration and performs
//! a single call to the SendNotification endpoint. Validation failures are
//! returned as errors; anything that goes wrong after the request is built
//! is logged and reported as `Ok(false)`.

use async_trait::async_trait;
use forge_core::{ConfigProvider, DynConfigProvider, EnvConfigProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{NotificationError, NotificationResult, TransportError};
use crate::transport::{NotificationTransport, ReqwestTransport};
use crate::types::{send_notification_endpoint, NotificationPayload, OutboundNotification};

/// Sends owner notifications through the Forge API
pub struct NotificationService {
    config: DynConfigProvider,
    transport: Arc<dyn NotificationTransport>,
}

impl NotificationService {
    /// Create a service backed by the reqwest transport
    pub fn new(config: DynConfigProvider) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            config,
            Arc::new(ReqwestTransport::new()?),
        ))
    }

    /// Create a service reading `BUILT_IN_FORGE_API_*` on every call
    pub fn from_env() -> Result<Self, TransportError> {
        Self::new(Arc::new(EnvConfigProvider))
    }

    /// Create a service with a custom transport (useful for testing)
    pub fn with_transport(
        config: DynConfigProvider,
        transport: Arc<dyn NotificationTransport>,
    ) -> Self {
        Self { config, transport }
    }

    /// Validate `payload` and the current configuration, in that order, and
    /// build the request. Nothing is sent.
    pub fn prepare(&self, payload: &NotificationPayload) -> NotificationResult<OutboundNotification> {
        let payload = payload.validate()?;
        let config = self.config.current();

        if config.forge_api_url.is_empty() {
            return Err(NotificationError::MissingServiceUrl);
        }
        if config.forge_api_key.is_empty() {
            return Err(NotificationError::MissingApiKey);
        }

        let endpoint = send_notification_endpoint(&config.forge_api_url)?;

        Ok(OutboundNotification {
            endpoint,
            api_key: config.forge_api_key,
            payload,
        })
    }

    /// Notify the project owner.
    ///
    /// Returns `Err` only for validation and configuration problems, before
    /// any network traffic. Otherwise resolves to whether the Forge API
    /// accepted the notification.
    pub async fn notify_owner(&self, payload: NotificationPayload) -> NotificationResult<bool> {
        let outbound = self.prepare(&payload)?;
        Ok(self.deliver(&outbound).await)
    }

    async fn deliver(&self, outbound: &OutboundNotification) -> bool {
        debug!(
            "Sending owner notification via {} transport",
            self.transport.transport_name()
        );

        match self.transport.send(outbound).await {
            Ok(response) if response.is_success() => {
                info!("Owner notified: {}", outbound.payload.title);
                true
            }
            Ok(response) => {
                if response.body.is_empty() {
                    warn!("Failed to notify owner ({})", response.status);
                } else {
                    warn!(
                        "Failed to notify owner ({}): {}",
                        response.status, response.body
                    );
                }
                false
            }
            Err(e) => {
                warn!("Error calling notification service: {}", e);
                false
            }
        }
    }

    /// Get the name of the current transport
    pub fn transport_name(&self) -> &'static str {
        self.transport.transport_name()
    }
}

/// Trait for owner notification (used for dependency injection and testing)
#[async_trait]
pub trait OwnerNotifier: Send + Sync {
    async fn notify_owner(&self, payload: NotificationPayload) -> NotificationResult<bool>;
}

#[async_trait]
impl OwnerNotifier for NotificationService {
    async fn notify_owner(&self, payload: NotificationPayload) -> NotificationResult<bool> {
        NotificationService::notify_owner(self, payload).await
    }
}
