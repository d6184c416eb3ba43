use forge_core::mask_sensitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{NotificationError, NotificationResult};

/// RPC path of the owner notification endpoint, relative to the Forge API base
pub const SEND_NOTIFICATION_PATH: &str = "webdevtoken.v1.WebDevService/SendNotification";

pub const TITLE_MAX_LENGTH: usize = 1200;
pub const CONTENT_MAX_LENGTH: usize = 20000;

/// Title and body of a message for the project owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub content: String,
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Trim both fields and check them, title first.
    pub fn validate(&self) -> NotificationResult<NotificationPayload> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(NotificationError::MissingTitle);
        }
        if title.chars().count() > TITLE_MAX_LENGTH {
            return Err(NotificationError::TitleTooLong {
                max: TITLE_MAX_LENGTH,
            });
        }

        let content = self.content.trim();
        if content.is_empty() {
            return Err(NotificationError::MissingContent);
        }
        if content.chars().count() > CONTENT_MAX_LENGTH {
            return Err(NotificationError::ContentTooLong {
                max: CONTENT_MAX_LENGTH,
            });
        }

        Ok(NotificationPayload::new(title, content))
    }
}

/// A validated request ready to hand to a transport
#[derive(Clone)]
pub struct OutboundNotification {
    pub endpoint: Url,
    pub api_key: String,
    pub payload: NotificationPayload,
}

impl fmt::Debug for OutboundNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundNotification")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &mask_sensitive(&self.api_key))
            .field("payload", &self.payload)
            .finish()
    }
}

/// Join [`SEND_NOTIFICATION_PATH`] onto `base_url`.
///
/// The base is treated as a directory, so `https://host/api` and
/// `https://host/api/` both resolve to `https://host/api/webdevtoken...`.
pub fn send_notification_endpoint(base_url: &str) -> NotificationResult<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    let base = Url::parse(&normalized)
        .map_err(|e| NotificationError::InvalidServiceUrl(e.to_string()))?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(NotificationError::InvalidServiceUrl(format!(
            "unsupported scheme '{}'",
            base.scheme()
        )));
    }

    base.join(SEND_NOTIFICATION_PATH)
        .map_err(|e| NotificationError::InvalidServiceUrl(e.to_string()))
}
