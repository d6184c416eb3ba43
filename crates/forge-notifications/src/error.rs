//! Notification Error Types

use http::StatusCode;
use thiserror::Error;

pub type NotificationResult<T> = Result<T, NotificationError>;

/// Rejections raised before any request leaves the process.
///
/// Delivery problems are never reported through this type; they end up as
/// `Ok(false)` from [`crate::NotificationService::notify_owner`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification title is required.")]
    MissingTitle,

    #[error("Notification title must be at most {max} characters.")]
    TitleTooLong { max: usize },

    #[error("Notification content is required.")]
    MissingContent,

    #[error("Notification content must be at most {max} characters.")]
    ContentTooLong { max: usize },

    #[error("Notification service URL is not configured.")]
    MissingServiceUrl,

    #[error("Notification service API key is not configured.")]
    MissingApiKey,

    #[error("Notification service URL is invalid: {0}")]
    InvalidServiceUrl(String),
}

impl NotificationError {
    /// True when the caller's payload was at fault rather than the deployment
    pub fn is_payload_error(&self) -> bool {
        matches!(
            self,
            Self::MissingTitle
                | Self::TitleTooLong { .. }
                | Self::MissingContent
                | Self::ContentTooLong { .. }
        )
    }

    /// HTTP status the API layer should answer with
    pub fn status_code(&self) -> StatusCode {
        if self.is_payload_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Failure to complete the outbound call
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
