//! Owner notifications delivered through the Forge API

pub mod error;
pub mod services;
pub mod transport;
pub mod types;

pub use error::{NotificationError, NotificationResult, TransportError};
pub use services::{NotificationService, OwnerNotifier};
pub use transport::{NotificationTransport, ReqwestTransport, TransportResponse};
pub use types::{
    send_notification_endpoint, NotificationPayload, OutboundNotification, CONTENT_MAX_LENGTH,
    SEND_NOTIFICATION_PATH, TITLE_MAX_LENGTH,
};
