//! Port for authenticating identity-provider webhook deliveries.

use serde::Deserialize;
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Reasons a delivery could not be authenticated or read.
    pub enum WebhookVerificationError {
        /// A required signing header was absent.
        MissingHeader { name: String } => "missing webhook header {name}",
        /// The timestamp header is not a Unix timestamp.
        InvalidTimestamp => "webhook timestamp is not a valid unix timestamp",
        /// The timestamp is too far from the current time.
        TimestampOutOfTolerance => "webhook timestamp outside tolerance",
        /// No signature entry matched the payload.
        InvalidSignature => "webhook signature mismatch",
        /// Authentic payload that is not a webhook event envelope.
        MalformedPayload { message: String } => "webhook payload malformed: {message}",
    }
}

/// Signing headers accompanying a delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub signature: Option<String>,
}

/// Authenticated webhook event envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// Authenticates a raw delivery and returns the event it carries.
#[cfg_attr(test, mockall::automock)]
pub trait WebhookVerifier: Send + Sync {
    fn verify(
        &self,
        payload: &[u8],
        headers: &WebhookHeaders,
    ) -> Result<WebhookEvent, WebhookVerificationError>;
}
