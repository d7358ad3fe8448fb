//! Driving port for identity-provider webhook deliveries.

use async_trait::async_trait;

use crate::domain::{WebhookError, WebhookOutcome};

use super::WebhookHeaders;

/// Webhook use-case exposed to inbound adapters.
#[async_trait]
pub trait WebhookIngest: Send + Sync {
    /// Authenticate and apply one delivery.
    async fn ingest(
        &self,
        payload: &[u8],
        headers: &WebhookHeaders,
    ) -> Result<WebhookOutcome, WebhookError>;
}
