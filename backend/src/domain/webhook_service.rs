//! Identity-provider webhook handling.
//!
//! Deliveries are authenticated by a [`WebhookVerifier`]. `user.created`
//! events are mirrored into the user store; every other event kind is
//! acknowledged and ignored so the provider stops redelivering it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    UserPersistenceError, UserRepository, WebhookEvent, WebhookHeaders, WebhookIngest,
    WebhookVerificationError, WebhookVerifier,
};
use crate::domain::{Error, ExternalUserId, User};

/// Event kind announcing a newly registered user.
pub const USER_CREATED: &str = "user.created";

/// Successful result of handling one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    UserCreated { external_id: String },
    /// Redelivery of an event that was already applied.
    UserAlreadyExists { external_id: String },
    Ignored { kind: String },
}

/// Failure to handle a delivery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook verification failed: {0}")]
    Verification(WebhookVerificationError),
    #[error("invalid webhook payload: {message}")]
    InvalidPayload { message: String },
    #[error("failed to persist user: {0}")]
    Persistence(UserPersistenceError),
}

impl From<WebhookError> for Error {
    fn from(value: WebhookError) -> Self {
        match value {
            WebhookError::Verification(err) => Error::invalid_request("Webhook verification failed")
                .with_details(json!({ "reason": err.to_string() })),
            WebhookError::InvalidPayload { message } => {
                Error::invalid_request("Invalid webhook payload")
                    .with_details(json!({ "reason": message }))
            }
            WebhookError::Persistence(err) => Error::internal("Failed to persist user")
                .with_details(json!({ "cause": err.to_string() })),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserCreatedData {
    id: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl TryFrom<UserCreatedData> for User {
    type Error = WebhookError;

    fn try_from(data: UserCreatedData) -> Result<Self, Self::Error> {
        let id = ExternalUserId::new(data.id).map_err(|err| WebhookError::InvalidPayload {
            message: err.to_string(),
        })?;
        Ok(User::new(id, data.first_name, data.last_name))
    }
}

/// Webhook service implementing the [`WebhookIngest`] driving port.
#[derive(Clone)]
pub struct UserWebhookService<V, R> {
    verifier: Arc<V>,
    users: Arc<R>,
}

impl<V, R> UserWebhookService<V, R> {
    pub fn new(verifier: Arc<V>, users: Arc<R>) -> Self {
        Self { verifier, users }
    }
}

impl<V, R> UserWebhookService<V, R>
where
    V: WebhookVerifier,
    R: UserRepository,
{
    fn authenticate(
        &self,
        payload: &[u8],
        headers: &WebhookHeaders,
    ) -> Result<WebhookEvent, WebhookError> {
        self.verifier
            .verify(payload, headers)
            .map_err(|err| match err {
                WebhookVerificationError::MalformedPayload { message } => {
                    warn!(error = %message, "verified webhook payload is malformed");
                    WebhookError::InvalidPayload { message }
                }
                other => {
                    warn!(error = %other, delivery = ?headers.id, "webhook verification failed");
                    WebhookError::Verification(other)
                }
            })
    }

    async fn create_user(&self, event: WebhookEvent) -> Result<WebhookOutcome, WebhookError> {
        let user: User = serde_json::from_value::<UserCreatedData>(event.data)
            .map_err(|err| WebhookError::InvalidPayload {
                message: err.to_string(),
            })
            .and_then(User::try_from)
            .inspect_err(|err| warn!(error = %err, "user.created payload rejected"))?;
        let external_id = user.external_id().to_string();

        match self.users.insert(&user).await {
            Ok(()) => {
                info!(%external_id, "user created from webhook");
                Ok(WebhookOutcome::UserCreated { external_id })
            }
            Err(UserPersistenceError::Duplicate { .. }) => {
                info!(%external_id, "user already exists; acknowledging redelivery");
                Ok(WebhookOutcome::UserAlreadyExists { external_id })
            }
            Err(err) => {
                error!(%external_id, error = %err, "failed to persist webhook user");
                Err(WebhookError::Persistence(err))
            }
        }
    }
}

#[async_trait]
impl<V, R> WebhookIngest for UserWebhookService<V, R>
where
    V: WebhookVerifier,
    R: UserRepository,
{
    async fn ingest(
        &self,
        payload: &[u8],
        headers: &WebhookHeaders,
    ) -> Result<WebhookOutcome, WebhookError> {
        let event = self.authenticate(payload, headers)?;
        if event.kind == USER_CREATED {
            self.create_user(event).await
        } else {
            debug!(kind = %event.kind, "ignoring webhook event");
            Ok(WebhookOutcome::Ignored { kind: event.kind })
        }
    }
}
