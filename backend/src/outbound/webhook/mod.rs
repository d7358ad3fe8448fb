//! Identity-provider webhook adapters.

mod svix;

pub use svix::{DEFAULT_TOLERANCE, SvixWebhookVerifier, WebhookSecret, WebhookSecretError};
