//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod image_classifier;
mod image_prediction;
mod quiz_query;
mod quiz_repository;
mod user_repository;
mod webhook_ingest;
mod webhook_verifier;

#[cfg(test)]
pub use image_classifier::MockImageClassifier;
pub use image_classifier::{ClassifierError, ImageClassifier};
pub use image_prediction::ImagePrediction;
pub use quiz_query::QuizQuery;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
pub use quiz_repository::{FixtureQuizRepository, QuizRepository, QuizRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
pub use webhook_ingest::WebhookIngest;
#[cfg(test)]
pub use webhook_verifier::MockWebhookVerifier;
pub use webhook_verifier::{
    WebhookEvent, WebhookHeaders, WebhookVerificationError, WebhookVerifier,
};
