//! Builders for HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use medquiz::domain::ports::{
    FixtureQuizRepository, FixtureUserRepository, ImagePrediction, QuizQuery, WebhookIngest,
};
use medquiz::domain::{ImageClassificationService, QuizCatalogueService, UserWebhookService};
use medquiz::inbound::http::state::{HttpState, HttpStatePorts};
use medquiz::outbound::persistence::{MongoQuizRepository, MongoUserRepository};

use super::ServerConfig;

/// Build the quiz and webhook ports, Mongo-backed when a store is present.
fn build_persistent_ports(
    config: &ServerConfig,
) -> (Arc<dyn QuizQuery>, Arc<dyn WebhookIngest>) {
    let verifier = Arc::new(config.verifier.clone());
    let policy = config.policy.clone();
    if let Some(store) = &config.store {
        let quizzes: Arc<dyn QuizQuery> = Arc::new(QuizCatalogueService::new(
            Arc::new(MongoQuizRepository::new(store.clone())),
            policy,
        ));
        let webhooks: Arc<dyn WebhookIngest> = Arc::new(UserWebhookService::new(
            verifier,
            Arc::new(MongoUserRepository::new(store)),
        ));
        return (quizzes, webhooks);
    }

    let quizzes: Arc<dyn QuizQuery> = Arc::new(QuizCatalogueService::new(
        Arc::new(FixtureQuizRepository),
        policy,
    ));
    let webhooks: Arc<dyn WebhookIngest> = Arc::new(UserWebhookService::new(
        verifier,
        Arc::new(FixtureUserRepository),
    ));
    (quizzes, webhooks)
}

/// Assemble the shared HTTP state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (quizzes, webhooks) = build_persistent_ports(config);
    let predictions: Arc<dyn ImagePrediction> =
        Arc::new(ImageClassificationService::new(config.model.clone()));
    web::Data::new(
        HttpState::new(HttpStatePorts {
            quizzes,
            predictions,
            webhooks,
        })
        .with_upload_limit(config.upload_limit),
    )
}
