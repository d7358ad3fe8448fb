//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ImagePrediction, QuizQuery, WebhookIngest};

/// Default cap on a single uploaded image.
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub quizzes: Arc<dyn QuizQuery>,
    pub predictions: Arc<dyn ImagePrediction>,
    pub webhooks: Arc<dyn WebhookIngest>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub quizzes: Arc<dyn QuizQuery>,
    pub predictions: Arc<dyn ImagePrediction>,
    pub webhooks: Arc<dyn WebhookIngest>,
    pub upload_limit: usize,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle with the default upload limit.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use medquiz::domain::ports::{FixtureQuizRepository, FixtureUserRepository};
    /// use medquiz::domain::{
    ///     CollectionPolicy, ImageClassificationService, ModelHandle, QuizCatalogueService,
    ///     UserWebhookService,
    /// };
    /// use medquiz::inbound::http::state::{HttpState, HttpStatePorts};
    /// use medquiz::outbound::webhook::{SvixWebhookVerifier, WebhookSecret};
    ///
    /// let secret = WebhookSecret::parse("whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw").expect("secret");
    /// let ports = HttpStatePorts {
    ///     quizzes: Arc::new(QuizCatalogueService::new(
    ///         Arc::new(FixtureQuizRepository),
    ///         CollectionPolicy::default(),
    ///     )),
    ///     predictions: Arc::new(ImageClassificationService::new(ModelHandle::new())),
    ///     webhooks: Arc::new(UserWebhookService::new(
    ///         Arc::new(SvixWebhookVerifier::new(secret)),
    ///         Arc::new(FixtureUserRepository),
    ///     )),
    /// };
    /// let state = HttpState::new(ports);
    /// assert!(state.upload_limit > 0);
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            quizzes,
            predictions,
            webhooks,
        } = ports;
        Self {
            quizzes,
            predictions,
            webhooks,
            upload_limit: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }

    /// Override the per-upload byte limit.
    #[must_use]
    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit = bytes;
        self
    }
}
