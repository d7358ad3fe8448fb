//! Test helpers for inbound HTTP components.
//!
//! Each double records the calls it receives and replays a canned response,
//! so handler tests can assert both the HTTP mapping and what reached the
//! domain.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ports::{ImagePrediction, QuizQuery, WebhookHeaders, WebhookIngest};
use crate::domain::{Classification, Error, QuizDocument, WebhookError, WebhookOutcome};

use super::state::{HttpState, HttpStatePorts};

/// Quiz reads that return a fixed result and record requested names.
#[derive(Clone)]
pub struct RecordingQuizQuery {
    response: Result<Vec<QuizDocument>, Error>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingQuizQuery {
    pub fn returning(response: Result<Vec<QuizDocument>, Error>) -> Self {
        Self {
            response,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Operations seen so far, as `operation` or `operation:name`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) -> Result<Vec<QuizDocument>, Error> {
        self.calls.lock().expect("calls lock").push(call);
        self.response.clone()
    }
}

#[async_trait]
impl QuizQuery for RecordingQuizQuery {
    async fn questions(&self) -> Result<Vec<QuizDocument>, Error> {
        self.record("questions".to_owned())
    }

    async fn quizzes(&self) -> Result<Vec<QuizDocument>, Error> {
        self.record("quizzes".to_owned())
    }

    async fn quiz_questions(&self, name: &str) -> Result<Vec<QuizDocument>, Error> {
        self.record(format!("quiz_questions:{name}"))
    }

    async fn collection_documents(&self, name: &str) -> Result<Vec<QuizDocument>, Error> {
        self.record(format!("collection_documents:{name}"))
    }
}

/// Prediction double with a configurable readiness and result.
#[derive(Clone)]
pub struct RecordingPrediction {
    ready: Result<(), Error>,
    response: Result<Classification, Error>,
    uploads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingPrediction {
    pub fn new(ready: Result<(), Error>, response: Result<Classification, Error>) -> Self {
        Self {
            ready,
            response,
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Image bodies passed to `predict`.
    pub fn uploads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().expect("uploads lock").clone()
    }
}

#[async_trait]
impl ImagePrediction for RecordingPrediction {
    fn ensure_ready(&self) -> Result<(), Error> {
        self.ready.clone()
    }

    async fn predict(&self, image: Vec<u8>) -> Result<Classification, Error> {
        self.uploads.lock().expect("uploads lock").push(image);
        self.response.clone()
    }
}

/// Webhook double recording payloads and headers.
#[derive(Clone)]
pub struct RecordingWebhookIngest {
    response: Result<WebhookOutcome, WebhookError>,
    deliveries: Arc<Mutex<Vec<(Vec<u8>, WebhookHeaders)>>>,
}

impl RecordingWebhookIngest {
    pub fn returning(response: Result<WebhookOutcome, WebhookError>) -> Self {
        Self {
            response,
            deliveries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn deliveries(&self) -> Vec<(Vec<u8>, WebhookHeaders)> {
        self.deliveries.lock().expect("deliveries lock").clone()
    }
}

#[async_trait]
impl WebhookIngest for RecordingWebhookIngest {
    async fn ingest(
        &self,
        payload: &[u8],
        headers: &WebhookHeaders,
    ) -> Result<WebhookOutcome, WebhookError> {
        self.deliveries
            .lock()
            .expect("deliveries lock")
            .push((payload.to_vec(), headers.clone()));
        self.response.clone()
    }
}

/// Build HTTP state from doubles, defaulting unused ports to inert ones.
pub struct StateBuilder {
    quizzes: RecordingQuizQuery,
    predictions: RecordingPrediction,
    webhooks: RecordingWebhookIngest,
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self {
            quizzes: RecordingQuizQuery::returning(Ok(Vec::new())),
            predictions: RecordingPrediction::new(
                Err(Error::internal("Model not loaded")),
                Err(Error::internal("Model not loaded")),
            ),
            webhooks: RecordingWebhookIngest::returning(Ok(WebhookOutcome::Ignored {
                kind: "test".to_owned(),
            })),
        }
    }
}

impl StateBuilder {
    pub fn quizzes(mut self, quizzes: RecordingQuizQuery) -> Self {
        self.quizzes = quizzes;
        self
    }

    pub fn predictions(mut self, predictions: RecordingPrediction) -> Self {
        self.predictions = predictions;
        self
    }

    pub fn webhooks(mut self, webhooks: RecordingWebhookIngest) -> Self {
        self.webhooks = webhooks;
        self
    }

    pub fn build(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            quizzes: Arc::new(self.quizzes),
            predictions: Arc::new(self.predictions),
            webhooks: Arc::new(self.webhooks),
        })
    }
}
