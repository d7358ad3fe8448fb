//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers for domain types ([`ErrorSchema`],
//! [`ErrorCodeSchema`], [`QuizDocumentSchema`]), keeping utoipa out of the
//! domain.
//!
//! The generated document backs Swagger UI in debug builds and is exported
//! via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::health::ReadinessBody;
use crate::inbound::http::predict::{PredictionResponse, PredictionUpload};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, QuizDocumentSchema};
use crate::inbound::http::webhooks::WebhookAck;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MedQuiz API",
        description = "Quiz content, scan classification, and identity webhooks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::quizzes::list_questions,
        crate::inbound::http::quizzes::list_quizzes,
        crate::inbound::http::quizzes::quiz_questions,
        crate::inbound::http::quizzes::collection_documents,
        crate::inbound::http::predict::predict,
        crate::inbound::http::webhooks::receive_webhook,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        QuizDocumentSchema,
        PredictionResponse,
        PredictionUpload,
        WebhookAck,
        ReadinessBody
    )),
    tags(
        (name = "quizzes", description = "Quiz questions and metadata"),
        (name = "predictions", description = "Scan image classification"),
        (name = "webhooks", description = "Identity-provider events"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
