//! Quiz content handlers.
//!
//! ```text
//! GET /api/questions
//! GET /api/quizzes
//! GET /api/quizzes/{name}
//! GET /api/{name}
//! ```
//!
//! `/api/{name}` matches any single segment, so it must be registered after
//! every other `/api` route.

use actix_web::{get, web};

use crate::domain::QuizDocument;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, QuizDocumentSchema};
use crate::inbound::http::state::HttpState;

/// List the general question bank.
#[utoipa::path(
    get,
    path = "/api/questions",
    responses(
        (status = 200, description = "Question documents", body = [QuizDocumentSchema]),
        (status = 500, description = "Error fetching questions", body = ErrorSchema)
    ),
    tags = ["quizzes"],
    operation_id = "listQuestions"
)]
#[get("/questions")]
pub async fn list_questions(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<QuizDocument>>> {
    state.quizzes.questions().await.map(web::Json)
}

/// List quiz metadata documents.
#[utoipa::path(
    get,
    path = "/api/quizzes",
    responses(
        (status = 200, description = "Quiz metadata documents", body = [QuizDocumentSchema]),
        (status = 500, description = "Error fetching quizzes", body = ErrorSchema)
    ),
    tags = ["quizzes"],
    operation_id = "listQuizzes"
)]
#[get("/quizzes")]
pub async fn list_quizzes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<QuizDocument>>> {
    state.quizzes.quizzes().await.map(web::Json)
}

/// List the questions of one quiz.
///
/// A well-formed quiz collection that does not exist yields `[]`.
#[utoipa::path(
    get,
    path = "/api/quizzes/{name}",
    params(("name" = String, Path, description = "Quiz collection name", example = "quiz-renal")),
    responses(
        (status = 200, description = "Quiz question documents", body = [QuizDocumentSchema]),
        (status = 400, description = "Malformed collection name", body = ErrorSchema),
        (status = 404, description = "Not a quiz collection", body = ErrorSchema),
        (status = 500, description = "Error fetching quiz questions", body = ErrorSchema)
    ),
    tags = ["quizzes"],
    operation_id = "listQuizQuestions"
)]
#[get("/quizzes/{name}")]
pub async fn quiz_questions(
    state: web::Data<HttpState>,
    name: web::Path<String>,
) -> ApiResult<web::Json<Vec<QuizDocument>>> {
    state.quizzes.quiz_questions(&name).await.map(web::Json)
}

/// List the documents of an existing quiz collection.
#[utoipa::path(
    get,
    path = "/api/{name}",
    params(("name" = String, Path, description = "Quiz collection name", example = "quiz-renal")),
    responses(
        (status = 200, description = "Collection documents", body = [QuizDocumentSchema]),
        (status = 400, description = "Malformed collection name", body = ErrorSchema),
        (status = 404, description = "Collection not found", body = ErrorSchema),
        (status = 500, description = "Error fetching collection data", body = ErrorSchema)
    ),
    tags = ["quizzes"],
    operation_id = "listCollectionDocuments"
)]
#[get("/{name}")]
pub async fn collection_documents(
    state: web::Data<HttpState>,
    name: web::Path<String>,
) -> ApiResult<web::Json<Vec<QuizDocument>>> {
    state.quizzes.collection_documents(&name).await.map(web::Json)
}
