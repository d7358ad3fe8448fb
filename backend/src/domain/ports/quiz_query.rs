//! Driving port for quiz content reads.

use async_trait::async_trait;

use crate::domain::{Error, QuizDocument};

/// Quiz read use-cases exposed to inbound adapters.
#[async_trait]
pub trait QuizQuery: Send + Sync {
    /// Every document in the general question bank.
    async fn questions(&self) -> Result<Vec<QuizDocument>, Error>;

    /// One metadata document per quiz.
    async fn quizzes(&self) -> Result<Vec<QuizDocument>, Error>;

    /// Documents of quiz collection `name`; unknown quizzes yield `[]`.
    async fn quiz_questions(&self, name: &str) -> Result<Vec<QuizDocument>, Error>;

    /// Documents of quiz collection `name`, which must exist.
    async fn collection_documents(&self, name: &str) -> Result<Vec<QuizDocument>, Error>;
}
