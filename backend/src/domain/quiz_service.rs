//! Quiz content read service.
//!
//! Implements [`QuizQuery`] over a [`QuizRepository`], applying collection
//! name validation and the quiz allow-list before any store access.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::error;

use crate::domain::ports::{QuizQuery, QuizRepository, QuizRepositoryError};
use crate::domain::{
    CollectionName, CollectionPolicy, Error, QUESTIONS_COLLECTION, QUIZZES_COLLECTION,
    QuizDocument,
};

const QUESTIONS_FAILED: &str = "Error fetching questions";
const QUIZZES_FAILED: &str = "Error fetching quizzes";
const QUIZ_QUESTIONS_FAILED: &str = "Error fetching quiz questions";
const COLLECTION_FAILED: &str = "Error fetching collection data";

/// Quiz read service implementing the [`QuizQuery`] driving port.
#[derive(Clone)]
pub struct QuizCatalogueService<R> {
    repo: Arc<R>,
    policy: CollectionPolicy,
}

impl<R> QuizCatalogueService<R> {
    pub fn new(repo: Arc<R>, policy: CollectionPolicy) -> Self {
        Self { repo, policy }
    }
}

impl<R> QuizCatalogueService<R>
where
    R: QuizRepository,
{
    fn repository_error(message: &'static str, collection: &str, err: &QuizRepositoryError) -> Error {
        error!(collection, error = %err, "{message}");
        Error::internal(message).with_details(json!({ "cause": err.to_string() }))
    }

    /// Validate `raw` and check it against the allow-list.
    fn quiz_collection(&self, raw: &str) -> Result<CollectionName, Error> {
        let name = CollectionName::new(raw).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "name",
                "code": err.code(),
            }))
        })?;
        if self.policy.allows(&name) {
            Ok(name)
        } else {
            Err(Error::not_found(format!("Collection {name} not found")))
        }
    }

    async fn fixed_collection(
        &self,
        raw: &'static str,
        failure: &'static str,
    ) -> Result<Vec<QuizDocument>, Error> {
        let name = CollectionName::new(raw)
            .map_err(|err| Error::internal(failure).with_details(json!({ "cause": err.to_string() })))?;
        self.repo
            .list_documents(&name)
            .await
            .map_err(|err| Self::repository_error(failure, raw, &err))
    }
}

#[async_trait]
impl<R> QuizQuery for QuizCatalogueService<R>
where
    R: QuizRepository,
{
    async fn questions(&self) -> Result<Vec<QuizDocument>, Error> {
        self.fixed_collection(QUESTIONS_COLLECTION, QUESTIONS_FAILED)
            .await
    }

    async fn quizzes(&self) -> Result<Vec<QuizDocument>, Error> {
        self.fixed_collection(QUIZZES_COLLECTION, QUIZZES_FAILED).await
    }

    async fn quiz_questions(&self, name: &str) -> Result<Vec<QuizDocument>, Error> {
        let collection = self.quiz_collection(name)?;
        self.repo
            .list_documents(&collection)
            .await
            .map_err(|err| Self::repository_error(QUIZ_QUESTIONS_FAILED, name, &err))
    }

    async fn collection_documents(&self, name: &str) -> Result<Vec<QuizDocument>, Error> {
        let collection = self.quiz_collection(name)?;
        let exists = self
            .repo
            .collection_exists(&collection)
            .await
            .map_err(|err| Self::repository_error(COLLECTION_FAILED, name, &err))?;
        if !exists {
            return Err(Error::not_found(format!("Collection {collection} not found")));
        }
        self.repo
            .list_documents(&collection)
            .await
            .map_err(|err| Self::repository_error(COLLECTION_FAILED, name, &err))
    }
}

#[cfg(test)]
#[path = "quiz_service_tests.rs"]
mod tests;
