//! Port abstraction for quiz content storage.
//!
//! Quiz documents are read-only here; the store is maintained by other
//! tooling. Adapters only ever see names that already passed
//! [`CollectionName`] validation.

use async_trait::async_trait;

use crate::domain::{CollectionName, QuizDocument};

use super::define_port_error;

define_port_error! {
    /// Errors raised by quiz repository adapters.
    pub enum QuizRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "quiz repository connection failed: {message}",
        /// Query failed during execution or document conversion.
        Query { message: String } => "quiz repository query failed: {message}",
    }
}

/// Read access to quiz collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Return every document in `collection`.
    ///
    /// A collection that does not exist yields an empty list, not an error.
    async fn list_documents(
        &self,
        collection: &CollectionName,
    ) -> Result<Vec<QuizDocument>, QuizRepositoryError>;

    /// Whether `collection` exists in the store.
    async fn collection_exists(
        &self,
        collection: &CollectionName,
    ) -> Result<bool, QuizRepositoryError>;
}

/// Empty store used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuizRepository;

#[async_trait]
impl QuizRepository for FixtureQuizRepository {
    async fn list_documents(
        &self,
        _collection: &CollectionName,
    ) -> Result<Vec<QuizDocument>, QuizRepositoryError> {
        Ok(Vec::new())
    }

    async fn collection_exists(
        &self,
        _collection: &CollectionName,
    ) -> Result<bool, QuizRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_repository_is_empty() {
        let repo = FixtureQuizRepository;
        let name = CollectionName::new("quiz-renal").expect("valid name");

        assert!(repo.list_documents(&name).await.expect("list").is_empty());
        assert!(!repo.collection_exists(&name).await.expect("exists"));
    }
}
