//! MongoDB-backed `QuizRepository` implementation.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};

use crate::domain::ports::{QuizRepository, QuizRepositoryError};
use crate::domain::{CollectionName, QuizDocument};

use super::MongoStore;
use super::document::to_quiz_document;
use super::error_mapping::map_quiz_error;

/// Reads quiz collections from MongoDB.
#[derive(Debug, Clone)]
pub struct MongoQuizRepository {
    store: MongoStore,
}

impl MongoQuizRepository {
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn list_documents(
        &self,
        collection: &CollectionName,
    ) -> Result<Vec<QuizDocument>, QuizRepositoryError> {
        let cursor = self
            .store
            .database()
            .collection::<Document>(collection.as_ref())
            .find(doc! {})
            .await
            .map_err(|err| map_quiz_error(&err))?;
        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|err| map_quiz_error(&err))?;
        Ok(documents.into_iter().map(to_quiz_document).collect())
    }

    async fn collection_exists(
        &self,
        collection: &CollectionName,
    ) -> Result<bool, QuizRepositoryError> {
        let names = self
            .store
            .database()
            .list_collection_names()
            .filter(doc! { "name": collection.as_ref() })
            .await
            .map_err(|err| map_quiz_error(&err))?;
        Ok(names.iter().any(|name| name == collection.as_ref()))
    }
}
