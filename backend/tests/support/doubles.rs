//! In-memory adapters shared by the integration suites.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use medquiz::domain::ports::{
    ClassifierError, ImageClassifier, QuizRepository, QuizRepositoryError, UserPersistenceError,
    UserRepository,
};
use medquiz::domain::{CollectionName, ImageTensor, QuizDocument, User};
use mockable::Clock;

/// Quiz store backed by a map of collection name to documents.
#[derive(Clone, Default)]
pub struct InMemoryQuizRepository {
    collections: Arc<Mutex<HashMap<String, Vec<QuizDocument>>>>,
}

impl InMemoryQuizRepository {
    pub fn with_collection(self, name: &str, documents: Vec<QuizDocument>) -> Self {
        self.collections
            .lock()
            .expect("collections lock")
            .insert(name.to_owned(), documents);
        self
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn list_documents(
        &self,
        collection: &CollectionName,
    ) -> Result<Vec<QuizDocument>, QuizRepositoryError> {
        Ok(self
            .collections
            .lock()
            .expect("collections lock")
            .get(collection.as_ref())
            .cloned()
            .unwrap_or_default())
    }

    async fn collection_exists(
        &self,
        collection: &CollectionName,
    ) -> Result<bool, QuizRepositoryError> {
        Ok(self
            .collections
            .lock()
            .expect("collections lock")
            .contains_key(collection.as_ref()))
    }
}

/// User store enforcing external id uniqueness like the unique index does.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    inserts: Arc<Mutex<usize>>,
}

impl InMemoryUserRepository {
    pub fn users(&self) -> Vec<User> {
        self.users.lock().expect("users lock").clone()
    }

    /// Insert attempts, including rejected duplicates.
    pub fn insert_attempts(&self) -> usize {
        *self.inserts.lock().expect("inserts lock")
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        *self.inserts.lock().expect("inserts lock") += 1;
        let mut users = self.users.lock().expect("users lock");
        if users.iter().any(|u| u.external_id() == user.external_id()) {
            return Err(UserPersistenceError::duplicate(user.external_id().to_string()));
        }
        users.push(user.clone());
        Ok(())
    }
}

/// Classifier returning the same scores for every image.
pub struct FixedScoresClassifier(pub Vec<f32>);

impl ImageClassifier for FixedScoresClassifier {
    fn scores(&self, image: &ImageTensor) -> Result<Vec<f32>, ClassifierError> {
        assert_eq!(image.shape(), [1, 224, 224, 3]);
        Ok(self.0.clone())
    }
}

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
