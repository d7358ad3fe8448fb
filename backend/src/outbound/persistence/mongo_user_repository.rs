//! MongoDB-backed `UserRepository` implementation.

use async_trait::async_trait;
use mongodb::bson::{self, Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::debug;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

use super::MongoStore;
use super::error_mapping::map_user_error;

/// Collection holding mirrored users.
pub const USERS_COLLECTION: &str = "users";

/// Stores users created from identity-provider events.
#[derive(Debug, Clone)]
pub struct MongoUserRepository {
    users: Collection<Document>,
}

impl MongoUserRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            users: store.database().collection(USERS_COLLECTION),
        }
    }

    /// Create the unique index on `externalId` if it is missing.
    pub async fn ensure_indexes(&self) -> Result<(), UserPersistenceError> {
        let index = IndexModel::builder()
            .keys(doc! { "externalId": 1 })
            .options(
                IndexOptions::builder()
                    .name("externalId_unique".to_owned())
                    .unique(true)
                    .build(),
            )
            .build();
        self.users
            .create_index(index)
            .await
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        debug!(collection = USERS_COLLECTION, "user indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let external_id = user.external_id().as_ref();
        let document =
            bson::to_document(user).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        self.users
            .insert_one(document)
            .await
            .map_err(|err| map_user_error(&err, external_id))?;
        Ok(())
    }
}
