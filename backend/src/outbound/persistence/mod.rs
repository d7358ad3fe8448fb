//! MongoDB persistence adapters.
//!
//! Repository implementations only translate between BSON documents and
//! domain types; validation and allow-listing happen in the domain services.
//! Driver errors are mapped to the port error enums, with duplicate key
//! violations surfaced as [`UserPersistenceError::Duplicate`].
//!
//! [`UserPersistenceError::Duplicate`]: crate::domain::ports::UserPersistenceError::Duplicate
//!
//! # Example
//!
//! ```ignore
//! use medquiz::outbound::persistence::{MongoStore, MongoQuizRepository, StoreConfig};
//!
//! let store = MongoStore::connect(StoreConfig::new("mongodb://localhost/medquiz")).await?;
//! let quizzes = MongoQuizRepository::new(store.clone());
//! ```

mod document;
mod error_mapping;
mod mongo_quiz_repository;
mod mongo_user_repository;
mod store;

pub use mongo_quiz_repository::MongoQuizRepository;
pub use mongo_user_repository::{MongoUserRepository, USERS_COLLECTION};
pub use store::{DEFAULT_DATABASE_NAME, MongoStore, StoreConfig, StoreError};
