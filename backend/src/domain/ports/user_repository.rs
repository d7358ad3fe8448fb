//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with the same external id is already stored.
        Duplicate { external_id: String } => "user {external_id} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    ///
    /// Returns [`UserPersistenceError::Duplicate`] when the external id is
    /// already present; existing records are never overwritten.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;
}

/// Repository that accepts and discards users when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        tracing::debug!(external_id = %user.external_id(), "fixture repository discarding user");
        Ok(())
    }
}
