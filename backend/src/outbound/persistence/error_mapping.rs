//! Driver error classification shared by the MongoDB repositories.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::domain::ports::{QuizRepositoryError, UserPersistenceError};

/// Server code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

fn is_connection_error(error: &MongoError) -> bool {
    matches!(
        *error.kind,
        ErrorKind::Io(_)
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. }
    )
}

pub(super) fn is_duplicate_key(error: &MongoError) -> bool {
    match &*error.kind {
        ErrorKind::Write(WriteFailure::WriteError(write)) => write.code == DUPLICATE_KEY,
        ErrorKind::Command(command) => command.code == DUPLICATE_KEY,
        _ => false,
    }
}

pub(super) fn map_quiz_error(error: &MongoError) -> QuizRepositoryError {
    if is_connection_error(error) {
        QuizRepositoryError::connection(error.to_string())
    } else {
        QuizRepositoryError::query(error.to_string())
    }
}

pub(super) fn map_user_error(error: &MongoError, external_id: &str) -> UserPersistenceError {
    if is_duplicate_key(error) {
        UserPersistenceError::duplicate(external_id)
    } else if is_connection_error(error) {
        UserPersistenceError::connection(error.to_string())
    } else {
        UserPersistenceError::query(error.to_string())
    }
}
