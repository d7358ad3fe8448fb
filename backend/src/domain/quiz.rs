//! Quiz content primitives.
//!
//! Quiz questions and metadata are schemaless documents maintained outside
//! this service, so they travel as JSON objects. Collection names, however,
//! are typed: only names accepted by [`CollectionPolicy`] ever reach the
//! persistence layer.

use std::fmt;

use serde_json::{Map, Value};

/// A schemaless document as stored in the document database.
pub type QuizDocument = Map<String, Value>;

/// Collection holding the general question bank.
pub const QUESTIONS_COLLECTION: &str = "questions";
/// Collection holding one metadata document per quiz.
pub const QUIZZES_COLLECTION: &str = "quizzes";
/// Default prefix of per-quiz question collections.
pub const DEFAULT_QUIZ_COLLECTION_PREFIX: &str = "quiz-";
/// Maximum accepted collection name length.
pub const COLLECTION_NAME_MAX: usize = 120;

/// Validation errors for [`CollectionName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionNameError {
    #[error("collection name must not be empty")]
    Empty,
    #[error("collection name must be at most {max} characters")]
    TooLong { max: usize },
    #[error("collection name may only contain letters, digits, '-' or '_'")]
    InvalidCharacters,
}

impl CollectionNameError {
    /// Machine-readable reason for error details.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong { .. } => "too_long",
            Self::InvalidCharacters => "invalid_chars",
        }
    }
}

/// Syntactically valid collection name.
///
/// # Examples
/// ```
/// use medquiz::domain::CollectionName;
///
/// assert!(CollectionName::new("quiz-renal").is_ok());
/// assert!(CollectionName::new("system.users").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl Into<String>) -> Result<Self, CollectionNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CollectionNameError::Empty);
        }
        if name.chars().count() > COLLECTION_NAME_MAX {
            return Err(CollectionNameError::TooLong {
                max: COLLECTION_NAME_MAX,
            });
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CollectionNameError::InvalidCharacters);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allow-list deciding which collections are quiz collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPolicy {
    prefix: String,
}

impl Default for CollectionPolicy {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_QUIZ_COLLECTION_PREFIX)
    }
}

impl CollectionPolicy {
    /// Accept collections whose names start with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `name` is a quiz collection; the bare prefix is not.
    #[must_use]
    pub fn allows(&self, name: &CollectionName) -> bool {
        name.as_ref()
            .strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| !rest.is_empty())
    }
}
