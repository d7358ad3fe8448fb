//! User identity created from identity-provider events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for an external identifier.
pub const EXTERNAL_ID_MAX: usize = 128;

/// Validation errors raised while building a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("external user id must not be empty")]
    EmptyExternalId,
    #[error("external user id must not contain whitespace")]
    ExternalIdWhitespace,
    #[error("external user id must be at most {max} characters")]
    ExternalIdTooLong { max: usize },
}

/// Identifier assigned to the user by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalUserId(String);

impl ExternalUserId {
    /// Validate and construct an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyExternalId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(UserValidationError::ExternalIdWhitespace);
        }
        if id.chars().count() > EXTERNAL_ID_MAX {
            return Err(UserValidationError::ExternalIdTooLong {
                max: EXTERNAL_ID_MAX,
            });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ExternalUserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExternalUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ExternalUserId> for String {
    fn from(value: ExternalUserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ExternalUserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user mirrored from the identity provider.
///
/// ## Invariants
/// - `external_id` is non-empty and unique across stored users.
/// - Names are optional; blank names are normalised to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    external_id: ExternalUserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
}

fn normalise_name(name: Option<String>) -> Option<String> {
    name.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

impl User {
    /// Build a user from validated parts.
    ///
    /// # Examples
    /// ```
    /// use medquiz::domain::{ExternalUserId, User};
    ///
    /// let id = ExternalUserId::new("user_2abc").expect("valid id");
    /// let user = User::new(id, Some("Ada".into()), Some("  ".into()));
    /// assert_eq!(user.first_name(), Some("Ada"));
    /// assert_eq!(user.last_name(), None);
    /// ```
    pub fn new(
        external_id: ExternalUserId,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            external_id,
            first_name: normalise_name(first_name),
            last_name: normalise_name(last_name),
        }
    }

    pub fn external_id(&self) -> &ExternalUserId {
        &self.external_id
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}
