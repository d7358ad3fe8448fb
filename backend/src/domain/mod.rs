//! Domain primitives, ports and services.
//!
//! Purpose: keep request semantics independent of Actix, MongoDB and Burn.
//! Inbound adapters talk to the driving ports in [`ports`]; outbound adapters
//! implement the repository, classifier and verifier ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / ExternalUserId: identity mirrored from the identity provider.
//! - CollectionName / CollectionPolicy: validated quiz collection access.
//! - Classification / ImageTensor: classifier input and output.
//! - ModelHandle: one-time classifier load state.

pub mod classification;
pub mod classification_service;
pub mod error;
pub mod model_handle;
pub mod ports;
pub mod quiz;
pub mod quiz_service;
pub mod trace_id;
pub mod user;
pub mod webhook_service;

pub use self::classification::{
    ClassLabel, Classification, ClassificationError, Confidence, ImageTensor, MODEL_CHANNELS,
    MODEL_INPUT_SIZE,
};
pub use self::classification_service::ImageClassificationService;
pub use self::error::{Error, ErrorCode};
pub use self::model_handle::{ClassifierLoad, ModelHandle, ModelStatus};
pub use self::quiz::{
    COLLECTION_NAME_MAX, CollectionName, CollectionNameError, CollectionPolicy,
    DEFAULT_QUIZ_COLLECTION_PREFIX, QUESTIONS_COLLECTION, QUIZZES_COLLECTION, QuizDocument,
};
pub use self::quiz_service::QuizCatalogueService;
pub use self::trace_id::TraceId;
pub use self::user::{EXTERNAL_ID_MAX, ExternalUserId, User, UserValidationError};
pub use self::webhook_service::{USER_CREATED, UserWebhookService, WebhookError, WebhookOutcome};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use medquiz::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Collection quiz-x not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
