//! One-time classifier load sequencing.
//!
//! The model loads on the blocking pool while the listener is already
//! accepting requests. [`ModelHandle`] is the only shared view of that load:
//! it starts in [`ModelStatus::Loading`] and settles exactly once into
//! [`ModelStatus::Ready`] or [`ModelStatus::Failed`]. There is no retry and
//! no reload.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::ports::{ClassifierError, ImageClassifier};

/// Outcome of a classifier load.
pub type ClassifierLoad = Result<Arc<dyn ImageClassifier>, ClassifierError>;

/// Observable load state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Loading,
    Ready,
    Failed,
}

/// Cloneable handle to the process-wide classifier slot.
///
/// # Examples
/// ```
/// use medquiz::domain::{ModelHandle, ModelStatus};
///
/// let handle = ModelHandle::new();
/// assert_eq!(handle.status(), ModelStatus::Loading);
/// assert!(handle.classifier().is_none());
/// ```
#[derive(Clone, Default)]
pub struct ModelHandle {
    slot: Arc<OnceLock<ClassifierLoad>>,
}

impl ModelHandle {
    /// Handle whose load has not completed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that is already ready with `classifier`.
    #[must_use]
    pub fn ready(classifier: Arc<dyn ImageClassifier>) -> Self {
        let handle = Self::new();
        handle.complete(Ok(classifier));
        handle
    }

    /// Handle whose load already failed.
    #[must_use]
    pub fn failed(error: ClassifierError) -> Self {
        let handle = Self::new();
        handle.complete(Err(error));
        handle
    }

    pub fn status(&self) -> ModelStatus {
        match self.slot.get() {
            None => ModelStatus::Loading,
            Some(Ok(_)) => ModelStatus::Ready,
            Some(Err(_)) => ModelStatus::Failed,
        }
    }

    /// The loaded classifier, if the load succeeded.
    pub fn classifier(&self) -> Option<Arc<dyn ImageClassifier>> {
        match self.slot.get() {
            Some(Ok(classifier)) => Some(Arc::clone(classifier)),
            _ => None,
        }
    }

    /// Record the load outcome. Returns `false` if an outcome was already
    /// recorded; the first one is kept.
    pub fn complete(&self, outcome: ClassifierLoad) -> bool {
        self.slot.set(outcome).is_ok()
    }

    /// Run `loader` on the blocking pool and record its outcome.
    ///
    /// The returned task resolves to the settled status. A panicking loader
    /// settles the handle as failed.
    pub fn spawn_load<F>(&self, loader: F) -> JoinHandle<ModelStatus>
    where
        F: FnOnce() -> ClassifierLoad + Send + 'static,
    {
        let handle = self.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let outcome = tokio::task::spawn_blocking(loader)
                .await
                .unwrap_or_else(|err| Err(ClassifierError::load(format!("loader aborted: {err}"))));
            let elapsed_ms = started.elapsed().as_millis();
            match &outcome {
                Ok(_) => info!(elapsed_ms, "classifier loaded"),
                Err(err) => error!(elapsed_ms, error = %err, "classifier failed to load; predictions disabled"),
            }
            if !handle.complete(outcome) {
                warn!("classifier load completed more than once; keeping first outcome");
            }
            handle.status()
        })
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("status", &self.status())
            .finish()
    }
}
