//! Port for the pre-trained image classifier.
//!
//! Implementations are synchronous and CPU bound; callers run them on the
//! blocking pool.

use crate::domain::ImageTensor;

use super::define_port_error;

define_port_error! {
    /// Errors raised while loading or running a classifier.
    pub enum ClassifierError {
        /// Model artifact could not be read or is inconsistent.
        Load { message: String } => "classifier failed to load: {message}",
        /// Forward pass failed.
        Inference { message: String } => "classifier inference failed: {message}",
    }
}

/// Black-box `image tensor -> class scores` model.
#[cfg_attr(test, mockall::automock)]
pub trait ImageClassifier: Send + Sync {
    /// Per-class probabilities in [`crate::domain::ClassLabel::ALL`] order.
    fn scores(&self, input: &ImageTensor) -> Result<Vec<f32>, ClassifierError>;
}
