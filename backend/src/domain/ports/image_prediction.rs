//! Driving port for scan classification.

use async_trait::async_trait;

use crate::domain::{Classification, Error};

/// Classification use-case exposed to inbound adapters.
#[async_trait]
pub trait ImagePrediction: Send + Sync {
    /// Fail unless the classifier has finished loading.
    ///
    /// Adapters call this before reading the upload so a missing model is
    /// reported regardless of input validity.
    fn ensure_ready(&self) -> Result<(), Error>;

    /// Classify an encoded image.
    async fn predict(&self, image: Vec<u8>) -> Result<Classification, Error>;
}
