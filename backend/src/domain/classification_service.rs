//! Scan classification service.
//!
//! Implements [`ImagePrediction`] on top of the shared [`ModelHandle`].
//! Decoding and inference are CPU bound and run on the blocking pool.

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::{ClassifierError, ImagePrediction};
use crate::domain::{Classification, ClassificationError, Error, ImageTensor, ModelHandle};

const MODEL_NOT_LOADED: &str = "Model not loaded";
const NO_IMAGE: &str = "No image uploaded";
const PREDICTION_FAILED: &str = "Prediction failed";

#[derive(Debug, thiserror::Error)]
enum PredictionFailure {
    #[error(transparent)]
    Preprocess(#[from] ClassificationError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl PredictionFailure {
    fn stage(&self) -> &'static str {
        match self {
            Self::Preprocess(ClassificationError::Decode { .. }) => "decode",
            Self::Preprocess(_) => "postprocess",
            Self::Classifier(_) => "inference",
        }
    }
}

/// Classification service implementing the [`ImagePrediction`] driving port.
#[derive(Debug, Clone)]
pub struct ImageClassificationService {
    model: ModelHandle,
}

impl ImageClassificationService {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    fn model_not_loaded(&self) -> Error {
        let status = self.model.status();
        warn!(?status, "prediction requested before classifier was ready");
        Error::internal(MODEL_NOT_LOADED).with_details(json!({ "status": status }))
    }
}

#[async_trait]
impl ImagePrediction for ImageClassificationService {
    fn ensure_ready(&self) -> Result<(), Error> {
        if self.model.classifier().is_some() {
            Ok(())
        } else {
            Err(self.model_not_loaded())
        }
    }

    async fn predict(&self, image: Vec<u8>) -> Result<Classification, Error> {
        let classifier = self.model.classifier().ok_or_else(|| self.model_not_loaded())?;
        if image.is_empty() {
            return Err(Error::invalid_request(NO_IMAGE));
        }

        let outcome = tokio::task::spawn_blocking(move || -> Result<_, PredictionFailure> {
            let tensor = ImageTensor::from_image_bytes(&image)?;
            let scores = classifier.scores(&tensor)?;
            Ok(Classification::from_scores(&scores)?)
        })
        .await;

        match outcome {
            Ok(Ok(classification)) => Ok(classification),
            Ok(Err(failure)) => {
                let stage = failure.stage();
                error!(stage, error = %failure, "prediction failed");
                Err(Error::internal(PREDICTION_FAILED)
                    .with_details(json!({ "stage": stage, "cause": failure.to_string() })))
            }
            Err(join_err) => {
                error!(error = %join_err, "prediction task aborted");
                Err(Error::internal(PREDICTION_FAILED))
            }
        }
    }
}
