//! Pre-trained scan classifier adapters.

mod burn_classifier;

pub use burn_classifier::{
    BurnImageClassifier, CONFIG_FILE, InferenceBackend, ScanNet, ScanNetConfig, WEIGHTS_STEM,
};
