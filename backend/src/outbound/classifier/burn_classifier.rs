//! Burn-backed implementation of the `ImageClassifier` port.
//!
//! The artifact directory holds `config.json`, which sizes the network, and
//! `model.mpk`, the weights in Burn's named MessagePack record format. The
//! topology is fixed here; training happens elsewhere.

use std::path::Path;
use std::sync::Mutex;

use burn::backend::NdArray;
use burn::backend::ndarray::NdArrayDevice;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig};
use burn::nn::{Linear, LinearConfig, PaddingConfig2d, Relu};
use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder};
use burn::tensor::activation::softmax;
use tracing::info;

use crate::domain::ports::{ClassifierError, ImageClassifier};
use crate::domain::{ClassLabel, ImageTensor, MODEL_CHANNELS, MODEL_INPUT_SIZE};

/// Backend used for inference.
pub type InferenceBackend = NdArray<f32>;

/// Network configuration file inside the artifact directory.
pub const CONFIG_FILE: &str = "config.json";
/// Weights file stem; the recorder adds the `.mpk` extension.
pub const WEIGHTS_STEM: &str = "model";

/// Sizing of [`ScanNet`], stored as `config.json`.
#[derive(Config, Debug)]
pub struct ScanNetConfig {
    /// Output labels in score order.
    pub labels: Vec<String>,
    /// Side length of the square input image.
    pub input_size: usize,
    /// Output channels of the two convolution blocks.
    pub conv_channels: [usize; 2],
}

impl ScanNetConfig {
    /// Configuration matching the fixed class set.
    #[must_use]
    pub fn for_labels(conv_channels: [usize; 2]) -> Self {
        Self::new(
            ClassLabel::ALL.iter().map(ToString::to_string).collect(),
            MODEL_INPUT_SIZE as usize,
            conv_channels,
        )
    }

    /// Reject artifacts trained for another label set or input size.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let expected: Vec<&str> = ClassLabel::ALL.iter().map(|label| label.as_str()).collect();
        if self.labels.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Err(ClassifierError::load(format!(
                "labels {:?} do not match {expected:?}",
                self.labels
            )));
        }
        if self.input_size != MODEL_INPUT_SIZE as usize {
            return Err(ClassifierError::load(format!(
                "input size {} does not match {MODEL_INPUT_SIZE}",
                self.input_size
            )));
        }
        if self.conv_channels.contains(&0) {
            return Err(ClassifierError::load("convolution channels must be positive"));
        }
        Ok(())
    }

    /// Build an untrained network on `device`.
    pub fn init<B: Backend>(&self, device: &B::Device) -> ScanNet<B> {
        let [first, second] = self.conv_channels;
        let conv = |channels: [usize; 2]| {
            Conv2dConfig::new(channels, [3, 3])
                .with_stride([2, 2])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device)
        };
        ScanNet {
            conv1: conv([MODEL_CHANNELS, first]),
            conv2: conv([first, second]),
            pool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            head: LinearConfig::new(second, self.labels.len()).init(device),
            activation: Relu::new(),
        }
    }
}

/// Small convolutional scan classifier.
#[derive(Module, Debug)]
pub struct ScanNet<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    pool: AdaptiveAvgPool2d,
    head: Linear<B>,
    activation: Relu,
}

impl<B: Backend> ScanNet<B> {
    /// Forward pass.
    ///
    /// `images` is `[batch, channels, height, width]`; the result is
    /// `[batch, labels]` probabilities.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.activation.forward(self.conv1.forward(images));
        let x = self.activation.forward(self.conv2.forward(x));
        let x = self.pool.forward(x).flatten::<2>(1, 3);
        softmax(self.head.forward(x), 1)
    }
}

/// Classifier loaded from an artifact directory.
#[derive(Debug)]
pub struct BurnImageClassifier {
    model: Mutex<ScanNet<InferenceBackend>>,
    device: NdArrayDevice,
}

impl BurnImageClassifier {
    /// Read `config.json` and the weights from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ClassifierError> {
        let config_path = dir.join(CONFIG_FILE);
        let config = ScanNetConfig::load(&config_path).map_err(|err| {
            ClassifierError::load(format!("{}: {err}", config_path.display()))
        })?;
        config.validate()?;

        let device = NdArrayDevice::default();
        let weights = dir.join(WEIGHTS_STEM);
        let model = config
            .init::<InferenceBackend>(&device)
            .load_file(
                weights.clone(),
                &NamedMpkFileRecorder::<FullPrecisionSettings>::new(),
                &device,
            )
            .map_err(|err| ClassifierError::load(format!("{}.mpk: {err}", weights.display())))?;
        info!(dir = %dir.display(), labels = ?config.labels, "classifier weights loaded");

        Ok(Self::from_model(model))
    }

    /// Wrap an already initialised network.
    pub fn from_model(model: ScanNet<InferenceBackend>) -> Self {
        Self {
            model: Mutex::new(model),
            device: NdArrayDevice::default(),
        }
    }
}

impl ImageClassifier for BurnImageClassifier {
    fn scores(&self, input: &ImageTensor) -> Result<Vec<f32>, ClassifierError> {
        let data = TensorData::new(input.data().to_vec(), input.shape());
        let images = Tensor::<InferenceBackend, 4>::from_data(data, &self.device)
            .permute([0, 3, 1, 2]);
        let output = {
            let model = self
                .model
                .lock()
                .map_err(|_| ClassifierError::inference("classifier lock poisoned"))?;
            model.forward(images)
        };
        output
            .into_data()
            .to_vec::<f32>()
            .map_err(|err| ClassifierError::inference(format!("{err:?}")))
    }
}
