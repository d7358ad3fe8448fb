//! Scan classification primitives: input preprocessing and result selection.
//!
//! The classifier itself is a black box behind
//! [`crate::domain::ports::ImageClassifier`]. This module owns what happens
//! on either side of it: turning an uploaded image into a normalised tensor
//! and turning class scores into a labelled result.

use std::fmt;

use image::imageops::FilterType;
use serde::{Serialize, Serializer};

/// Side length, in pixels, of the square classifier input.
pub const MODEL_INPUT_SIZE: u32 = 224;
/// Colour channels fed to the classifier.
pub const MODEL_CHANNELS: usize = 3;

/// Fixed set of classes the classifier distinguishes, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClassLabel {
    Kidney,
    Lung,
}

impl ClassLabel {
    /// All labels in classifier output order.
    pub const ALL: [Self; 2] = [Self::Kidney, Self::Lung];

    /// Label at classifier output `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable display name, as returned to clients.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kidney => "Kidney",
            Self::Lung => "Lung",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures while preparing an upload or interpreting classifier output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("image could not be decoded: {message}")]
    Decode { message: String },
    #[error("classifier returned no scores")]
    EmptyScores,
    #[error("classifier returned a non-finite score")]
    NonFiniteScore,
    #[error("classifier returned {actual} scores, expected {expected}")]
    ScoreCount { expected: usize, actual: usize },
}

/// Normalised image batch in NHWC layout (`[1, 224, 224, 3]`).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
    shape: [usize; 4],
}

impl ImageTensor {
    /// Decode, resize, and normalise an uploaded image.
    ///
    /// Images are resized with bilinear filtering to a
    /// `MODEL_INPUT_SIZE` square, converted to RGB (alpha is dropped and
    /// greyscale expanded), scaled to `[0, 1]`, and given a batch dimension.
    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self, ClassificationError> {
        let decoded = image::load_from_memory(bytes).map_err(|err| ClassificationError::Decode {
            message: err.to_string(),
        })?;
        let resized = decoded.resize_exact(MODEL_INPUT_SIZE, MODEL_INPUT_SIZE, FilterType::Triangle);
        let data = resized
            .to_rgb8()
            .into_raw()
            .into_iter()
            .map(|channel| f32::from(channel) / 255.0)
            .collect();
        let side = MODEL_INPUT_SIZE as usize;
        Ok(Self {
            data,
            shape: [1, side, side, MODEL_CHANNELS],
        })
    }

    /// Flattened values in row-major NHWC order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }
}

/// Confidence expressed as a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Confidence(f32);

impl Confidence {
    /// Convert a probability to a percentage, clamping into range.
    #[must_use]
    pub fn from_probability(probability: f32) -> Self {
        Self((probability * 100.0).clamp(0.0, 100.0))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Labelled classifier verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    label: ClassLabel,
    confidence: Confidence,
}

impl Classification {
    /// Select the highest-scoring class; the first index wins ties.
    ///
    /// # Examples
    /// ```
    /// use medquiz::domain::{ClassLabel, Classification};
    ///
    /// let result = Classification::from_scores(&[0.1, 0.9]).expect("two scores");
    /// assert_eq!(result.label(), ClassLabel::Lung);
    /// assert_eq!(result.confidence().to_string(), "90.00%");
    /// ```
    pub fn from_scores(scores: &[f32]) -> Result<Self, ClassificationError> {
        if scores.is_empty() {
            return Err(ClassificationError::EmptyScores);
        }
        if scores.len() != ClassLabel::ALL.len() {
            return Err(ClassificationError::ScoreCount {
                expected: ClassLabel::ALL.len(),
                actual: scores.len(),
            });
        }
        if scores.iter().any(|score| !score.is_finite()) {
            return Err(ClassificationError::NonFiniteScore);
        }

        let (index, best) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |(best_index, best), (index, score)| {
                if score > best {
                    (index, score)
                } else {
                    (best_index, best)
                }
            });
        let label = ClassLabel::from_index(index).ok_or(ClassificationError::ScoreCount {
            expected: ClassLabel::ALL.len(),
            actual: scores.len(),
        })?;
        Ok(Self {
            label,
            confidence: Confidence::from_probability(best),
        })
    }

    pub fn label(&self) -> ClassLabel {
        self.label
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}
