//! Error types for the recommendation pipeline
//!
//! `AdvisorError` covers everything the library reports to a front-end.
//! Classifier failures are kept in their own enum so fake classifiers in
//! tests can produce them without knowing about artifacts or vocabularies.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which closed vocabulary a lookup was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    Region,
    Season,
    Crop,
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vocabulary::Region => "region",
            Vocabulary::Season => "season",
            Vocabulary::Crop => "crop",
        };
        f.write_str(name)
    }
}

/// Errors raised by a classifier implementation
#[derive(Debug, Error, PartialEq)]
pub enum ClassifierError {
    #[error("feature vector has {actual} values, classifier expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("feature {index} is not a finite number")]
    NonFiniteFeature { index: usize },

    #[error("classifier does not support probability output")]
    ProbabilityUnsupported,

    #[error("classifier error: {0}")]
    Model(String),
}

/// Errors surfaced by the recommendation pipeline
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Region or season outside its closed vocabulary
    #[error("unknown {vocabulary} '{value}'")]
    UnknownCategory { vocabulary: Vocabulary, value: String },

    /// The underlying classifier call failed; never retried
    #[error("inference failed: {0}")]
    InferenceFailure(#[from] ClassifierError),

    /// Classifier returned an index with no crop label
    #[error("classifier returned class index {index} but only {n_classes} crop labels are known")]
    UnknownClassIndex { index: usize, n_classes: usize },

    /// A required startup artifact does not exist
    #[error("missing {artifact} artifact: {}", path.display())]
    MissingArtifact { artifact: &'static str, path: PathBuf },

    /// An artifact exists but cannot be used
    #[error("invalid {artifact} artifact ({}): {reason}", path.display())]
    InvalidArtifact {
        artifact: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// A reading lies outside its documented range
    #[error("{reading} = {value} is outside the allowed range {min}-{max}")]
    OutOfRange {
        reading: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl AdvisorError {
    /// True for errors that should stop the process at startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AdvisorError::MissingArtifact { .. } | AdvisorError::InvalidArtifact { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
