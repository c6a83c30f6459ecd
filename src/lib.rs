//! Crop Advisor
//!
//! Recommends a crop from environmental and soil readings and explains the
//! choice in plain language.
//!
//! - `snapshot`: the readings plus region and season
//! - `encoder` / `features`: categorical encoding and column assembly
//! - `model`: classifier trait and JSON-exported tree models
//! - `inference` / `ranking`: top label, confidence and alternatives
//! - `explanation`: rule-based "why this crop" sentences and renderers
//! - `recommender`: one full prediction cycle over loaded artifacts
//! - `session` / `debounce`: interactive front-end state
//! - `batch`: CSV in, CSV out with Polars and Rayon

pub mod error;
pub mod snapshot;
pub mod encoder;
pub mod features;
pub mod model;
pub mod inference;
pub mod ranking;
pub mod explanation;
pub mod icons;
pub mod artifacts;
pub mod config;
pub mod recommender;
pub mod debounce;
pub mod session;
pub mod command;
pub mod batch;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::{AdvisorError, ClassifierError, Result, Vocabulary};
pub use snapshot::{InputSnapshot, Reading, ReadingRange};
pub use encoder::LabelEncoder;
pub use features::{assemble, ColumnOrder, FeatureColumn, FeatureVector};
pub use model::{Classifier, DecisionTree, ModelArtifact, RandomForest};
pub use inference::{ClassDistribution, ClassProbability, Inference, InferenceAdapter};
pub use ranking::{rank, rank_inference, RankedCrop, DEFAULT_TOP_K};
pub use explanation::{explain, ConfidenceLevel, Explanation, ExplanationGenerator, PredictionResult};
pub use icons::icon_for;
pub use artifacts::ArtifactPaths;
pub use config::AdvisorConfig;
pub use recommender::Recommender;
pub use debounce::Debouncer;
pub use session::{Session, Status};
pub use command::Command;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
