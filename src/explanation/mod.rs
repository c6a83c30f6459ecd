pub mod types;
pub mod rules;
pub mod generator;
pub mod formatters;

pub use types::{ConfidenceLevel, Explanation, PredictionResult, Reason};
pub use rules::{band_name, season_phrase, Band, FeatureRule, FEATURE_RULES};
pub use generator::{explain, ExplanationGenerator};
pub use formatters::{JsonFormatter, MarkdownFormatter, TextFormatter};
