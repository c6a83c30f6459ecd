use crate::ranking::RankedCrop;
use crate::snapshot::Reading;
use serde::{Deserialize, Serialize};

/// One reason phrase and the reading it came from (None for the season)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub reading: Option<Reading>,
    pub phrase: String,
}

/// "Why this crop" sentence with the reasons it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub sentence: String,
    /// Every matched reason in evaluation order; the sentence may use fewer
    pub reasons: Vec<Reason>,
}

/// Confidence band used to colour the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Good,
    Fair,
    Low,
}

impl ConfidenceLevel {
    /// Derive level from a confidence percentage (0-100)
    pub fn from_confidence(confidence: f64) -> Self {
        match confidence {
            c if c >= 80.0 => ConfidenceLevel::High,
            c if c >= 60.0 => ConfidenceLevel::Good,
            c if c >= 40.0 => ConfidenceLevel::Fair,
            _ => ConfidenceLevel::Low,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "#10B981",
            ConfidenceLevel::Good => "#3B82F6",
            ConfidenceLevel::Fair => "#F59E0B",
            ConfidenceLevel::Low => "#EF4444",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Good => "Good",
            ConfidenceLevel::Fair => "Fair",
            ConfidenceLevel::Low => "Low",
        }
    }
}

/// Everything the result panel shows for one prediction cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,
    pub icon: String,
    /// Probability of the predicted class x 100; 0.0 without probability support
    pub confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub alternatives: Vec<RankedCrop>,
    pub explanation: Explanation,
}
