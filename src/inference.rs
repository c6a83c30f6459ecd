//! Inference Adapter
//!
//! Wraps the opaque classifier and the crop vocabulary. Produces the top crop
//! label plus, when the model supports it, the full class distribution in the
//! classifier's native order.

use crate::encoder::LabelEncoder;
use crate::error::{AdvisorError, ClassifierError, Result};
use crate::features::FeatureVector;
use crate::model::Classifier;
use serde::Serialize;

/// Probability of one crop label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// Distribution over crop labels in native class order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassDistribution(pub Vec<ClassProbability>);

impl ClassDistribution {
    pub fn entries(&self) -> &[ClassProbability] {
        &self.0
    }

    pub fn probability_of(&self, index: usize) -> Option<f64> {
        self.0.get(index).map(|c| c.probability)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output of one classifier invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub label: String,
    pub class_index: usize,
    pub distribution: Option<ClassDistribution>,
}

impl Inference {
    /// Probability of the predicted class as a percentage, 0.0 without a distribution
    pub fn confidence(&self) -> f64 {
        self.distribution
            .as_ref()
            .and_then(|d| d.probability_of(self.class_index))
            .map(|p| p * 100.0)
            .unwrap_or(0.0)
    }
}

pub struct InferenceAdapter {
    classifier: Box<dyn Classifier>,
    crops: LabelEncoder,
}

impl InferenceAdapter {
    pub fn new(classifier: Box<dyn Classifier>, crops: LabelEncoder) -> Self {
        Self { classifier, crops }
    }

    pub fn crops(&self) -> &LabelEncoder {
        &self.crops
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Run the classifier on one feature vector
    ///
    /// A failing `predict` is an `InferenceFailure`. A failing `predict_proba`
    /// only drops the distribution.
    pub fn predict(&self, vector: &FeatureVector) -> Result<Inference> {
        let features = vector.values();
        let class_index = self.classifier.predict(features)?;
        let label = self.label_for(class_index)?;

        let distribution = match self.classifier.predict_proba(features) {
            Ok(proba) => self.distribution_from(proba),
            Err(ClassifierError::ProbabilityUnsupported) => {
                tracing::debug!("Classifier has no probability output; confidence falls back to 0");
                None
            }
            Err(e) => {
                tracing::warn!("Probability output failed, falling back to top label only: {}", e);
                None
            }
        };

        Ok(Inference {
            label,
            class_index,
            distribution,
        })
    }

    fn label_for(&self, index: usize) -> Result<String> {
        self.crops
            .label_of(index)
            .map(str::to_string)
            .ok_or(AdvisorError::UnknownClassIndex {
                index,
                n_classes: self.crops.len(),
            })
    }

    fn distribution_from(&self, proba: Vec<f64>) -> Option<ClassDistribution> {
        if proba.len() != self.crops.len() {
            tracing::warn!(
                "Probability output has {} classes, crop vocabulary has {}; ignoring distribution",
                proba.len(),
                self.crops.len()
            );
            return None;
        }

        let entries = self
            .crops
            .classes()
            .iter()
            .zip(proba)
            .map(|(label, probability)| ClassProbability {
                label: label.clone(),
                probability,
            })
            .collect();
        Some(ClassDistribution(entries))
    }
}
