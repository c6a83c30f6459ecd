//! Classifier collaborator
//!
//! The pipeline only needs `predict` and, when available, `predict_proba`.
//! Concrete models are evaluated from a JSON export of flat node arrays:
//! - `tree.rs` - single decision tree
//! - `forest.rs` - random forest with soft or hard voting

pub mod tree;
pub mod forest;

pub use tree::{DecisionTree, TreeNodes};
pub use forest::{RandomForest, Voting};

use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};

/// Opaque trained classifier
///
/// Implementations must be deterministic: the same features always give the
/// same class and distribution.
pub trait Classifier: Send + Sync {
    /// Number of input columns the model was trained on
    fn n_features(&self) -> usize;

    /// Number of classes in the model's native order
    fn n_classes(&self) -> usize;

    /// Index of the predicted class
    fn predict(&self, features: &[f64]) -> Result<usize, ClassifierError>;

    /// Probability per class in native order
    ///
    /// Models without probability output keep the default.
    fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        Err(ClassifierError::ProbabilityUnsupported)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn n_features(&self) -> usize {
        (**self).n_features()
    }

    fn n_classes(&self) -> usize {
        (**self).n_classes()
    }

    fn predict(&self, features: &[f64]) -> Result<usize, ClassifierError> {
        (**self).predict(features)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        (**self).predict_proba(features)
    }
}

/// Shape and finiteness check shared by the tree models
pub(crate) fn check_input(features: &[f64], n_features: usize) -> Result<(), ClassifierError> {
    if features.len() != n_features {
        return Err(ClassifierError::ShapeMismatch {
            expected: n_features,
            actual: features.len(),
        });
    }
    if let Some(index) = features.iter().position(|v| !v.is_finite()) {
        return Err(ClassifierError::NonFiniteFeature { index });
    }
    Ok(())
}

/// Index of the largest value; the first one wins on ties
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Persisted classifier, tagged by model kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl ModelArtifact {
    /// Validate node arrays and turn the artifact into a classifier
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, String> {
        match self {
            ModelArtifact::DecisionTree(tree) => {
                tree.validate()?;
                Ok(Box::new(tree))
            }
            ModelArtifact::RandomForest(forest) => {
                forest.validate()?;
                Ok(Box::new(forest))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_wins_on_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
        assert_eq!(argmax(&[0.5]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_check_input() {
        assert!(check_input(&[1.0, 2.0], 2).is_ok());
        assert_eq!(
            check_input(&[1.0], 2),
            Err(ClassifierError::ShapeMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(
            check_input(&[1.0, f64::INFINITY], 2),
            Err(ClassifierError::NonFiniteFeature { index: 1 })
        );
    }

    #[test]
    fn test_artifact_kind_tag() {
        let json = r#"{
            "kind": "decision_tree",
            "n_features": 1,
            "n_classes": 2,
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [0, -2, -2],
            "threshold": [5.0, -2.0, -2.0],
            "value": [[4.0, 4.0], [4.0, 0.0], [0.0, 4.0]]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        let classifier = artifact.into_classifier().unwrap();
        assert_eq!(classifier.n_classes(), 2);
        assert_eq!(classifier.predict(&[3.0]).unwrap(), 0);
        assert_eq!(classifier.predict(&[7.0]).unwrap(), 1);
    }
}
