//! Random forest over shared-shape trees
//!
//! Soft voting averages the per-tree leaf distributions and exposes them as
//! probabilities. Hard voting counts one vote per tree and, like a hard
//! voting ensemble, offers no probability output.

use super::tree::TreeNodes;
use super::{argmax, check_input, Classifier};
use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voting {
    #[default]
    Soft,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub n_classes: usize,
    #[serde(default)]
    pub voting: Voting,
    pub trees: Vec<TreeNodes>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, nodes) in self.trees.iter().enumerate() {
            nodes
                .validate(self.n_features, self.n_classes)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    fn average_distribution(&self, features: &[f64]) -> Vec<f64> {
        let mut sum = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.leaf_distribution(features)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        sum.into_iter().map(|s| s / n).collect()
    }

    fn majority_vote(&self, features: &[f64]) -> Vec<f64> {
        let mut votes = vec![0.0; self.n_classes];
        for tree in &self.trees {
            if let Some(class) = argmax(&tree.leaf_distribution(features)) {
                votes[class] += 1.0;
            }
        }
        votes
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, features: &[f64]) -> Result<usize, ClassifierError> {
        check_input(features, self.n_features)?;
        let scores = match self.voting {
            Voting::Soft => self.average_distribution(features),
            Voting::Hard => self.majority_vote(features),
        };
        argmax(&scores).ok_or_else(|| ClassifierError::Model("forest produced no scores".to_string()))
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        match self.voting {
            Voting::Soft => {
                check_input(features, self.n_features)?;
                Ok(self.average_distribution(features))
            }
            Voting::Hard => Err(ClassifierError::ProbabilityUnsupported),
        }
    }
}
