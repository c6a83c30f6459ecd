//! Decision tree evaluated from flat node arrays
//!
//! Node `i` is a leaf when `children_left[i] == -1`. Internal nodes send a
//! sample left when `features[feature[i]] <= threshold[i]`. `value[i]` holds
//! per-class weights (counts or fractions) and is normalised on read.

use super::{argmax, check_input, Classifier};
use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};

const LEAF: i64 = -1;

/// Node arrays of one tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNodes {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl TreeNodes {
    /// Structural checks run once at load time
    ///
    /// After this passes, `leaf_for` cannot index out of bounds or loop.
    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if n_classes == 0 {
            return Err("tree has no classes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!(
                "node arrays differ in length (left={}, right={}, feature={}, threshold={}, value={})",
                n,
                self.children_right.len(),
                self.feature.len(),
                self.threshold.len(),
                self.value.len()
            ));
        }

        for i in 0..n {
            let left = self.children_left[i];
            let right = self.children_right[i];
            if left == LEAF {
                if right != LEAF {
                    return Err(format!("node {} has a right child but no left child", i));
                }
                let row = &self.value[i];
                if row.len() != n_classes {
                    return Err(format!(
                        "leaf {} has {} class weights, expected {}",
                        i,
                        row.len(),
                        n_classes
                    ));
                }
                if row.iter().any(|w| !w.is_finite() || *w < 0.0) || row.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("leaf {} has no usable class weights", i));
                }
                continue;
            }

            // Children must point forward; this rules out cycles.
            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {} has invalid child {}", i, child));
                }
            }
            let feature = self.feature[i];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on invalid feature {}", i, feature));
            }
            if !self.threshold[i].is_finite() {
                return Err(format!("node {} has a non-finite threshold", i));
            }
        }

        Ok(())
    }

    /// Walk from the root to the leaf reached by `features`
    fn leaf_for(&self, features: &[f64]) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if features[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Normalised class distribution at the leaf reached by `features`
    ///
    /// Callers must have validated the nodes and run `check_input`.
    pub(crate) fn leaf_distribution(&self, features: &[f64]) -> Vec<f64> {
        let row = &self.value[self.leaf_for(features)];
        let total: f64 = row.iter().sum();
        row.iter().map(|w| w / total).collect()
    }

    pub fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.children_left.iter().filter(|c| **c == LEAF).count()
    }
}

/// Single decision tree classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub n_features: usize,
    pub n_classes: usize,
    #[serde(flatten)]
    pub nodes: TreeNodes,
}

impl DecisionTree {
    pub fn validate(&self) -> Result<(), String> {
        self.nodes.validate(self.n_features, self.n_classes)
    }
}

impl Classifier for DecisionTree {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict(&self, features: &[f64]) -> Result<usize, ClassifierError> {
        let proba = self.predict_proba(features)?;
        argmax(&proba).ok_or_else(|| ClassifierError::Model("empty leaf distribution".to_string()))
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        check_input(features, self.n_features)?;
        Ok(self.nodes.leaf_distribution(features))
    }
}
