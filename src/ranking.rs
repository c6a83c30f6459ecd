//! Top-k ranking of crop candidates
//!
//! Sorting is stable, so equal probabilities keep the classifier's native
//! class order. Percentages are not renormalised after truncation.

use crate::inference::{ClassDistribution, Inference};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub const DEFAULT_TOP_K: usize = 3;

/// One ranked alternative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCrop {
    pub label: String,
    /// Probability x 100
    pub percent: f64,
}

pub type Ranking = SmallVec<[RankedCrop; DEFAULT_TOP_K]>;

/// Labels sorted by probability descending, first `k` kept
pub fn rank(distribution: &ClassDistribution, k: usize) -> Ranking {
    let mut entries: Vec<_> = distribution.entries().iter().collect();
    entries.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    entries
        .into_iter()
        .take(k)
        .map(|c| RankedCrop {
            label: c.label.clone(),
            percent: c.probability * 100.0,
        })
        .collect()
}

/// Ranking for a full inference, falling back to the top label alone
///
/// Without a distribution the result is exactly `[(label, 0.0)]`.
pub fn rank_inference(inference: &Inference, k: usize) -> Ranking {
    match &inference.distribution {
        Some(distribution) => rank(distribution, k),
        None => {
            let mut fallback = Ranking::new();
            fallback.push(RankedCrop {
                label: inference.label.clone(),
                percent: 0.0,
            });
            fallback
        }
    }
}
