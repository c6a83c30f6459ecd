//! Recommender - one full prediction cycle
//!
//! snapshot -> feature vector -> inference -> confidence, top-k ranking,
//! explanation and icon. Immutable after construction, so one instance can be
//! shared across threads (batch mode, API handlers).

use crate::artifacts::{ArtifactPaths, LoadedArtifacts};
use crate::encoder::LabelEncoder;
use crate::error::{AdvisorError, Result};
use crate::explanation::{ConfidenceLevel, ExplanationGenerator, PredictionResult};
use crate::features::{assemble, ColumnOrder, FeatureVector};
use crate::icons;
use crate::inference::{Inference, InferenceAdapter};
use crate::model::Classifier;
use crate::ranking::{rank_inference, DEFAULT_TOP_K};
use crate::snapshot::InputSnapshot;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct Recommender {
    regions: LabelEncoder,
    seasons: LabelEncoder,
    columns: ColumnOrder,
    adapter: InferenceAdapter,
    top_k: usize,
}

impl Recommender {
    /// Load every artifact and cross-check them
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        info!("Loading model artifacts from {}", paths.model.display());
        let loaded = LoadedArtifacts::load(paths)?;
        let recommender = Self::from_parts(
            loaded.classifier,
            loaded.regions,
            loaded.seasons,
            loaded.crops,
            loaded.columns,
        )
        .map_err(|reason| AdvisorError::InvalidArtifact {
            artifact: "model",
            path: paths.model.clone(),
            reason,
        })?;

        info!(
            "Recommender ready: {} crops, {} regions, {} seasons, {} features",
            recommender.crops().len(),
            recommender.regions.len(),
            recommender.seasons.len(),
            recommender.columns.len()
        );
        Ok(recommender)
    }

    /// Assemble from in-memory parts
    ///
    /// Fails when the classifier shape disagrees with the crop vocabulary or
    /// the column order.
    pub fn from_parts(
        classifier: Box<dyn Classifier>,
        regions: LabelEncoder,
        seasons: LabelEncoder,
        crops: LabelEncoder,
        columns: ColumnOrder,
    ) -> std::result::Result<Self, String> {
        if classifier.n_classes() != crops.len() {
            return Err(format!(
                "classifier has {} classes but the crop vocabulary has {}",
                classifier.n_classes(),
                crops.len()
            ));
        }
        if classifier.n_features() != columns.len() {
            return Err(format!(
                "classifier expects {} features but the column order has {}",
                classifier.n_features(),
                columns.len()
            ));
        }

        Ok(Self {
            regions,
            seasons,
            columns,
            adapter: InferenceAdapter::new(classifier, crops),
            top_k: DEFAULT_TOP_K,
        })
    }

    /// Number of alternatives to return (at least 1)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn regions(&self) -> &LabelEncoder {
        &self.regions
    }

    pub fn seasons(&self) -> &LabelEncoder {
        &self.seasons
    }

    pub fn crops(&self) -> &LabelEncoder {
        self.adapter.crops()
    }

    pub fn columns(&self) -> &ColumnOrder {
        &self.columns
    }

    /// Default readings with the first region and season of each vocabulary
    pub fn default_snapshot(&self) -> InputSnapshot {
        InputSnapshot::defaults(
            self.regions.first().unwrap_or_default(),
            self.seasons.first().unwrap_or_default(),
        )
    }

    /// Encode a snapshot in the persisted column order
    pub fn assemble(&self, snapshot: &InputSnapshot) -> Result<FeatureVector> {
        assemble(
            snapshot,
            |region| self.regions.index_of(region),
            |season| self.seasons.index_of(season),
            &self.columns,
        )
    }

    /// Raw classifier output for a snapshot
    pub fn infer(&self, snapshot: &InputSnapshot) -> Result<Inference> {
        let vector = self.assemble(snapshot)?;
        self.adapter.predict(&vector)
    }

    /// Full prediction cycle for one snapshot
    ///
    /// Readings are not range-checked here; callers that accept untrusted
    /// input run `InputSnapshot::validate` first.
    pub fn recommend(&self, snapshot: &InputSnapshot) -> Result<PredictionResult> {
        let start = Instant::now();

        let inference = self.infer(snapshot).map_err(|e| {
            warn!("Prediction failed: {}", e);
            e
        })?;

        let confidence = inference.confidence();
        let alternatives = rank_inference(&inference, self.top_k).into_vec();
        let explanation = ExplanationGenerator::generate(&inference.label, snapshot);

        debug!(
            "Predicted {} ({:.1}%) for {}/{} in {:?}",
            inference.label,
            confidence,
            snapshot.region,
            snapshot.season,
            start.elapsed()
        );

        Ok(PredictionResult {
            icon: icons::icon_for(&inference.label).to_string(),
            confidence,
            confidence_level: ConfidenceLevel::from_confidence(confidence),
            alternatives,
            explanation,
            label: inference.label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClassifierError, Vocabulary};
    use crate::snapshot::Reading;
    use approx::assert_relative_eq;

    /// Picks "Rice" when rainfall is high, otherwise "Wheat"
    struct RainClassifier {
        with_proba: bool,
    }

    impl Classifier for RainClassifier {
        fn n_features(&self) -> usize {
            11
        }
        fn n_classes(&self) -> usize {
            3
        }
        fn predict(&self, features: &[f64]) -> std::result::Result<usize, ClassifierError> {
            Ok(if features[0] > 250.0 { 1 } else { 2 })
        }
        fn predict_proba(&self, features: &[f64]) -> std::result::Result<Vec<f64>, ClassifierError> {
            if !self.with_proba {
                return Err(ClassifierError::ProbabilityUnsupported);
            }
            Ok(if features[0] > 250.0 {
                vec![0.15, 0.75, 0.10]
            } else {
                vec![0.3, 0.1, 0.6]
            })
        }
    }

    fn recommender(with_proba: bool) -> Recommender {
        Recommender::from_parts(
            Box::new(RainClassifier { with_proba }),
            LabelEncoder::from_classes(["North", "South"]).unwrap(),
            LabelEncoder::from_classes(["Summer", "Winter"]).unwrap(),
            LabelEncoder::from_classes(["Maize", "Rice", "Wheat"]).unwrap(),
            ColumnOrder::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_full_cycle() {
        let rec = recommender(true);
        let snapshot = rec.default_snapshot().with_reading(Reading::Rainfall, 300.0);
        let result = rec.recommend(&snapshot).unwrap();

        assert_eq!(result.label, "Rice");
        assert_eq!(result.icon, "🌾");
        assert_relative_eq!(result.confidence, 75.0, epsilon = 1e-9);
        assert_eq!(result.confidence_level, ConfidenceLevel::Good);
        let labels: Vec<_> = result.alternatives.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["Rice", "Maize", "Wheat"]);
        assert!(result.explanation.sentence.starts_with("Rice is suitable due to high rainfall (300mm)"));
    }

    #[test]
    fn test_confidence_matches_first_alternative() {
        let rec = recommender(true);
        let result = rec.recommend(&rec.default_snapshot()).unwrap();
        assert_eq!(result.label, "Wheat");
        assert_relative_eq!(result.confidence, result.alternatives[0].percent, epsilon = 1e-9);
    }

    #[test]
    fn test_without_probabilities() {
        let rec = recommender(false);
        let result = rec.recommend(&rec.default_snapshot()).unwrap();
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert_eq!(result.alternatives.len(), 1);
        assert_eq!(result.alternatives[0].label, "Wheat");
        assert_eq!(result.alternatives[0].percent, 0.0);
    }

    #[test]
    fn test_unknown_region() {
        let rec = recommender(true);
        let err = rec.recommend(&rec.default_snapshot().with_region("Atlantis")).unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::UnknownCategory { vocabulary: Vocabulary::Region, ref value } if value == "Atlantis"
        ));
    }

    #[test]
    fn test_top_k_is_configurable() {
        let rec = recommender(true).with_top_k(2);
        assert_eq!(rec.recommend(&rec.default_snapshot()).unwrap().alternatives.len(), 2);
        assert_eq!(recommender(true).with_top_k(0).top_k(), 1);
    }

    #[test]
    fn test_shape_cross_checks() {
        let err = Recommender::from_parts(
            Box::new(RainClassifier { with_proba: true }),
            LabelEncoder::from_classes(["North"]).unwrap(),
            LabelEncoder::from_classes(["Summer"]).unwrap(),
            LabelEncoder::from_classes(["Maize", "Rice"]).unwrap(),
            ColumnOrder::default(),
        )
        .err()
        .unwrap();
        assert!(err.contains("3 classes"));

        let err = Recommender::from_parts(
            Box::new(RainClassifier { with_proba: true }),
            LabelEncoder::from_classes(["North"]).unwrap(),
            LabelEncoder::from_classes(["Summer"]).unwrap(),
            LabelEncoder::from_classes(["Maize", "Rice", "Wheat"]).unwrap(),
            ColumnOrder::from_names(&["Rainfall_mm", "Region_Encoded"]).unwrap(),
        )
        .err()
        .unwrap();
        assert!(err.contains("11 features"));
    }

    #[test]
    fn test_default_snapshot_uses_first_categories() {
        let snapshot = recommender(true).default_snapshot();
        assert_eq!(snapshot.region, "North");
        assert_eq!(snapshot.season, "Summer");
        assert_eq!(snapshot.rainfall_mm, 200.0);
    }
}
