//! Startup artifacts in the model directory
//!
//! Required: the classifier export plus the region, season and crop
//! encoders. Optional: the persisted feature column order.

use crate::encoder::{EncoderArtifact, LabelEncoder};
use crate::error::{AdvisorError, Result};
use crate::features::{ColumnOrder, ColumnOrderArtifact};
use crate::model::{Classifier, ModelArtifact};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MODEL_FILE: &str = "best_crop_model.json";
pub const REGION_ENCODER_FILE: &str = "region_encoder.json";
pub const SEASON_ENCODER_FILE: &str = "season_encoder.json";
pub const CROP_ENCODER_FILE: &str = "crop_encoder.json";
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";

/// Locations of every artifact the recommender loads
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub region_encoder: PathBuf,
    pub season_encoder: PathBuf,
    pub crop_encoder: PathBuf,
    pub feature_columns: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            region_encoder: dir.join(REGION_ENCODER_FILE),
            season_encoder: dir.join(SEASON_ENCODER_FILE),
            crop_encoder: dir.join(CROP_ENCODER_FILE),
            feature_columns: dir.join(FEATURE_COLUMNS_FILE),
        }
    }
}

/// Everything read from disk, not yet cross-checked
pub struct LoadedArtifacts {
    pub classifier: Box<dyn Classifier>,
    pub regions: LabelEncoder,
    pub seasons: LabelEncoder,
    pub crops: LabelEncoder,
    pub columns: ColumnOrder,
}

impl LoadedArtifacts {
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let model = read_model(&paths.model)?;
        let classifier = model.into_classifier().map_err(|reason| invalid("model", &paths.model, reason))?;
        debug!(
            "Classifier loaded: {} features, {} classes",
            classifier.n_features(),
            classifier.n_classes()
        );

        let regions = load_encoder("region encoder", &paths.region_encoder)?;
        let seasons = load_encoder("season encoder", &paths.season_encoder)?;
        let crops = load_encoder("crop encoder", &paths.crop_encoder)?;
        let columns = load_columns(&paths.feature_columns)?;

        Ok(Self {
            classifier,
            regions,
            seasons,
            crops,
            columns,
        })
    }
}

/// Raw model export, not yet validated
pub fn read_model(path: &Path) -> Result<ModelArtifact> {
    read_json("model", path)
}

fn load_encoder(artifact: &'static str, path: &Path) -> Result<LabelEncoder> {
    let raw: EncoderArtifact = read_json(artifact, path)?;
    let encoder = LabelEncoder::from_artifact(raw).map_err(|reason| invalid(artifact, path, reason))?;
    debug!("{}: {} classes", artifact, encoder.len());
    Ok(encoder)
}

/// Column order from disk, or the default order when the file is absent
fn load_columns(path: &Path) -> Result<ColumnOrder> {
    if !path.exists() {
        info!(
            "No {} at {}, using default column order",
            FEATURE_COLUMNS_FILE,
            path.display()
        );
        return Ok(ColumnOrder::default());
    }
    let ColumnOrderArtifact(names) = read_json("feature columns", path)?;
    ColumnOrder::from_names(&names).map_err(|reason| invalid("feature columns", path, reason))
}

fn read_json<T: DeserializeOwned>(artifact: &'static str, path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AdvisorError::MissingArtifact {
            artifact,
            path: path.to_path_buf(),
        },
        _ => invalid(artifact, path, e.to_string()),
    })?;
    serde_json::from_str(&text).map_err(|e| invalid(artifact, path, e.to_string()))
}

fn invalid(artifact: &'static str, path: &Path, reason: impl Into<String>) -> AdvisorError {
    AdvisorError::InvalidArtifact {
        artifact,
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
