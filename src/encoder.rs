//! Label encoders: bidirectional category <-> index mappings
//!
//! An encoder holds one closed vocabulary (regions, seasons or crop labels).
//! The class order is the order the classifier was trained with, so index
//! `i` here is class `i` in the classifier's probability output.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Persisted form of an encoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderArtifact {
    pub classes: Vec<String>,
}

/// Closed vocabulary with O(1) lookups in both directions
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl LabelEncoder {
    /// Build from classes in native order
    ///
    /// Rejects empty vocabularies, blank names and duplicates.
    pub fn from_classes<I, S>(classes: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        if classes.is_empty() {
            return Err("vocabulary is empty".to_string());
        }

        let mut index = FxHashMap::default();
        for (i, class) in classes.iter().enumerate() {
            if class.trim().is_empty() {
                return Err(format!("class {} is blank", i));
            }
            if index.insert(class.clone(), i).is_some() {
                return Err(format!("duplicate class '{}'", class));
            }
        }

        Ok(Self { classes, index })
    }

    pub fn from_artifact(artifact: EncoderArtifact) -> Result<Self, String> {
        Self::from_classes(artifact.classes)
    }

    /// category -> index
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// index -> category
    pub fn label_of(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn first(&self) -> Option<&str> {
        self.classes.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }
}
