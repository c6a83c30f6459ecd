//! Feature Assembler
//!
//! Turns an `InputSnapshot` into the fixed-order numeric vector the
//! classifier was trained on. Region and season become their integer class
//! index; the nine readings are copied as-is.

use crate::error::{AdvisorError, Result, Vocabulary};
use crate::snapshot::{InputSnapshot, Reading};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One column of the classifier input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    Reading(Reading),
    RegionIndex,
    SeasonIndex,
}

impl FeatureColumn {
    /// Column name as persisted alongside the trained model
    pub fn name(&self) -> &'static str {
        match self {
            FeatureColumn::Reading(Reading::Rainfall) => "Rainfall_mm",
            FeatureColumn::Reading(Reading::Temperature) => "Temperature_C",
            FeatureColumn::Reading(Reading::Humidity) => "Humidity_pct",
            FeatureColumn::Reading(Reading::SoilMoisture) => "SoilMoisture_pct",
            FeatureColumn::Reading(Reading::Sunlight) => "Sunlight_hours",
            FeatureColumn::Reading(Reading::SoilPh) => "Soil_pH",
            FeatureColumn::Reading(Reading::Nitrogen) => "SoilN_kg_ha",
            FeatureColumn::Reading(Reading::Phosphorus) => "SoilP_kg_ha",
            FeatureColumn::Reading(Reading::Potassium) => "SoilK_kg_ha",
            FeatureColumn::RegionIndex => "Region_Encoded",
            FeatureColumn::SeasonIndex => "Season_Encoded",
        }
    }

    pub fn from_name(name: &str) -> Option<FeatureColumn> {
        DEFAULT_COLUMNS.iter().copied().find(|c| c.name() == name.trim())
    }
}

const DEFAULT_COLUMNS: [FeatureColumn; 11] = [
    FeatureColumn::Reading(Reading::Rainfall),
    FeatureColumn::Reading(Reading::Temperature),
    FeatureColumn::Reading(Reading::Humidity),
    FeatureColumn::Reading(Reading::SoilMoisture),
    FeatureColumn::Reading(Reading::Sunlight),
    FeatureColumn::Reading(Reading::SoilPh),
    FeatureColumn::Reading(Reading::Nitrogen),
    FeatureColumn::Reading(Reading::Phosphorus),
    FeatureColumn::Reading(Reading::Potassium),
    FeatureColumn::RegionIndex,
    FeatureColumn::SeasonIndex,
];

/// Persisted form of a column order: a plain list of names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnOrderArtifact(pub Vec<String>);

/// Expected order of classifier input columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrder {
    columns: Vec<FeatureColumn>,
}

impl Default for ColumnOrder {
    /// Readings in display order, then region index, then season index
    fn default() -> Self {
        Self { columns: DEFAULT_COLUMNS.to_vec() }
    }
}

impl ColumnOrder {
    /// Parse a persisted list of column names
    ///
    /// Every name must be known and appear at most once.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> std::result::Result<Self, String> {
        if names.is_empty() {
            return Err("column list is empty".to_string());
        }

        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let column = FeatureColumn::from_name(name)
                .ok_or_else(|| format!("unknown feature column '{}'", name))?;
            if !seen.insert(column) {
                return Err(format!("duplicate feature column '{}'", name));
            }
            columns.push(column);
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(FeatureColumn::name).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, column: FeatureColumn) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

/// Ordered numeric encoding of one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
    columns: Vec<FeatureColumn>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: FeatureColumn) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|i| self.values[i])
    }

    /// Encoded region index, if the column order carries one
    pub fn region_index(&self) -> Option<usize> {
        self.get(FeatureColumn::RegionIndex).map(|v| v as usize)
    }

    pub fn season_index(&self) -> Option<usize> {
        self.get(FeatureColumn::SeasonIndex).map(|v| v as usize)
    }
}

/// Build the classifier input for one snapshot
///
/// `region_index_of` / `season_index_of` are the encoder lookups; a `None`
/// from either aborts with `UnknownCategory`. Both categories are checked
/// even when the column order omits them, so an unknown region never slips
/// through to a result.
pub fn assemble<R, S>(
    snapshot: &InputSnapshot,
    region_index_of: R,
    season_index_of: S,
    column_order: &ColumnOrder,
) -> Result<FeatureVector>
where
    R: Fn(&str) -> Option<usize>,
    S: Fn(&str) -> Option<usize>,
{
    let region_index = region_index_of(&snapshot.region).ok_or_else(|| AdvisorError::UnknownCategory {
        vocabulary: Vocabulary::Region,
        value: snapshot.region.clone(),
    })?;
    let season_index = season_index_of(&snapshot.season).ok_or_else(|| AdvisorError::UnknownCategory {
        vocabulary: Vocabulary::Season,
        value: snapshot.season.clone(),
    })?;

    let values = column_order
        .columns()
        .iter()
        .map(|column| match column {
            FeatureColumn::Reading(reading) => snapshot.get(*reading),
            FeatureColumn::RegionIndex => region_index as f64,
            FeatureColumn::SeasonIndex => season_index as f64,
        })
        .collect();

    Ok(FeatureVector {
        values,
        columns: column_order.columns().to_vec(),
    })
}
