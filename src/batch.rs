//! Batch prediction over CSV tables
//!
//! Input columns: `region`, `season` and one column per reading key
//! (`rainfall`, `temperature`, ...). Output keeps every input column and
//! appends `crop`, `confidence`, `alternatives`, `explanation` and `error`.
//! A bad row fills `error` and leaves the prediction columns null; it never
//! aborts the batch.

use crate::recommender::Recommender;
use crate::snapshot::{InputSnapshot, Reading};
use anyhow::{Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

pub const REGION_COLUMN: &str = "region";
pub const SEASON_COLUMN: &str = "season";

/// Outcome of one input row
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    pub crop: Option<String>,
    pub confidence: Option<f64>,
    pub alternatives: Option<String>,
    pub explanation: Option<String>,
    pub error: Option<String>,
}

impl RowOutcome {
    fn failed(error: String) -> Self {
        Self {
            crop: None,
            confidence: None,
            alternatives: None,
            explanation: None,
            error: Some(error),
        }
    }
}

/// Summary counts for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub failed: usize,
}

pub fn load_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load batch CSV: {}", path.display()))
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Float view of a reading column, casting integer columns
fn reading_column(df: &DataFrame, reading: Reading) -> Result<Float64Chunked> {
    let column = df
        .column(reading.key())
        .with_context(|| format!("Column '{}' not found", reading.key()))?;
    let cast = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", reading.key()))?;
    Ok(cast.f64()?.clone())
}

fn category_column(df: &DataFrame, name: &str) -> Result<StringChunked> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let cast = column
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' is not text", name))?;
    Ok(cast.str()?.clone())
}

/// One snapshot per row; rows with nulls become per-row errors
pub fn snapshots_from_frame(df: &DataFrame) -> Result<Vec<std::result::Result<InputSnapshot, String>>> {
    let regions = category_column(df, REGION_COLUMN)?;
    let seasons = category_column(df, SEASON_COLUMN)?;
    let readings = Reading::ALL
        .iter()
        .map(|r| reading_column(df, *r).map(|col| (*r, col)))
        .collect::<Result<Vec<_>>>()?;

    let rows = (0..df.height())
        .map(|i| -> std::result::Result<InputSnapshot, String> {
            let region = regions.get(i).ok_or_else(|| format!("row {}: missing region", i))?;
            let season = seasons.get(i).ok_or_else(|| format!("row {}: missing season", i))?;
            let mut snapshot = InputSnapshot::defaults(region.trim(), season.trim());
            for (reading, col) in &readings {
                let value = col
                    .get(i)
                    .ok_or_else(|| format!("row {}: missing {}", i, reading.key()))?;
                snapshot = snapshot.with_reading(*reading, value);
            }
            Ok(snapshot)
        })
        .collect();

    Ok(rows)
}

fn predict_row(recommender: &Recommender, row: &std::result::Result<InputSnapshot, String>) -> RowOutcome {
    let snapshot = match row {
        Ok(snapshot) => snapshot,
        Err(e) => return RowOutcome::failed(e.clone()),
    };
    let result = snapshot
        .validate()
        .and_then(|_| recommender.recommend(snapshot));

    match result {
        Ok(result) => RowOutcome {
            alternatives: Some(
                result
                    .alternatives
                    .iter()
                    .map(|a| format!("{}:{:.1}", a.label, a.percent))
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            confidence: Some(result.confidence),
            explanation: Some(result.explanation.sentence),
            crop: Some(result.label),
            error: None,
        },
        Err(e) => RowOutcome::failed(e.to_string()),
    }
}

/// Predict every row in parallel, preserving row order
pub fn predict_rows(
    recommender: &Recommender,
    rows: &[std::result::Result<InputSnapshot, String>],
) -> Vec<RowOutcome> {
    rows.par_iter().map(|row| predict_row(recommender, row)).collect()
}

/// Input frame with the prediction columns appended
pub fn predict_frame(recommender: &Recommender, df: &DataFrame) -> Result<(DataFrame, BatchSummary)> {
    let start = Instant::now();
    let rows = snapshots_from_frame(df)?;
    let outcomes = predict_rows(recommender, &rows);

    let summary = BatchSummary {
        rows: outcomes.len(),
        failed: outcomes.iter().filter(|o| o.error.is_some()).count(),
    };

    let crop: Vec<Option<&str>> = outcomes.iter().map(|o| o.crop.as_deref()).collect();
    let confidence: Vec<Option<f64>> = outcomes.iter().map(|o| o.confidence).collect();
    let alternatives: Vec<Option<&str>> = outcomes.iter().map(|o| o.alternatives.as_deref()).collect();
    let explanation: Vec<Option<&str>> = outcomes.iter().map(|o| o.explanation.as_deref()).collect();
    let error: Vec<Option<&str>> = outcomes.iter().map(|o| o.error.as_deref()).collect();

    let mut out = df.clone();
    out.with_column(Series::new("crop".into(), crop))?;
    out.with_column(Series::new("confidence".into(), confidence))?;
    out.with_column(Series::new("alternatives".into(), alternatives))?;
    out.with_column(Series::new("explanation".into(), explanation))?;
    out.with_column(Series::new("error".into(), error))?;

    tracing::info!(
        "Batch of {} rows predicted in {:?} ({} failed)",
        summary.rows,
        start.elapsed(),
        summary.failed
    );
    Ok((out, summary))
}
