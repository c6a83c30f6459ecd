//! Interactive session state
//!
//! Owns the current snapshot, the debounce timer and the last displayed
//! result. Reading changes are debounced; region/season changes, explicit
//! predict and reset run the cycle immediately. A failed cycle never
//! replaces the displayed result.

use crate::debounce::Debouncer;
use crate::error::{AdvisorError, Result};
use crate::explanation::PredictionResult;
use crate::recommender::Recommender;
use crate::snapshot::{InputSnapshot, Reading};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Status indicator shown next to the result panel
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Ready,
    Predicting,
    Complete,
    Error(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

pub struct Session<'a> {
    recommender: &'a Recommender,
    snapshot: InputSnapshot,
    debouncer: Debouncer,
    status: Status,
    result: Option<PredictionResult>,
    predictions: usize,
}

impl<'a> Session<'a> {
    /// Session at the default snapshot; no prediction has run yet
    pub fn new(recommender: &'a Recommender, debounce: Duration) -> Self {
        Self {
            recommender,
            snapshot: recommender.default_snapshot(),
            debouncer: Debouncer::new(debounce),
            status: Status::Ready,
            result: None,
            predictions: 0,
        }
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Result currently on display
    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// Number of cycles run so far, successful or not
    pub fn predictions(&self) -> usize {
        self.predictions
    }

    /// Deadline of the pending debounced prediction, if any
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Change one reading and schedule a debounced prediction
    ///
    /// Values are clamped to the reading's range; the stored value is
    /// returned. Non-finite values are rejected.
    pub fn set_reading(&mut self, reading: Reading, value: f64, now: Instant) -> Result<f64> {
        let range = reading.range();
        if !value.is_finite() {
            return Err(AdvisorError::OutOfRange {
                reading: reading.key(),
                value,
                min: range.min,
                max: range.max,
            });
        }

        let clamped = range.clamp(value);
        if clamped != value {
            debug!("{} clamped from {} to {}", reading.key(), value, clamped);
        }
        self.snapshot = self.snapshot.with_reading(reading, clamped);
        self.debouncer.touch(now);
        Ok(clamped)
    }

    /// Change region and predict immediately
    pub fn select_region(&mut self, region: &str) -> Result<&PredictionResult> {
        self.snapshot = self.snapshot.with_region(region.trim());
        self.predict_now()
    }

    /// Change season and predict immediately
    pub fn select_season(&mut self, season: &str) -> Result<&PredictionResult> {
        self.snapshot = self.snapshot.with_season(season.trim());
        self.predict_now()
    }

    /// Restore the default snapshot, drop pending work and predict
    pub fn reset(&mut self) -> Result<&PredictionResult> {
        self.snapshot = self.recommender.default_snapshot();
        self.predict_now()
    }

    /// Fire the debounced prediction if its window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<Result<&PredictionResult>> {
        if self.debouncer.poll(now) {
            Some(self.predict_now())
        } else {
            None
        }
    }

    /// Run one prediction cycle on the current snapshot
    ///
    /// Supersedes any pending debounced prediction.
    pub fn predict_now(&mut self) -> Result<&PredictionResult> {
        self.debouncer.cancel();
        self.status = Status::Predicting;
        self.predictions += 1;

        match self.recommender.recommend(&self.snapshot) {
            Ok(result) => {
                self.status = Status::Complete;
                Ok(self.result.insert(result))
            }
            Err(e) => {
                warn!("Prediction cycle failed, keeping previous result: {}", e);
                self.status = Status::Error(e.to_string());
                Err(e)
            }
        }
    }
}
