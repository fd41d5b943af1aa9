// src/core/scoring.rs

//! Weighted aggregation of per-category scores into one composite score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::errors::ScoringError;
use crate::core::models::{CategoryScore, CompositeScoreResult, RiskLevel};

const MAX_WEIGHT: f64 = 100.0;
const MAX_SCORE: u8 = 100;

/// Computes the composite score for a set of weighted categories.
///
/// The composite is the weight-normalized mean
/// `round(Σ(raw_i * weight_i) / Σ(weight_i))`, clamped to 0..=100. Weights do
/// not need to sum to 100, so a category with a larger declared weight
/// dominates regardless of how many categories are supplied.
///
/// # Arguments
/// * `categories` - The per-category scores. Must be non-empty; each weight must be in (0, 100].
/// * `previous_score` - The last known composite, if any. Used only for `delta`.
///
/// # Returns
/// A `CompositeScoreResult` with the rounded score, its risk level, the
/// breakdown (in input order) and `delta = score - previous_score`.
pub fn compute_composite(
    categories: &[CategoryScore],
    previous_score: Option<u8>,
) -> Result<CompositeScoreResult, ScoringError> {
    validate_categories(categories)?;

    let weighted_sum: f64 = categories
        .iter()
        .map(|c| f64::from(c.raw_score) * c.weight)
        .sum();
    let weight_total: f64 = categories.iter().map(|c| c.weight).sum();
    let mean = weighted_sum / weight_total;
    let score = mean.round().clamp(0.0, f64::from(MAX_SCORE)) as u8;

    let level = RiskLevel::from_score(score);
    let delta = previous_score.map(|previous| i16::from(score) - i16::from(previous));

    debug!(weighted_sum, weight_total, mean, "Weighted mean computed.");
    info!(score, level = %level, ?delta, categories = categories.len(), "Composite score computed.");

    Ok(CompositeScoreResult {
        score,
        level,
        per_category: categories.to_vec(),
        delta,
    })
}

fn validate_categories(categories: &[CategoryScore]) -> Result<(), ScoringError> {
    if categories.is_empty() {
        return Err(ScoringError::EmptyCategorySet);
    }
    for category in categories {
        // Written as a negated range check so NaN is rejected too.
        if !(category.weight > 0.0 && category.weight <= MAX_WEIGHT) {
            return Err(ScoringError::InvalidWeight {
                category: category.category.clone(),
                weight: category.weight,
            });
        }
        if category.raw_score > MAX_SCORE {
            return Err(ScoringError::ScoreOutOfRange {
                category: category.category.clone(),
                raw_score: category.raw_score,
            });
        }
    }
    Ok(())
}

/// A composite score recorded at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreSnapshot {
    pub score: u8,
    pub level: RiskLevel,
    pub recorded_at: DateTime<Utc>,
}

/// Chronological record of composite scores, owned by the collaborator. The
/// latest entry is the `previous_score` for the next computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreHistory {
    snapshots: Vec<ScoreSnapshot>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &CompositeScoreResult) {
        self.record_at(result, Utc::now());
    }

    /// Records a result at an explicit time. Snapshots older than the latest
    /// one are still appended; `latest()` always returns the last recorded.
    pub fn record_at(&mut self, result: &CompositeScoreResult, recorded_at: DateTime<Utc>) {
        self.record_score(result.score, recorded_at);
    }

    /// Records a bare score, e.g. one carried over from a previous run.
    pub fn record_score(&mut self, score: u8, recorded_at: DateTime<Utc>) {
        self.snapshots.push(ScoreSnapshot {
            score,
            level: RiskLevel::from_score(score),
            recorded_at,
        });
    }

    pub fn latest(&self) -> Option<&ScoreSnapshot> {
        self.snapshots.last()
    }

    pub fn previous_score(&self) -> Option<u8> {
        self.latest().map(|s| s.score)
    }

    pub fn snapshots(&self) -> &[ScoreSnapshot] {
        &self.snapshots
    }

    /// Computes a new composite against the latest recorded score and records it.
    pub fn compute_and_record(
        &mut self,
        categories: &[CategoryScore],
    ) -> Result<CompositeScoreResult, ScoringError> {
        let result = compute_composite(categories, self.previous_score())?;
        self.record(&result);
        Ok(result)
    }
}
