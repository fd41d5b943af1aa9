// src/core/gauge.rs

use serde::Serialize;

use crate::core::models::{CompositeScoreResult, StatusBand};

/// Half-circle gauge geometry for a composite score and a goal value.
///
/// Angles are in degrees: -90 points at 0, 0 at 50, +90 at 100. This is a
/// pure function of the result and the goal; presentation layers only read it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct GaugeReading {
    pub score: u8,
    pub goal: u8,
    pub needle_degrees: f64,
    pub goal_marker_degrees: f64,
    pub points_to_goal: u8,
    pub band: StatusBand,
}

impl GaugeReading {
    pub fn from_result(result: &CompositeScoreResult, goal: u8) -> Self {
        let goal = goal.min(100);
        Self {
            score: result.score,
            goal,
            needle_degrees: rotation_for(result.score),
            goal_marker_degrees: rotation_for(goal),
            points_to_goal: goal.saturating_sub(result.score),
            band: result.status_band(),
        }
    }

    pub fn goal_reached(&self) -> bool {
        self.points_to_goal == 0
    }
}

/// Maps a 0-100 score onto -90..=90 degrees.
pub fn rotation_for(score: u8) -> f64 {
    f64::from(score.min(100)) / 100.0 * 180.0 - 90.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RiskLevel;

    fn result_with(score: u8) -> CompositeScoreResult {
        CompositeScoreResult {
            score,
            level: RiskLevel::from_score(score),
            per_category: Vec::new(),
            delta: None,
        }
    }

    #[test]
    fn rotation_endpoints() {
        assert_eq!(rotation_for(0), -90.0);
        assert_eq!(rotation_for(50), 0.0);
        assert_eq!(rotation_for(100), 90.0);
    }

    #[test]
    fn reading_below_goal() {
        let reading = GaugeReading::from_result(&result_with(72), 80);
        assert_eq!(reading.points_to_goal, 8);
        assert!(!reading.goal_reached());
        assert_eq!(reading.band, StatusBand::Warning);
        assert!((reading.needle_degrees - 39.6).abs() < 1e-9);
        assert!((reading.goal_marker_degrees - 54.0).abs() < 1e-9);
    }

    #[test]
    fn reading_above_goal_saturates() {
        let reading = GaugeReading::from_result(&result_with(91), 80);
        assert_eq!(reading.points_to_goal, 0);
        assert!(reading.goal_reached());
    }
}
