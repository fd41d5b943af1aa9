// src/core/models.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::core::errors::SimulationError;
use crate::core::simulation::parse_severity;

// --- Soglie di Classificazione ---
// Classification Thresholds

/// Scores at or above this value are classified as low risk.
pub const LOW_RISK_THRESHOLD: u8 = 80;
/// Scores at or above this value (and below `LOW_RISK_THRESHOLD`) are medium risk.
pub const MEDIUM_RISK_THRESHOLD: u8 = 60;

// --- Modelli Questionario ---
// Questionnaire Models

// A single multiple-choice question. The `id` is the key under which the
// chosen option is stored in the session's answer map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: &str, prompt: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn accepts(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

// An ordered group of questions that must be fully answered before the
// questionnaire moves on to the next stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stage {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Stage {
    pub fn new(title: &str, description: &str, questions: Vec<Question>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            questions,
        }
    }
}

// Position of a stage relative to the session's cursor, used by progress indicators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Current,
    Pending,
}

// --- Modelli Punteggio ---
// Scoring Models

/// Overall risk classification of a score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub enum RiskLevel {
    #[strum(to_string = "Low Risk")]
    Low,
    #[strum(to_string = "Medium Risk")]
    Medium,
    #[strum(to_string = "High Risk")]
    High,
}

impl RiskLevel {
    /// Classifies a 0-100 score. Higher scores mean a better security posture,
    /// hence a lower risk.
    pub fn from_score(score: u8) -> Self {
        if score >= LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn status_band(self) -> StatusBand {
        match self {
            RiskLevel::Low => StatusBand::Good,
            RiskLevel::Medium => StatusBand::Warning,
            RiskLevel::High => StatusBand::Critical,
        }
    }
}

/// Display band of a score: good (green), warning (yellow) or critical (red).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusBand {
    Good,
    Warning,
    Critical,
}

impl StatusBand {
    pub fn from_score(score: u8) -> Self {
        RiskLevel::from_score(score).status_band()
    }

    pub fn color_tag(self) -> &'static str {
        match self {
            StatusBand::Good => "green",
            StatusBand::Warning => "yellow",
            StatusBand::Critical => "red",
        }
    }
}

// A named security dimension contributing a weighted raw score to the composite.
// Supplied by the collaborator; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryScore {
    pub category: String,
    pub raw_score: u8,
    pub weight: f64,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl CategoryScore {
    pub fn new(category: &str, raw_score: u8, weight: f64) -> Self {
        Self {
            category: category.to_string(),
            raw_score,
            weight,
            issues: Vec::new(),
        }
    }

    pub fn with_issues(mut self, issues: &[&str]) -> Self {
        self.issues = issues.iter().map(|i| i.to_string()).collect();
        self
    }

    pub fn status_band(&self) -> StatusBand {
        StatusBand::from_score(self.raw_score)
    }
}

// Direction of the score relative to the previous assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improved,
    Regressed,
    Unchanged,
}

impl Trend {
    pub fn from_delta(delta: i16) -> Self {
        match delta {
            d if d > 0 => Trend::Improved,
            d if d < 0 => Trend::Regressed,
            _ => Trend::Unchanged,
        }
    }
}

// The composite score, its classification and the per-category breakdown.
// `delta` is absent when no previous score was supplied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompositeScoreResult {
    pub score: u8,
    pub level: RiskLevel,
    pub per_category: Vec<CategoryScore>,
    pub delta: Option<i16>,
}

impl CompositeScoreResult {
    pub fn trend(&self) -> Trend {
        Trend::from_delta(self.delta.unwrap_or(0))
    }

    pub fn status_band(&self) -> StatusBand {
        self.level.status_band()
    }
}

// --- Modelli Simulazione ---
// Simulation Models

/// Severity tier of a vulnerability, used to select a simulation scenario.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
    Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

// External records go through the same case-insensitive parser as raw labels.
impl TryFrom<String> for Severity {
    type Error = SimulationError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        parse_severity(&label)
    }
}

// A vulnerability record owned by the collaborator. Only `severity` matters
// to the simulation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vulnerability {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub description: String,
    pub asset: String,
}

// One narrative step of a what-if scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioStep {
    pub title: String,
    pub description: String,
    pub icon_tag: String,
    pub color_tag: String,
}

impl ScenarioStep {
    pub fn new(title: &str, description: &str, icon_tag: &str, color_tag: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            icon_tag: icon_tag.to_string(),
            color_tag: color_tag.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn risk_level_threshold_edges() {
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::High);
    }

    #[test]
    fn category_band_uses_same_thresholds() {
        assert_eq!(CategoryScore::new("Endpoint", 85, 20.0).status_band(), StatusBand::Good);
        assert_eq!(CategoryScore::new("Data", 60, 15.0).status_band(), StatusBand::Warning);
        assert_eq!(CategoryScore::new("Incident", 40, 10.0).status_band(), StatusBand::Critical);
    }

    #[test]
    fn display_labels() {
        assert_eq!(RiskLevel::Medium.to_string(), "Medium Risk");
        assert_eq!(StatusBand::Critical.to_string(), "critical");
        assert_eq!(StatusBand::Warning.color_tag(), "yellow");
        assert_eq!(Severity::High.to_string(), "high");
    }

    #[test]
    fn severity_parses_known_tiers_only() {
        assert_eq!(Severity::from_str("critical").ok(), Some(Severity::Critical));
        assert_eq!(Severity::from_str("Medium").ok(), Some(Severity::Medium));
        assert!(Severity::from_str("low").is_err());
    }

    #[test]
    fn severity_deserializes_through_label_parser() {
        let parsed: Severity = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(parsed, Severity::Critical);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"critical\"");

        let err = serde_json::from_str::<Severity>("\"low\"").unwrap_err();
        assert!(err.to_string().contains("unsupported severity 'low'"));
    }

    #[test]
    fn trend_follows_delta_sign() {
        assert_eq!(Trend::from_delta(5), Trend::Improved);
        assert_eq!(Trend::from_delta(-3), Trend::Regressed);
        assert_eq!(Trend::from_delta(0), Trend::Unchanged);
    }
}
