// src/core/errors.rs

//! Typed errors for the assessment core.
//!
//! Every failure is a local validation error returned synchronously at the
//! call site. Nothing here is retried: there is no I/O in the core.

use crate::core::models::Severity;

/// Questionnaire configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("questionnaire has no stages")]
    NoStages,

    #[error("stage '{stage}' has no questions")]
    EmptyStage { stage: String },

    #[error("question '{question_id}' needs at least 2 options, found {found}")]
    TooFewOptions { question_id: String, found: usize },

    #[error("question '{question_id}' lists option '{option}' more than once")]
    DuplicateOption { question_id: String, option: String },

    #[error("question id '{0}' is used more than once")]
    DuplicateQuestionId(String),
}

/// Misuse of an `AssessmentSession`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid answer '{option}' for question '{question_id}'")]
    InvalidAnswer { question_id: String, option: String },

    /// The current stage still has unanswered questions.
    #[error("stage {stage_index} has {missing} unanswered question(s)")]
    StageIncomplete { stage_index: usize, missing: usize },

    #[error("assessment is already complete")]
    AlreadyComplete,

    #[error("already at the first stage")]
    AtFirstStage,
}

/// Bad input to the composite score computation. These point at an upstream
/// data-pipeline bug and belong in the operator logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("no categories supplied")]
    EmptyCategorySet,

    #[error("category '{category}' has invalid weight {weight} (expected 0 < weight <= 100)")]
    InvalidWeight { category: String, weight: f64 },

    #[error("category '{category}' has raw score {raw_score} outside 0..=100")]
    ScoreOutOfRange { category: String, raw_score: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("unsupported severity '{0}'")]
    UnsupportedSeverity(String),

    /// Expected terminal condition: the caller should offer a finish action.
    #[error("simulation is already at its final step ({0})")]
    AtFinalStep(usize),

    #[error("scenario for severity '{0}' has no steps")]
    EmptyScenario(Severity),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionPlanError {
    #[error("no task with id {0}")]
    UnknownTask(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_incomplete_display() {
        let err = AssessmentError::StageIncomplete { stage_index: 2, missing: 1 };
        assert_eq!(err.to_string(), "stage 2 has 1 unanswered question(s)");
    }

    #[test]
    fn test_invalid_weight_display() {
        let err = ScoringError::InvalidWeight { category: "Network".into(), weight: -1.0 };
        assert!(err.to_string().contains("Network"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_empty_scenario_display() {
        let err = SimulationError::EmptyScenario(Severity::High);
        assert_eq!(err.to_string(), "scenario for severity 'high' has no steps");
    }
}
