// src/core/assessment.rs

//! The guided questionnaire.
//!
//! A `Questionnaire` is the validated, immutable stage configuration; an
//! `AssessmentSession` is one user's run through it. The session enforces
//! that no stage is left behind while it still has unanswered questions.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::errors::{AssessmentError, CatalogError};
use crate::core::models::{Question, Stage, StageStatus};

/// Validated, ordered stage configuration shared by any number of sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    stages: Vec<Stage>,
    total_questions: usize,
}

impl Questionnaire {
    /// Validates the stage list and fixes the total question count.
    ///
    /// # Arguments
    /// * `stages` - The ordered stages. Must be non-empty, every stage must have
    ///   at least one question, every question at least two distinct options.
    ///   Question ids must be unique across the whole questionnaire because
    ///   answers are keyed by id alone.
    ///
    /// # Returns
    /// The validated `Questionnaire`, or the first `CatalogError` found.
    pub fn new(stages: Vec<Stage>) -> Result<Self, CatalogError> {
        if stages.is_empty() {
            return Err(CatalogError::NoStages);
        }

        let mut seen_ids = HashSet::new();
        for stage in &stages {
            if stage.questions.is_empty() {
                return Err(CatalogError::EmptyStage { stage: stage.title.clone() });
            }
            for question in &stage.questions {
                validate_question(question)?;
                if !seen_ids.insert(question.id.as_str()) {
                    return Err(CatalogError::DuplicateQuestionId(question.id.clone()));
                }
            }
        }

        let total_questions = stages.iter().map(|s| s.questions.len()).sum();
        debug!(stages = stages.len(), total_questions, "Questionnaire validated.");
        Ok(Self { stages, total_questions })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn total_question_count(&self) -> usize {
        self.total_questions
    }

    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.stages
            .iter()
            .flat_map(|s| s.questions.iter())
            .find(|q| q.id == question_id)
    }
}

fn validate_question(question: &Question) -> Result<(), CatalogError> {
    if question.options.len() < 2 {
        return Err(CatalogError::TooFewOptions {
            question_id: question.id.clone(),
            found: question.options.len(),
        });
    }
    let mut seen = HashSet::new();
    for option in &question.options {
        if !seen.insert(option.as_str()) {
            return Err(CatalogError::DuplicateOption {
                question_id: question.id.clone(),
                option: option.clone(),
            });
        }
    }
    Ok(())
}

/// One user's run through a questionnaire.
///
/// States are `Stage_0 .. Stage_{N-1}` followed by the terminal `Complete`.
/// Answers given on a stage survive a `retreat()` so the user can move
/// forward again without re-entering them.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    questionnaire: Arc<Questionnaire>,
    current_stage_index: usize,
    answers: BTreeMap<String, String>,
    completed: bool,
}

impl AssessmentSession {
    pub fn new(questionnaire: Arc<Questionnaire>) -> Self {
        info!(stages = questionnaire.stage_count(), "Assessment session started.");
        Self {
            questionnaire,
            current_stage_index: 0,
            answers: BTreeMap::new(),
            completed: false,
        }
    }

    /// Records (or overwrites) the answer to a question.
    ///
    /// The question may belong to any stage, not only the current one.
    ///
    /// # Errors
    /// * `InvalidAnswer` if the id is unknown or the option is not one of the question's options.
    /// * `AlreadyComplete` once the session has reached its terminal state.
    pub fn answer(&mut self, question_id: &str, option: &str) -> Result<(), AssessmentError> {
        if self.completed {
            return Err(AssessmentError::AlreadyComplete);
        }

        let accepted = self
            .questionnaire
            .find_question(question_id)
            .is_some_and(|q| q.accepts(option));
        if !accepted {
            warn!(question_id, option, "Rejected invalid answer.");
            return Err(AssessmentError::InvalidAnswer {
                question_id: question_id.to_string(),
                option: option.to_string(),
            });
        }

        let previous = self.answers.insert(question_id.to_string(), option.to_string());
        debug!(question_id, option, overwritten = previous.is_some(), "Answer recorded.");
        Ok(())
    }

    pub fn is_current_stage_complete(&self) -> bool {
        self.unanswered_in_current_stage() == 0
    }

    /// Moves to the next stage, or into the terminal `Complete` state from the last one.
    ///
    /// # Errors
    /// * `AlreadyComplete` if the terminal state was already reached.
    /// * `StageIncomplete` if the current stage has unanswered questions. No state changes.
    pub fn advance(&mut self) -> Result<(), AssessmentError> {
        if self.completed {
            return Err(AssessmentError::AlreadyComplete);
        }

        let missing = self.unanswered_in_current_stage();
        if missing > 0 {
            debug!(stage = self.current_stage_index, missing, "Cannot advance, stage incomplete.");
            return Err(AssessmentError::StageIncomplete {
                stage_index: self.current_stage_index,
                missing,
            });
        }

        if self.current_stage_index + 1 == self.questionnaire.stage_count() {
            self.completed = true;
            info!(answers = self.answers.len(), "Assessment completed.");
        } else {
            self.current_stage_index += 1;
            debug!(stage = self.current_stage_index, "Advanced to next stage.");
        }
        Ok(())
    }

    /// Steps back one stage, keeping every recorded answer.
    ///
    /// # Errors
    /// * `AtFirstStage` on stage 0.
    /// * `AlreadyComplete` once completed; the terminal state cannot be left.
    pub fn retreat(&mut self) -> Result<(), AssessmentError> {
        if self.completed {
            return Err(AssessmentError::AlreadyComplete);
        }
        if self.current_stage_index == 0 {
            return Err(AssessmentError::AtFirstStage);
        }
        self.current_stage_index -= 1;
        debug!(stage = self.current_stage_index, "Retreated to previous stage.");
        Ok(())
    }

    /// Rounded share of all questions that have an answer, 0 to 100.
    pub fn progress_percentage(&self) -> u8 {
        let total = self.questionnaire.total_question_count();
        let ratio = self.answers.len() as f64 / total as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn current_stage_index(&self) -> usize {
        self.current_stage_index
    }

    pub fn current_stage(&self) -> &Stage {
        &self.questionnaire.stages()[self.current_stage_index]
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Per-stage status for progress indicators: stages before the cursor are
    /// completed, the cursor stage is current, the rest are pending. Once the
    /// session is complete every stage reports `Completed`.
    pub fn stage_statuses(&self) -> Vec<StageStatus> {
        (0..self.questionnaire.stage_count())
            .map(|index| {
                if self.completed || index < self.current_stage_index {
                    StageStatus::Completed
                } else if index == self.current_stage_index {
                    StageStatus::Current
                } else {
                    StageStatus::Pending
                }
            })
            .collect()
    }

    fn unanswered_in_current_stage(&self) -> usize {
        self.current_stage()
            .questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stage_questionnaire() -> Arc<Questionnaire> {
        let stages = vec![
            Stage::new(
                "A",
                "first",
                vec![
                    Question::new("a1", "First?", &["Yes", "No"]),
                    Question::new("a2", "Second?", &["Daily", "Weekly", "Never"]),
                ],
            ),
            Stage::new("B", "second", vec![Question::new("b1", "Third?", &["On", "Off"])]),
        ];
        Arc::new(Questionnaire::new(stages).expect("valid questionnaire"))
    }

    #[test]
    fn rejects_empty_questionnaire() {
        assert_eq!(Questionnaire::new(vec![]), Err(CatalogError::NoStages));
    }

    #[test]
    fn rejects_stage_without_questions() {
        let result = Questionnaire::new(vec![Stage::new("Empty", "", vec![])]);
        assert_eq!(result, Err(CatalogError::EmptyStage { stage: "Empty".into() }));
    }

    #[test]
    fn rejects_single_option_and_duplicates() {
        let single = Stage::new("S", "", vec![Question::new("q", "?", &["Only"])]);
        assert!(matches!(
            Questionnaire::new(vec![single]),
            Err(CatalogError::TooFewOptions { found: 1, .. })
        ));

        let dup_option = Stage::new("S", "", vec![Question::new("q", "?", &["Yes", "Yes"])]);
        assert!(matches!(
            Questionnaire::new(vec![dup_option]),
            Err(CatalogError::DuplicateOption { .. })
        ));

        let dup_id = vec![
            Stage::new("S1", "", vec![Question::new("q", "?", &["Yes", "No"])]),
            Stage::new("S2", "", vec![Question::new("q", "?", &["Yes", "No"])]),
        ];
        assert_eq!(
            Questionnaire::new(dup_id),
            Err(CatalogError::DuplicateQuestionId("q".into()))
        );
    }

    #[test]
    fn new_session_starts_at_first_stage() {
        let session = AssessmentSession::new(two_stage_questionnaire());
        assert_eq!(session.current_stage_index(), 0);
        assert_eq!(session.progress_percentage(), 0);
        assert!(!session.is_completed());
        assert!(!session.is_current_stage_complete());
    }

    #[test]
    fn invalid_answers_are_rejected_without_side_effects() {
        let mut session = AssessmentSession::new(two_stage_questionnaire());
        assert!(matches!(
            session.answer("missing", "Yes"),
            Err(AssessmentError::InvalidAnswer { .. })
        ));
        assert!(matches!(
            session.answer("a1", "Maybe"),
            Err(AssessmentError::InvalidAnswer { .. })
        ));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn re_answer_overwrites() {
        let mut session = AssessmentSession::new(two_stage_questionnaire());
        session.answer("a1", "Yes").unwrap();
        session.answer("a1", "No").unwrap();
        assert_eq!(session.answer_for("a1"), Some("No"));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn advance_requires_complete_stage() {
        let mut session = AssessmentSession::new(two_stage_questionnaire());
        session.answer("a1", "Yes").unwrap();
        assert_eq!(
            session.advance(),
            Err(AssessmentError::StageIncomplete { stage_index: 0, missing: 1 })
        );
        assert_eq!(session.current_stage_index(), 0);
    }

    #[test]
    fn answering_a_later_stage_does_not_complete_the_current_one() {
        let mut session = AssessmentSession::new(two_stage_questionnaire());
        session.answer("b1", "On").unwrap();
        assert!(!session.is_current_stage_complete());
        assert_eq!(session.progress_percentage(), 33);
    }

    #[test]
    fn retreat_keeps_answers() {
        let mut session = AssessmentSession::new(two_stage_questionnaire());
        assert_eq!(session.retreat(), Err(AssessmentError::AtFirstStage));

        session.answer("a1", "Yes").unwrap();
        session.answer("a2", "Weekly").unwrap();
        session.advance().unwrap();
        session.retreat().unwrap();

        assert_eq!(session.current_stage_index(), 0);
        assert!(session.is_current_stage_complete());
        session.advance().unwrap();
        assert_eq!(session.current_stage_index(), 1);
    }

    #[test]
    fn complete_is_terminal() {
        let mut session = AssessmentSession::new(two_stage_questionnaire());
        session.answer("a1", "Yes").unwrap();
        session.answer("a2", "Daily").unwrap();
        session.advance().unwrap();
        session.answer("b1", "Off").unwrap();
        session.advance().unwrap();

        assert!(session.is_completed());
        assert_eq!(session.progress_percentage(), 100);
        assert_eq!(session.advance(), Err(AssessmentError::AlreadyComplete));
        assert_eq!(session.retreat(), Err(AssessmentError::AlreadyComplete));
        assert_eq!(session.answer("a1", "No"), Err(AssessmentError::AlreadyComplete));
        assert_eq!(session.answer_for("a1"), Some("Yes"));
    }

    #[test]
    fn stage_statuses_track_cursor() {
        let mut session = AssessmentSession::new(two_stage_questionnaire());
        assert_eq!(session.stage_statuses(), vec![StageStatus::Current, StageStatus::Pending]);

        session.answer("a1", "Yes").unwrap();
        session.answer("a2", "Daily").unwrap();
        session.advance().unwrap();
        assert_eq!(session.stage_statuses(), vec![StageStatus::Completed, StageStatus::Current]);

        session.answer("b1", "On").unwrap();
        session.advance().unwrap();
        assert_eq!(session.stage_statuses(), vec![StageStatus::Completed, StageStatus::Completed]);
    }
}
