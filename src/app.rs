// src/app.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::action_plan::ActionPlan;
use crate::core::assessment::{AssessmentSession, Questionnaire};
use crate::core::errors::{AssessmentError, ScoringError, SimulationError};
use crate::core::gauge::GaugeReading;
use crate::core::knowledge_base;
use crate::core::models::{CategoryScore, CompositeScoreResult, Severity, StageStatus, Trend, Vulnerability};
use crate::core::scoring::ScoreHistory;
use crate::core::simulation::{ImpactSimulationEngine, SimulationState};

/// Message shown to the user after the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Idle,
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Assessing,
    Completed,
}

/// What the stepper should offer after a simulation advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationProgress {
    Step(usize),
    Finished,
}

/// Host-side state for one user: it owns the running assessment, the score
/// history, the open simulation (if any) and the action plan. Errors from the
/// engines are turned into a `StatusMessage` so the caller can re-render.
pub struct App {
    pub state: AppState,
    pub session: AssessmentSession,
    pub history: ScoreHistory,
    pub simulator: ImpactSimulationEngine,
    pub simulation: Option<SimulationState>,
    pub action_plan: ActionPlan,
    pub goal_score: u8,
    pub status: StatusMessage,
    questionnaire: Arc<Questionnaire>,
}

impl App {
    pub fn new(questionnaire: Questionnaire, goal_score: u8) -> Self {
        let questionnaire = Arc::new(questionnaire);
        Self {
            state: AppState::Assessing,
            session: AssessmentSession::new(Arc::clone(&questionnaire)),
            history: ScoreHistory::new(),
            simulator: ImpactSimulationEngine::new(),
            simulation: None,
            action_plan: ActionPlan::new(knowledge_base::starter_action_items()),
            goal_score,
            status: StatusMessage::Idle,
            questionnaire,
        }
    }

    pub fn from_config(config: &AppConfig) -> color_eyre::eyre::Result<Self> {
        Ok(Self::new(config.questionnaire()?, config.goal_score))
    }

    pub fn answer(&mut self, question_id: &str, option: &str) -> Result<(), AssessmentError> {
        let result = self.session.answer(question_id, option);
        self.report_status(&result, "Answer saved.");
        result
    }

    pub fn next_stage(&mut self) -> Result<(), AssessmentError> {
        let result = self.session.advance();
        if self.session.is_completed() {
            self.state = AppState::Completed;
        }
        self.report_status(&result, "Stage saved.");
        result
    }

    pub fn previous_stage(&mut self) -> Result<(), AssessmentError> {
        let result = self.session.retreat();
        self.report_status(&result, "Back to previous stage.");
        result
    }

    /// Replays answers stage by stage, advancing whenever a stage is complete.
    /// Stops at the first stage that is still missing answers.
    pub fn replay_answers(&mut self, answers: &BTreeMap<String, String>) -> Result<(), AssessmentError> {
        for (question_id, option) in answers {
            self.answer(question_id, option)?;
        }
        while !self.session.is_completed() && self.session.is_current_stage_complete() {
            self.next_stage()?;
        }
        Ok(())
    }

    pub fn can_advance(&self) -> bool {
        !self.session.is_completed() && self.session.is_current_stage_complete()
    }

    /// Computes a new composite against the latest recorded score and keeps it in the history.
    pub fn compute_score(&mut self, categories: &[CategoryScore]) -> Result<CompositeScoreResult, ScoringError> {
        let result = self.history.compute_and_record(categories);
        self.status = match &result {
            Ok(composite) => StatusMessage::Info(format!("Risk score updated: {}/100 ({}).", composite.score, composite.level)),
            Err(e) => {
                // Upstream data problem: log for operators, keep the message generic for users.
                warn!(error = %e, "Composite score computation failed.");
                StatusMessage::Error("Risk score is unavailable.".to_string())
            }
        };
        result
    }

    pub fn gauge(&self, result: &CompositeScoreResult) -> GaugeReading {
        GaugeReading::from_result(result, self.goal_score)
    }

    pub fn open_simulation(&mut self, vulnerability: &Vulnerability) -> Result<(), SimulationError> {
        let state = self.simulator.open(vulnerability)?;
        self.simulation = Some(state);
        Ok(())
    }

    /// Advances the open simulation. Reaching the end is reported as
    /// `Finished`, not as an error.
    pub fn advance_simulation(&mut self) -> Option<SimulationProgress> {
        let simulation = self.simulation.as_mut()?;
        match simulation.advance() {
            Ok(step) => Some(SimulationProgress::Step(step)),
            Err(SimulationError::AtFinalStep(_)) => Some(SimulationProgress::Finished),
            Err(e) => {
                self.status = StatusMessage::Error(e.to_string());
                None
            }
        }
    }

    pub fn reset_simulation(&mut self) {
        if let Some(simulation) = self.simulation.as_mut() {
            simulation.reset();
        }
    }

    pub fn close_simulation(&mut self) {
        self.simulation = None;
    }

    /// Starts a fresh assessment on the same questionnaire. History and the
    /// action plan are kept.
    pub fn reset(&mut self) {
        self.state = AppState::Assessing;
        self.session = AssessmentSession::new(Arc::clone(&self.questionnaire));
        self.simulation = None;
        self.status = StatusMessage::Idle;
    }

    fn report_status(&mut self, result: &Result<(), AssessmentError>, ok_message: &str) {
        self.status = match result {
            Ok(()) => StatusMessage::Info(ok_message.to_string()),
            Err(e) => StatusMessage::Error(e.to_string()),
        };
    }
}

// --- Report ---

/// Forward-only transcript of one simulation, step titles in order.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationTranscript {
    pub vulnerability_id: String,
    pub title: String,
    pub severity: Severity,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Utc>,
    pub assessment_complete: bool,
    pub progress_percentage: u8,
    pub stage_statuses: Vec<StageStatus>,
    pub answers: BTreeMap<String, String>,
    pub composite: CompositeScoreResult,
    pub trend: Trend,
    pub gauge: GaugeReading,
    pub simulations: Vec<SimulationTranscript>,
    pub action_plan_progress: u8,
}

impl App {
    /// Walks a simulation from its first to its final step and records the titles.
    pub fn walk_simulation(&mut self, vulnerability: &Vulnerability) -> Result<SimulationTranscript, SimulationError> {
        self.open_simulation(vulnerability)?;
        let mut steps = Vec::new();
        if let Some(simulation) = &self.simulation {
            steps.push(simulation.current().title.clone());
        }
        while let Some(SimulationProgress::Step(_)) = self.advance_simulation() {
            if let Some(simulation) = &self.simulation {
                steps.push(simulation.current().title.clone());
            }
        }
        self.close_simulation();

        Ok(SimulationTranscript {
            vulnerability_id: vulnerability.id.clone(),
            title: vulnerability.title.clone(),
            severity: vulnerability.severity,
            steps,
        })
    }

    pub fn build_report(
        &mut self,
        categories: &[CategoryScore],
        vulnerabilities: &[Vulnerability],
    ) -> color_eyre::eyre::Result<AssessmentReport> {
        let composite = self.compute_score(categories)?;
        let simulations = vulnerabilities
            .iter()
            .map(|v| self.walk_simulation(v))
            .collect::<Result<Vec<_>, _>>()?;

        info!(score = composite.score, simulations = simulations.len(), "Report built.");
        Ok(AssessmentReport {
            generated_at: Utc::now(),
            assessment_complete: self.session.is_completed(),
            progress_percentage: self.session.progress_percentage(),
            stage_statuses: self.session.stage_statuses(),
            answers: self.session.answers().clone(),
            trend: composite.trend(),
            gauge: self.gauge(&composite),
            composite,
            simulations,
            action_plan_progress: self.action_plan.progress_percentage(),
        })
    }
}
