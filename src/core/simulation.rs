// src/core/simulation.rs

//! What-if impact walkthroughs keyed by vulnerability severity.
//!
//! The engine maps a severity tier to a fixed, ordered scenario and hands out
//! a `SimulationState` that can only move forward one step at a time or be
//! reset to the beginning. There is no single step backwards.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::errors::SimulationError;
use crate::core::knowledge_base;
use crate::core::models::{ScenarioStep, Severity, Vulnerability};

/// Registry of scenarios, one per supported severity tier.
#[derive(Debug, Clone)]
pub struct ImpactSimulationEngine {
    scenarios: HashMap<Severity, Vec<ScenarioStep>>,
}

impl Default for ImpactSimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ImpactSimulationEngine {
    /// Creates an engine loaded with the built-in scenario catalog.
    pub fn new() -> Self {
        let scenarios = knowledge_base::default_scenarios()
            .iter()
            .map(|(severity, steps)| (*severity, steps.iter().map(|s| s.to_step()).collect()))
            .collect();
        Self { scenarios }
    }

    /// Creates an engine from a custom catalog. Tiers left out of the map are
    /// unsupported; a tier registered with no steps is rejected.
    pub fn with_scenarios(
        scenarios: HashMap<Severity, Vec<ScenarioStep>>,
    ) -> Result<Self, SimulationError> {
        if let Some((severity, _)) = scenarios.iter().find(|(_, steps)| steps.is_empty()) {
            return Err(SimulationError::EmptyScenario(*severity));
        }
        Ok(Self { scenarios })
    }

    pub fn scenario(&self, severity: Severity) -> Option<&[ScenarioStep]> {
        self.scenarios.get(&severity).map(Vec::as_slice)
    }

    /// Opens a new simulation for the given vulnerability, always at step 0.
    ///
    /// # Errors
    /// `UnsupportedSeverity` if no scenario is registered for the vulnerability's
    /// severity. There is no fallback to another tier.
    pub fn open(&self, vulnerability: &Vulnerability) -> Result<SimulationState, SimulationError> {
        let steps = self
            .scenarios
            .get(&vulnerability.severity)
            .ok_or_else(|| SimulationError::UnsupportedSeverity(vulnerability.severity.to_string()))?;

        info!(
            vulnerability = %vulnerability.id,
            severity = %vulnerability.severity,
            steps = steps.len(),
            "Simulation opened."
        );
        Ok(SimulationState {
            vulnerability: vulnerability.clone(),
            steps: steps.clone(),
            current_step: 0,
        })
    }
}

/// Parses a raw severity label coming from an external record.
///
/// Only `critical`, `high` and `medium` are accepted (case-insensitively).
pub fn parse_severity(label: &str) -> Result<Severity, SimulationError> {
    Severity::from_str(label.trim())
        .map_err(|_| SimulationError::UnsupportedSeverity(label.to_string()))
}

/// One open simulator. Owned by the caller that opened it and dropped on close.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SimulationState {
    vulnerability: Vulnerability,
    steps: Vec<ScenarioStep>,
    current_step: usize,
}

impl SimulationState {
    /// Moves exactly one step forward.
    ///
    /// # Errors
    /// `AtFinalStep` when already on the last step; callers should treat it as
    /// "simulation finished" rather than an error banner.
    pub fn advance(&mut self) -> Result<usize, SimulationError> {
        if self.is_final_step() {
            return Err(SimulationError::AtFinalStep(self.current_step));
        }
        self.current_step += 1;
        debug!(vulnerability = %self.vulnerability.id, step = self.current_step, "Simulation advanced.");
        Ok(self.current_step)
    }

    pub fn reset(&mut self) {
        self.current_step = 0;
        debug!(vulnerability = %self.vulnerability.id, "Simulation reset.");
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn current(&self) -> &ScenarioStep {
        &self.steps[self.current_step]
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step + 1 >= self.steps.len()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[ScenarioStep] {
        &self.steps
    }

    pub fn vulnerability(&self) -> &Vulnerability {
        &self.vulnerability
    }
}
