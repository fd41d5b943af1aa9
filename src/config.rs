// src/config.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::assessment::Questionnaire;
use crate::core::knowledge_base;
use crate::core::models::{CategoryScore, Stage, Vulnerability};
use crate::logging::project_directory;

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_GOAL_SCORE: u8 = 80;

/// Host configuration. Every field is optional; anything left out falls back
/// to the built-in knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Replaces the reference questionnaire.
    pub stages: Option<Vec<Stage>>,
    /// Answers to replay into a fresh session, keyed by question id.
    pub answers: BTreeMap<String, String>,
    /// Category scores produced by the answer mapping step.
    pub categories: Option<Vec<CategoryScore>>,
    pub previous_score: Option<u8>,
    pub goal_score: u8,
    pub vulnerabilities: Option<Vec<Vulnerability>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stages: None,
            answers: BTreeMap::new(),
            categories: None,
            previous_score: None,
            goal_score: DEFAULT_GOAL_SCORE,
            vulnerabilities: None,
        }
    }
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// # Arguments
    /// * `path` - An explicit file to read. When `None`, `config.json` in the
    ///   platform config directory is used if it exists, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration.");
                let raw = std::fs::read_to_string(&path)
                    .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
                Self::from_json(&raw)
                    .wrap_err_with(|| format!("invalid config file {}", path.display()))
            }
            None => {
                debug!("No configuration file found, using built-in defaults.");
                Ok(Self::default())
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// Builds the validated questionnaire, falling back to the reference stages.
    pub fn questionnaire(&self) -> Result<Questionnaire> {
        let stages = self.stages.clone().unwrap_or_else(knowledge_base::default_stages);
        Ok(Questionnaire::new(stages)?)
    }

    pub fn categories(&self) -> Vec<CategoryScore> {
        self.categories.clone().unwrap_or_else(knowledge_base::reference_risk_factors)
    }

    pub fn vulnerabilities(&self) -> Vec<Vulnerability> {
        self.vulnerabilities.clone().unwrap_or_else(knowledge_base::sample_vulnerabilities)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    project_directory().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Severity;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.goal_score, DEFAULT_GOAL_SCORE);
        assert_eq!(config.questionnaire().unwrap().total_question_count(), 11);
    }

    fn config_with_severity(severity: &str) -> String {
        format!(
            r#"{{"vulnerabilities":[{{"id":"1","title":"x","severity":"{}","description":"","asset":""}}]}}"#,
            severity
        )
    }

    #[test]
    fn severity_is_case_insensitive() {
        let config = AppConfig::from_json(&config_with_severity("Critical")).unwrap();
        assert_eq!(config.vulnerabilities()[0].severity, Severity::Critical);
    }

    #[test]
    fn unknown_severity_reports_unsupported_severity() {
        let err = AppConfig::from_json(&config_with_severity("low")).unwrap_err();
        assert!(err.to_string().contains("unsupported severity 'low'"));
    }

    #[test]
    fn invalid_stages_surface_catalog_error() {
        let raw = r#"{"stages":[{"title":"Empty","description":"","questions":[]}]}"#;
        let config = AppConfig::from_json(raw).unwrap();
        let err = config.questionnaire().unwrap_err();
        assert!(err.to_string().contains("has no questions"));
    }
}
