// src/core/mod.rs

// The `core` module is the whole assessment engine. It has no I/O: hosts
// feed it configuration and user events and read back typed results.

/// Shared data structures: questions and stages, category scores, the
/// composite result, vulnerabilities and scenario steps.
pub mod models;

/// Typed error enums for every engine.
pub mod errors;

/// The staged questionnaire and its session state machine.
pub mod assessment;

/// Weighted composite scoring and score history.
pub mod scoring;

/// Gauge geometry derived from a composite result.
pub mod gauge;

/// Severity-keyed what-if impact walkthroughs.
pub mod simulation;

/// Remediation task tracking.
pub mod action_plan;

/// Built-in questionnaire, scenarios and reference data.
pub mod knowledge_base;
