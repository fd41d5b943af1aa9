//! Vanguard assessment core: a staged security questionnaire, a weighted risk
//! scoring engine and a what-if impact simulator.
//!
//! The engines live under [`core`] and do no I/O. [`app`], [`config`] and
//! [`logging`] are the host layer used by the binary.

pub mod app;
pub mod config;
pub mod core;
pub mod logging;

pub use crate::core::assessment::{AssessmentSession, Questionnaire};
pub use crate::core::scoring::{compute_composite, ScoreHistory};
pub use crate::core::simulation::{ImpactSimulationEngine, SimulationState};
