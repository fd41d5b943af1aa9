// src/main.rs

use std::path::PathBuf;

use chrono::Utc;
use color_eyre::eyre::Result;
use tracing::{error, info};

use vanguard_rs_assessment::app::{App, StatusMessage};
use vanguard_rs_assessment::config::AppConfig;
use vanguard_rs_assessment::logging;

/// Runs one assessment pass: replays the configured answers, computes the
/// composite score and walks a simulation for every vulnerability, then
/// prints the report as JSON on stdout.
///
/// Usage: `vanguard-rs-assessment [config.json]`
fn main() -> Result<()> {
    color_eyre::install()?;
    let log_path = logging::initialize_logging()?;

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    info!(log = %log_path.display(), "Configuration loaded.");

    let mut app = App::from_config(&config)?;

    // An invalid answer is reported and the run continues with what was accepted.
    if let Err(e) = app.replay_answers(&config.answers) {
        error!(error = %e, "Answer replay stopped.");
    }
    report_status(&app.status);

    if let Some(previous) = config.previous_score {
        app.history.record_score(previous, Utc::now());
    }

    let report = app.build_report(&config.categories(), &config.vulnerabilities())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    report_status(&app.status);

    Ok(())
}

/// stdout carries the JSON report, so status lines go to stderr.
fn report_status(status: &StatusMessage) {
    match status {
        StatusMessage::Idle => {}
        StatusMessage::Info(message) => eprintln!("{}", message),
        StatusMessage::Error(message) => eprintln!("warning: {}", message),
    }
}
