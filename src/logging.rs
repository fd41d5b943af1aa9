// src/logging.rs

use color_eyre::eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

lazy_static! {
    /// `VANGUARD_RS_ASSESSMENT_LOGLEVEL`, read when `RUST_LOG` is unset.
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", env!("CARGO_CRATE_NAME").to_uppercase());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Platform directories shared by the config loader and the log file.
pub fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "vanguard", env!("CARGO_PKG_NAME"))
}

/// `<data dir>/vanguard-rs-assessment.log`, or `./.data/...` when the
/// platform has no home directory.
pub fn log_file_path() -> PathBuf {
    let directory = project_directory()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".data"));
    directory.join(LOG_FILE.as_str())
}

/// Resolves the file log filter: `RUST_LOG`, then the project-specific
/// variable, then `info` for this crate.
pub fn log_filter() -> String {
    std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.as_str()))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Initializes file-based logging and returns the log file path.
///
/// stdout is reserved for the JSON report. Targets are kept in each line so
/// engine events (`core::scoring`, `core::simulation`, ...) can be told apart.
pub fn initialize_logging() -> Result<PathBuf> {
    let log_path = log_file_path();
    if let Some(directory) = log_path.parent() {
        std::fs::create_dir_all(directory)?;
    }
    let log_file = std::fs::File::create(&log_path)?;

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new(log_filter()));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_env_is_derived_from_crate_name() {
        assert_eq!(LOG_ENV.as_str(), "VANGUARD_RS_ASSESSMENT_LOGLEVEL");
    }

    #[test]
    fn log_file_is_named_after_package() {
        let path = log_file_path();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("vanguard-rs-assessment.log")
        );
    }
}
