use chrono::NaiveDate;
use interview_tracker::config::AppConfig;
use interview_tracker::error::AppError;
use interview_tracker::interviews::{InterviewStatus, Position};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads configuration and applies a `--data-file` override.
pub(crate) fn load_config(data_file: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = data_file {
        config.storage.data_file = path;
    }
    Ok(config)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_position(raw: &str) -> Result<Position, String> {
    Position::options()
        .into_iter()
        .find(|option| option.label().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| {
            let options = Position::options();
            let labels: Vec<&str> = options.iter().map(Position::label).collect();
            format!("unknown position '{raw}' (expected one of: {})", labels.join(", "))
        })
}

pub(crate) fn parse_status(raw: &str) -> Result<InterviewStatus, String> {
    InterviewStatus::options()
        .into_iter()
        .find(|option| option.label().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| {
            let options = InterviewStatus::options();
            let labels: Vec<&str> = options.iter().map(InterviewStatus::label).collect();
            format!("unknown status '{raw}' (expected one of: {})", labels.join(", "))
        })
}
