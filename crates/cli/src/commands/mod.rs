pub mod analyze;
pub mod config;
pub mod plan;

use chrono::{DateTime, Utc};
use huddle_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

pub const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }

    pub fn report<T: Serialize>(payload: &T) -> Self {
        Self { exit_code: 0, output: serialize_payload(payload) }
    }
}

pub(crate) fn load_config(command: &str) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(command, "config_validation", error.to_string(), EXIT_INVALID_INPUT)
    })
}

/// Resolve the reference instant: RFC 3339 from `--now`, else the wall clock.
pub(crate) fn reference_instant(command: &str, raw: Option<&str>) -> Result<DateTime<Utc>, CommandResult> {
    let Some(raw) = raw else {
        return Ok(Utc::now());
    };

    DateTime::parse_from_rfc3339(raw.trim()).map(|instant| instant.with_timezone(&Utc)).map_err(|error| {
        CommandResult::failure(
            command,
            "invalid_argument",
            format!("--now `{raw}` is not an RFC 3339 timestamp: {error}"),
            EXIT_INVALID_INPUT,
        )
    })
}

fn serialize_payload<T: Serialize>(payload: &T) -> String {
    serde_json::to_string(payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
