use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use huddle_core::config::{DEFAULT_CONFIG_FILE, NESTED_CONFIG_FILE};
use toml::Value;

use crate::commands::{load_config, CommandResult};

pub fn run() -> CommandResult {
    let config = match load_config("config") {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let hours = config
        .engine
        .date_only_hours
        .iter()
        .map(|hour| format!("{hour:02}:00"))
        .collect::<Vec<_>>()
        .join(", ");

    let lines = [
        "effective config (source precedence: env > file > default):".to_string(),
        render_line(
            "engine.timezone",
            config.engine.timezone.name(),
            source("engine.timezone", &["HUDDLE_ENGINE_TIMEZONE"]),
        ),
        render_line(
            "engine.date_only_hours",
            &format!("[{hours}]"),
            source("engine.date_only_hours", &["HUDDLE_ENGINE_DATE_ONLY_HOURS"]),
        ),
        render_line(
            "engine.meeting_duration_minutes",
            &config.engine.meeting_duration_minutes.to_string(),
            source("engine.meeting_duration_minutes", &["HUDDLE_ENGINE_MEETING_DURATION_MINUTES"]),
        ),
        render_line(
            "engine.fallback_offset_minutes",
            &config.engine.fallback_offset_minutes.to_string(),
            source("engine.fallback_offset_minutes", &["HUDDLE_ENGINE_FALLBACK_OFFSET_MINUTES"]),
        ),
        render_line(
            "logging.level",
            &config.logging.level,
            source("logging.level", &["HUDDLE_LOGGING_LEVEL", "HUDDLE_LOG_LEVEL"]),
        ),
        render_line(
            "logging.format",
            &format!("{:?}", config.logging.format),
            source("logging.format", &["HUDDLE_LOGGING_FORMAT", "HUDDLE_LOG_FORMAT"]),
        ),
    ];

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn detect_config_path() -> Option<PathBuf> {
    [DEFAULT_CONFIG_FILE, NESTED_CONFIG_FILE].into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
