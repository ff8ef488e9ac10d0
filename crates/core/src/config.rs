use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slots::DEFAULT_DATE_ONLY_HOURS;

pub const DEFAULT_CONFIG_FILE: &str = "huddle.toml";
pub const NESTED_CONFIG_FILE: &str = "config/huddle.toml";

const MAX_MEETING_DURATION_MINUTES: u32 = 24 * 60;
const MAX_FALLBACK_OFFSET_MINUTES: u32 = 7 * 24 * 60;

static ENV_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}]*)\}").expect("ENV_PLACEHOLDER should compile - this is a bug")
});

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Timezone in which wall-clock times in messages are interpreted.
    pub timezone: Tz,
    pub date_only_hours: Vec<u32>,
    pub meeting_duration_minutes: u32,
    pub fallback_offset_minutes: u32,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub timezone: Option<String>,
    pub date_only_hours: Option<Vec<u32>>,
    pub meeting_duration_minutes: Option<u32>,
    pub fallback_offset_minutes: Option<u32>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            date_only_hours: DEFAULT_DATE_ONLY_HOURS.to_vec(),
            meeting_duration_minutes: 60,
            fallback_offset_minutes: 60,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch)?;
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides)?;
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if let Some(engine) = patch.engine {
            if let Some(timezone) = engine.timezone {
                self.engine.timezone = parse_timezone("engine.timezone", &timezone)?;
            }
            if let Some(date_only_hours) = engine.date_only_hours {
                self.engine.date_only_hours = date_only_hours;
            }
            if let Some(meeting_duration_minutes) = engine.meeting_duration_minutes {
                self.engine.meeting_duration_minutes = meeting_duration_minutes;
            }
            if let Some(fallback_offset_minutes) = engine.fallback_offset_minutes {
                self.engine.fallback_offset_minutes = fallback_offset_minutes;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("HUDDLE_ENGINE_TIMEZONE") {
            self.engine.timezone = parse_timezone("HUDDLE_ENGINE_TIMEZONE", &value)?;
        }
        if let Some(value) = read_env("HUDDLE_ENGINE_DATE_ONLY_HOURS") {
            self.engine.date_only_hours = parse_hour_list("HUDDLE_ENGINE_DATE_ONLY_HOURS", &value)?;
        }
        if let Some(value) = read_env("HUDDLE_ENGINE_MEETING_DURATION_MINUTES") {
            self.engine.meeting_duration_minutes =
                parse_u32("HUDDLE_ENGINE_MEETING_DURATION_MINUTES", &value)?;
        }
        if let Some(value) = read_env("HUDDLE_ENGINE_FALLBACK_OFFSET_MINUTES") {
            self.engine.fallback_offset_minutes =
                parse_u32("HUDDLE_ENGINE_FALLBACK_OFFSET_MINUTES", &value)?;
        }

        let log_level = read_env("HUDDLE_LOGGING_LEVEL").or_else(|| read_env("HUDDLE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("HUDDLE_LOGGING_FORMAT").or_else(|| read_env("HUDDLE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(timezone) = overrides.timezone {
            self.engine.timezone = parse_timezone("engine.timezone", &timezone)?;
        }
        if let Some(date_only_hours) = overrides.date_only_hours {
            self.engine.date_only_hours = date_only_hours;
        }
        if let Some(meeting_duration_minutes) = overrides.meeting_duration_minutes {
            self.engine.meeting_duration_minutes = meeting_duration_minutes;
        }
        if let Some(fallback_offset_minutes) = overrides.fallback_offset_minutes {
            self.engine.fallback_offset_minutes = fallback_offset_minutes;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_engine(&self.engine)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

/// Expand `${VAR}` placeholders from the process environment.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut copied_to = 0;

    for captures in ENV_PLACEHOLDER.captures_iter(input) {
        let (Some(placeholder), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let value = env::var(key.as_str())
            .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.as_str().to_string() })?;

        output.push_str(&input[copied_to..placeholder.start()]);
        output.push_str(&value);
        copied_to = placeholder.end();
    }

    let rest = &input[copied_to..];
    if rest.contains("${") {
        return Err(ConfigError::UnterminatedInterpolation);
    }
    output.push_str(rest);

    Ok(output)
}

fn validate_engine(engine: &EngineConfig) -> Result<(), ConfigError> {
    if engine.date_only_hours.is_empty() {
        return Err(ConfigError::Validation(
            "engine.date_only_hours must list at least one hour".to_string(),
        ));
    }

    if let Some(hour) = engine.date_only_hours.iter().find(|hour| **hour > 23) {
        return Err(ConfigError::Validation(format!(
            "engine.date_only_hours contains `{hour}`; hours must be in range 0..=23"
        )));
    }

    let mut seen = engine.date_only_hours.clone();
    seen.sort_unstable();
    seen.dedup();
    if seen.len() != engine.date_only_hours.len() {
        return Err(ConfigError::Validation(
            "engine.date_only_hours must not contain duplicate hours".to_string(),
        ));
    }

    if engine.meeting_duration_minutes == 0
        || engine.meeting_duration_minutes > MAX_MEETING_DURATION_MINUTES
    {
        return Err(ConfigError::Validation(format!(
            "engine.meeting_duration_minutes must be in range 1..={MAX_MEETING_DURATION_MINUTES}"
        )));
    }

    if engine.fallback_offset_minutes > MAX_FALLBACK_OFFSET_MINUTES {
        return Err(ConfigError::Validation(format!(
            "engine.fallback_offset_minutes must be at most {MAX_FALLBACK_OFFSET_MINUTES}"
        )));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_timezone(key: &str, value: &str) -> Result<Tz, ConfigError> {
    value.trim().parse::<Tz>().map_err(|_| {
        ConfigError::Validation(format!("{key} `{value}` is not a known IANA timezone name"))
    })
}

fn parse_hour_list(key: &str, value: &str) -> Result<Vec<u32>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_u32(key, item))
        .collect()
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    engine: Option<EnginePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct EnginePatch {
    timezone: Option<String>,
    date_only_hours: Option<Vec<u32>>,
    meeting_duration_minutes: Option<u32>,
    fallback_offset_minutes: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
