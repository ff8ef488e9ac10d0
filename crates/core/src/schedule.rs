//! Meeting window planning.
//!
//! Picks the start and end of the meeting a chat message proposes: the first
//! suggested slot when there is one, otherwise a fixed offset from the
//! reference instant.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::ProcessResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulingPolicy {
    pub duration: Duration,
    pub fallback_offset: Duration,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self { duration: Duration::minutes(60), fallback_offset: Duration::minutes(60) }
    }
}

impl From<&EngineConfig> for SchedulingPolicy {
    fn from(config: &EngineConfig) -> Self {
        Self {
            duration: Duration::minutes(i64::from(config.meeting_duration_minutes)),
            fallback_offset: Duration::minutes(i64::from(config.fallback_offset_minutes)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartSource {
    Suggested,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub source: StartSource,
    /// Suggested slots after the one chosen as `start`.
    pub alternatives: Vec<DateTime<Utc>>,
}

impl MeetingWindow {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Plan the meeting window for a processed message; `None` when the message
/// carries no meeting intent.
pub fn plan_meeting(
    result: &ProcessResult,
    now: DateTime<Utc>,
    policy: &SchedulingPolicy,
) -> Option<MeetingWindow> {
    if !result.has_meeting_intent {
        return None;
    }

    let (start, source, alternatives) = match result.suggested_times.split_first() {
        Some((first, rest)) => (*first, StartSource::Suggested, rest.to_vec()),
        None => (now + policy.fallback_offset, StartSource::Fallback, Vec::new()),
    };

    Some(MeetingWindow { start, end: start + policy.duration, source, alternatives })
}
