use chrono::{DateTime, Utc};
use huddle_core::{IntentDecision, MeetingEngine, ProcessResult};
use serde::Serialize;
use uuid::Uuid;

use crate::commands::{load_config, reference_instant, CommandResult};

#[derive(Debug, Serialize)]
struct AnalyzeReport {
    command: &'static str,
    status: &'static str,
    correlation_id: String,
    now: DateTime<Utc>,
    result: ProcessResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    decision: Option<IntentDecision>,
}

pub fn run(text: &str, now: Option<&str>, explain: bool) -> CommandResult {
    let config = match load_config("analyze") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let now = match reference_instant("analyze", now) {
        Ok(now) => now,
        Err(failure) => return failure,
    };

    let correlation_id = Uuid::new_v4().to_string();
    let engine = MeetingEngine::new(&config.engine);
    let result = engine.process(text, now);
    let decision = explain.then(|| engine.classifier().evaluate(text));

    tracing::info!(
        event_name = "cli.analyze.completed",
        correlation_id = %correlation_id,
        has_meeting_intent = result.has_meeting_intent,
        blocks = result.time_info.len(),
        slots = result.suggested_times.len(),
        "message analyzed"
    );

    CommandResult::report(&AnalyzeReport {
        command: "analyze",
        status: "ok",
        correlation_id,
        now,
        result,
        decision,
    })
}
