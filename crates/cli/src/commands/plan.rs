use huddle_core::{plan_meeting, MeetingEngine, MeetingWindow, SchedulingPolicy};
use serde::Serialize;
use uuid::Uuid;

use crate::commands::{load_config, reference_instant, CommandResult};

#[derive(Debug, Serialize)]
struct PlanReport {
    command: &'static str,
    status: &'static str,
    correlation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    window: Option<MeetingWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_minutes: Option<i64>,
}

pub fn run(text: &str, now: Option<&str>) -> CommandResult {
    let config = match load_config("plan") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let now = match reference_instant("plan", now) {
        Ok(now) => now,
        Err(failure) => return failure,
    };

    let correlation_id = Uuid::new_v4().to_string();
    let engine = MeetingEngine::new(&config.engine);
    let policy = SchedulingPolicy::from(&config.engine);
    let window = plan_meeting(&engine.process(text, now), now, &policy);

    match &window {
        Some(window) => tracing::info!(
            event_name = "cli.plan.completed",
            correlation_id = %correlation_id,
            start = %window.start,
            source = ?window.source,
            "meeting window planned"
        ),
        None => tracing::info!(
            event_name = "cli.plan.completed",
            correlation_id = %correlation_id,
            "no meeting intent detected"
        ),
    }

    let duration_minutes = window.as_ref().map(MeetingWindow::duration_minutes);
    let status = if window.is_some() { "ok" } else { "no_intent" };

    CommandResult::report(&PlanReport {
        command: "plan",
        status,
        correlation_id,
        window,
        duration_minutes,
    })
}
