use std::sync::Arc;
use std::thread;

use chrono::{DateTime, TimeZone, Utc};
use huddle_core::{
    classify, extract, plan_meeting, process, suggest, MeetingEngine, SchedulingPolicy, StartSource,
    TimeBlock,
};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

#[test]
fn proposal_with_relative_day_and_fixed_time() {
    let result = process("let's meet tomorrow at 3pm", at(2025, 8, 10, 0, 0));

    assert!(result.has_meeting_intent);
    assert_eq!(result.time_info, vec![TimeBlock::exact("11/08/2025", "3pm")]);
    assert_eq!(result.suggested_times, vec![at(2025, 8, 11, 15, 0)]);
}

#[test]
fn sync_up_now_uses_the_reference_instant() {
    let now = at(2025, 8, 10, 9, 30);
    let result = process("can we sync up now", now);

    assert!(result.has_meeting_intent);
    assert_eq!(result.time_info, vec![TimeBlock::exact("10/08/2025", "09:30")]);
    assert_eq!(result.suggested_times, vec![now]);
}

#[test]
fn past_meeting_is_not_a_proposal() {
    let result = process("we had a meeting yesterday", at(2025, 8, 10, 0, 0));

    assert!(!result.has_meeting_intent);
    assert!(result.time_info.is_empty());
    assert!(result.suggested_times.is_empty());
}

#[test]
fn date_only_plan_gets_three_candidate_hours() {
    let result = process("let's plan something for 20 August 2025", at(2025, 8, 10, 0, 0));

    assert!(result.has_meeting_intent);
    assert_eq!(result.time_info, vec![TimeBlock::date_only("20/08/2025")]);
    assert_eq!(
        result.suggested_times,
        vec![at(2025, 8, 20, 10, 0), at(2025, 8, 20, 11, 0), at(2025, 8, 20, 15, 0)]
    );
}

#[test]
fn greeting_has_no_intent() {
    let result = process("hello, how are you?", at(2025, 8, 10, 0, 0));

    assert!(!result.has_meeting_intent);
    assert!(result.time_info.is_empty());
    assert!(result.suggested_times.is_empty());
}

#[test]
fn regret_about_a_meeting_is_vetoed() {
    assert!(!classify("We should have had a meeting yesterday"));
}

#[test]
fn numeric_date_beats_relative_word() {
    let blocks = extract("tomorrow, but let's confirm 15/08/2025 at 3pm", at(2025, 8, 10, 0, 0));

    assert_eq!(blocks, vec![TimeBlock::exact("15/08/2025", "3pm")]);
    assert_eq!(suggest(&blocks), vec![at(2025, 8, 15, 15, 0)]);
}

#[test]
fn now_always_yields_a_single_exact_block() {
    let now = at(2026, 1, 31, 17, 45);
    for text in [
        "Can we call NOW?",
        "let's meet now, between 2 and 4pm tomorrow",
        "schedule a sync up right now on 20/02/2026 at 10am",
    ] {
        assert!(classify(text), "expected intent for {text:?}");
        assert_eq!(extract(text, now), vec![TimeBlock::exact("31/01/2026", "17:45")]);
    }
}

#[test]
fn range_and_exact_blocks_are_both_suggested() {
    let result = process(
        "can we schedule a call on 12/09/2025 between 1pm and 2pm, or at 4:30pm",
        at(2025, 8, 10, 0, 0),
    );

    assert_eq!(
        result.time_info,
        vec![
            TimeBlock::range("12/09/2025", "1pm", "2pm"),
            TimeBlock::exact("12/09/2025", "4:30pm"),
        ]
    );
    assert_eq!(result.suggested_times, vec![at(2025, 9, 12, 13, 0), at(2025, 9, 12, 16, 30)]);
}

#[test]
fn bare_range_start_takes_the_afternoon_marker_from_its_end() {
    let result = process("let's meet tomorrow between 2 and 4pm", at(2025, 8, 10, 0, 0));

    assert_eq!(result.time_info, vec![TimeBlock::range("11/08/2025", "2", "4pm")]);
    assert_eq!(result.suggested_times, vec![at(2025, 8, 11, 14, 0)]);
}

#[test]
fn processing_is_idempotent() {
    let now = at(2025, 8, 10, 8, 0);
    let text = "let's catch up the day after tomorrow between 10am and 11am";

    let first = process(text, now);
    let second = process(text, now);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("result should serialize"),
        serde_json::to_string(&second).expect("result should serialize")
    );
}

#[test]
fn result_serializes_in_the_chat_layer_shape() {
    let result = process("let's meet tomorrow at 3pm", at(2025, 8, 10, 0, 0));
    let value = serde_json::to_value(&result).expect("result should serialize");

    assert_eq!(value["has_meeting_intent"], true);
    assert_eq!(value["time_info"][0]["type"], "exact");
    assert_eq!(value["time_info"][0]["date"], "11/08/2025");
    assert_eq!(value["time_info"][0]["time"], "3pm");
    assert_eq!(value["suggested_times"][0], "2025-08-11T15:00:00Z");
}

#[test]
fn shared_engine_gives_identical_results_across_threads() {
    let engine = Arc::new(MeetingEngine::default());
    let now = at(2025, 8, 10, 0, 0);
    let expected = engine.process("let's plan something for 20 August 2025", now);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.process("let's plan something for 20 August 2025", now))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("worker should not panic"), expected);
    }
}

#[test]
fn planned_window_prefers_first_suggestion_then_falls_back() {
    let now = at(2025, 8, 10, 9, 0);
    let policy = SchedulingPolicy::default();

    let suggested = plan_meeting(&process("let's meet tomorrow at 3pm", now), now, &policy)
        .expect("proposal should produce a window");
    assert_eq!(suggested.source, StartSource::Suggested);
    assert_eq!(suggested.start, at(2025, 8, 11, 15, 0));
    assert_eq!(suggested.end, at(2025, 8, 11, 16, 0));

    let fallback =
        plan_meeting(&process("let's meet", now), now, &policy).expect("proposal should produce a window");
    assert_eq!(fallback.source, StartSource::Fallback);
    assert_eq!(fallback.start, at(2025, 8, 10, 10, 0));

    assert!(plan_meeting(&process("we had a meeting", now), now, &policy).is_none());
}
