//! Message processing entry point.
//!
//! Classifier, then (only on a positive classification) extractor and slot
//! suggester. The engine holds no mutable state, so one instance can be
//! shared freely between threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::intent::IntentClassifier;
use crate::slots::SlotSuggester;
use crate::temporal::{TemporalExtractor, TimeBlock};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub has_meeting_intent: bool,
    pub time_info: Vec<TimeBlock>,
    pub suggested_times: Vec<DateTime<Utc>>,
}

impl ProcessResult {
    pub fn no_intent() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug)]
pub struct MeetingEngine {
    classifier: IntentClassifier,
    extractor: TemporalExtractor,
    suggester: SlotSuggester,
}

impl Default for MeetingEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl MeetingEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self::from_parts(
            IntentClassifier::default(),
            TemporalExtractor::new(config.timezone),
            SlotSuggester::new(config.timezone, config.date_only_hours.clone()),
        )
    }

    pub fn from_parts(
        classifier: IntentClassifier,
        extractor: TemporalExtractor,
        suggester: SlotSuggester,
    ) -> Self {
        Self { classifier, extractor, suggester }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn process(&self, text: &str, now: DateTime<Utc>) -> ProcessResult {
        if !self.classifier.classify(text) {
            debug!(event_name = "engine.message.processed", has_meeting_intent = false, "no meeting intent");
            return ProcessResult::no_intent();
        }

        let time_info = self.extractor.extract(text, now);
        let suggested_times = self.suggester.suggest(&time_info);

        debug!(
            event_name = "engine.message.processed",
            has_meeting_intent = true,
            blocks = time_info.len(),
            slots = suggested_times.len(),
            "meeting intent detected"
        );

        ProcessResult { has_meeting_intent: true, time_info, suggested_times }
    }
}

/// Process a message with the default engine configuration.
pub fn process(text: &str, now: DateTime<Utc>) -> ProcessResult {
    MeetingEngine::default().process(text, now)
}
