//! Temporal expression extraction.
//!
//! Turns the date and time fragments of a chat message into typed
//! [`TimeBlock`]s. Relative words ("today", "tomorrow", "day after tomorrow")
//! are resolved against a caller-supplied reference instant so extraction
//! stays deterministic.

mod extractor;
pub mod parse;
mod types;

pub use extractor::TemporalExtractor;
pub use types::TimeBlock;

use chrono::{DateTime, Utc};

/// Extract time blocks using the default (UTC) reference timezone.
pub fn extract(text: &str, now: DateTime<Utc>) -> Vec<TimeBlock> {
    TemporalExtractor::default().extract(text, now)
}
