use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::parse::{
    format_calendar_date, parse_month_name_date, parse_numeric_date, CLOCK_TIME_FORMAT,
};
use super::types::TimeBlock;

static NOW_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bnow\b").expect("NOW_TOKEN should compile - this is a bug"));

static DAY_AFTER_TOMORROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bday\s+after\s+tomorrow\b")
        .expect("DAY_AFTER_TOMORROW should compile - this is a bug")
});

static TOMORROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btomorrow\b").expect("TOMORROW should compile - this is a bug"));

static TODAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btoday\b").expect("TODAY should compile - this is a bug"));

static MONTH_NAME_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b([0-9]{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b\.?(?:,?\s+([0-9]{4})\b)?",
    )
    .expect("MONTH_NAME_DATE should compile - this is a bug")
});

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4})\b")
        .expect("NUMERIC_DATE should compile - this is a bug")
});

static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bbetween\s+([0-9]{1,2}(?::[0-9]{2})?(?:\s*(?:am|pm)\b)?)\s+and\s+([0-9]{1,2}(?::[0-9]{2})?(?:\s*(?:am|pm)\b)?)",
    )
    .expect("TIME_RANGE should compile - this is a bug")
});

static FIXED_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bat\s+([0-9]{1,2}(?::[0-9]{2})?\s*(?:am|pm))\b")
        .expect("FIXED_TIME should compile - this is a bug")
});

/// Scans message text for date and time fragments and normalizes them into
/// [`TimeBlock`]s, resolving relative words against a caller-supplied instant.
#[derive(Clone, Debug)]
pub struct TemporalExtractor {
    timezone: Tz,
}

impl Default for TemporalExtractor {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl TemporalExtractor {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn extract(&self, text: &str, now: DateTime<Utc>) -> Vec<TimeBlock> {
        let local_now = now.with_timezone(&self.timezone);

        if NOW_TOKEN.is_match(text) {
            return vec![TimeBlock::exact(
                format_calendar_date(local_now.date_naive()),
                local_now.format(CLOCK_TIME_FORMAT).to_string(),
            )];
        }

        let today = local_now.date_naive();
        let resolved_date = self.resolve_date(text, today);
        let block_date = format_calendar_date(resolved_date.unwrap_or(today));

        let mut blocks = Vec::new();

        if let Some(captures) = TIME_RANGE.captures(text) {
            blocks.push(TimeBlock::range(
                block_date.clone(),
                captures[1].trim(),
                captures[2].trim(),
            ));
        }

        if let Some(captures) = FIXED_TIME.captures(text) {
            blocks.push(TimeBlock::exact(block_date, captures[1].trim()));
        }

        if blocks.is_empty() {
            if let Some(date) = resolved_date {
                blocks.push(TimeBlock::date_only(format_calendar_date(date)));
            }
        }

        blocks
    }

    /// Later rules overwrite earlier ones: relative word, then month-name date,
    /// then numeric date. A rule that matches but fails to parse leaves the
    /// previous result in place.
    fn resolve_date(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        let mut resolved = relative_offset(text).and_then(|days| today.checked_add_days(Days::new(days)));

        if let Some(captures) = MONTH_NAME_DATE.captures(text) {
            let year = captures.get(3).map(|year| year.as_str());
            match parse_month_name_date(&captures[1], &captures[2], year, today.year()) {
                Ok(date) => resolved = Some(date),
                Err(error) => debug!(
                    event_name = "temporal.month_date.skipped",
                    fragment = &captures[0],
                    error_class = error.error_class(),
                    "ignoring unparseable month-name date"
                ),
            }
        }

        if let Some(captures) = NUMERIC_DATE.captures(text) {
            match parse_numeric_date(&captures[1], Some(today.year())) {
                Ok(date) => resolved = Some(date),
                Err(error) => debug!(
                    event_name = "temporal.numeric_date.skipped",
                    fragment = &captures[1],
                    error_class = error.error_class(),
                    "ignoring unparseable numeric date"
                ),
            }
        }

        resolved
    }
}

fn relative_offset(text: &str) -> Option<u64> {
    if DAY_AFTER_TOMORROW.is_match(text) {
        Some(2)
    } else if TOMORROW.is_match(text) {
        Some(1)
    } else if TODAY.is_match(text) {
        Some(0)
    } else {
        None
    }
}
