use serde::{Deserialize, Serialize};

/// One normalized temporal expression found in a message.
///
/// `date` is always a resolved `DD/MM/YYYY` calendar date; relative words such
/// as "tomorrow" are resolved against the reference instant before a block is
/// built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimeBlock {
    /// A single date plus a clock time, e.g. "tomorrow at 3pm".
    Exact { date: String, time: String },
    /// A single date plus a start and end clock time, e.g. "between 2 and 4pm".
    Range { date: String, start: String, end: String },
    /// A date with no specific time.
    DateOnly { date: String },
}

impl TimeBlock {
    pub fn exact(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self::Exact { date: date.into(), time: time.into() }
    }

    pub fn range(date: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Range { date: date.into(), start: start.into(), end: end.into() }
    }

    pub fn date_only(date: impl Into<String>) -> Self {
        Self::DateOnly { date: date.into() }
    }

    pub fn date(&self) -> &str {
        match self {
            Self::Exact { date, .. } | Self::Range { date, .. } | Self::DateOnly { date } => date,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Exact { .. } => "exact",
            Self::Range { .. } => "range",
            Self::DateOnly { .. } => "date-only",
        }
    }
}
