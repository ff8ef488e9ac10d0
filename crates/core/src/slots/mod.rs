//! Slot suggestion.
//!
//! Converts extracted [`TimeBlock`]s into concrete UTC instants. Local
//! wall-clock values are read in the configured reference timezone.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::errors::TemporalParseError;
use crate::temporal::parse::{localize, parse_clock_time, parse_numeric_date, parse_range_start};
use crate::temporal::TimeBlock;

/// Hours proposed for a block that names a date but no time.
pub const DEFAULT_DATE_ONLY_HOURS: [u32; 3] = [10, 11, 15];

#[derive(Clone, Debug)]
pub struct SlotSuggester {
    timezone: Tz,
    date_only_hours: Vec<u32>,
}

impl Default for SlotSuggester {
    fn default() -> Self {
        Self::new(Tz::UTC, DEFAULT_DATE_ONLY_HOURS.to_vec())
    }
}

impl SlotSuggester {
    pub fn new(timezone: Tz, date_only_hours: Vec<u32>) -> Self {
        Self { timezone, date_only_hours }
    }

    pub fn date_only_hours(&self) -> &[u32] {
        &self.date_only_hours
    }

    /// Suggest instants in block order. Blocks that fail to parse are skipped;
    /// duplicates are kept.
    pub fn suggest(&self, blocks: &[TimeBlock]) -> Vec<DateTime<Utc>> {
        let mut slots = Vec::new();

        for block in blocks {
            match block {
                TimeBlock::Exact { date, time } => {
                    push_resolved(&mut slots, block, self.resolve(date, time))
                }
                TimeBlock::Range { date, start, end } => {
                    push_resolved(&mut slots, block, self.resolve_range(date, start, end))
                }
                TimeBlock::DateOnly { date } => match self.date_only_slots(date) {
                    Ok(candidates) => slots.extend(candidates),
                    Err(error) => skip(block, &error),
                },
            }
        }

        slots
    }

    /// Combine a block's date and clock time into one UTC instant.
    pub fn resolve(&self, date: &str, time: &str) -> Result<DateTime<Utc>, TemporalParseError> {
        let date = parse_numeric_date(date, None)?;
        let time = parse_clock_time(time)?;
        localize(date.and_time(time), self.timezone)
    }

    /// Resolve the start of a range; a bare start takes the end's am/pm when it fits.
    pub fn resolve_range(
        &self,
        date: &str,
        start: &str,
        end: &str,
    ) -> Result<DateTime<Utc>, TemporalParseError> {
        let date = parse_numeric_date(date, None)?;
        let time = parse_range_start(start, end)?;
        localize(date.and_time(time), self.timezone)
    }

    fn date_only_slots(&self, date: &str) -> Result<Vec<DateTime<Utc>>, TemporalParseError> {
        let base = parse_numeric_date(date, None)?;
        let mut candidates = Vec::with_capacity(self.date_only_hours.len());

        for &hour in &self.date_only_hours {
            let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) else {
                debug!(event_name = "slots.hour.skipped", hour, "ignoring out-of-range candidate hour");
                continue;
            };
            match localize(base.and_time(time), self.timezone) {
                Ok(slot) => candidates.push(slot),
                Err(error) => debug!(
                    event_name = "slots.hour.skipped",
                    hour,
                    error_class = error.error_class(),
                    "candidate hour does not exist on this date"
                ),
            }
        }

        Ok(candidates)
    }
}

/// Suggest slots with the default timezone (UTC) and candidate hours.
pub fn suggest(blocks: &[TimeBlock]) -> Vec<DateTime<Utc>> {
    SlotSuggester::default().suggest(blocks)
}

fn push_resolved(
    slots: &mut Vec<DateTime<Utc>>,
    block: &TimeBlock,
    resolved: Result<DateTime<Utc>, TemporalParseError>,
) {
    match resolved {
        Ok(slot) => slots.push(slot),
        Err(error) => skip(block, &error),
    }
}

fn skip(block: &TimeBlock, error: &TemporalParseError) {
    debug!(
        event_name = "slots.block.skipped",
        block_kind = block.kind(),
        date = block.date(),
        error_class = error.error_class(),
        error = %error,
        "skipping unparseable time block"
    );
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    use super::{suggest, SlotSuggester};
    use crate::temporal::TimeBlock;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn date_only_yields_three_fixed_hours_in_order() {
        assert_eq!(
            suggest(&[TimeBlock::date_only("12/08/2025")]),
            vec![utc(2025, 8, 12, 10, 0), utc(2025, 8, 12, 11, 0), utc(2025, 8, 12, 15, 0)]
        );
    }

    #[test]
    fn exact_block_combines_date_and_time() {
        assert_eq!(suggest(&[TimeBlock::exact("11/08/2025", "3pm")]), vec![utc(2025, 8, 11, 15, 0)]);
        assert_eq!(suggest(&[TimeBlock::exact("10/08/2025", "09:30")]), vec![utc(2025, 8, 10, 9, 30)]);
    }

    #[test]
    fn range_proposes_only_its_start() {
        assert_eq!(
            suggest(&[TimeBlock::range("11/08/2025", "2pm", "4pm")]),
            vec![utc(2025, 8, 11, 14, 0)]
        );
        assert_eq!(
            suggest(&[TimeBlock::range("11/08/2025", "2", "4pm")]),
            vec![utc(2025, 8, 11, 14, 0)]
        );
        assert_eq!(
            suggest(&[TimeBlock::range("11/08/2025", "11", "1pm")]),
            vec![utc(2025, 8, 11, 11, 0)]
        );
        assert_eq!(
            suggest(&[TimeBlock::range("11/08/2025", "14", "16")]),
            vec![utc(2025, 8, 11, 14, 0)]
        );
    }

    #[test]
    fn output_follows_block_order_without_dedup() {
        let slots = suggest(&[
            TimeBlock::range("11/08/2025", "3pm", "5pm"),
            TimeBlock::exact("11/08/2025", "3 PM"),
            TimeBlock::exact("10/08/2025", "9am"),
        ]);

        assert_eq!(slots, vec![utc(2025, 8, 11, 15, 0), utc(2025, 8, 11, 15, 0), utc(2025, 8, 10, 9, 0)]);
    }

    #[test]
    fn unparseable_blocks_are_skipped() {
        let slots = suggest(&[
            TimeBlock::exact("11/08/2025", "25pm"),
            TimeBlock::date_only("someday"),
            TimeBlock::range("31/02/2025", "2pm", "3pm"),
            TimeBlock::exact("12/08/2025", "10am"),
        ]);

        assert_eq!(slots, vec![utc(2025, 8, 12, 10, 0)]);
        assert!(suggest(&[]).is_empty());
    }

    #[test]
    fn local_times_are_normalized_to_utc() {
        let suggester = SlotSuggester::new(Tz::America__New_York, vec![10, 11, 15]);

        assert_eq!(
            suggester.suggest(&[TimeBlock::exact("11/08/2025", "3pm")]),
            vec![utc(2025, 8, 11, 19, 0)]
        );
        assert_eq!(
            suggester.suggest(&[TimeBlock::date_only("12/01/2026")]),
            vec![utc(2026, 1, 12, 15, 0), utc(2026, 1, 12, 16, 0), utc(2026, 1, 12, 20, 0)]
        );
    }

    #[test]
    fn date_only_drops_hours_that_do_not_exist_locally() {
        let suggester = SlotSuggester::new(Tz::America__New_York, vec![1, 2, 3]);

        assert_eq!(
            suggester.suggest(&[TimeBlock::date_only("09/03/2025")]),
            vec![utc(2025, 3, 9, 6, 0), utc(2025, 3, 9, 7, 0)]
        );
    }

    #[test]
    fn custom_hours_are_used_in_configured_order() {
        let suggester = SlotSuggester::new(Tz::UTC, vec![9, 14]);
        assert_eq!(
            suggester.suggest(&[TimeBlock::date_only("01/09/2025")]),
            vec![utc(2025, 9, 1, 9, 0), utc(2025, 9, 1, 14, 0)]
        );
    }
}
