//! Parsers for the individual date and clock-time fragments the extractor
//! pulls out of a message.
//!
//! Each parser returns a `Result` so callers decide, at the call site, that a
//! bad fragment is skipped rather than fatal.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TemporalParseError;

/// Canonical rendering of a resolved calendar date inside a `TimeBlock`.
pub const CALENDAR_DATE_FORMAT: &str = "%d/%m/%Y";

/// Rendering of a clock time synthesized from the reference instant.
pub const CLOCK_TIME_FORMAT: &str = "%H:%M";

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)?$")
        .expect("CLOCK_TIME should compile - this is a bug")
});

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{2,4})$")
        .expect("NUMERIC_DATE should compile - this is a bug")
});

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Resolve an English month name or its three-letter abbreviation.
pub fn month_from_name(name: &str) -> Result<u32, TemporalParseError> {
    let normalized = name.trim().trim_end_matches('.').to_ascii_lowercase();
    let month = match normalized.as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return Err(TemporalParseError::UnknownMonth(name.to_string())),
    };
    Ok(month)
}

/// Build a date from a "10th August 2025" style expression that has already
/// been split into its parts. A missing year falls back to `reference_year`.
pub fn parse_month_name_date(
    day: &str,
    month: &str,
    year: Option<&str>,
    reference_year: i32,
) -> Result<NaiveDate, TemporalParseError> {
    let raw = match year {
        Some(year) => format!("{day} {month} {year}"),
        None => format!("{day} {month}"),
    };
    let day = day.parse::<u32>().map_err(|_| TemporalParseError::Malformed(raw.clone()))?;
    let month = month_from_name(month)?;
    let year = match year {
        Some(year) => year.parse::<i32>().map_err(|_| TemporalParseError::InvalidYear(year.to_string()))?,
        None => reference_year,
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or(TemporalParseError::InvalidDate(raw))
}

/// Parse `D/M/Y` or `D-M-Y`, preferring day-before-month and falling back to
/// month-before-day when the day-first reading is not a real date.
///
/// Two-digit years are resolved into the century that keeps them within 50
/// years of `pivot_year`; without a pivot they are rejected.
pub fn parse_numeric_date(raw: &str, pivot_year: Option<i32>) -> Result<NaiveDate, TemporalParseError> {
    let trimmed = raw.trim();
    let captures =
        NUMERIC_DATE.captures(trimmed).ok_or_else(|| TemporalParseError::Malformed(raw.to_string()))?;

    let first = captures[1].parse::<u32>().map_err(|_| TemporalParseError::Malformed(raw.to_string()))?;
    let second = captures[2].parse::<u32>().map_err(|_| TemporalParseError::Malformed(raw.to_string()))?;
    let year = resolve_year(&captures[3], pivot_year)?;

    NaiveDate::from_ymd_opt(year, second, first)
        .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
        .ok_or_else(|| TemporalParseError::InvalidDate(raw.to_string()))
}

fn resolve_year(token: &str, pivot_year: Option<i32>) -> Result<i32, TemporalParseError> {
    let value = token.parse::<i32>().map_err(|_| TemporalParseError::InvalidYear(token.to_string()))?;
    match token.len() {
        4 => Ok(value),
        2 => {
            let pivot = pivot_year.ok_or_else(|| TemporalParseError::InvalidYear(token.to_string()))?;
            let mut year = pivot - pivot.rem_euclid(100) + value;
            if year >= pivot + 50 {
                year -= 100;
            } else if year < pivot - 50 {
                year += 100;
            }
            Ok(year)
        }
        _ => Err(TemporalParseError::InvalidYear(token.to_string())),
    }
}

/// Parse a clock time such as `3pm`, `10:30 AM`, `14:00` or `9`.
///
/// With an am/pm marker the hour must be 1-12; without one the hour is read on
/// the 24-hour clock.
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, TemporalParseError> {
    let invalid = || TemporalParseError::InvalidTime(raw.to_string());
    let captures = CLOCK_TIME.captures(raw.trim()).ok_or_else(invalid)?;

    let hour = captures[1].parse::<u32>().map_err(|_| invalid())?;
    let minute = match captures.get(2) {
        Some(minute) => minute.as_str().parse::<u32>().map_err(|_| invalid())?,
        None => 0,
    };

    let hour = match captures.get(3).map(|marker| marker.as_str().to_ascii_lowercase()) {
        Some(marker) => {
            if !(1..=12).contains(&hour) {
                return Err(invalid());
            }
            match (marker.as_str(), hour) {
                ("am", 12) => 0,
                ("am", hour) => hour,
                (_, 12) => 12,
                (_, hour) => hour + 12,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Parse the start of a time range. A start without am/pm borrows the end's
/// marker ("between 2 and 4pm" starts at 14:00) unless that would put it after
/// the end; otherwise it is read on the 24-hour clock.
pub fn parse_range_start(start: &str, end: &str) -> Result<NaiveTime, TemporalParseError> {
    if clock_marker(start).is_none() {
        if let (Some(marker), Ok(end_time)) = (clock_marker(end), parse_clock_time(end)) {
            if let Ok(borrowed) = parse_clock_time(&format!("{}{marker}", start.trim())) {
                if borrowed <= end_time {
                    return Ok(borrowed);
                }
            }
        }
    }

    parse_clock_time(start)
}

fn clock_marker(raw: &str) -> Option<String> {
    CLOCK_TIME
        .captures(raw.trim())?
        .get(3)
        .map(|marker| marker.as_str().to_ascii_lowercase())
}

/// Interpret a wall-clock datetime in `timezone` and normalize it to UTC.
///
/// Ambiguous local times (clocks going back) resolve to the earlier instant.
pub fn localize(naive: NaiveDateTime, timezone: Tz) -> Result<DateTime<Utc>, TemporalParseError> {
    timezone
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            TemporalParseError::NonexistentLocalTime(
                naive.format("%d/%m/%Y %H:%M").to_string(),
                timezone.name().to_string(),
            )
        })
}
