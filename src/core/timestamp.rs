//! Field lookup policy and start/end time derivation.
//!
//! Every function here is total over a [`HeaderMap`]: missing or unparsable
//! fields fall back to `0`, `""` or [`zero_time`]. The `try_` variants report
//! the first problem instead and back strict validation.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::header_map::HeaderMap;
use crate::error::FieldError;

pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const DATE: &str = "Date";
pub const START: &str = "Start";
pub const END: &str = "End";
pub const PROGRAM_TITLE: &str = "Program-Title";

// `YYYY/M/D HH:MM`; the colon is optional so compact `HHMM` times are accepted
static DATE_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})/([0-9]{1,2})/([0-9]{1,2}) ([0-9]{1,2}):?([0-9]{2})$").unwrap()
});

static ZERO_TIME: Lazy<NaiveDateTime> = Lazy::new(|| {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
});

/// Sentinel returned when a time cannot be derived: `0001-01-01 00:00`.
pub fn zero_time() -> NaiveDateTime {
    *ZERO_TIME
}

pub fn is_zero_time(t: &NaiveDateTime) -> bool {
    *t == *ZERO_TIME
}

/// First value of a string field, or `""` when absent or empty.
pub fn header_str<'a>(header: &'a HeaderMap, name: &str) -> &'a str {
    header.first(name).unwrap_or("")
}

/// First value of an integer field, or `0` when absent, empty or not an integer.
pub fn header_int(header: &HeaderMap, name: &str) -> i64 {
    header
        .first(name)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
}

/// Build `"{Year}/{Month}/{Date} {time}"` from the current header values.
pub fn assemble(header: &HeaderMap, time_field: &str) -> String {
    format!(
        "{}/{}/{} {}",
        header_int(header, YEAR),
        header_int(header, MONTH),
        header_int(header, DATE),
        header_str(header, time_field)
    )
}

/// Parse a string in the fixed `YYYY/M/D HH:MM` format.
pub fn parse_fixed(value: &str) -> Option<NaiveDateTime> {
    let caps = DATE_TIME_REGEX.captures(value)?;
    let num = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();

    let year = i32::try_from(num(1)?).ok()?;
    NaiveDate::from_ymd_opt(year, num(2)?, num(3)?)?.and_hms_opt(num(4)?, num(5)?, 0)
}

/// Derive the time named by `time_field`, falling back to [`zero_time`].
pub fn derive(header: &HeaderMap, time_field: &str) -> NaiveDateTime {
    parse_fixed(&assemble(header, time_field)).unwrap_or_else(zero_time)
}

/// Derive the time named by `time_field`, reporting why it cannot be derived.
pub fn try_derive(header: &HeaderMap, time_field: &str) -> Result<NaiveDateTime, FieldError> {
    for name in [YEAR, MONTH, DATE] {
        let value = require(header, name)?;
        if value.parse::<i64>().is_err() {
            return Err(FieldError::NotInteger {
                field: name.to_string(),
                value: value.to_string(),
            });
        }
    }
    require(header, time_field)?;

    let value = assemble(header, time_field);
    parse_fixed(&value).ok_or(FieldError::InvalidDateTime { value })
}

fn require<'a>(header: &'a HeaderMap, name: &str) -> Result<&'a str, FieldError> {
    header.first(name).ok_or_else(|| FieldError::Missing {
        field: name.to_string(),
    })
}
