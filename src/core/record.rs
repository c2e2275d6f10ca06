//! Parsed IEPG record and its derived accessors.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::header_map::HeaderMap;
use super::timestamp::{self, END, PROGRAM_TITLE, START};
use crate::error::FieldError;

/// One decoded IEPG message.
///
/// Built only by the parser and never modified afterwards. The time
/// accessors recompute their result from the header on every call and
/// never fail; use [`Record::try_start`] and friends for strict checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    header: HeaderMap,
    body: String,
}

impl Record {
    pub(crate) fn new(header: HeaderMap, body: String) -> Self {
        Self { header, body }
    }

    pub fn header(&self) -> &HeaderMap {
        &self.header
    }

    /// Everything after the header/body separator, decoded.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Summarized name: `{start:YYYY-MM-DD-HHMM}-{end:HHMM}-{Program-Title}`.
    ///
    /// Times that cannot be derived render as `0001-01-01-0000` / `0000`.
    pub fn unique_name(&self) -> String {
        format!(
            "{}-{}-{}",
            self.start().format("%Y-%m-%d-%H%M"),
            self.end().format("%H%M"),
            self.program_title()
        )
    }

    /// Program start time, or [`timestamp::zero_time`] if it cannot be derived.
    pub fn start(&self) -> NaiveDateTime {
        timestamp::derive(&self.header, START)
    }

    /// Program end time, or [`timestamp::zero_time`] if it cannot be derived.
    pub fn end(&self) -> NaiveDateTime {
        timestamp::derive(&self.header, END)
    }

    pub fn try_start(&self) -> Result<NaiveDateTime, FieldError> {
        timestamp::try_derive(&self.header, START)
    }

    pub fn try_end(&self) -> Result<NaiveDateTime, FieldError> {
        timestamp::try_derive(&self.header, END)
    }

    /// Check that both start and end times can be derived.
    pub fn validate(&self) -> Result<(), FieldError> {
        self.try_start()?;
        self.try_end()?;
        Ok(())
    }

    pub fn program_title(&self) -> &str {
        self.get_str(PROGRAM_TITLE)
    }

    /// First value of a field, or `""`.
    pub fn get_str(&self, name: &str) -> &str {
        timestamp::header_str(&self.header, name)
    }

    /// First value of a field as an integer, or `0`.
    pub fn get_int(&self, name: &str) -> i64 {
        timestamp::header_int(&self.header, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(pairs: &[(&str, &str)]) -> Record {
        let header = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), vec![v.to_string()]))
            .collect();
        Record::new(header, String::new())
    }

    fn broadcast() -> Record {
        record(&[
            ("Year", "2024"),
            ("Month", "3"),
            ("Date", "15"),
            ("Start", "09:00"),
            ("End", "10:30"),
            ("Program-Title", "朝のニュース"),
        ])
    }

    #[test]
    fn test_start_end() {
        let rec = broadcast();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(rec.start(), day.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(rec.end(), day.and_hms_opt(10, 30, 0).unwrap());
    }

    #[test]
    fn test_unique_name() {
        assert_eq!(broadcast().unique_name(), "2024-03-15-0900-1030-朝のニュース");
    }

    #[test]
    fn test_unique_name_compact_times() {
        let rec = record(&[
            ("Year", "2024"),
            ("Month", "3"),
            ("Date", "15"),
            ("Start", "0900"),
            ("End", "1030"),
            ("Program-Title", "News"),
        ]);
        assert_eq!(rec.unique_name(), "2024-03-15-0900-1030-News");
    }

    #[test]
    fn test_unique_name_without_fields() {
        let rec = record(&[]);
        assert_eq!(rec.unique_name(), "0001-01-01-0000-0000-");
    }

    #[test]
    fn test_missing_year_gives_zero_time() {
        let rec = record(&[("Month", "3"), ("Date", "15"), ("Start", "09:00")]);
        assert!(timestamp::is_zero_time(&rec.start()));
        assert!(matches!(rec.try_start(), Err(FieldError::Missing { .. })));
    }

    #[test]
    fn test_non_numeric_month() {
        let rec = record(&[("Year", "2024"), ("Month", "abc"), ("Date", "15"), ("Start", "09:00")]);
        assert_eq!(rec.get_int("Month"), 0);
        assert!(timestamp::is_zero_time(&rec.start()));
    }

    #[test]
    fn test_only_first_value_is_read() {
        let header: HeaderMap = vec![
            ("Year".to_string(), vec!["2024".to_string()]),
            ("Month".to_string(), vec!["3".to_string()]),
            ("Date".to_string(), vec!["15".to_string()]),
            ("Start".to_string(), vec!["09:00".to_string(), "21:00".to_string()]),
            ("Program-Title".to_string(), vec!["First".to_string(), "Second".to_string()]),
        ]
        .into_iter()
        .collect();
        let rec = Record::new(header, String::new());

        assert_eq!(rec.header().get("Start").unwrap().len(), 2);
        assert_eq!(rec.start().format("%H:%M").to_string(), "09:00");
        assert_eq!(rec.program_title(), "First");
    }

    #[test]
    fn test_repeated_derivation_is_stable() {
        let rec = broadcast();
        assert_eq!(rec.start(), rec.start());
        assert_eq!(rec.end(), rec.end());
        assert_eq!(rec.unique_name(), rec.unique_name());
    }

    #[test]
    fn test_validate() {
        assert_eq!(broadcast().validate(), Ok(()));

        let rec = record(&[("Year", "2024"), ("Month", "3"), ("Date", "15"), ("Start", "09:00")]);
        assert_eq!(
            rec.validate(),
            Err(FieldError::Missing { field: "End".to_string() })
        );
    }

    #[test]
    fn test_lenient_accessors_ignore_validation() {
        let rec = record(&[("Year", "2024"), ("Month", "3"), ("Date", "15"), ("Start", "09:00")]);
        assert!(rec.validate().is_err());
        assert_eq!(rec.start().format("%H%M").to_string(), "0900");
        assert!(timestamp::is_zero_time(&rec.end()));
    }

    #[test]
    fn test_serialize() {
        let rec = Record::new(
            vec![("year".to_string(), vec!["2024".to_string()])].into_iter().collect(),
            "本文".to_string(),
        );
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["header"]["Year"][0], "2024");
        assert_eq!(json["body"], "本文");
    }
}
