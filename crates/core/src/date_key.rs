//! Calendar date keys and month ranges.
//!
//! Entries are keyed by a zero-padded `YYYY-MM-DD` string. Because the
//! format is zero-padded, lexicographic order on keys equals calendar
//! order, so a month is simply the closed key range
//! `[YYYY-MM-01, YYYY-MM-<lastDay>]`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// `chrono` format string for [`DateKey`].
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// DateKey
// ---------------------------------------------------------------------------

/// Canonical identity of a calendar day's entry, e.g. `"2025-09-18"`.
///
/// Serialized as the plain string. Parsing rejects anything that is not a
/// real, zero-padded date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Parse a `YYYY-MM-DD` key.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });

        if !well_formed {
            return Err(invalid_key(s));
        }

        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| invalid_key(s))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The calendar month this key falls in.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::containing(self.0)
    }
}

fn invalid_key(s: &str) -> CoreError {
    CoreError::Validation(format!("Invalid date key '{s}', expected YYYY-MM-DD"))
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

// ---------------------------------------------------------------------------
// YearMonth
// ---------------------------------------------------------------------------

/// A calendar month, the unit of both entry listing and log reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    first: NaiveDate,
    last: NaiveDate,
}

impl YearMonth {
    /// Build a month from a year and a 1-based month number.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=9999).contains(&year) {
            return Err(CoreError::Validation(format!(
                "Year {year} is out of range (1-9999)"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(CoreError::Validation(format!(
                "Month {month} is out of range (1-12)"
            )));
        }

        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CoreError::Validation(format!("Invalid month {year}-{month:02}")))?;
        let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .ok_or_else(|| CoreError::Validation(format!("Invalid month {year}-{month:02}")))?;

        Ok(Self { first, last })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = date
            .with_day(days_in_month(date.year(), date.month()))
            .unwrap_or(date);
        Self { first, last }
    }

    /// The current month in UTC.
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_key(&self) -> DateKey {
        DateKey(self.first)
    }

    pub fn last_key(&self) -> DateKey {
        DateKey(self.last)
    }

    /// Whether `key` lies in `[first_key, last_key]`.
    pub fn contains(&self, key: &DateKey) -> bool {
        key.0 >= self.first && key.0 <= self.last
    }

    /// Inclusive start of the month (midnight UTC on the 1st).
    pub fn starts_at(&self) -> Timestamp {
        Utc.from_utc_datetime(&self.first.and_time(NaiveTime::MIN))
    }

    /// Exclusive end of the month (midnight UTC on the 1st of the next month).
    pub fn ends_before(&self) -> Timestamp {
        self.starts_at() + chrono::Duration::days(i64::from(self.last.day()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).expect("valid key")
    }

    #[test]
    fn parses_zero_padded_keys() {
        assert_eq!(key("2025-09-18").to_string(), "2025-09-18");
        assert_eq!(key("2024-02-29").to_string(), "2024-02-29");
    }

    #[test]
    fn rejects_malformed_keys() {
        for bad in ["2025-9-18", "2025-09-31", "2025/09/18", "20250918", "", "2023-02-29"] {
            assert!(DateKey::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn month_bounds_follow_calendar() {
        let sept = YearMonth::new(2025, 9).unwrap();
        assert_eq!(sept.first_key(), key("2025-09-01"));
        assert_eq!(sept.last_key(), key("2025-09-30"));

        let leap_feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(leap_feb.last_key(), key("2024-02-29"));

        let feb = YearMonth::new(2025, 2).unwrap();
        assert_eq!(feb.last_key(), key("2025-02-28"));
    }

    #[test]
    fn contains_excludes_neighbouring_months() {
        let sept = YearMonth::new(2025, 9).unwrap();
        assert!(sept.contains(&key("2025-09-01")));
        assert!(sept.contains(&key("2025-09-30")));
        assert!(!sept.contains(&key("2025-08-31")));
        assert!(!sept.contains(&key("2025-10-01")));
    }

    #[test]
    fn key_order_matches_string_order() {
        let mut keys = vec![key("2025-10-01"), key("2025-09-30"), key("2025-09-01")];
        keys.sort();
        let strings: Vec<String> = keys.iter().map(ToString::to_string).collect();
        let mut sorted = strings.clone();
        sorted.sort();
        assert_eq!(strings, sorted);
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert!(YearMonth::new(2025, 0).is_err());
        assert!(YearMonth::new(2025, 13).is_err());
        assert!(YearMonth::new(0, 1).is_err());
    }

    #[test]
    fn timestamp_window_spans_whole_month() {
        let dec = YearMonth::new(2025, 12).unwrap();
        assert_eq!(dec.starts_at().to_rfc3339(), "2025-12-01T00:00:00+00:00");
        assert_eq!(dec.ends_before().to_rfc3339(), "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn key_knows_its_month() {
        let ym = key("2025-10-01").year_month();
        assert_eq!(ym, YearMonth::new(2025, 10).unwrap());
        assert_eq!(ym.to_string(), "2025-10");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&key("2025-09-18")).unwrap();
        assert_eq!(json, "\"2025-09-18\"");
        assert!(serde_json::from_str::<DateKey>("\"2025-13-01\"").is_err());
    }
}
