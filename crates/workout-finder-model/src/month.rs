// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Calendar month used by the `startDate` filter (`YYYY-MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError(format!(
                "month must be within 1..=12, got {month}"
            )));
        }
        if !(0..=9999).contains(&year) {
            return Err(ValidationError(format!(
                "year must be within 0..=9999, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Parses `YYYY-MM`: four year digits, a dash, two month digits.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        let invalid = || ValidationError(format!("expected YYYY-MM, got `{s}`"));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Time zone in which record timestamps are read as calendar dates.
///
/// `Local` follows the host zone, matching how the browser-era service
/// compared months. `Fixed` pins the comparison for reproducible deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl CalendarZone {
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Accepts `local`, `utc`/`z`, or a `+HH:MM` / `-HH:MM` offset.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s.eq_ignore_ascii_case("z") {
            return Ok(Self::utc());
        }
        let invalid = || ValidationError(format!("invalid calendar zone `{s}`"));
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
        let hours = hours.parse::<i32>().map_err(|_| invalid())?;
        let minutes = minutes.parse::<i32>().map_err(|_| invalid())?;
        if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
            return Err(invalid());
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::Fixed)
            .ok_or_else(invalid)
    }

    /// Calendar month of an ISO-8601 timestamp in this zone. A date-time
    /// without an offset is taken as wall-clock time here; a bare
    /// `YYYY-MM-DD` date is UTC midnight, as ECMAScript date parsing reads it.
    /// Returns `None` for text that is not a recognisable timestamp.
    #[must_use]
    pub fn year_month_of(&self, timestamp: &str) -> Option<YearMonth> {
        let raw = timestamp.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(self.month_of_instant(&instant));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(YearMonth::of(&naive));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| self.month_of_instant(&midnight.and_utc().fixed_offset()))
    }

    fn month_of_instant(&self, instant: &DateTime<FixedOffset>) -> YearMonth {
        match self {
            Self::Local => YearMonth::of(&instant.with_timezone(&Local)),
            Self::Fixed(offset) => YearMonth::of(&instant.with_timezone(offset)),
        }
    }
}

impl Display for CalendarZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}
