//! Integer-encoded calendar dates.
//!
//! Quote and expiration dates travel through the text records as
//! `YYYYMMDD` integers (e.g. `20210115`). Upstream raw files carry them as
//! `MM/DD/YYYY` strings instead, so both forms convert to [`DateCode`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DateParseError, DateRangeError};

/// A date encoded as `year * 10000 + month * 100 + day`.
///
/// Month and day ranges are not validated on construction. The value `0`
/// is reserved for dates that could not be parsed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DateCode(i32);

impl DateCode {
    /// Sentinel for a date that failed to parse. No calendar date encodes to it.
    pub const UNPARSEABLE: DateCode = DateCode(0);

    /// Wrap an already encoded `YYYYMMDD` value.
    pub const fn from_raw(code: i32) -> Self {
        Self(code)
    }

    /// The raw `YYYYMMDD` value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Encode without range checks. Years must stay within about
    /// +/-214,000 for the result to fit; use [`DateCode::checked_encode`]
    /// when that is not known.
    pub const fn encode(month: i32, day: i32, year: i32) -> Self {
        Self(year * 10000 + month * 100 + day)
    }

    /// Encode, or `None` if the result overflows.
    pub fn checked_encode(month: i32, day: i32, year: i32) -> Option<Self> {
        year.checked_mul(10000)?
            .checked_add(month.checked_mul(100)?)?
            .checked_add(day)
            .map(Self)
    }

    /// Split into `(year, month, day)`.
    pub const fn decode(self) -> (i32, i32, i32) {
        let year = self.0 / 10000;
        let month = self.0 / 100 - year * 100;
        let day = self.0 - year * 10000 - month * 100;
        (year, month, day)
    }

    /// Parse an `MM/DD/YYYY` string.
    pub fn parse(text: &str) -> Result<Self, DateParseError> {
        let tokens: Vec<&str> = text.split('/').collect();
        if tokens.len() != 3 {
            return Err(DateParseError::new(text));
        }

        let field = |s: &str| s.parse::<i32>().map_err(|_| DateParseError::new(text));
        let month = field(tokens[0])?;
        let day = field(tokens[1])?;
        let year = field(tokens[2])?;

        Self::checked_encode(month, day, year).ok_or_else(|| DateParseError::new(text))
    }

    /// Parse an `MM/DD/YYYY` string, falling back to [`DateCode::UNPARSEABLE`].
    ///
    /// The failure is reported as a `tracing` warning carrying the text.
    pub fn parse_or_unparseable(text: &str) -> Self {
        match Self::parse(text) {
            Ok(code) => code,
            Err(e) => {
                warn!(text = %e.text, "Cannot parse date, storing unparseable sentinel");
                Self::UNPARSEABLE
            }
        }
    }

    pub const fn is_unparseable(self) -> bool {
        self.0 == Self::UNPARSEABLE.0
    }

    /// Strict conversion; `None` for the sentinel and impossible dates.
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        let (year, month, day) = self.decode();
        let month = u32::try_from(month).ok()?;
        let day = u32::try_from(day).ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Calendar date with out-of-range months and days rolled over
    /// (month 13 is January of the next year, day 0 is the previous
    /// month's last day).
    fn to_calendar_date(self) -> NaiveDate {
        let (year, month, day) = self.decode();

        let months = i64::from(year) * 12 + i64::from(month) - 1;
        let y = months.div_euclid(12) as i32;
        let m = (months.rem_euclid(12) + 1) as u32;
        let first = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or_default();

        first
            .checked_add_signed(Duration::days(i64::from(day) - 1))
            .unwrap_or(first)
    }

    /// Whole days from `start` to `end`. Negative when `end` is earlier.
    pub fn days_between(start: DateCode, end: DateCode) -> i64 {
        (end.to_calendar_date() - start.to_calendar_date()).num_days()
    }

    /// Whole days from `self` to `end`.
    pub fn days_until(self, end: DateCode) -> i64 {
        Self::days_between(self, end)
    }
}

impl TryFrom<NaiveDate> for DateCode {
    type Error = DateRangeError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::checked_encode(date.month() as i32, date.day() as i32, date.year())
            .ok_or(DateRangeError { date })
    }
}

impl FromStr for DateCode {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
