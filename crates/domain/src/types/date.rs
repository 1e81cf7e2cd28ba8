//! Calendar-date-only value type
//!
//! A `Date` carries no time-of-day and no zone. The Meridian API uses it for
//! all-day events and floating periods, always in the canonical `YYYY-MM-DD`
//! form.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::TimeError;

/// A calendar date with no associated time-of-day or zone.
///
/// Construction validates the triple against real Gregorian calendar rules,
/// so a held `Date` is always a real date. Ordering is calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    inner: NaiveDate,
}

impl Date {
    /// Construct a date from a (year, month, day) triple.
    ///
    /// # Errors
    /// Returns [`TimeError::InvalidDate`] naming the triple when it does not
    /// denote a real calendar date (Feb 29 on a non-leap year, day 0,
    /// month 13, ...).
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|inner| Self { inner })
            .ok_or(TimeError::InvalidDate { year, month, day })
    }

    /// Parse the strict canonical form `YYYY-MM-DD`.
    ///
    /// The grammar is shape-checked before any numeric conversion: exactly
    /// ten bytes, hyphens at positions 4 and 7, digits everywhere else. A
    /// non-zero-padded month or day, or a trailing time component, is
    /// rejected.
    ///
    /// # Errors
    /// Returns [`TimeError::Format`] echoing the rejected input, or
    /// [`TimeError::InvalidDate`] when the shape is right but the triple is
    /// not a real date.
    pub fn parse(input: &str) -> Result<Self, TimeError> {
        if !matches_canonical_shape(input) {
            return Err(TimeError::format(input));
        }

        let year = input[0..4].parse().map_err(|_| TimeError::format(input))?;
        let month = input[5..7].parse().map_err(|_| TimeError::format(input))?;
        let day = input[8..10].parse().map_err(|_| TimeError::format(input))?;

        Self::new(year, month, day)
    }

    /// Non-failing variant of [`Date::parse`] with the same grammar.
    #[must_use]
    pub fn try_parse(input: &str) -> Option<Self> {
        Self::parse(input).ok()
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    /// The underlying chrono date, for wall-clock arithmetic.
    #[must_use]
    pub fn as_naive(&self) -> NaiveDate {
        self.inner
    }
}

impl From<NaiveDate> for Date {
    fn from(inner: NaiveDate) -> Self {
        Self { inner }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

fn matches_canonical_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| matches!(index, 4 | 7) || byte.is_ascii_digit())
}
