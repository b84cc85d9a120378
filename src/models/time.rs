//! Clock time and duration types.
//!
//! Punch fields arrive as `"HH:MM"` and `"YYYY-MM-DD"` strings. They are parsed
//! once at the boundary into [`ClockTime`], [`Minutes`] and [`NaiveDate`] so the
//! calculators never carry raw strings.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A time of day with minute precision, stored as minutes since midnight (0-1439).
///
/// # Example
///
/// ```
/// use timesheet_engine::models::ClockTime;
///
/// let t: ClockTime = "07:45".parse().unwrap();
/// assert_eq!(t.minutes_since_midnight(), 465);
/// assert_eq!(t.to_string(), "07:45");
///
/// // Single-digit hours are accepted, minutes must have two digits.
/// assert!("7:45".parse::<ClockTime>().is_ok());
/// assert!("07:5".parse::<ClockTime>().is_err());
/// assert!("24:00".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// 00:00.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Builds a clock time from hours and minutes, `None` when out of range.
    pub fn from_hm(hours: u32, minutes: u32) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(ClockTime((hours * 60 + minutes) as u16))
        } else {
            None
        }
    }

    /// Builds a clock time from minutes since midnight, `None` outside 0-1439.
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        if (0..MINUTES_PER_DAY).contains(&minutes) {
            Some(ClockTime(minutes as u16))
        } else {
            None
        }
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(self) -> i64 {
        i64::from(self.0)
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        split_hours_minutes(s, 2)
            .and_then(|(h, m)| ClockTime::from_hm(h, m))
            .ok_or_else(|| EngineError::InvalidTime {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A duration in whole minutes.
///
/// Durations render as `"HH:MM"` where the hour part is not bounded to 23
/// (a period total can read `"41:30"`). Negative values render as `"00:00"`.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::Minutes;
///
/// let worked = Minutes::new(600);
/// let lunch = Minutes::new(60);
/// assert_eq!((worked - lunch).to_string(), "09:00");
/// assert_eq!(Minutes::new(-15).to_string(), "00:00");
/// assert_eq!("41:30".parse::<Minutes>().unwrap(), Minutes::new(2490));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Minutes(i64);

impl Minutes {
    /// Zero minutes.
    pub const ZERO: Minutes = Minutes(0);

    /// Wraps a raw minute count.
    pub const fn new(minutes: i64) -> Self {
        Minutes(minutes)
    }

    /// Builds a duration from whole hours.
    pub const fn from_hours(hours: i64) -> Self {
        Minutes(hours * 60)
    }

    /// The raw minute count.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Clamps negative durations to zero.
    pub fn floor_zero(self) -> Self {
        Minutes(self.0.max(0))
    }

    /// The duration as decimal hours (e.g. 90 minutes is 1.5).
    pub fn as_hours(self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(60)
    }
}

impl Add for Minutes {
    type Output = Minutes;

    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 + rhs.0)
    }
}

impl AddAssign for Minutes {
    fn add_assign(&mut self, rhs: Minutes) {
        self.0 += rhs.0;
    }
}

impl Sub for Minutes {
    type Output = Minutes;

    fn sub(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 - rhs.0)
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Minutes>>(iter: I) -> Self {
        iter.fold(Minutes::ZERO, Add::add)
    }
}

impl FromStr for Minutes {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        split_hours_minutes(s, 6)
            .map(|(h, m)| Minutes(i64::from(h) * 60 + i64::from(m)))
            .ok_or_else(|| EngineError::InvalidDuration {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0);
        write!(f, "{:02}:{:02}", total / 60, total % 60)
    }
}

impl Serialize for Minutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Minutes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A daily clock window, wrapping past midnight when `end <= start`.
///
/// The statutory night window is 22:00 to 05:00 of the following day.
///
/// ```
/// use timesheet_engine::models::NightWindow;
///
/// let window = NightWindow::default();
/// assert_eq!(window.start.to_string(), "22:00");
/// assert_eq!(window.end.to_string(), "05:00");
/// assert_eq!(window.length().get(), 420);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    /// Window start (inclusive).
    pub start: ClockTime,
    /// Window end (exclusive).
    pub end: ClockTime,
}

impl NightWindow {
    /// Length of the window.
    pub fn length(&self) -> Minutes {
        let start = self.start.minutes_since_midnight();
        let mut end = self.end.minutes_since_midnight();
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        Minutes::new(end - start)
    }
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start: ClockTime(22 * 60),
            end: ClockTime(5 * 60),
        }
    }
}

/// Splits `"H:MM"`/`"HH:MM"` into numbers. Minutes must be two digits below 60.
fn split_hours_minutes(s: &str, max_hour_digits: usize) -> Option<(u32, u32)> {
    let (hours, minutes) = s.split_once(':')?;
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    if hours.is_empty() || hours.len() > max_hour_digits || !all_digits(hours) {
        return None;
    }
    if minutes.len() != 2 || !all_digits(minutes) {
        return None;
    }

    let minutes: u32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    Some((hours.parse().ok()?, minutes))
}

/// Parses `"HH:MM"` into minutes since midnight.
///
/// Malformed input is an error rather than a silent zero; callers are
/// expected to validate first.
///
/// ```
/// use timesheet_engine::models::time_to_minutes;
///
/// assert_eq!(time_to_minutes("22:00").unwrap(), 1320);
/// assert!(time_to_minutes("22h00").is_err());
/// ```
pub fn time_to_minutes(s: &str) -> EngineResult<i64> {
    s.parse::<ClockTime>().map(ClockTime::minutes_since_midnight)
}

/// Formats a minute count as zero-padded `"HH:MM"`, clamping negatives to `"00:00"`.
///
/// ```
/// use timesheet_engine::models::minutes_to_time;
///
/// assert_eq!(minutes_to_time(75), "01:15");
/// assert_eq!(minutes_to_time(-1), "00:00");
/// ```
pub fn minutes_to_time(minutes: i64) -> String {
    Minutes::new(minutes).to_string()
}

/// Parses a `"YYYY-MM-DD"` calendar date.
pub fn parse_date(s: &str) -> EngineResult<NaiveDate> {
    let invalid = || EngineError::InvalidDate {
        value: s.to_string(),
    };
    if s.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())
}
