//! Punch input models.
//!
//! [`RawPunchInput`] is what a caller hands over (form fields as strings).
//! [`Punch`] is the same data after parsing, the only shape the calculators
//! compute on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time::{ClockTime, Minutes};

/// Raw clock punches for one shift, as supplied by the caller.
///
/// Field names follow the JSON contract (`entryDate`, `lunchStart`, ...).
/// Empty lunch strings are treated as absent.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::RawPunchInput;
/// use rust_decimal::Decimal;
///
/// let input = RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "18:00")
///     .with_lunch("12:00", "13:00")
///     .with_hourly_rate(Decimal::new(2000, 2));
///
/// let json = serde_json::to_value(&input).unwrap();
/// assert_eq!(json["entryTime"], "08:00");
/// assert_eq!(json["lunchEnd"], "13:00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPunchInput {
    /// Entry date (`YYYY-MM-DD`).
    pub entry_date: String,
    /// Entry time (`HH:MM`).
    pub entry_time: String,
    /// Exit date (`YYYY-MM-DD`).
    pub exit_date: String,
    /// Exit time (`HH:MM`).
    pub exit_time: String,
    /// Lunch start (`HH:MM`), optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_start: Option<String>,
    /// Lunch end (`HH:MM`), optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_end: Option<String>,
    /// Normal workday length (`HH:MM`), 08:00 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_hours: Option<String>,
    /// Hourly rate; zero disables monetary computation.
    #[serde(default)]
    pub hourly_rate: Decimal,
    /// Whether the shift falls on a Sunday or holiday (CLT mode only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sunday_or_holiday: Option<bool>,
}

impl RawPunchInput {
    /// Creates an input with the four required fields and everything else defaulted.
    pub fn new(
        entry_date: impl Into<String>,
        entry_time: impl Into<String>,
        exit_date: impl Into<String>,
        exit_time: impl Into<String>,
    ) -> Self {
        Self {
            entry_date: entry_date.into(),
            entry_time: entry_time.into(),
            exit_date: exit_date.into(),
            exit_time: exit_time.into(),
            lunch_start: None,
            lunch_end: None,
            baseline_hours: None,
            hourly_rate: Decimal::ZERO,
            is_sunday_or_holiday: None,
        }
    }

    /// Sets the lunch interval.
    pub fn with_lunch(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.lunch_start = Some(start.into());
        self.lunch_end = Some(end.into());
        self
    }

    /// Sets the normal workday length.
    pub fn with_baseline(mut self, baseline: impl Into<String>) -> Self {
        self.baseline_hours = Some(baseline.into());
        self
    }

    /// Sets the hourly rate.
    pub fn with_hourly_rate(mut self, rate: Decimal) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Sets the Sunday/holiday flag.
    pub fn with_sunday_or_holiday(mut self, flag: bool) -> Self {
        self.is_sunday_or_holiday = Some(flag);
        self
    }

    /// Lunch start, `None` when absent or blank.
    pub fn lunch_start(&self) -> Option<&str> {
        non_blank(self.lunch_start.as_deref())
    }

    /// Lunch end, `None` when absent or blank.
    pub fn lunch_end(&self) -> Option<&str> {
        non_blank(self.lunch_end.as_deref())
    }

    /// Baseline, `None` when absent or blank.
    pub fn baseline_hours(&self) -> Option<&str> {
        non_blank(self.baseline_hours.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A lunch break within a shift. `end` is always after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchInterval {
    /// When the break started.
    pub start: ClockTime,
    /// When the break ended.
    pub end: ClockTime,
}

impl LunchInterval {
    /// Builds an interval, `None` unless `end > start`.
    pub fn new(start: ClockTime, end: ClockTime) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Length of the break.
    pub fn duration(&self) -> Minutes {
        Minutes::new(self.end.minutes_since_midnight() - self.start.minutes_since_midnight())
    }
}

/// A validated punch, parsed into typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Punch {
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry time.
    pub entry_time: ClockTime,
    /// Exit date.
    pub exit_date: NaiveDate,
    /// Exit time.
    pub exit_time: ClockTime,
    /// Lunch break, if one was taken.
    pub lunch: Option<LunchInterval>,
    /// Normal workday length.
    pub baseline: Minutes,
    /// Hourly rate (non-negative).
    pub hourly_rate: Decimal,
    /// Sunday or holiday flag.
    pub is_sunday_or_holiday: bool,
}

impl Punch {
    /// Length of the lunch break, zero when none was taken.
    pub fn lunch_duration(&self) -> Minutes {
        self.lunch.map_or(Minutes::ZERO, |l| l.duration())
    }
}
