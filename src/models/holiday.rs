//! Holiday calendar model.
//!
//! The CLT calculator takes the Sunday/holiday flag as a plain boolean. This
//! module is where that flag comes from: a calendar of fixed dates supplied by
//! configuration, never looked up from the system clock.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A public holiday.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2025, 4, 21).unwrap(),
///     name: "Tiradentes".to_string(),
///     region: "national".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
    /// Where the holiday applies (e.g. "national", "SP").
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "national".to_string()
}

/// A set of holiday dates, usually one file per operational year.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{HolidayCalendar, PublicHoliday};
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::new(vec![PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
///     name: "Natal".to_string(),
///     region: "national".to_string(),
/// }]);
///
/// // Thursday, but a holiday
/// assert!(calendar.is_sunday_or_holiday(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
/// // Sunday
/// assert!(calendar.is_sunday_or_holiday(NaiveDate::from_ymd_opt(2025, 12, 28).unwrap()));
/// // Plain Monday
/// assert!(!calendar.is_sunday_or_holiday(NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    /// The holidays in this calendar.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
}

impl HolidayCalendar {
    /// Creates a calendar, sorted by date.
    pub fn new(mut holidays: Vec<PublicHoliday>) -> Self {
        holidays.sort_by_key(|h| h.date);
        Self { holidays }
    }

    /// Merges another calendar into this one.
    pub fn extend(&mut self, other: HolidayCalendar) {
        self.holidays.extend(other.holidays);
        self.holidays.sort_by_key(|h| h.date);
    }

    /// The holiday on a date, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&PublicHoliday> {
        self.holidays.iter().find(|h| h.date == date)
    }

    /// True when the date is a listed holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_on(date).is_some()
    }

    /// True when the date is a Sunday or a listed holiday.
    pub fn is_sunday_or_holiday(&self, date: NaiveDate) -> bool {
        date.weekday() == Weekday::Sun || self.is_holiday(date)
    }

    /// Number of holidays in the calendar.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// True when the calendar lists no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}
