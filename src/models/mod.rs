//! Core data models for the Timesheet Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod holiday;
mod punch;
mod record;
pub mod time;
mod validation;

pub use calculation_result::{CltResult, ComplianceReport, StandardResult};
pub use holiday::{HolidayCalendar, PublicHoliday};
pub use punch::{LunchInterval, Punch, RawPunchInput};
pub use record::{RecordTotals, TimesheetRecord};
pub use time::{
    ClockTime, MINUTES_PER_DAY, Minutes, NightWindow, minutes_to_time, parse_date,
    time_to_minutes,
};
pub use validation::{PunchField, ValidationReport};
