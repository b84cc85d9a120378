//! Calculation logic for the Timesheet Engine.
//!
//! This module contains the minute-based time arithmetic, punch validation,
//! the standard calculator (gross, net, overtime at 1.5×, period statistics
//! and rest gaps), the CLT calculator (capped overtime, Sunday/holiday
//! premium, night premium on the legal night hour, compliance findings) and
//! the mode dispatcher that selects between them.
//!
//! The free functions at the bottom run the calculators with statutory
//! defaults, for callers that have no loaded configuration.

mod clt;
mod compliance_summary;
mod mode;
mod standard;
mod time_arithmetic;
mod validation;

pub use clt::{CltCalculator, NightPremium, RestIntervalCheck, WorkedHoursSplit};
pub use compliance_summary::{
    ComplianceStatistics, ComplianceSummary, Violation, ViolationKind, generate_compliance_report,
};
pub use mode::{CalculationMode, DisplaySummary, ModeOutcome, TimesheetEngine};
pub use standard::{PeriodStats, ShiftGap, StandardCalculator};
pub use time_arithmetic::{
    average_minutes, clock_span, daily_night_minutes, elapsed, excess_over, night_minutes, pay_for,
    round_currency, subtract_lunch,
};
pub use validation::{PunchInspection, inspect_punch, parse_punch};

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{CltResult, RawPunchInput, StandardResult, TimesheetRecord};

/// Standard calculation with the default policy.
pub fn calculate_standard(input: &RawPunchInput) -> StandardResult {
    StandardCalculator::default().calculate_all(input)
}

/// CLT calculation with the statutory policy.
///
/// An unset Sunday/holiday flag counts as an ordinary day here; use
/// [`TimesheetEngine`] to resolve it from a holiday calendar.
pub fn calculate_clt(input: &RawPunchInput) -> EngineResult<CltResult> {
    CltCalculator::default().calculate_total(input)
}

/// Period statistics with the default policy.
pub fn period_stats(records: &[TimesheetRecord], start: NaiveDate, end: NaiveDate) -> PeriodStats {
    StandardCalculator::default().calculate_period_stats(records, start, end)
}

/// Rest gap between two shifts with the default 11h minimum.
pub fn shift_gap(
    prev_exit_date: &str,
    prev_exit_time: &str,
    curr_entry_date: &str,
    curr_entry_time: &str,
) -> Option<ShiftGap> {
    StandardCalculator::default().calculate_shift_gap(
        prev_exit_date,
        prev_exit_time,
        curr_entry_date,
        curr_entry_time,
    )
}
