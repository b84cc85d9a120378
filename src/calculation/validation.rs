//! Punch input validation.
//!
//! [`inspect_punch`] parses every field it can and records a message for
//! each one it cannot, so callers get both a complete report and best-effort
//! values. [`parse_punch`] is the strict form used by the CLT calculator.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::StandardPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClockTime, LunchInterval, Minutes, Punch, PunchField, RawPunchInput, ValidationReport,
    parse_date,
};

use super::time_arithmetic::elapsed;

/// Everything learned from a raw punch, valid or not.
#[derive(Debug, Clone, PartialEq)]
pub struct PunchInspection {
    /// Messages for every field that failed.
    pub report: ValidationReport,
    /// Entry date and time, when both parsed.
    pub entry: Option<(NaiveDate, ClockTime)>,
    /// Exit date and time, when both parsed.
    pub exit: Option<(NaiveDate, ClockTime)>,
    /// Lunch break, when both ends parsed and end is after start.
    pub lunch: Option<LunchInterval>,
    /// Baseline, falling back to the policy default.
    pub baseline: Minutes,
    /// Hourly rate as supplied.
    pub hourly_rate: Decimal,
    /// Elapsed time from entry to exit, zero when either side is unparsable.
    pub gross: Minutes,
}

impl PunchInspection {
    /// True when no message was recorded.
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Converts a valid inspection into a [`Punch`].
    pub fn into_punch(self, is_sunday_or_holiday: bool) -> EngineResult<Punch> {
        if !self.report.is_valid() {
            return Err(EngineError::InvalidPunch {
                report: self.report,
            });
        }

        let (Some((entry_date, entry_time)), Some((exit_date, exit_time))) =
            (self.entry, self.exit)
        else {
            return Err(EngineError::CalculationError {
                message: "entry or exit missing after validation".to_string(),
            });
        };

        Ok(Punch {
            entry_date,
            entry_time,
            exit_date,
            exit_time,
            lunch: self.lunch,
            baseline: self.baseline,
            hourly_rate: self.hourly_rate,
            is_sunday_or_holiday,
        })
    }
}

/// Validates a raw punch and parses what it can.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::inspect_punch;
/// use timesheet_engine::config::StandardPolicy;
/// use timesheet_engine::models::{PunchField, RawPunchInput};
///
/// let input = RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "17:00")
///     .with_lunch("13:00", "12:00");
/// let inspection = inspect_punch(&input, &StandardPolicy::default());
///
/// assert!(!inspection.is_valid());
/// assert!(inspection.report.has(PunchField::LunchEnd));
/// assert_eq!(inspection.gross.get(), 540);
/// ```
pub fn inspect_punch(input: &RawPunchInput, policy: &StandardPolicy) -> PunchInspection {
    let mut report = ValidationReport::default();

    let entry_date = date_field(&input.entry_date, PunchField::EntryDate, "Entry date", &mut report);
    let entry_time = time_field(&input.entry_time, PunchField::EntryTime, "Entry time", &mut report);
    let exit_date = date_field(&input.exit_date, PunchField::ExitDate, "Exit date", &mut report);
    let exit_time = time_field(&input.exit_time, PunchField::ExitTime, "Exit time", &mut report);

    let lunch = lunch_fields(input, &mut report);
    let baseline = baseline_field(input, policy, &mut report);

    if input.hourly_rate < Decimal::ZERO {
        report.push(PunchField::HourlyRate, "Hourly rate cannot be negative");
    }

    let entry = entry_date.zip(entry_time);
    let exit = exit_date.zip(exit_time);

    let gross = match (entry, exit) {
        (Some((start_date, start_time)), Some((end_date, end_time))) => {
            let gross = elapsed(start_date, start_time, end_date, end_time);
            if gross <= Minutes::ZERO {
                report.push(PunchField::Span, "Exit must be after entry");
            } else if gross > policy.max_shift_span {
                report.push(
                    PunchField::Span,
                    format!(
                        "Time between entry and exit cannot exceed {} hours",
                        policy.max_shift_span.get() / 60
                    ),
                );
            }
            gross
        }
        _ => Minutes::ZERO,
    };

    PunchInspection {
        report,
        entry,
        exit,
        lunch,
        baseline,
        hourly_rate: input.hourly_rate,
        gross,
    }
}

/// Validates and parses a punch, failing on the first invalid field set.
///
/// The Sunday/holiday flag defaults to false when the caller left it unset.
pub fn parse_punch(input: &RawPunchInput, policy: &StandardPolicy) -> EngineResult<Punch> {
    inspect_punch(input, policy).into_punch(input.is_sunday_or_holiday.unwrap_or(false))
}

fn date_field(
    value: &str,
    field: PunchField,
    label: &str,
    report: &mut ValidationReport,
) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        report.push(field, format!("{label} is required"));
        return None;
    }
    match parse_date(value) {
        Ok(date) => Some(date),
        Err(_) => {
            report.push(field, format!("{label} must be a valid date (YYYY-MM-DD)"));
            None
        }
    }
}

fn time_field(
    value: &str,
    field: PunchField,
    label: &str,
    report: &mut ValidationReport,
) -> Option<ClockTime> {
    if value.trim().is_empty() {
        report.push(field, format!("{label} is required"));
        return None;
    }
    match value.parse::<ClockTime>() {
        Ok(time) => Some(time),
        Err(_) => {
            report.push(field, format!("{label} must be in HH:MM format"));
            None
        }
    }
}

fn lunch_fields(input: &RawPunchInput, report: &mut ValidationReport) -> Option<LunchInterval> {
    const PAIR_MESSAGE: &str = "Lunch start and lunch end must be provided together";

    match (input.lunch_start(), input.lunch_end()) {
        (None, None) => None,
        (Some(_), None) => {
            report.push(PunchField::LunchEnd, PAIR_MESSAGE);
            None
        }
        (None, Some(_)) => {
            report.push(PunchField::LunchStart, PAIR_MESSAGE);
            None
        }
        (Some(start), Some(end)) => {
            let start = time_field(start, PunchField::LunchStart, "Lunch start", report);
            let end = time_field(end, PunchField::LunchEnd, "Lunch end", report);
            let (start, end) = start.zip(end)?;

            let lunch = LunchInterval::new(start, end);
            if lunch.is_none() {
                report.push(PunchField::LunchEnd, "Lunch end must be after lunch start");
            }
            lunch
        }
    }
}

fn baseline_field(
    input: &RawPunchInput,
    policy: &StandardPolicy,
    report: &mut ValidationReport,
) -> Minutes {
    let Some(raw) = input.baseline_hours() else {
        return policy.default_baseline;
    };

    match raw.parse::<Minutes>() {
        Ok(baseline) => baseline,
        Err(_) => {
            report.push(PunchField::BaselineHours, "Baseline hours must be in HH:MM format");
            policy.default_baseline
        }
    }
}
