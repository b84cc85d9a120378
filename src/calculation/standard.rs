//! The standard (non-statutory) calculator.
//!
//! Computes gross, lunch, net and overtime for one punch, aggregates stored
//! records over a date range, and checks the rest gap between shifts.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::StandardPolicy;
use crate::models::{
    ClockTime, MINUTES_PER_DAY, Minutes, RawPunchInput, StandardResult, TimesheetRecord,
    parse_date,
};

use super::time_arithmetic::{
    average_minutes, clock_span, daily_night_minutes, excess_over, pay_for, round_currency,
    subtract_lunch,
};
use super::validation::inspect_punch;

/// Aggregated totals over the records of a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    /// Records whose entry date is in range.
    pub total_records: usize,
    /// Distinct entry dates among them.
    pub total_days: usize,
    /// Sum of net worked time.
    pub total_worked_time: Minutes,
    /// Sum of overtime.
    pub total_overtime_time: Minutes,
    /// Sum of overtime pay.
    pub total_overtime_value: Decimal,
    /// Net worked time per distinct day, rounded to the minute.
    pub average_hours_per_day: Minutes,
}

/// Rest between the end of one shift and the start of the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftGap {
    /// The rest interval.
    pub gap: Minutes,
    /// The rest interval in hours, rounded to two decimals.
    pub gap_hours: Decimal,
    /// Whether the interval meets the minimum rest.
    pub is_legal: bool,
}

/// Calculator for the standard mode.
///
/// Holds only its policy; every method is pure.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::StandardCalculator;
/// use timesheet_engine::models::RawPunchInput;
/// use rust_decimal::Decimal;
///
/// let calculator = StandardCalculator::default();
/// let input = RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "19:00")
///     .with_lunch("12:00", "13:00")
///     .with_hourly_rate(Decimal::new(20, 0));
///
/// let result = calculator.calculate_all(&input);
/// assert!(result.is_valid);
/// assert_eq!(result.net_total.to_string(), "10:00");
/// assert_eq!(result.overtime_duration.to_string(), "02:00");
/// assert_eq!(result.overtime_pay, Decimal::new(6000, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StandardCalculator {
    policy: StandardPolicy,
}

impl StandardCalculator {
    /// Creates a calculator with the given policy.
    pub fn new(policy: StandardPolicy) -> Self {
        Self { policy }
    }

    /// The policy in use.
    pub fn policy(&self) -> &StandardPolicy {
        &self.policy
    }

    /// Computes all totals for one punch.
    ///
    /// Never fails: invalid input yields `is_valid == false` with messages,
    /// and the numeric fields are computed from whatever did parse.
    pub fn calculate_all(&self, input: &RawPunchInput) -> StandardResult {
        let inspection = inspect_punch(input, &self.policy);

        let lunch_duration = inspection
            .lunch
            .map_or(Minutes::ZERO, |lunch| lunch.duration());
        let net_total = subtract_lunch(inspection.gross, lunch_duration);
        let overtime_duration = excess_over(net_total, inspection.baseline);

        let overtime_pay = if inspection.hourly_rate > Decimal::ZERO {
            pay_for(
                overtime_duration,
                inspection.hourly_rate,
                self.policy.overtime_multiplier,
            )
        } else {
            Decimal::ZERO
        };

        StandardResult {
            gross_total: inspection.gross,
            lunch_duration,
            net_total,
            overtime_duration,
            overtime_pay,
            is_valid: inspection.report.is_valid(),
            errors: inspection.report.messages(),
            field_errors: inspection.report,
        }
    }

    /// Aggregates stored records whose entry date is in `[start, end]`.
    ///
    /// Records with an unparsable entry date are skipped.
    pub fn calculate_period_stats(
        &self,
        records: &[TimesheetRecord],
        start: NaiveDate,
        end: NaiveDate,
    ) -> PeriodStats {
        let mut days = BTreeSet::new();
        let mut total_records = 0;
        let mut total_worked_time = Minutes::ZERO;
        let mut total_overtime_time = Minutes::ZERO;
        let mut total_overtime_value = Decimal::ZERO;

        for record in records {
            let date = match parse_date(&record.punch.entry_date) {
                Ok(date) => date,
                Err(err) => {
                    warn!(record_id = %record.id, error = %err, "Skipping record with bad entry date");
                    continue;
                }
            };
            if date < start || date > end {
                continue;
            }

            total_records += 1;
            days.insert(date);
            total_worked_time += record.totals.net_total;
            total_overtime_time += record.totals.overtime_duration;
            total_overtime_value += record.totals.overtime_pay;
        }

        PeriodStats {
            total_records,
            total_days: days.len(),
            total_worked_time,
            total_overtime_time,
            total_overtime_value: round_currency(total_overtime_value),
            average_hours_per_day: average_minutes(total_worked_time, days.len()),
        }
    }

    /// True when `[start, end)` touches the night window.
    ///
    /// `end` before `start` wraps past midnight; equal times are an empty
    /// interval.
    pub fn is_night_shift(&self, start: ClockTime, end: ClockTime) -> bool {
        daily_night_minutes(start, clock_span(start, end), self.policy.night_window) > Minutes::ZERO
    }

    /// Rest between a previous exit and the current entry.
    ///
    /// Returns `None` when a boundary is missing or unparsable, or when the
    /// current entry is not strictly after the previous exit.
    pub fn calculate_shift_gap(
        &self,
        prev_exit_date: &str,
        prev_exit_time: &str,
        curr_entry_date: &str,
        curr_entry_time: &str,
    ) -> Option<ShiftGap> {
        let prev_date = parse_date(prev_exit_date).ok()?;
        let prev_time = prev_exit_time.parse::<ClockTime>().ok()?;
        let curr_date = parse_date(curr_entry_date).ok()?;
        let curr_time = curr_entry_time.parse::<ClockTime>().ok()?;

        let gap = Minutes::new(
            (curr_date - prev_date).num_days() * MINUTES_PER_DAY
                + curr_time.minutes_since_midnight()
                - prev_time.minutes_since_midnight(),
        );
        if gap <= Minutes::ZERO {
            return None;
        }

        Some(ShiftGap {
            gap,
            gap_hours: gap.as_hours().round_dp(2),
            is_legal: gap >= self.policy.min_rest_between_shifts,
        })
    }
}
