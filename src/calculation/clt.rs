//! The CLT (Brazilian labor law) calculator.
//!
//! Splits worked time into normal and capped overtime, prices overtime with
//! the ordinary or Sunday/holiday premium, computes the night premium on the
//! reduced legal night hour, and reports statutory findings.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::{CltPolicy, StandardPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{ClockTime, CltResult, ComplianceReport, Minutes, Punch, RawPunchInput};

use super::time_arithmetic::{
    clock_span, elapsed, excess_over, night_minutes, pay_for, round_currency, subtract_lunch,
};
use super::validation::parse_punch;

/// Worked time split into normal and overtime portions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkedHoursSplit {
    /// Gross minus lunch.
    pub worked: Minutes,
    /// Up to the normal workday.
    pub normal: Minutes,
    /// Overtime after the daily cap.
    pub overtime: Minutes,
    /// Overtime before the daily cap.
    pub raw_overtime: Minutes,
}

impl WorkedHoursSplit {
    /// Normal plus capped overtime.
    pub fn total(&self) -> Minutes {
        self.normal + self.overtime
    }
}

/// Night work and its premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightPremium {
    /// Clock minutes inside the night window.
    pub minutes: Minutes,
    /// The same time counted in legal night hours.
    pub paid_duration: Minutes,
    /// Premium amount, rounded to cents.
    pub premium: Decimal,
    /// Premium rate in percent, 0 when nothing was paid.
    pub percent: Decimal,
}

/// Outcome of the rest-between-shifts check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestIntervalCheck {
    /// Rest between the previous exit and the current entry.
    pub interval: Minutes,
    /// Whether the rest meets the minimum.
    pub compliant: bool,
    /// The statutory minimum.
    pub minimum: Minutes,
    /// Human-readable outcome.
    pub message: String,
}

/// Calculator for the CLT mode.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::CltCalculator;
/// use timesheet_engine::models::RawPunchInput;
/// use rust_decimal::Decimal;
///
/// let calculator = CltCalculator::default();
/// let input = RawPunchInput::new("2025-03-10", "23:00", "2025-03-11", "07:00")
///     .with_hourly_rate(Decimal::new(10, 0));
///
/// let result = calculator.calculate_total(&input).unwrap();
/// assert_eq!(result.night_shift_duration.get(), 360);
/// assert_eq!(result.night_shift_premium, Decimal::new(1371, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CltCalculator {
    policy: CltPolicy,
    validation: StandardPolicy,
}

impl CltCalculator {
    /// Creates a calculator with the given statutory policy.
    pub fn new(policy: CltPolicy) -> Self {
        Self {
            policy,
            validation: StandardPolicy::default(),
        }
    }

    /// Uses `validation` for input checks (span limit and default baseline).
    pub fn with_validation(mut self, validation: StandardPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// The statutory policy in use.
    pub fn policy(&self) -> &CltPolicy {
        &self.policy
    }

    /// Computes the full CLT result for one punch.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPunch`] when the input fails validation
    /// - [`EngineError::DailySpanExceeded`] when normal plus capped overtime
    ///   exceeds the daily maximum
    pub fn calculate_total(&self, input: &RawPunchInput) -> EngineResult<CltResult> {
        let punch = parse_punch(input, &self.validation)?;
        self.calculate_punch(&punch)
    }

    /// Computes the full CLT result for an already parsed punch.
    pub fn calculate_punch(&self, punch: &Punch) -> EngineResult<CltResult> {
        let gross = elapsed(
            punch.entry_date,
            punch.entry_time,
            punch.exit_date,
            punch.exit_time,
        );
        let split = self.split_worked_hours(subtract_lunch(gross, punch.lunch_duration()));

        if split.total() > self.policy.max_daily_span {
            return Err(EngineError::DailySpanExceeded {
                limit_hours: self.policy.max_daily_span.get() / 60,
                total_minutes: split.total().get(),
            });
        }

        let rate = punch.hourly_rate;
        let night = self.night_premium(punch.entry_time, gross, rate);
        let (overtime_pay, overtime_rate_percent) =
            self.overtime_value(split.overtime, rate, punch.is_sunday_or_holiday);
        let normal_pay = if rate > Decimal::ZERO {
            pay_for(split.normal, rate, Decimal::ONE)
        } else {
            Decimal::ZERO
        };

        Ok(CltResult {
            gross_duration: gross,
            lunch_duration: punch.lunch_duration(),
            normal_duration: split.normal,
            overtime_duration: split.overtime,
            total_duration: split.total(),
            night_shift_duration: night.minutes,
            night_paid_duration: night.paid_duration,
            normal_pay,
            overtime_pay,
            night_shift_premium: night.premium,
            total_pay: round_currency(normal_pay + overtime_pay + night.premium),
            overtime_rate_percent,
            night_premium_percent: night.percent,
            is_sunday_or_holiday: punch.is_sunday_or_holiday,
            compliance_report: self.check_compliance(&split, punch.lunch_duration()),
        })
    }

    /// Splits worked time at the normal workday and caps the overtime.
    pub fn split_worked_hours(&self, worked: Minutes) -> WorkedHoursSplit {
        let normal = worked.min(self.policy.normal_workday);
        let raw_overtime = excess_over(worked, self.policy.normal_workday);

        WorkedHoursSplit {
            worked,
            normal,
            overtime: raw_overtime.min(self.policy.daily_overtime_cap),
            raw_overtime,
        }
    }

    /// Night minutes of a shift starting at `entry` and lasting `span`, and
    /// the premium they earn at `hourly_rate`.
    pub fn night_premium(&self, entry: ClockTime, span: Minutes, hourly_rate: Decimal) -> NightPremium {
        let minutes = night_minutes(entry, span, self.policy.night_window);
        let legal_hour = self.policy.legal_night_hour_minutes;

        let paid_duration = Minutes::new(
            (Decimal::from(minutes.get()) * Decimal::from(60) / legal_hour)
                .round()
                .to_i64()
                .unwrap_or_default(),
        );

        if minutes <= Minutes::ZERO || hourly_rate <= Decimal::ZERO {
            return NightPremium {
                minutes,
                paid_duration,
                premium: Decimal::ZERO,
                percent: Decimal::ZERO,
            };
        }

        NightPremium {
            minutes,
            paid_duration,
            premium: round_currency(
                Decimal::from(minutes.get()) * hourly_rate * self.policy.night_premium / legal_hour,
            ),
            percent: self.policy.night_premium * Decimal::ONE_HUNDRED,
        }
    }

    /// Overtime pay and the premium percent applied.
    pub fn overtime_value(
        &self,
        overtime: Minutes,
        hourly_rate: Decimal,
        is_sunday_or_holiday: bool,
    ) -> (Decimal, Decimal) {
        if overtime <= Minutes::ZERO || hourly_rate <= Decimal::ZERO {
            return (Decimal::ZERO, Decimal::ZERO);
        }

        let premium = if is_sunday_or_holiday {
            self.policy.sunday_holiday_premium
        } else {
            self.policy.overtime_premium
        };

        (
            pay_for(overtime, hourly_rate, Decimal::ONE + premium),
            premium * Decimal::ONE_HUNDRED,
        )
    }

    /// Statutory findings for a split and the break actually taken.
    ///
    /// Limits are checked against the uncapped overtime.
    pub fn check_compliance(&self, split: &WorkedHoursSplit, break_taken: Minutes) -> ComplianceReport {
        let mut report = ComplianceReport::new();

        if split.raw_overtime > self.policy.daily_overtime_cap {
            report.error(format!(
                "Overtime of {} exceeds the daily limit of {} (CLT Art. 59)",
                split.raw_overtime,
                describe(self.policy.daily_overtime_cap)
            ));
        }

        let workday = split.normal + split.raw_overtime;
        if workday > self.policy.max_daily_span {
            report.error(format!(
                "Workday of {} exceeds the daily limit of {}",
                workday,
                describe(self.policy.max_daily_span)
            ));
        }

        // Only a missing break is reported; a short one is accepted.
        if break_taken <= Minutes::ZERO {
            for rule in self.policy.break_rules.iter().filter(|r| r.applies_to(split.worked)) {
                report.warn(format!(
                    "Workday over {} requires a minimum break of {} ({})",
                    describe(rule.worked_over),
                    describe(rule.minimum_break),
                    rule.clause
                ));
            }
        }

        report
    }

    /// Rest between a previous exit and the current entry, on the clock only.
    ///
    /// An entry earlier on the dial than the exit is taken as the next day.
    pub fn check_rest_between_shifts(
        &self,
        previous_exit: ClockTime,
        current_entry: ClockTime,
    ) -> RestIntervalCheck {
        let interval = clock_span(previous_exit, current_entry);
        let minimum = self.policy.min_rest_between_shifts;
        let compliant = interval >= minimum;

        let message = if compliant {
            format!("Rest of {} meets the {} minimum", interval, describe(minimum))
        } else {
            format!(
                "Rest of {} is below the {} minimum between workdays (CLT Art. 66)",
                interval,
                describe(minimum)
            )
        };

        RestIntervalCheck {
            interval,
            compliant,
            minimum,
            message,
        }
    }
}

/// Short human form of a duration: `6h`, `15min`, `1h30`.
fn describe(duration: Minutes) -> String {
    let total = duration.get().max(0);
    match (total / 60, total % 60) {
        (0, m) => format!("{m}min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m:02}"),
    }
}
