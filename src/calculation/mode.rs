//! Mode selection between the standard and CLT calculators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    CltResult, ComplianceReport, HolidayCalendar, Minutes, RawPunchInput, RecordTotals,
    StandardResult, TimesheetRecord, parse_date,
};

use super::clt::CltCalculator;
use super::standard::StandardCalculator;

/// Which calculator to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Gross/net/overtime at 1.5×.
    #[default]
    Standard,
    /// Brazilian labor law rules.
    Clt,
}

/// The result of either calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModeOutcome {
    /// Standard mode result.
    Standard(StandardResult),
    /// CLT mode result.
    Clt(CltResult),
}

/// Display fields shared by both modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySummary {
    /// The mode that produced the figures.
    pub mode: CalculationMode,
    /// Time paid at the normal rate.
    pub normal: Minutes,
    /// Overtime.
    pub overtime: Minutes,
    /// Overtime pay.
    pub overtime_pay: Decimal,
    /// Total pay (CLT only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pay: Option<Decimal>,
    /// Night time (CLT only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_shift: Option<Minutes>,
    /// Night premium (CLT only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_shift_premium: Option<Decimal>,
    /// Statutory findings (CLT only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceReport>,
}

impl ModeOutcome {
    /// The mode that produced this outcome.
    pub fn mode(&self) -> CalculationMode {
        match self {
            ModeOutcome::Standard(_) => CalculationMode::Standard,
            ModeOutcome::Clt(_) => CalculationMode::Clt,
        }
    }

    /// Maps either result onto the common display fields.
    pub fn summary(&self) -> DisplaySummary {
        match self {
            ModeOutcome::Standard(result) => DisplaySummary {
                mode: CalculationMode::Standard,
                normal: result.normal_duration(),
                overtime: result.overtime_duration,
                overtime_pay: result.overtime_pay,
                total_pay: None,
                night_shift: None,
                night_shift_premium: None,
                compliance: None,
            },
            ModeOutcome::Clt(result) => DisplaySummary {
                mode: CalculationMode::Clt,
                normal: result.normal_duration,
                overtime: result.overtime_duration,
                overtime_pay: result.overtime_pay,
                total_pay: Some(result.total_pay),
                night_shift: Some(result.night_shift_duration),
                night_shift_premium: Some(result.night_shift_premium),
                compliance: Some(result.compliance_report.clone()),
            },
        }
    }

    /// The totals to persist alongside the punch.
    pub fn totals(&self) -> RecordTotals {
        match self {
            ModeOutcome::Standard(result) => RecordTotals {
                gross_total: result.gross_total,
                lunch_duration: result.lunch_duration,
                net_total: result.net_total,
                overtime_duration: result.overtime_duration,
                overtime_pay: result.overtime_pay,
                ..RecordTotals::default()
            },
            ModeOutcome::Clt(result) => RecordTotals {
                gross_total: result.gross_duration,
                lunch_duration: result.lunch_duration,
                net_total: result.total_duration,
                overtime_duration: result.overtime_duration,
                overtime_pay: result.overtime_pay,
                clt_mode: true,
                night_shift_duration: Some(result.night_shift_duration),
                night_shift_premium: Some(result.night_shift_premium),
                total_pay: Some(result.total_pay),
            },
        }
    }

    /// Merges the punch and this outcome into a storable record.
    pub fn into_record(self, punch: RawPunchInput) -> TimesheetRecord {
        TimesheetRecord::new(punch, self.totals())
    }
}

/// Both calculators plus the holiday calendar, behind one entry point.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{CalculationMode, TimesheetEngine};
/// use timesheet_engine::models::RawPunchInput;
///
/// let engine = TimesheetEngine::default();
/// let input = RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "18:00");
///
/// let outcome = engine.calculate(CalculationMode::Clt, &input).unwrap();
/// assert_eq!(outcome.summary().overtime.to_string(), "02:00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimesheetEngine {
    standard: StandardCalculator,
    clt: CltCalculator,
    calendar: HolidayCalendar,
}

impl TimesheetEngine {
    /// Builds an engine from loaded configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            standard: StandardCalculator::new(config.standard().clone()),
            clt: CltCalculator::new(config.clt().clone())
                .with_validation(config.standard().clone()),
            calendar: config.holidays().clone(),
        }
    }

    /// The standard calculator.
    pub fn standard(&self) -> &StandardCalculator {
        &self.standard
    }

    /// The CLT calculator.
    pub fn clt(&self) -> &CltCalculator {
        &self.clt
    }

    /// The holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Runs the calculator selected by `mode`.
    ///
    /// In CLT mode an unset Sunday/holiday flag is resolved from the entry
    /// date and the calendar.
    ///
    /// # Errors
    ///
    /// Only CLT mode fails; see [`CltCalculator::calculate_total`].
    pub fn calculate(&self, mode: CalculationMode, input: &RawPunchInput) -> EngineResult<ModeOutcome> {
        match mode {
            CalculationMode::Standard => Ok(ModeOutcome::Standard(self.standard.calculate_all(input))),
            CalculationMode::Clt => {
                let input = self.resolve_sunday_or_holiday(input);
                self.clt.calculate_total(&input).map(ModeOutcome::Clt)
            }
        }
    }

    /// Fills an unset Sunday/holiday flag from the calendar.
    ///
    /// An unparsable entry date leaves the flag unset for validation to report.
    pub fn resolve_sunday_or_holiday(&self, input: &RawPunchInput) -> RawPunchInput {
        let mut input = input.clone();
        if input.is_sunday_or_holiday.is_none() {
            input.is_sunday_or_holiday = parse_date(&input.entry_date)
                .ok()
                .map(|date| self.calendar.is_sunday_or_holiday(date));
        }
        input
    }
}
