//! Calculation result models for the Timesheet Engine.
//!
//! This module contains the [`StandardResult`] produced by the standard
//! calculator and the richer [`CltResult`] produced by the CLT calculator,
//! together with the per-shift [`ComplianceReport`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::time::Minutes;
use super::validation::ValidationReport;

/// The result of a standard (non-statutory) calculation.
///
/// When `is_valid` is false the duration and money fields were computed on a
/// best-effort basis and must not be persisted.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{Minutes, StandardResult, ValidationReport};
/// use rust_decimal::Decimal;
///
/// let result = StandardResult {
///     gross_total: Minutes::new(600),
///     lunch_duration: Minutes::new(60),
///     net_total: Minutes::new(540),
///     overtime_duration: Minutes::new(60),
///     overtime_pay: Decimal::new(3000, 2),
///     is_valid: true,
///     errors: vec![],
///     field_errors: ValidationReport::default(),
/// };
/// assert_eq!(result.normal_duration(), Minutes::new(480));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardResult {
    /// Time between entry and exit.
    pub gross_total: Minutes,
    /// Length of the lunch break.
    pub lunch_duration: Minutes,
    /// Gross minus lunch, never negative.
    pub net_total: Minutes,
    /// Net time beyond the baseline.
    pub overtime_duration: Minutes,
    /// Overtime pay, rounded to cents.
    pub overtime_pay: Decimal,
    /// Whether the input passed validation.
    pub is_valid: bool,
    /// Validation messages in field order.
    pub errors: Vec<String>,
    /// Validation messages keyed by field.
    pub field_errors: ValidationReport,
}

impl StandardResult {
    /// Net time that was not overtime.
    pub fn normal_duration(&self) -> Minutes {
        (self.net_total - self.overtime_duration).floor_zero()
    }
}

/// Statutory compliance findings for a single shift.
///
/// Errors make the shift non-compliant; warnings are advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// False when at least one error was recorded.
    pub compliant: bool,
    /// Advisory findings (e.g. a missing break).
    pub warnings: Vec<String>,
    /// Violations (e.g. the overtime cap was exceeded).
    pub errors: Vec<String>,
}

impl ComplianceReport {
    /// An empty, compliant report.
    pub fn new() -> Self {
        Self {
            compliant: true,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Records a violation and marks the report non-compliant.
    pub fn error(&mut self, message: impl Into<String>) {
        self.compliant = false;
        self.errors.push(message.into());
    }

    /// Records an advisory finding.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

impl Default for ComplianceReport {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a CLT calculation.
///
/// Each money component is rounded to cents before `total_pay` is summed
/// and rounded again, so `total_pay` can differ by a cent from rounding the
/// unrounded sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CltResult {
    /// Time between entry and exit.
    pub gross_duration: Minutes,
    /// Length of the lunch break.
    pub lunch_duration: Minutes,
    /// Worked minutes paid at the normal rate (at most the normal workday).
    pub normal_duration: Minutes,
    /// Worked minutes paid as overtime, after the daily cap.
    pub overtime_duration: Minutes,
    /// Normal plus overtime.
    pub total_duration: Minutes,
    /// Minutes worked inside the night window.
    pub night_shift_duration: Minutes,
    /// Night minutes expressed in legal (reduced) hours.
    pub night_paid_duration: Minutes,
    /// Pay for normal minutes.
    pub normal_pay: Decimal,
    /// Pay for overtime minutes, premium included.
    pub overtime_pay: Decimal,
    /// Night premium.
    pub night_shift_premium: Decimal,
    /// Normal pay plus overtime pay plus night premium.
    pub total_pay: Decimal,
    /// Overtime premium applied, in percent (0 when none was paid).
    pub overtime_rate_percent: Decimal,
    /// Night premium applied, in percent (0 when none was paid).
    pub night_premium_percent: Decimal,
    /// Whether the Sunday/holiday overtime rate was selected.
    pub is_sunday_or_holiday: bool,
    /// Statutory findings.
    pub compliance_report: ComplianceReport,
}
