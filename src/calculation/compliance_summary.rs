//! Compliance summary over stored records.
//!
//! Re-runs the CLT calculator on every record and aggregates the findings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{HolidayCalendar, Minutes, TimesheetRecord, parse_date};

use super::clt::CltCalculator;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// A statutory violation.
    Error,
    /// An advisory finding.
    Warning,
}

/// One finding, tied to the record it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// 1-based position of the record in the input.
    pub record: usize,
    /// Entry date of the record as stored.
    pub date: String,
    /// Severity.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub description: String,
}

/// Overtime and night totals over all records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatistics {
    /// Sum of capped overtime.
    pub total_overtime_time: Minutes,
    /// Sum of overtime pay.
    pub total_overtime_value: Decimal,
    /// Sum of night minutes.
    pub total_night_time: Minutes,
    /// Sum of night premiums.
    pub total_night_premium: Decimal,
    /// Records with paid overtime.
    pub days_with_overtime: usize,
    /// Records with a paid night premium.
    pub days_with_night_work: usize,
}

/// Compliance findings aggregated over a list of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    /// Records examined.
    pub total_records: usize,
    /// Records with no findings.
    pub compliant: usize,
    /// Records with warnings only.
    pub with_warnings: usize,
    /// Records with at least one error, including records that could not
    /// be calculated.
    pub with_errors: usize,
    /// Every finding, in record order.
    pub violations: Vec<Violation>,
    /// Overtime and night totals.
    pub statistics: ComplianceStatistics,
}

/// Runs the CLT calculator over `records` and summarises the findings.
///
/// A record without an explicit Sunday/holiday flag is looked up in
/// `calendar` by entry date.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{CltCalculator, generate_compliance_report};
/// use timesheet_engine::models::{HolidayCalendar, RawPunchInput, RecordTotals, TimesheetRecord};
///
/// let records = vec![TimesheetRecord::new(
///     RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "15:00"),
///     RecordTotals::default(),
/// )];
///
/// let summary = generate_compliance_report(
///     &records,
///     &CltCalculator::default(),
///     &HolidayCalendar::default(),
/// );
/// assert_eq!(summary.with_warnings, 1);
/// assert_eq!(summary.violations[0].record, 1);
/// ```
pub fn generate_compliance_report(
    records: &[TimesheetRecord],
    calculator: &CltCalculator,
    calendar: &HolidayCalendar,
) -> ComplianceSummary {
    let mut summary = ComplianceSummary {
        total_records: records.len(),
        ..ComplianceSummary::default()
    };

    for (index, record) in records.iter().enumerate() {
        let position = index + 1;
        let date = record.punch.entry_date.clone();

        let mut input = record.punch.clone();
        if input.is_sunday_or_holiday.is_none() {
            let flag = parse_date(&input.entry_date)
                .map(|d| calendar.is_sunday_or_holiday(d))
                .unwrap_or(false);
            input.is_sunday_or_holiday = Some(flag);
        }

        let result = match calculator.calculate_total(&input) {
            Ok(result) => result,
            Err(err) => {
                debug!(record = position, error = %err, "Record could not be calculated");
                summary.with_errors += 1;
                summary.violations.push(Violation {
                    record: position,
                    date,
                    kind: ViolationKind::Error,
                    description: err.to_string(),
                });
                continue;
            }
        };

        let report = &result.compliance_report;
        if !report.errors.is_empty() {
            summary.with_errors += 1;
        } else if !report.warnings.is_empty() {
            summary.with_warnings += 1;
        } else {
            summary.compliant += 1;
        }

        let findings = report
            .errors
            .iter()
            .map(|e| (ViolationKind::Error, e))
            .chain(report.warnings.iter().map(|w| (ViolationKind::Warning, w)));
        for (kind, description) in findings {
            summary.violations.push(Violation {
                record: position,
                date: date.clone(),
                kind,
                description: description.clone(),
            });
        }

        let stats = &mut summary.statistics;
        stats.total_overtime_time += result.overtime_duration;
        stats.total_night_time += result.night_shift_duration;
        if result.overtime_pay > Decimal::ZERO {
            stats.days_with_overtime += 1;
            stats.total_overtime_value += result.overtime_pay;
        }
        if result.night_shift_premium > Decimal::ZERO {
            stats.days_with_night_work += 1;
            stats.total_night_premium += result.night_shift_premium;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PublicHoliday, RawPunchInput, RecordTotals};
    use chrono::NaiveDate;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn record(input: RawPunchInput) -> TimesheetRecord {
        TimesheetRecord::new(input, RecordTotals::default())
    }

    fn summarise(records: &[TimesheetRecord], calendar: &HolidayCalendar) -> ComplianceSummary {
        generate_compliance_report(records, &CltCalculator::default(), calendar)
    }

    #[test]
    fn test_counts_each_category() {
        let records = vec![
            // compliant
            record(
                RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "17:00")
                    .with_lunch("12:00", "13:00"),
            ),
            // warning: no break
            record(RawPunchInput::new("2025-03-11", "08:00", "2025-03-11", "15:00")),
            // error: overtime over the cap
            record(
                RawPunchInput::new("2025-03-12", "07:00", "2025-03-12", "19:00")
                    .with_lunch("12:00", "13:00"),
            ),
            // invalid input
            record(RawPunchInput::new("2025-03-13", "8h", "2025-03-13", "17:00")),
        ];

        let summary = summarise(&records, &HolidayCalendar::default());

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.compliant, 1);
        assert_eq!(summary.with_warnings, 1);
        assert_eq!(summary.with_errors, 2);

        let positions: Vec<usize> = summary.violations.iter().map(|v| v.record).collect();
        assert_eq!(positions, vec![2, 3, 3, 4]);
        assert_eq!(summary.violations[0].kind, ViolationKind::Warning);
        assert_eq!(summary.violations[1].kind, ViolationKind::Error);
        assert_eq!(summary.violations[3].date, "2025-03-13");
    }

    #[test]
    fn test_errors_outrank_warnings_on_one_record() {
        // 11h without a break: over the overtime cap and missing the break
        let records = vec![record(RawPunchInput::new(
            "2025-03-10",
            "07:00",
            "2025-03-10",
            "18:00",
        ))];

        let summary = summarise(&records, &HolidayCalendar::default());

        assert_eq!(summary.with_errors, 1);
        assert_eq!(summary.with_warnings, 0);
        assert_eq!(summary.compliant, 0);

        let kinds: Vec<ViolationKind> = summary.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::Error, ViolationKind::Error, ViolationKind::Warning]
        );
    }

    #[test]
    fn test_statistics_sum_paid_components() {
        let records = vec![
            record(
                RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "19:00")
                    .with_lunch("12:00", "13:00")
                    .with_hourly_rate(dec("20")),
            ),
            record(
                RawPunchInput::new("2025-03-11", "23:00", "2025-03-12", "07:00")
                    .with_hourly_rate(dec("10")),
            ),
        ];

        let stats = summarise(&records, &HolidayCalendar::default()).statistics;

        assert_eq!(stats.days_with_overtime, 1);
        assert_eq!(stats.total_overtime_value, dec("60.00"));
        assert_eq!(stats.total_overtime_time, Minutes::new(120));
        assert_eq!(stats.days_with_night_work, 1);
        assert_eq!(stats.total_night_premium, dec("13.71"));
        assert_eq!(stats.total_night_time, Minutes::new(360));
    }

    #[test]
    fn test_holiday_from_calendar_raises_overtime_rate() {
        let calendar = HolidayCalendar::new(vec![PublicHoliday {
            date: NaiveDate::from_ymd_opt(2025, 4, 21).unwrap(),
            name: "Tiradentes".to_string(),
            region: "national".to_string(),
        }]);
        let records = vec![record(
            RawPunchInput::new("2025-04-21", "08:00", "2025-04-21", "19:00")
                .with_lunch("12:00", "13:00")
                .with_hourly_rate(dec("20")),
        )];

        let stats = summarise(&records, &calendar).statistics;
        assert_eq!(stats.total_overtime_value, dec("80.00"));
    }

    #[test]
    fn test_explicit_flag_wins_over_calendar() {
        // 2025-03-09 is a Sunday
        let records = vec![record(
            RawPunchInput::new("2025-03-09", "08:00", "2025-03-09", "19:00")
                .with_lunch("12:00", "13:00")
                .with_hourly_rate(dec("20"))
                .with_sunday_or_holiday(false),
        )];

        let stats = summarise(&records, &HolidayCalendar::default()).statistics;
        assert_eq!(stats.total_overtime_value, dec("60.00"));
    }

    #[test]
    fn test_empty_input() {
        let summary = summarise(&[], &HolidayCalendar::default());
        assert_eq!(summary.total_records, 0);
        assert!(summary.violations.is_empty());
    }
}
