//! Configuration types for time accounting.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from YAML configuration files. Every field has a default
//! equal to the statutory value, so a partial file only overrides what it
//! names.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{HolidayCalendar, Minutes, NightWindow, PublicHoliday};

/// Policy for the standard (non-statutory) calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardPolicy {
    /// Normal workday length used when a punch gives no baseline.
    pub default_baseline: Minutes,
    /// Multiplier applied to the hourly rate for overtime (1.5 = 50% extra).
    pub overtime_multiplier: Decimal,
    /// Longest accepted time between entry and exit.
    pub max_shift_span: Minutes,
    /// Window used by night shift detection.
    pub night_window: NightWindow,
    /// Minimum rest between two shifts.
    pub min_rest_between_shifts: Minutes,
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self {
            default_baseline: Minutes::from_hours(8),
            overtime_multiplier: Decimal::new(15, 1),
            max_shift_span: Minutes::from_hours(24),
            night_window: NightWindow::default(),
            min_rest_between_shifts: Minutes::from_hours(11),
        }
    }
}

/// A mandatory break requirement for shifts in a worked-time band.
///
/// The band is `(worked_over, worked_up_to]`; an open upper bound covers
/// every longer shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakRule {
    /// Lower bound of the band (exclusive).
    pub worked_over: Minutes,
    /// Upper bound of the band (inclusive), open when absent.
    #[serde(default)]
    pub worked_up_to: Option<Minutes>,
    /// Shortest break that satisfies the rule.
    pub minimum_break: Minutes,
    /// Legal reference quoted in warnings.
    pub clause: String,
}

impl BreakRule {
    /// True when a shift of `worked` minutes falls in this rule's band.
    pub fn applies_to(&self, worked: Minutes) -> bool {
        worked > self.worked_over && self.worked_up_to.is_none_or(|upper| worked <= upper)
    }
}

/// Policy for the CLT calculator.
///
/// # Example
///
/// ```
/// use timesheet_engine::config::CltPolicy;
///
/// let policy = CltPolicy::default();
/// assert_eq!(policy.normal_workday.get(), 480);
/// assert_eq!(policy.daily_overtime_cap.get(), 120);
/// assert_eq!(policy.max_daily_span.get(), 600);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CltPolicy {
    /// Normal workday length (Art. 58).
    pub normal_workday: Minutes,
    /// Most overtime payable in one day (Art. 59).
    pub daily_overtime_cap: Minutes,
    /// Most normal plus overtime time in one day.
    pub max_daily_span: Minutes,
    /// Overtime premium on ordinary days, as a fraction (0.50 = 50%).
    pub overtime_premium: Decimal,
    /// Overtime premium on Sundays and holidays.
    pub sunday_holiday_premium: Decimal,
    /// Night premium, as a fraction (Art. 73).
    pub night_premium: Decimal,
    /// The night window.
    pub night_window: NightWindow,
    /// Minutes in one legal night hour (Art. 73 §1).
    pub legal_night_hour_minutes: Decimal,
    /// Minimum rest between two workdays (Art. 66).
    pub min_rest_between_shifts: Minutes,
    /// Mandatory intra-shift breaks (Art. 71).
    pub break_rules: Vec<BreakRule>,
}

impl Default for CltPolicy {
    fn default() -> Self {
        Self {
            normal_workday: Minutes::from_hours(8),
            daily_overtime_cap: Minutes::from_hours(2),
            max_daily_span: Minutes::from_hours(10),
            overtime_premium: Decimal::new(50, 2),
            sunday_holiday_premium: Decimal::new(100, 2),
            night_premium: Decimal::new(20, 2),
            night_window: NightWindow::default(),
            legal_night_hour_minutes: Decimal::new(525, 1),
            min_rest_between_shifts: Minutes::from_hours(11),
            break_rules: vec![
                BreakRule {
                    worked_over: Minutes::from_hours(6),
                    worked_up_to: None,
                    minimum_break: Minutes::from_hours(1),
                    clause: "CLT Art. 71".to_string(),
                },
                BreakRule {
                    worked_over: Minutes::from_hours(4),
                    worked_up_to: Some(Minutes::from_hours(6)),
                    minimum_break: Minutes::new(15),
                    clause: "CLT Art. 71 §1".to_string(),
                },
            ],
        }
    }
}

/// One holiday file, e.g. `holidays/2025.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayFile {
    /// The operational year the file covers.
    pub year: i32,
    /// The holidays of that year.
    pub holidays: Vec<PublicHoliday>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Standard calculator policy.
    standard: StandardPolicy,
    /// CLT calculator policy.
    clt: CltPolicy,
    /// Holidays from every loaded year.
    holidays: HolidayCalendar,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(standard: StandardPolicy, clt: CltPolicy, holidays: HolidayCalendar) -> Self {
        Self {
            standard,
            clt,
            holidays,
        }
    }

    /// Returns the standard calculator policy.
    pub fn standard(&self) -> &StandardPolicy {
        &self.standard
    }

    /// Returns the CLT calculator policy.
    pub fn clt(&self) -> &CltPolicy {
        &self.clt
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_rule_bands() {
        let rules = CltPolicy::default().break_rules;
        let long = &rules[0];
        let short = &rules[1];

        assert!(!long.applies_to(Minutes::new(360)));
        assert!(long.applies_to(Minutes::new(361)));
        assert!(!short.applies_to(Minutes::new(240)));
        assert!(short.applies_to(Minutes::new(241)));
        assert!(short.applies_to(Minutes::new(360)));
        assert!(!short.applies_to(Minutes::new(361)));
    }

    #[test]
    fn test_partial_yaml_keeps_statutory_defaults() {
        let policy: CltPolicy = serde_yaml::from_str("normal_workday: \"07:20\"\n").unwrap();
        assert_eq!(policy.normal_workday, Minutes::new(440));
        assert_eq!(policy.daily_overtime_cap, Minutes::new(120));
        assert_eq!(policy.legal_night_hour_minutes, Decimal::new(525, 1));
        assert_eq!(policy.break_rules.len(), 2);
    }

    #[test]
    fn test_standard_policy_defaults() {
        let policy = StandardPolicy::default();
        assert_eq!(policy.default_baseline, Minutes::new(480));
        assert_eq!(policy.overtime_multiplier, Decimal::new(15, 1));
        assert_eq!(policy.min_rest_between_shifts, Minutes::new(660));
    }
}
