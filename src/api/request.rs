//! Request types for the Timesheet Engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::CalculationMode;
use crate::models::{ClockTime, RawPunchInput, TimesheetRecord};

/// Request body for `/api/calculate` and `POST /api/records`.
///
/// The punch fields sit at the top level next to `mode`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Calculator to run, `standard` when absent.
    #[serde(default)]
    pub mode: CalculationMode,
    /// Owner of the record (stored, not used in calculation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// The punch.
    #[serde(flatten)]
    pub punch: RawPunchInput,
}

/// Request body for `/api/shift-gap`.
///
/// Every field is optional on the wire; a missing one yields a `null` gap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShiftGapRequest {
    /// Exit date of the previous shift.
    pub prev_exit_date: String,
    /// Exit time of the previous shift.
    pub prev_exit_time: String,
    /// Entry date of the current shift.
    pub curr_entry_date: String,
    /// Entry time of the current shift.
    pub curr_entry_time: String,
}

/// Request body for `/api/rest-check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestCheckRequest {
    /// Exit time of the previous shift.
    pub previous_exit: ClockTime,
    /// Entry time of the current shift.
    pub current_entry: ClockTime,
}

/// Request body for `/api/night-shift`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightShiftRequest {
    /// Interval start.
    pub start: ClockTime,
    /// Interval end, before `start` when crossing midnight.
    pub end: ClockTime,
}

/// Request body for `/api/period-stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStatsRequest {
    /// Stored records to aggregate.
    pub records: Vec<TimesheetRecord>,
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
}

/// Query string for `/api/records/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
}

/// Request body for `/api/compliance-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReportRequest {
    /// Stored records to examine.
    pub records: Vec<TimesheetRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_request_flattens_punch() {
        let json = r#"{
            "mode": "clt",
            "entryDate": "2025-03-10",
            "entryTime": "23:00",
            "exitDate": "2025-03-11",
            "exitTime": "07:00",
            "hourlyRate": 10
        }"#;
        let request: CalculateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.mode, CalculationMode::Clt);
        assert_eq!(request.punch.exit_time, "07:00");
        assert!(request.user_id.is_none());
    }

    #[test]
    fn test_mode_defaults_to_standard() {
        let json = r#"{"entryDate":"2025-03-10","entryTime":"08:00",
            "exitDate":"2025-03-10","exitTime":"17:00"}"#;
        let request: CalculateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.mode, CalculationMode::Standard);
    }

    #[test]
    fn test_shift_gap_request_tolerates_missing_fields() {
        let request: ShiftGapRequest =
            serde_json::from_str(r#"{"prevExitDate":"2025-03-10"}"#).unwrap();
        assert_eq!(request.prev_exit_date, "2025-03-10");
        assert!(request.curr_entry_time.is_empty());
    }

    #[test]
    fn test_period_stats_request_accepts_records_without_id() {
        let json = r#"{
            "startDate": "2025-03-01",
            "endDate": "2025-03-31",
            "records": [{
                "entryDate": "2025-03-10", "entryTime": "08:00",
                "exitDate": "2025-03-10", "exitTime": "17:00",
                "netTotal": "09:00"
            }]
        }"#;
        let request: PeriodStatsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.records.len(), 1);
        assert_eq!(request.records[0].totals.net_total.get(), 540);
    }
}
