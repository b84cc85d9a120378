//! Persisted timesheet records.
//!
//! A record is the flattened merge of the raw punch a user entered and the
//! totals computed for it. The engine never persists records itself; it only
//! reads them back for period statistics and compliance summaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::punch::RawPunchInput;
use super::time::Minutes;

/// Totals stored alongside a punch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTotals {
    /// Time between entry and exit.
    #[serde(default)]
    pub gross_total: Minutes,
    /// Lunch break length.
    #[serde(default)]
    pub lunch_duration: Minutes,
    /// Worked time after lunch.
    #[serde(default)]
    pub net_total: Minutes,
    /// Overtime time.
    #[serde(default)]
    pub overtime_duration: Minutes,
    /// Overtime pay.
    #[serde(default)]
    pub overtime_pay: Decimal,
    /// Whether the CLT calculator produced these totals.
    #[serde(default)]
    pub clt_mode: bool,
    /// Night minutes (CLT only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_shift_duration: Option<Minutes>,
    /// Night premium (CLT only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_shift_premium: Option<Decimal>,
    /// Total pay (CLT only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pay: Option<Decimal>,
}

/// A stored timesheet entry.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{RawPunchInput, RecordTotals, TimesheetRecord};
///
/// let record = TimesheetRecord::new(
///     RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "17:00"),
///     RecordTotals::default(),
/// );
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["entryDate"], "2025-03-10");
/// assert_eq!(json["netTotal"], "00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetRecord {
    /// Record identifier, generated when absent.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Owner, as supplied by the identity service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// The punch as entered.
    #[serde(flatten)]
    pub punch: RawPunchInput,
    /// The computed totals.
    #[serde(flatten)]
    pub totals: RecordTotals,
}

impl TimesheetRecord {
    /// Creates a record with a fresh identifier.
    pub fn new(punch: RawPunchInput, totals: RecordTotals) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            punch,
            totals,
        }
    }

    /// Sets the owner.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_flattened_json() {
        let json = r#"{
            "id": "6f1c2a53-8f8e-4a43-9d6a-2f4f0a0b9d11",
            "userId": "u-1",
            "entryDate": "2025-03-10",
            "entryTime": "08:00",
            "exitDate": "2025-03-10",
            "exitTime": "19:00",
            "lunchStart": "12:00",
            "lunchEnd": "13:00",
            "hourlyRate": "20.00",
            "netTotal": "10:00",
            "overtimeDuration": "02:00",
            "overtimePay": "60.00"
        }"#;

        let record: TimesheetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.user_id.as_deref(), Some("u-1"));
        assert_eq!(record.punch.lunch_start.as_deref(), Some("12:00"));
        assert_eq!(record.totals.net_total, Minutes::new(600));
        assert_eq!(record.totals.overtime_pay, Decimal::new(6000, 2));
        assert!(!record.totals.clt_mode);
        assert!(record.totals.total_pay.is_none());
    }

    #[test]
    fn test_new_records_get_distinct_ids() {
        let punch = RawPunchInput::new("2025-03-10", "08:00", "2025-03-10", "17:00");
        let a = TimesheetRecord::new(punch.clone(), RecordTotals::default());
        let b = TimesheetRecord::new(punch, RecordTotals::default());
        assert_ne!(a.id, b.id);
    }
}
