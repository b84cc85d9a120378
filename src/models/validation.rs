//! Field-indexed validation messages for punch input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The punch input fields a validation message can be attached to.
///
/// `Span` covers checks that involve entry and exit together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PunchField {
    /// Entry date.
    EntryDate,
    /// Entry time.
    EntryTime,
    /// Exit date.
    ExitDate,
    /// Exit time.
    ExitTime,
    /// Lunch start.
    LunchStart,
    /// Lunch end.
    LunchEnd,
    /// Normal workday length.
    BaselineHours,
    /// Hourly rate.
    HourlyRate,
    /// Elapsed time between entry and exit.
    Span,
}

/// Human-readable validation messages keyed by field.
///
/// Only the first message recorded for a field is kept. An empty report
/// means the input is valid.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::{PunchField, ValidationReport};
///
/// let mut report = ValidationReport::default();
/// assert!(report.is_valid());
///
/// report.push(PunchField::LunchEnd, "Lunch end must be after lunch start");
/// assert!(!report.is_valid());
/// assert_eq!(report.messages(), vec!["Lunch end must be after lunch start"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<PunchField, String>,
}

impl ValidationReport {
    /// Records a message for a field unless one is already present.
    pub fn push(&mut self, field: PunchField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// True when no message was recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message recorded for a field, if any.
    pub fn get(&self, field: PunchField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// True when the field has a message.
    pub fn has(&self, field: PunchField) -> bool {
        self.errors.contains_key(&field)
    }

    /// All messages in field order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.values().cloned().collect()
    }

    /// All messages joined with `"; "`.
    pub fn summary(&self) -> String {
        self.messages().join("; ")
    }

    /// The field-indexed map.
    pub fn fields(&self) -> &BTreeMap<PunchField, String> {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut report = ValidationReport::default();
        report.push(PunchField::EntryTime, "first");
        report.push(PunchField::EntryTime, "second");
        assert_eq!(report.get(PunchField::EntryTime), Some("first"));
        assert_eq!(report.messages().len(), 1);
    }

    #[test]
    fn test_messages_follow_field_order() {
        let mut report = ValidationReport::default();
        report.push(PunchField::Span, "span");
        report.push(PunchField::EntryDate, "entry");
        assert_eq!(report.messages(), vec!["entry", "span"]);
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut report = ValidationReport::default();
        report.push(PunchField::LunchStart, "missing");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["lunchStart"], "missing");
    }
}
