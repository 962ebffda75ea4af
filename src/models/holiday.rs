//! Holiday row model and related types.
//!
//! This module defines the working-set row used by the holiday reconciler,
//! the server record it is seeded from, and the parsed shape of an imported
//! sheet row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a holiday row.
///
/// Server ids are numeric and name a persisted record; temporary ids are
/// generated client-side for rows that have never been saved. The save
/// contract only ever sends `Server` ids in the deletion bucket, so a
/// temporary id cannot leak into a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// A genuine persisted id assigned by the backend.
    Server(i64),
    /// A client-generated placeholder for an unsaved row.
    Temp(Uuid),
}

impl RowId {
    /// Generates a fresh temporary id.
    pub fn fresh() -> Self {
        RowId::Temp(Uuid::new_v4())
    }

    /// Returns the numeric id when this row is persisted.
    pub fn server(&self) -> Option<i64> {
        match self {
            RowId::Server(id) => Some(*id),
            RowId::Temp(_) => None,
        }
    }
}

/// A holiday record as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// Persisted id of the holiday.
    pub id: i64,
    /// Calendar date of the holiday.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Whether the holiday is a floater (optional) holiday. The backend may
    /// serve null for legacy rows; null reads as false.
    #[serde(default)]
    pub is_floater: Option<bool>,
}

/// One row of the editable holiday working set.
///
/// Rows are created blank as the trailing sentinel, populated by user edits
/// or bulk import, and leave the set on explicit delete or successful save.
/// A row that is both `is_past` and `is_existing` represents a persisted
/// past holiday and rejects further mutation or deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRow {
    /// Row identifier; temporary until first saved.
    pub id: RowId,
    /// Calendar date, unset on a blank sentinel row.
    pub date: Option<NaiveDate>,
    /// Human-readable description.
    pub description: String,
    /// Whether the holiday is a floater (optional) holiday.
    pub is_floater: bool,
    /// Set when the row conflicts with another row on the same date.
    pub has_error: bool,
    /// Explanation of the conflict when `has_error` is set.
    pub error_message: Option<String>,
    /// Whether the row's date is before today.
    pub is_past: bool,
    /// Whether the row represents a persisted record.
    pub is_existing: bool,
}

impl HolidayRow {
    /// Creates a blank editable sentinel row.
    pub fn blank() -> Self {
        HolidayRow {
            id: RowId::fresh(),
            date: None,
            description: String::new(),
            is_floater: false,
            has_error: false,
            error_message: None,
            is_past: false,
            is_existing: false,
        }
    }

    /// Builds a working-set row from a persisted record.
    ///
    /// # Arguments
    ///
    /// * `record` - The server-provided holiday record
    /// * `today` - The reference date for the past flag
    pub fn from_record(record: HolidayRecord, today: NaiveDate) -> Self {
        HolidayRow {
            id: RowId::Server(record.id),
            is_past: record.date < today,
            date: Some(record.date),
            description: record.description,
            is_floater: record.is_floater.unwrap_or(false),
            has_error: false,
            error_message: None,
            is_existing: true,
        }
    }

    /// Returns true when the row has neither a date nor a description.
    pub fn is_blank(&self) -> bool {
        self.date.is_none() && self.description.trim().is_empty()
    }

    /// Returns true when the row is a persisted past holiday and therefore
    /// immutable.
    pub fn is_locked(&self) -> bool {
        self.is_past && self.is_existing
    }

    /// Flags the row as part of a conflicting duplicate group.
    pub(crate) fn mark_conflict(&mut self, message: impl Into<String>) {
        self.has_error = true;
        self.error_message = Some(message.into());
    }

    /// Clears any conflict flag.
    pub(crate) fn clear_conflict(&mut self) {
        self.has_error = false;
        self.error_message = None;
    }
}

/// A holiday row parsed from an uploaded spreadsheet/CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedHoliday {
    /// Calendar date of the holiday.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Whether the holiday is a floater (optional) holiday.
    pub floater: bool,
}

impl ImportedHoliday {
    /// Converts the parsed row into a fresh, unsaved working-set row.
    pub fn into_row(self) -> HolidayRow {
        HolidayRow {
            id: RowId::fresh(),
            date: Some(self.date),
            description: self.description,
            is_floater: self.floater,
            has_error: false,
            error_message: None,
            is_past: false,
            is_existing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_blank_row_is_blank_and_unlocked() {
        let row = HolidayRow::blank();
        assert!(row.is_blank());
        assert!(!row.is_locked());
        assert!(row.id.server().is_none());
    }

    #[test]
    fn test_from_record_marks_past_rows() {
        let record = HolidayRecord {
            id: 12,
            date: make_date("2025-01-26"),
            description: "Republic Day".to_string(),
            is_floater: None,
        };
        let row = HolidayRow::from_record(record, make_date("2025-06-01"));

        assert!(row.is_past);
        assert!(row.is_existing);
        assert!(row.is_locked());
        assert!(!row.is_floater);
        assert_eq!(row.id.server(), Some(12));
    }

    #[test]
    fn test_from_record_future_rows_stay_editable() {
        let record = HolidayRecord {
            id: 13,
            date: make_date("2025-12-25"),
            description: "Christmas".to_string(),
            is_floater: Some(false),
        };
        let row = HolidayRow::from_record(record, make_date("2025-06-01"));

        assert!(!row.is_past);
        assert!(!row.is_locked());
    }

    #[test]
    fn test_description_only_row_is_not_blank() {
        let mut row = HolidayRow::blank();
        row.description = "Diwali".to_string();
        assert!(!row.is_blank());
    }

    #[test]
    fn test_row_id_serializes_server_ids_as_numbers() {
        let json = serde_json::to_string(&RowId::Server(42)).unwrap();
        assert_eq!(json, "42");

        let id: RowId = serde_json::from_str("42").unwrap();
        assert_eq!(id, RowId::Server(42));
    }

    #[test]
    fn test_imported_holiday_becomes_unsaved_row() {
        let imported = ImportedHoliday {
            date: make_date("2025-11-01"),
            description: "Founders Day".to_string(),
            floater: true,
        };
        let row = imported.into_row();

        assert_eq!(row.date, Some(make_date("2025-11-01")));
        assert!(row.is_floater);
        assert!(!row.is_existing);
        assert!(row.id.server().is_none());
    }
}
