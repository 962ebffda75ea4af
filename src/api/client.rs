//! The `LeaveApi` collaborator trait and its wire types.
//!
//! All backend responses arrive in a `{success, data|message}` envelope;
//! `success: false` and transport failures collapse into the same
//! [`EngineError`](crate::error::EngineError) so callers treat them
//! identically, as a non-fatal notice with local state preserved.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayRecord, LeavePolicy};

/// Working-day breakdown for a date range, as computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingDaysReport {
    /// Days that are neither weekends nor company holidays.
    pub working_days: u32,
    /// Weekend days in the range.
    pub weekends: u32,
    /// Company holidays in the range.
    pub holidays: u32,
    /// Total calendar days in the range.
    pub total_days: u32,
}

/// One floater-eligible day within a queried range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloaterDay {
    /// The floater holiday date.
    pub date: NaiveDate,
    /// Description of the floater holiday.
    #[serde(default)]
    pub description: String,
}

/// A leave entry adjacent to or overlapping a queried range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentLeave {
    /// Name of the leave type of the adjacent entry.
    #[serde(rename = "leavename")]
    pub leave_name: String,
}

/// The submission payload for a new leave request.
///
/// Field names follow the backend's wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestPayload {
    /// First day of the requested leave.
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    /// Last day of the requested leave.
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    /// Working days in the range, as last computed by the backend.
    pub no_of_days: u32,
    /// Identifier of the selected policy.
    pub policy_id: i64,
    /// Free-text notes.
    pub notes: String,
}

/// A holiday row being inserted or updated through the bulk save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayUpsert {
    /// Persisted id for updates; absent for inserts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Calendar date of the holiday.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Whether the holiday is a floater (optional) holiday.
    pub is_floater: bool,
}

/// The three-bucket payload of a holiday bulk save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayBulkPayload {
    /// New rows to insert.
    #[serde(rename = "validHoliday")]
    pub valid_holiday: Vec<HolidayUpsert>,
    /// Persisted ids to delete. Client-side temporary ids never appear here.
    #[serde(rename = "deletedHoliday")]
    pub deleted_holiday: Vec<i64>,
    /// Persisted rows whose fields changed.
    #[serde(rename = "updatedHoliday")]
    pub updated_holiday: Vec<HolidayUpsert>,
}

impl HolidayBulkPayload {
    /// Returns true when no bucket carries anything to persist.
    pub fn is_empty(&self) -> bool {
        self.valid_holiday.is_empty()
            && self.deleted_holiday.is_empty()
            && self.updated_holiday.is_empty()
    }
}

/// Counts reported by the backend after a bulk save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSaveOutcome {
    /// Rows inserted.
    pub inserted: u32,
    /// Rows updated.
    pub updated: u32,
    /// Rows deleted.
    pub deleted: u32,
}

/// The `{success, data|message}` envelope wrapping every backend response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded server-side.
    pub success: bool,
    /// The payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// A human-readable message, present on failure (and on some successes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the envelope into its payload.
    ///
    /// # Returns
    ///
    /// The payload when `success` is true and data is present; otherwise an
    /// [`EngineError::Api`] carrying the server message.
    pub fn into_result(self) -> EngineResult<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(EngineError::Api {
                message: self
                    .message
                    .unwrap_or_else(|| "response missing data".to_string()),
            }),
            (false, _) => Err(EngineError::Api {
                message: self.message.unwrap_or_else(|| "request failed".to_string()),
            }),
        }
    }

    /// Acknowledges an envelope whose payload does not matter.
    pub fn ack(self) -> EngineResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(EngineError::Api {
                message: self.message.unwrap_or_else(|| "request failed".to_string()),
            })
        }
    }
}

/// Operations the leave engine consumes from the REST backend.
///
/// Dates cross this boundary as `chrono::NaiveDate` and serialize as
/// `YYYY-MM-DD`, a locale-stable calendar date with no timezone component.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the engine holds the collaborator
/// behind an `Arc<dyn LeaveApi>`.
#[async_trait]
pub trait LeaveApi: Send + Sync {
    /// Computes the working-day breakdown for an inclusive date range.
    async fn get_working_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<WorkingDaysReport>;

    /// Lists the floater-eligible days within an inclusive date range.
    async fn check_floater_available(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<FloaterDay>>;

    /// Describes any pre-existing leave overlapping the range.
    ///
    /// # Returns
    ///
    /// A message; non-empty signals a conflict.
    async fn get_leave_on_days(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<String>;

    /// Lists leave entries adjacent to or overlapping the range.
    async fn get_before_after_leave(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AdjacentLeave>>;

    /// Fetches the current leave policy catalog.
    async fn get_policy_types(&self) -> EngineResult<Vec<LeavePolicy>>;

    /// Submits a new leave request.
    async fn create_leave_request(&self, payload: LeaveRequestPayload) -> EngineResult<()>;

    /// Fetches all holidays within an inclusive date range.
    async fn get_all_holidays(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<HolidayRecord>>;

    /// Applies a three-bucket holiday save in a single atomic request.
    async fn insert_holiday_bulk(
        &self,
        payload: HolidayBulkPayload,
    ) -> EngineResult<BulkSaveOutcome>;
}
