//! The holiday reconciler.
//!
//! The reconciler is a staging copy of one year's holiday calendar: rows
//! are edited, imported, and deleted locally, then persisted in a single
//! three-bucket request. The server remains the owner of the canonical set;
//! a successful save re-fetches it.

use std::collections::HashSet;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{info, warn};

use crate::api::{BulkSaveOutcome, HolidayBulkPayload, HolidayUpsert, LeaveApi};
use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayRecord, HolidayRow, ImportedHoliday};

/// A single-field edit applied to one holiday row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolidayEdit {
    /// Replace the row's date.
    Date(Option<NaiveDate>),
    /// Replace the row's description.
    Description(String),
    /// Replace the row's floater flag.
    Floater(bool),
}

/// Counts describing what a bulk import did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Rows merged into the working set.
    pub merged: usize,
    /// Rows dropped because their date is in the past.
    pub dropped_past: usize,
    /// Rows dropped because they belong to a different year.
    pub dropped_other_year: usize,
}

/// The editable holiday working set for a target year.
///
/// Rows with a null date sort last; ties keep their relative order. After
/// every structural change the set is re-sorted and duplicate validation
/// runs over the whole set. A trailing blank sentinel row is kept available
/// for new input.
pub struct HolidayReconciler {
    add_year: i32,
    today: NaiveDate,
    rows: Vec<HolidayRow>,
    deleted: Vec<HolidayRow>,
    updated_ids: HashSet<i64>,
}

impl HolidayReconciler {
    /// Creates an empty reconciler for the given year, using today's local
    /// date for past checks.
    pub fn new(add_year: i32) -> Self {
        Self::with_today(add_year, Local::now().date_naive())
    }

    /// Creates an empty reconciler with an explicit reference date.
    pub fn with_today(add_year: i32, today: NaiveDate) -> Self {
        HolidayReconciler {
            add_year,
            today,
            rows: vec![HolidayRow::blank()],
            deleted: Vec::new(),
            updated_ids: HashSet::new(),
        }
    }

    /// Returns the target year rows are being added to.
    pub fn add_year(&self) -> i32 {
        self.add_year
    }

    /// Changes the target year. The caller is expected to [`load`] the new
    /// year's canonical rows afterwards.
    ///
    /// [`load`]: Self::load
    pub fn set_add_year(&mut self, year: i32) {
        self.add_year = year;
    }

    /// Returns the current working set.
    pub fn rows(&self) -> &[HolidayRow] {
        &self.rows
    }

    /// Returns the number of rows currently flagged as conflicting.
    pub fn conflict_count(&self) -> usize {
        self.rows.iter().filter(|r| r.has_error).count()
    }

    /// Seeds the working set from the server's records, discarding any
    /// staged edits.
    pub fn seed(&mut self, records: Vec<HolidayRecord>) {
        self.rows = records
            .into_iter()
            .map(|record| HolidayRow::from_record(record, self.today))
            .collect();
        self.deleted.clear();
        self.updated_ids.clear();
        self.after_change();
    }

    /// Fetches the canonical holiday set for the target year and seeds the
    /// working set from it.
    pub async fn load(&mut self, api: &dyn LeaveApi) -> EngineResult<()> {
        let (start, end) = year_range(self.add_year);
        let records = api.get_all_holidays(start, end).await?;
        self.seed(records);
        Ok(())
    }

    /// Appends a blank editable row to the end of the set.
    pub fn add_row(&mut self) {
        self.rows.push(HolidayRow::blank());
    }

    /// Removes a row from the working set, staging it for deletion.
    ///
    /// Persisted past holidays are immutable; deleting one is refused with
    /// no state change.
    pub fn delete_row(&mut self, index: usize) -> EngineResult<()> {
        let Some(row) = self.rows.get(index) else {
            return Ok(());
        };
        if row.is_locked() {
            return Err(EngineError::PastHolidayLocked {
                action: "delete".to_string(),
                date: row.date,
            });
        }

        let row = self.rows.remove(index);
        self.deleted.push(row);
        self.after_change();
        Ok(())
    }

    /// Applies a single-field edit to a row.
    ///
    /// Persisted past holidays are immutable; editing one is refused with
    /// no state change. Date edits recompute the row's past flag, and edits
    /// to persisted rows record the id for the update bucket.
    pub fn update_field(&mut self, index: usize, edit: HolidayEdit) -> EngineResult<()> {
        let Some(row) = self.rows.get_mut(index) else {
            return Ok(());
        };
        if row.is_locked() {
            return Err(EngineError::PastHolidayLocked {
                action: "modify".to_string(),
                date: row.date,
            });
        }

        match edit {
            HolidayEdit::Date(date) => {
                row.date = date;
                row.is_past = date.is_some_and(|d| d < self.today);
            }
            HolidayEdit::Description(description) => row.description = description,
            HolidayEdit::Floater(floater) => row.is_floater = floater,
        }
        if let Some(id) = row.id.server() {
            self.updated_ids.insert(id);
        }
        self.after_change();
        Ok(())
    }

    /// Merges a batch of parsed import rows into the working set.
    ///
    /// Rows outside the target year are silently dropped; past-dated rows
    /// are dropped with a log warning rather than a user-facing error. When
    /// nothing survives the filters the working set is left untouched and
    /// [`EngineError::EmptyImport`] is returned as a non-fatal notice.
    pub fn import(&mut self, parsed: Vec<ImportedHoliday>) -> EngineResult<ImportOutcome> {
        let mut outcome = ImportOutcome::default();
        let mut survivors = Vec::new();

        for imported in parsed {
            if imported.date.year() != self.add_year {
                outcome.dropped_other_year += 1;
                continue;
            }
            if imported.date < self.today {
                warn!(date = %imported.date, "dropping past-dated import row");
                outcome.dropped_past += 1;
                continue;
            }
            survivors.push(imported);
        }

        if survivors.is_empty() {
            return Err(EngineError::EmptyImport);
        }

        outcome.merged = survivors.len();
        self.rows.retain(|row| !row.is_blank());
        self.rows
            .extend(survivors.into_iter().map(ImportedHoliday::into_row));
        self.after_change();
        Ok(outcome)
    }

    /// Builds the three-bucket save payload from the current state.
    ///
    /// # Returns
    ///
    /// The payload, or an error when conflicts are unresolved or when all
    /// three buckets would be empty.
    pub fn save_payload(&self) -> EngineResult<HolidayBulkPayload> {
        let conflicts = self.conflict_count();
        if conflicts > 0 {
            return Err(EngineError::ConflictingHolidays { count: conflicts });
        }

        let valid_holiday = self
            .rows
            .iter()
            .filter(|row| {
                row.id.server().is_none() && !row.description.trim().is_empty() && !row.is_past
            })
            .filter_map(|row| {
                row.date.map(|date| HolidayUpsert {
                    id: None,
                    date,
                    description: row.description.clone(),
                    is_floater: row.is_floater,
                })
            })
            .collect();

        // Only genuine server ids may be deleted; temporary rows that were
        // staged and never saved simply vanish.
        let deleted_holiday = self
            .deleted
            .iter()
            .filter_map(|row| row.id.server())
            .collect();

        let updated_holiday = self
            .rows
            .iter()
            .filter(|row| {
                row.id.server().is_some_and(|id| self.updated_ids.contains(&id))
                    && !row.description.trim().is_empty()
            })
            .filter_map(|row| {
                row.date.map(|date| HolidayUpsert {
                    id: row.id.server(),
                    date,
                    description: row.description.clone(),
                    is_floater: row.is_floater,
                })
            })
            .collect();

        let payload = HolidayBulkPayload {
            valid_holiday,
            deleted_holiday,
            updated_holiday,
        };
        if payload.is_empty() {
            return Err(EngineError::NothingToSave);
        }
        Ok(payload)
    }

    /// Persists the staged edits in a single atomic request.
    ///
    /// On success the staging lists are cleared and the canonical set for
    /// the target year is re-fetched. On failure the staged edits stay
    /// intact so the user can retry.
    pub async fn save(&mut self, api: &dyn LeaveApi) -> EngineResult<BulkSaveOutcome> {
        let payload = self.save_payload()?;
        let outcome = api.insert_holiday_bulk(payload).await?;
        info!(
            inserted = outcome.inserted,
            updated = outcome.updated,
            deleted = outcome.deleted,
            year = self.add_year,
            "holiday bulk save applied"
        );

        self.deleted.clear();
        self.updated_ids.clear();
        self.load(api).await?;
        Ok(outcome)
    }

    /// Re-sorts, re-validates duplicates, and restores the trailing blank
    /// sentinel. Runs after every structural change.
    fn after_change(&mut self) {
        self.sort_rows();
        self.validate_duplicates();
        if self.rows.last().is_none_or(|row| !row.is_blank()) {
            self.rows.push(HolidayRow::blank());
        }
    }

    fn sort_rows(&mut self) {
        // Stable sort: rows with a null date last, ties keep their order.
        self.rows.sort_by(|a, b| match (a.date, b.date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    /// Groups dated rows by exact date. Identical duplicates collapse to
    /// the first row of the group; any difference in description or floater
    /// flag marks the whole group as conflicting; resolution stays with
    /// the user.
    fn validate_duplicates(&mut self) {
        let rows = std::mem::take(&mut self.rows);
        let mut out: Vec<HolidayRow> = Vec::with_capacity(rows.len());
        let mut group: Vec<HolidayRow> = Vec::new();

        for mut row in rows {
            match row.date {
                None => {
                    flush_group(&mut group, &mut out);
                    row.clear_conflict();
                    out.push(row);
                }
                Some(date) => {
                    if group.first().and_then(|r| r.date) == Some(date) {
                        group.push(row);
                    } else {
                        flush_group(&mut group, &mut out);
                        group.push(row);
                    }
                }
            }
        }
        flush_group(&mut group, &mut out);
        self.rows = out;
    }
}

fn flush_group(group: &mut Vec<HolidayRow>, out: &mut Vec<HolidayRow>) {
    if group.is_empty() {
        return;
    }
    let identical = group[1..]
        .iter()
        .all(|r| r.description == group[0].description && r.is_floater == group[0].is_floater);

    if identical {
        let mut first = group.remove(0);
        group.clear();
        first.clear_conflict();
        out.push(first);
    } else {
        let date = group[0].date.expect("grouped rows are dated");
        let message = format!(
            "Conflicting duplicate entries for {}",
            date.format("%Y-%m-%d")
        );
        for mut row in group.drain(..) {
            row.mark_conflict(message.clone());
            out.push(row);
        }
    }
}

fn year_range(year: i32) -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1 exists"),
        NaiveDate::from_ymd_opt(year, 12, 31).expect("December 31 exists"),
    )
}
