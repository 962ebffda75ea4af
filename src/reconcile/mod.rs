//! Holiday working-set reconciliation.
//!
//! This module contains the [`HolidayReconciler`], which owns the editable
//! grid of holiday rows for a target year, deduplicates rows by date, flags
//! conflicting duplicates, and partitions the set into insert/update/delete
//! buckets for a single atomic save. Sheet parsing for bulk import lives in
//! [`parse_holiday_sheet`].

mod holiday;
mod import;

pub use holiday::{HolidayEdit, HolidayReconciler, ImportOutcome};
pub use import::parse_holiday_sheet;
