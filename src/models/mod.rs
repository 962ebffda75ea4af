//! Core data models for the leave engine.
//!
//! This module contains all the domain models used throughout the engine.

mod draft;
mod holiday;
mod policy;

pub use draft::{Field, LeaveRequestDraft, ValidationErrors};
pub use holiday::{HolidayRecord, HolidayRow, ImportedHoliday, RowId};
pub use policy::{LeavePolicy, LeaveStatus};
