//! Leave request draft state and the field error map.
//!
//! The draft holds exactly what the user has typed; everything derived from
//! it (working days, error messages) is owned by the validator and
//! recomputed, never accumulated.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A form field that can carry a validation error.
///
/// Display renders the wire-level key the original form used, so error maps
/// serialize the way the backend and UI expect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// The leave start date.
    StartDate,
    /// The leave end date.
    EndDate,
    /// The selected leave policy.
    Policy,
    /// The free-text notes.
    Notes,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::StartDate => write!(f, "startDate"),
            Field::EndDate => write!(f, "endDate"),
            Field::Policy => write!(f, "policyId"),
            Field::Notes => write!(f, "notes"),
        }
    }
}

/// Mapping from field to error message.
///
/// Absence of a key means the field is valid. The map is recomputed on each
/// dependency change; callers set and clear specific entries rather than
/// appending to a log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or replaces) the error for a field.
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Clears any error for a field.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    /// Clears the error for a field only when it carries the given message.
    ///
    /// The reactive checks own specific messages on shared keys; a check
    /// must not wipe out an error written by a different rule.
    pub fn clear_message(&mut self, field: Field, message: &str) {
        if self.0.get(&field).is_some_and(|m| m == message) {
            self.0.remove(&field);
        }
    }

    /// Returns the error message for a field, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Returns true when the field currently has an error.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Returns true when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields in error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// The user-editable state of a leave request form.
///
/// Invariant: once both dates are set, `start_date <= end_date` is required
/// for submission (the validator reports the ordering error, editing is not
/// blocked). The derived working-day count lives on the validator, never
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestDraft {
    /// First day of the requested leave.
    pub start_date: Option<NaiveDate>,
    /// Last day of the requested leave.
    pub end_date: Option<NaiveDate>,
    /// Identifier of the selected leave policy.
    pub policy_id: Option<i64>,
    /// Free-text notes accompanying the request.
    pub notes: String,
}

impl LeaveRequestDraft {
    /// Returns both dates when set, regardless of ordering.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Returns true when both dates are set and inverted.
    pub fn is_inverted(&self) -> bool {
        self.range().is_some_and(|(start, end)| end < start)
    }

    /// Clears all fields back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
