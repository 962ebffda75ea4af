//! Leave request validation logic.
//!
//! This module contains the [`LeaveRequestValidator`], which owns the draft
//! form state and recomputes the derived working-day count and the field
//! error map after every mutating operation. Recomputation is an explicit
//! function call rather than an implicit framework side effect, which makes
//! the rule evaluation order visible and testable.

mod leave_request;

pub use leave_request::{FLOATER_MISMATCH_MSG, LeaveRequestValidator, NO_WORKING_DAYS_MSG};
