//! Leave policy model and related types.
//!
//! This module defines the LeavePolicy struct describing one leave type as
//! served by the backend, and the LeaveStatus lifecycle of a submitted
//! request.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Represents one leave policy (leave type) as fetched from the backend.
///
/// Policies are immutable per fetch; the validator refreshes the whole list
/// rather than mutating individual entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Unique identifier of the policy.
    pub id: i64,
    /// Display name of the leave type (e.g. "Casual Leave").
    #[serde(rename = "leavename")]
    pub name: String,
    /// Days available under this policy. `None` means unlimited.
    pub availability: Option<u32>,
    /// How many days after the leave's start date a request may still be
    /// submitted. `None` means no application-window constraint.
    #[serde(default)]
    pub application_rule_days: Option<i64>,
    /// Names of leave types this policy may not sit adjacent to.
    #[serde(default)]
    pub incompatible_with: HashSet<String>,
}

impl LeavePolicy {
    /// Returns true when `working_days` fits within this policy's
    /// availability. Policies with `availability: None` accept any count.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::LeavePolicy;
    /// use std::collections::HashSet;
    ///
    /// let policy = LeavePolicy {
    ///     id: 1,
    ///     name: "Casual Leave".to_string(),
    ///     availability: Some(5),
    ///     application_rule_days: None,
    ///     incompatible_with: HashSet::new(),
    /// };
    /// assert!(policy.allows(5));
    /// assert!(!policy.allows(6));
    /// ```
    pub fn allows(&self, working_days: u32) -> bool {
        match self.availability {
            Some(available) => working_days <= available,
            None => true,
        }
    }
}

/// Lifecycle status of a submitted leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting any approval.
    Pending,
    /// Approved by the reporting manager, awaiting HR.
    PartiallyApproved,
    /// Withdrawn by the requester.
    Cancelled,
    /// Fully approved.
    Approved,
}

impl LeaveStatus {
    /// Returns the user-facing label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::PartiallyApproved => "Approved By Reporting Manager",
            LeaveStatus::Cancelled => "Cancelled",
            LeaveStatus::Approved => "Approved",
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
