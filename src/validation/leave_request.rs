//! The leave request validator.
//!
//! Validation runs in two layers. The reactive layer
//! ([`LeaveRequestValidator::recompute`]) fires after every change to the
//! draft and maintains the field error map from the backend-derived facts
//! (working days, floater availability, adjacent leave). The submit layer
//! re-checks required fields and availability synchronously, independent of
//! whether the reactive checks ever ran.
//!
//! Rule evaluation order is fixed and deliberate:
//!
//! 1. date ordering (short-circuits all collaborator calls)
//! 2. working-day count (zero working days)
//! 3. floater exclusivity
//! 4. adjacency to incompatible leave types
//! 5. availability
//! 6. application window
//!
//! Rules 3 and 4 share the notes error key; adjacency runs last and wins
//! when both fire. Rules 5 and 6 share the policy error key; the
//! application-window message wins.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::api::{LeaveApi, LeaveRequestPayload, WorkingDaysReport};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Field, LeavePolicy, LeaveRequestDraft, ValidationErrors};
use crate::sync::Generation;

/// Error reported when the selected range contains no working days.
pub const NO_WORKING_DAYS_MSG: &str = "No working days in selected range";

/// Error reported when a floater request covers non-floater days.
pub const FLOATER_MISMATCH_MSG: &str = "Selected Non-floater leave in the range";

const END_BEFORE_START_MSG: &str = "End Date must be after Start Date";

const START_REQUIRED_MSG: &str = "Start date is required";
const END_REQUIRED_MSG: &str = "End date is required";
const POLICY_REQUIRED_MSG: &str = "Leave type is required";
const NOTES_REQUIRED_MSG: &str = "Notes are required";

/// Owns a leave request draft and keeps its derived state valid.
///
/// All state transitions go through the setters, each of which ends in an
/// explicit [`recompute`](Self::recompute). Collaborator failures during
/// recomputation are non-fatal: they are logged, queued as user notices,
/// and leave previously valid fields untouched.
pub struct LeaveRequestValidator {
    api: Arc<dyn LeaveApi>,
    floater_policy_name: String,
    today: NaiveDate,
    draft: LeaveRequestDraft,
    policies: Vec<LeavePolicy>,
    working_days: u32,
    existing_leave_message: Option<String>,
    errors: ValidationErrors,
    notices: Vec<String>,
    adjacency_message: Option<String>,
    working_days_gen: Generation,
    overlap_gen: Generation,
    floater_gen: Generation,
    adjacency_gen: Generation,
}

impl LeaveRequestValidator {
    /// Creates a validator using today's local date for the
    /// application-window rule.
    pub fn new(api: Arc<dyn LeaveApi>, config: &EngineConfig) -> Self {
        Self::with_today(api, config, Local::now().date_naive())
    }

    /// Creates a validator with an explicit reference date.
    pub fn with_today(api: Arc<dyn LeaveApi>, config: &EngineConfig, today: NaiveDate) -> Self {
        LeaveRequestValidator {
            api,
            floater_policy_name: config.floater_policy_name.clone(),
            today,
            draft: LeaveRequestDraft::default(),
            policies: Vec::new(),
            working_days: 0,
            existing_leave_message: None,
            errors: ValidationErrors::new(),
            notices: Vec::new(),
            adjacency_message: None,
            working_days_gen: Generation::new(),
            overlap_gen: Generation::new(),
            floater_gen: Generation::new(),
            adjacency_gen: Generation::new(),
        }
    }

    /// Fetches the leave policy catalog from the collaborator.
    pub async fn load_policies(&mut self) -> EngineResult<()> {
        self.policies = self.api.get_policy_types().await?;
        Ok(())
    }

    /// Sets the start date and recomputes derived state.
    pub async fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.draft.start_date = date;
        self.recompute().await;
    }

    /// Sets the end date and recomputes derived state.
    pub async fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.draft.end_date = date;
        self.recompute().await;
    }

    /// Selects a policy and recomputes derived state.
    pub async fn set_policy(&mut self, policy_id: Option<i64>) {
        self.draft.policy_id = policy_id;
        self.recompute().await;
    }

    /// Replaces the notes text and recomputes derived state.
    pub async fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
        self.recompute().await;
    }

    /// Returns the current draft.
    pub fn draft(&self) -> &LeaveRequestDraft {
        &self.draft
    }

    /// Returns the current field error map.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Returns the loaded policy catalog.
    pub fn policies(&self) -> &[LeavePolicy] {
        &self.policies
    }

    /// Returns the working-day count last computed by the backend.
    pub fn working_days(&self) -> u32 {
        self.working_days
    }

    /// Returns the backend's description of pre-existing leave overlapping
    /// the selected range, when there is one.
    pub fn existing_leave_message(&self) -> Option<&str> {
        self.existing_leave_message.as_deref()
    }

    /// Drains the queued non-fatal notices (the toast analog).
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn selected_policy(&self) -> Option<&LeavePolicy> {
        let id = self.draft.policy_id?;
        self.policies.iter().find(|p| p.id == id)
    }

    fn notify(&mut self, error: EngineError) {
        warn!(error = %error, "derived-field fetch failed");
        self.notices.push(error.to_string());
    }

    /// Recomputes the error map and derived fields from the current draft.
    ///
    /// Invoked by every setter; may also be called directly after bulk
    /// mutation of the draft. Collaborator failures are queued as notices
    /// and do not clear previously valid state.
    pub async fn recompute(&mut self) {
        // Rule 1: an inverted range is reported immediately and nothing is
        // fetched for it.
        if self.draft.is_inverted() {
            self.errors.set(Field::EndDate, END_BEFORE_START_MSG);
            return;
        }
        self.errors.clear_message(Field::EndDate, END_BEFORE_START_MSG);

        if let Some((start, end)) = self.draft.range() {
            self.refresh_working_days(start, end).await;
            self.refresh_existing_leave(start, end).await;
        } else {
            self.errors.clear_message(Field::Notes, NO_WORKING_DAYS_MSG);
        }

        self.refresh_floater_rule().await;
        self.refresh_adjacency_rule().await;
        self.refresh_policy_rules();
    }

    /// Rule 2: fetch the working-day breakdown and flag empty ranges.
    async fn refresh_working_days(&mut self, start: NaiveDate, end: NaiveDate) {
        let token = self.working_days_gen.issue();
        match self.api.get_working_days(start, end).await {
            Ok(report) => self.apply_working_days(token, report),
            Err(error) => self.notify(error),
        }
    }

    fn apply_working_days(&mut self, token: u64, report: WorkingDaysReport) {
        if !self.working_days_gen.is_latest(token) {
            // A newer request is in flight; this response is stale.
            return;
        }
        self.working_days = report.working_days;
        if report.working_days == 0 {
            self.errors.set(Field::Notes, NO_WORKING_DAYS_MSG);
        } else {
            self.errors.clear_message(Field::Notes, NO_WORKING_DAYS_MSG);
        }
    }

    async fn refresh_existing_leave(&mut self, start: NaiveDate, end: NaiveDate) {
        let token = self.overlap_gen.issue();
        match self.api.get_leave_on_days(start, end).await {
            Ok(message) => self.apply_existing_leave(token, message),
            Err(error) => self.notify(error),
        }
    }

    fn apply_existing_leave(&mut self, token: u64, message: String) {
        if !self.overlap_gen.is_latest(token) {
            return;
        }
        self.existing_leave_message = (!message.is_empty()).then_some(message);
    }

    /// Rule 3: a floater request must cover floater days exclusively.
    async fn refresh_floater_rule(&mut self) {
        let is_floater_policy = self
            .selected_policy()
            .is_some_and(|p| p.name == self.floater_policy_name);

        let Some((start, end)) = self.draft.range().filter(|_| is_floater_policy) else {
            self.errors.clear_message(Field::Notes, FLOATER_MISMATCH_MSG);
            return;
        };

        let token = self.floater_gen.issue();
        match self.api.check_floater_available(start, end).await {
            Ok(days) => self.apply_floater_days(token, days.len() as u32),
            Err(error) => self.notify(error),
        }
    }

    fn apply_floater_days(&mut self, token: u64, floater_days: u32) {
        if !self.floater_gen.is_latest(token) {
            return;
        }
        if floater_days != self.working_days {
            self.errors.set(Field::Notes, FLOATER_MISMATCH_MSG);
        } else {
            self.errors.clear_message(Field::Notes, FLOATER_MISMATCH_MSG);
        }
    }

    /// Rule 4: the selected policy may not continue from incompatible leave
    /// types. Runs after the floater rule and wins the shared notes key.
    async fn refresh_adjacency_rule(&mut self) {
        let Some((start, end)) = self.draft.range() else {
            self.clear_adjacency_error();
            return;
        };
        let Some(policy) = self.selected_policy() else {
            self.clear_adjacency_error();
            return;
        };
        let policy_name = policy.name.clone();
        let incompatible = policy.incompatible_with.clone();

        let token = self.adjacency_gen.issue();
        match self.api.get_before_after_leave(start, end).await {
            Ok(adjacent) => {
                if !self.adjacency_gen.is_latest(token) {
                    return;
                }
                let mut names: Vec<String> =
                    adjacent.into_iter().map(|a| a.leave_name).collect();
                names.dedup();

                let all_incompatible =
                    !names.is_empty() && names.iter().all(|n| incompatible.contains(n));
                if all_incompatible {
                    let message = format!(
                        "Leave Type {} cannot continue with {}",
                        policy_name,
                        names.join(", ")
                    );
                    self.clear_adjacency_error();
                    self.errors.set(Field::Notes, message.clone());
                    self.adjacency_message = Some(message);
                } else {
                    self.clear_adjacency_error();
                }
            }
            Err(error) => self.notify(error),
        }
    }

    fn clear_adjacency_error(&mut self) {
        if let Some(message) = self.adjacency_message.take() {
            self.errors.clear_message(Field::Notes, &message);
        }
    }

    /// Rules 5 and 6 on the shared policy key: availability first, then the
    /// application window, so the window message wins when both fire.
    fn refresh_policy_rules(&mut self) {
        self.errors.clear(Field::Policy);
        let Some(policy) = self.selected_policy() else {
            return;
        };
        let availability = policy.availability;
        let application_rule_days = policy.application_rule_days;

        if let Some(available) = availability {
            if self.working_days > available {
                self.errors
                    .set(Field::Policy, format!("Only {} days available", available));
            }
        }

        if let (Some(limit), Some(start)) = (application_rule_days, self.draft.start_date) {
            let days_since_start = (self.today - start).num_days();
            if days_since_start > limit {
                self.errors.set(
                    Field::Policy,
                    format!("Should be within {} days of the startDate", limit),
                );
            }
        }
    }

    /// Validates and submits the draft.
    ///
    /// Required fields and availability are re-checked synchronously here,
    /// independent of the reactive checks (which may never have fired if
    /// the user never changed a field). On any failure the error map is
    /// updated and the collaborator is not called. On success the draft is
    /// reset and the submitted payload returned; refreshing any listing is
    /// the caller's concern.
    pub async fn submit(&mut self) -> EngineResult<LeaveRequestPayload> {
        let mut fresh = Vec::new();

        // Each requirement owns its message: a satisfied requirement clears
        // the message a previous failed submit may have left behind, so the
        // map stays recomputed rather than accumulated.
        if self.draft.start_date.is_none() {
            fresh.push((Field::StartDate, START_REQUIRED_MSG.to_string()));
        } else {
            self.errors.clear_message(Field::StartDate, START_REQUIRED_MSG);
        }
        if self.draft.end_date.is_none() {
            fresh.push((Field::EndDate, END_REQUIRED_MSG.to_string()));
        } else {
            self.errors.clear_message(Field::EndDate, END_REQUIRED_MSG);
        }
        if self.draft.policy_id.is_none() {
            fresh.push((Field::Policy, POLICY_REQUIRED_MSG.to_string()));
        } else {
            self.errors.clear_message(Field::Policy, POLICY_REQUIRED_MSG);
        }
        if self.draft.notes.trim().is_empty() {
            fresh.push((Field::Notes, NOTES_REQUIRED_MSG.to_string()));
        } else {
            self.errors.clear_message(Field::Notes, NOTES_REQUIRED_MSG);
        }

        if let Some(policy) = self.selected_policy() {
            if !policy.allows(self.working_days) {
                // allows() only fails for bounded policies.
                let available = policy.availability.unwrap_or(0);
                fresh.push((Field::Policy, format!("Only {} days available", available)));
            }
        }

        if !fresh.is_empty() || !self.errors.is_empty() {
            for (field, message) in fresh {
                self.errors.set(field, message);
            }
            return Err(EngineError::SubmissionBlocked {
                count: self.errors.len(),
            });
        }

        let (Some(start_date), Some(end_date), Some(policy_id)) =
            (self.draft.start_date, self.draft.end_date, self.draft.policy_id)
        else {
            return Err(EngineError::SubmissionBlocked {
                count: self.errors.len(),
            });
        };

        let payload = LeaveRequestPayload {
            start_date,
            end_date,
            no_of_days: self.working_days,
            policy_id,
            notes: self.draft.notes.clone(),
        };

        self.api.create_leave_request(payload.clone()).await?;
        info!(
            policy_id = payload.policy_id,
            no_of_days = payload.no_of_days,
            "leave request submitted"
        );

        self.draft.reset();
        self.working_days = 0;
        self.existing_leave_message = None;
        self.errors = ValidationErrors::new();
        Ok(payload)
    }
}
