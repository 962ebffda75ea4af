//! REST collaborator interface for the leave engine.
//!
//! The engine never persists anything itself; every derived fact and every
//! save goes through the [`LeaveApi`] trait. Production code talks to the
//! backend through [`HttpLeaveApi`]; tests substitute an in-memory mock.

mod client;
mod http;

pub use client::{
    AdjacentLeave, ApiEnvelope, BulkSaveOutcome, FloaterDay, HolidayBulkPayload, HolidayUpsert,
    LeaveApi, LeaveRequestPayload, WorkingDaysReport,
};
pub use http::HttpLeaveApi;
