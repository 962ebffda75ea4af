//! Leave and holiday rules engine
//!
//! This crate provides the client-side business rules of a leave management
//! system: validating leave requests against policy, availability, and
//! adjacency rules, and reconciling an editable holiday calendar against
//! the backend's canonical set.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod session;
pub mod sync;
pub mod validation;
