//! Error types for the leave engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during leave validation and
//! holiday reconciliation.
//!
//! Field-level validation problems are deliberately *not* errors: they live
//! in the [`ValidationErrors`](crate::models::ValidationErrors) map and are
//! recoverable by further editing. The variants here cover business-rule
//! rejections, collaborator failures, and save refusals: everything that
//! returns control to the user with an explanation. Nothing is fatal to the
//! process.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the leave engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::NothingToSave;
/// assert_eq!(error.to_string(), "Nothing to save");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The REST collaborator answered with `success: false` or an error body.
    #[error("API request failed: {message}")]
    Api {
        /// The server-provided message.
        message: String,
    },

    /// The REST collaborator could not be reached at all.
    #[error("Network error - please check your connection")]
    Transport {
        /// A description of the underlying transport failure.
        message: String,
    },

    /// A holiday row that is both past and persisted was edited or deleted.
    #[error("Cannot {action} past holidays")]
    PastHolidayLocked {
        /// The refused action, "modify" or "delete".
        action: String,
        /// The date of the locked row, when known.
        date: Option<NaiveDate>,
    },

    /// A save was attempted while duplicate-date conflicts are unresolved.
    #[error("Resolve {count} conflicting holiday rows before saving")]
    ConflictingHolidays {
        /// The number of rows currently flagged with an error.
        count: usize,
    },

    /// A save was attempted with no inserts, updates, or deletions staged.
    #[error("Nothing to save")]
    NothingToSave,

    /// An imported sheet row could not be parsed.
    #[error("Failed to parse import row {line}: {message}")]
    ImportParse {
        /// The 1-based record number within the file.
        line: u64,
        /// A description of the parse failure.
        message: String,
    },

    /// Every imported row was filtered out (wrong year or past-dated).
    #[error("No future dates found in imported file")]
    EmptyImport,

    /// A leave request submission was refused by the synchronous checks.
    #[error("Submission blocked by {count} validation errors")]
    SubmissionBlocked {
        /// The number of fields currently in error.
        count: usize,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A bearer token failed decoding or validation.
    #[error("Invalid session token: {message}")]
    InvalidToken {
        /// A description of the token problem.
        message: String,
    },
}

impl From<reqwest::Error> for EngineError {
    fn from(error: reqwest::Error) -> Self {
        EngineError::Transport {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_server_message() {
        let error = EngineError::Api {
            message: "policy not found".to_string(),
        };
        assert_eq!(error.to_string(), "API request failed: policy not found");
    }

    #[test]
    fn test_transport_error_hides_internals_from_display() {
        let error = EngineError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Network error - please check your connection"
        );
    }

    #[test]
    fn test_past_holiday_locked_names_action() {
        let error = EngineError::PastHolidayLocked {
            action: "delete".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 26),
        };
        assert_eq!(error.to_string(), "Cannot delete past holidays");
    }

    #[test]
    fn test_conflicting_holidays_displays_count() {
        let error = EngineError::ConflictingHolidays { count: 2 };
        assert_eq!(
            error.to_string(),
            "Resolve 2 conflicting holiday rows before saving"
        );
    }

    #[test]
    fn test_import_parse_displays_line() {
        let error = EngineError::ImportParse {
            line: 3,
            message: "invalid date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse import row 3: invalid date"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_nothing_to_save() -> EngineResult<()> {
            Err(EngineError::NothingToSave)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_nothing_to_save()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
