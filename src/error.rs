//! Error types for the staff-operations engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure modes of the attendance state machine, the payroll
//! engine and the approval workflows.

use thiserror::Error;

/// The main error type for the staff-operations engine.
///
/// All failures are local, synchronous logic errors: callers present them,
/// they are never retried. Operations fail fast and leave the touched
/// record unchanged.
///
/// # Example
///
/// ```
/// use staffops_engine::error::EngineError;
///
/// let error = EngineError::AlreadyClockedIn {
///     staff_id: "staff_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Staff 'staff_001' already has an open attendance session");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A clock-in was attempted while an open session already exists.
    #[error("Staff '{staff_id}' already has an open attendance session")]
    AlreadyClockedIn {
        /// The staff member with the open session.
        staff_id: String,
    },

    /// An operation required an open session and none exists.
    #[error("Staff '{staff_id}' has no open attendance session")]
    NoOpenSession {
        /// The staff member without an open session.
        staff_id: String,
    },

    /// A break was started while another break is still open.
    #[error("Staff '{staff_id}' is already on a break")]
    AlreadyOnBreak {
        /// The staff member already on a break.
        staff_id: String,
    },

    /// A break was ended but no break is open.
    #[error("Staff '{staff_id}' has no open break to end")]
    NoOpenBreak {
        /// The staff member without an open break.
        staff_id: String,
    },

    /// Timestamps are out of order (clock-out before clock-in, break end
    /// before break start, overlapping breaks, and similar).
    #[error("Invalid time range: {message}")]
    InvalidTimeRange {
        /// A description of the ordering violation.
        message: String,
    },

    /// A staff id did not match any directory entry.
    #[error("Staff not found: {staff_id}")]
    StaffNotFound {
        /// The unknown staff id.
        staff_id: String,
    },

    /// A record id did not match any stored record.
    #[error("Record not found: {record_id}")]
    RecordNotFound {
        /// The unknown record id.
        record_id: String,
    },

    /// A status transition was requested that the record's current status
    /// does not permit.
    #[error("Invalid state transition for '{id}': {message}")]
    InvalidStateTransition {
        /// The id of the record or request.
        id: String,
        /// A description of why the transition is not permitted.
        message: String,
    },

    /// A policy file was not found at the specified path.
    #[error("Policy file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A policy file could not be parsed.
    #[error("Failed to parse policy file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_clocked_in_displays_staff_id() {
        let error = EngineError::AlreadyClockedIn {
            staff_id: "staff_001".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Staff 'staff_001' already has an open attendance session"
        );
    }

    #[test]
    fn test_no_open_session_displays_staff_id() {
        let error = EngineError::NoOpenSession {
            staff_id: "staff_002".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Staff 'staff_002' has no open attendance session"
        );
    }

    #[test]
    fn test_no_open_break_displays_staff_id() {
        let error = EngineError::NoOpenBreak {
            staff_id: "staff_003".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Staff 'staff_003' has no open break to end"
        );
    }

    #[test]
    fn test_invalid_time_range_displays_message() {
        let error = EngineError::InvalidTimeRange {
            message: "clock-out 08:00 precedes clock-in 09:00".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid time range: clock-out 08:00 precedes clock-in 09:00"
        );
    }

    #[test]
    fn test_staff_not_found_displays_id() {
        let error = EngineError::StaffNotFound {
            staff_id: "ghost".to_string(),
        };
        assert_eq!(error.to_string(), "Staff not found: ghost");
    }

    #[test]
    fn test_invalid_state_transition_displays_id_and_message() {
        let error = EngineError::InvalidStateTransition {
            id: "req_001".to_string(),
            message: "request is already approved".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid state transition for 'req_001': request is already approved"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/policy/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse policy file '/policy/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_record_not_found() -> EngineResult<()> {
            Err(EngineError::RecordNotFound {
                record_id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_record_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
