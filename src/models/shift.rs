//! Scheduled shift and shift request models.
//!
//! Shift requests are the secondary approval track: staff ask to swap a
//! shift, change its times, or take the day off, and a manager approves or
//! rejects the request.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A scheduled shift on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The staff member rostered on the shift.
    pub staff_id: String,
    /// The date of the shift.
    pub date: NaiveDate,
    /// The scheduled start time.
    pub start_time: NaiveDateTime,
    /// The scheduled end time.
    pub end_time: NaiveDateTime,
    /// True once the shift has been marked as a day off.
    #[serde(default)]
    pub is_day_off: bool,
}

/// Lifecycle status of a shift request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; terminal.
    Approved,
    /// Rejected; terminal.
    Rejected,
}

/// The change a shift request proposes, keyed by request type.
///
/// Approval side effects differ per variant: a `TimeChange` rewrites the
/// shift's time window, a `DayOff` marks the shift as a day off, and a
/// `Swap` is recorded without mutating shift ownership (reassignment is a
/// manual follow-up).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request_type", rename_all = "snake_case")]
pub enum ProposedChange {
    /// Hand the shift to another staff member.
    Swap {
        /// The staff member proposed to take the shift.
        target_staff_id: String,
    },
    /// Move the shift to a new time window.
    TimeChange {
        /// The proposed start time.
        start_time: NaiveDateTime,
        /// The proposed end time.
        end_time: NaiveDateTime,
    },
    /// Take the shift's day off.
    DayOff,
}

/// A staff member's request to change a scheduled shift.
///
/// # Example
///
/// ```
/// use staffops_engine::models::{ProposedChange, RequestStatus, ShiftRequest};
///
/// let request = ShiftRequest {
///     id: "req_001".to_string(),
///     staff_id: "staff_001".to_string(),
///     shift_id: "shift_001".to_string(),
///     proposed_change: ProposedChange::DayOff,
///     request_status: RequestStatus::Pending,
/// };
/// assert_eq!(request.request_status, RequestStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The requesting staff member.
    pub staff_id: String,
    /// The shift the request refers to.
    pub shift_id: String,
    /// The proposed change, flattened with its `request_type` tag.
    #[serde(flatten)]
    pub proposed_change: ProposedChange,
    /// Lifecycle status.
    pub request_status: RequestStatus,
}
