//! Attendance record model and related types.
//!
//! This module defines the [`AttendanceRecord`] produced by the attendance
//! tracker, together with its break intervals and status enum.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Lifecycle status of an attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// The session is open: clocked in, not yet clocked out.
    InProgress,
    /// Clocked out (or edited) and awaiting approval.
    PendingApproval,
    /// Approved; eligible for payroll computation.
    Approved,
}

/// A break taken during an attendance session.
///
/// `end` stays `None` while the break is in progress. At most one break
/// interval per record may be open at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakInterval {
    /// The start time of the break.
    pub start: NaiveDateTime,
    /// The end time of the break, `None` while the break is open.
    pub end: Option<NaiveDateTime>,
}

impl BreakInterval {
    /// Returns true if the break has not been ended yet.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// The per-staff, per-session record of clock-in/out and break timestamps.
///
/// `total_work_hours` and `overtime_hours` are derived fields, recomputed
/// by the tracker on every mutation that affects timing. For an open
/// session they hold the as-of-now projection taken at the last mutation.
///
/// # Example
///
/// ```
/// use staffops_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let record = AttendanceRecord {
///     id: "att_001".to_string(),
///     staff_id: "staff_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     clock_in_time: NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     clock_out_time: None,
///     break_intervals: vec![],
///     status: AttendanceStatus::InProgress,
///     total_work_hours: Decimal::ZERO,
///     overtime_hours: Decimal::ZERO,
///     notes: None,
///     location: None,
/// };
/// assert!(record.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The staff member the session belongs to.
    pub staff_id: String,
    /// The calendar day the session belongs to (clock-in day).
    pub date: NaiveDate,
    /// The clock-in time.
    pub clock_in_time: NaiveDateTime,
    /// The clock-out time, `None` while the session is open.
    pub clock_out_time: Option<NaiveDateTime>,
    /// Breaks taken during the session, in chronological order.
    #[serde(default)]
    pub break_intervals: Vec<BreakInterval>,
    /// Lifecycle status.
    pub status: AttendanceStatus,
    /// Derived: worked hours net of breaks.
    pub total_work_hours: Decimal,
    /// Derived: worked hours beyond the standard day.
    pub overtime_hours: Decimal,
    /// Opaque passthrough field, not computed.
    pub notes: Option<String>,
    /// Opaque passthrough field, not computed.
    pub location: Option<String>,
}

impl AttendanceRecord {
    /// Returns true if the session has not been clocked out yet.
    pub fn is_open(&self) -> bool {
        self.clock_out_time.is_none()
    }

    /// Returns a mutable reference to the open break interval, if any.
    ///
    /// Only the last interval can be open; earlier intervals are closed
    /// before a new one may start.
    pub fn open_break_mut(&mut self) -> Option<&mut BreakInterval> {
        self.break_intervals.last_mut().filter(|b| b.is_open())
    }

    /// Returns a reference to the open break interval, if any.
    pub fn open_break(&self) -> Option<&BreakInterval> {
        self.break_intervals.last().filter(|b| b.is_open())
    }

    /// Validates the structural time invariants of the record.
    ///
    /// Checks that:
    /// - the clock-out time (if set) is not before the clock-in time,
    /// - break intervals are chronologically ordered and non-overlapping,
    /// - each break starts within the session and ends after it starts,
    /// - at most the last break is open, and only while the session is open.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTimeRange`] describing the first
    /// violation found.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(out) = self.clock_out_time {
            if out < self.clock_in_time {
                return Err(EngineError::InvalidTimeRange {
                    message: format!(
                        "clock-out {} precedes clock-in {}",
                        out, self.clock_in_time
                    ),
                });
            }
        }

        let mut previous_end: Option<NaiveDateTime> = None;
        for (index, interval) in self.break_intervals.iter().enumerate() {
            if interval.start < self.clock_in_time {
                return Err(EngineError::InvalidTimeRange {
                    message: format!(
                        "break {} starts at {} before clock-in {}",
                        index, interval.start, self.clock_in_time
                    ),
                });
            }
            if let Some(out) = self.clock_out_time {
                if interval.start > out {
                    return Err(EngineError::InvalidTimeRange {
                        message: format!(
                            "break {} starts at {} after clock-out {}",
                            index, interval.start, out
                        ),
                    });
                }
            }
            if let Some(prev) = previous_end {
                if interval.start < prev {
                    return Err(EngineError::InvalidTimeRange {
                        message: format!(
                            "break {} starts at {} before the previous break ends at {}",
                            index, interval.start, prev
                        ),
                    });
                }
            }
            match interval.end {
                Some(end) => {
                    if end < interval.start {
                        return Err(EngineError::InvalidTimeRange {
                            message: format!(
                                "break {} ends at {} before it starts at {}",
                                index, end, interval.start
                            ),
                        });
                    }
                    previous_end = Some(end);
                }
                None => {
                    if index != self.break_intervals.len() - 1 {
                        return Err(EngineError::InvalidTimeRange {
                            message: format!("break {} is open but not the last break", index),
                        });
                    }
                    if !self.is_open() {
                        return Err(EngineError::InvalidTimeRange {
                            message: "open break on a clocked-out record".to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
