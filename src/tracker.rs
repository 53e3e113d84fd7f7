//! The attendance tracker state machine.
//!
//! One open session per staff member: `clock_in` opens it, breaks nest
//! inside it, `clock_out` freezes the derived hours and hands the record
//! to the approval workflow. Every mutation samples "now" exactly once
//! and either stores a fully-updated record or leaves the store untouched.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, BreakInterval, StaffMember};
use crate::policy::PayPolicy;
use crate::store::{Clock, StaffDirectory, WorkforceStore};
use crate::timesheet::{overtime_hours, total_work_hours};

/// Optional inputs to [`AttendanceTracker::clock_in`].
#[derive(Debug, Clone, Default)]
pub struct ClockInOptions {
    /// The clock-in instant; defaults to the current instant.
    pub time: Option<NaiveDateTime>,
    /// Passthrough notes stored on the record.
    pub notes: Option<String>,
    /// Passthrough location stored on the record.
    pub location: Option<String>,
}

/// Optional inputs to [`AttendanceTracker::clock_out`].
#[derive(Debug, Clone, Default)]
pub struct ClockOutOptions {
    /// The clock-out instant; defaults to the current instant.
    pub time: Option<NaiveDateTime>,
    /// Replaces the record's notes when set.
    pub notes: Option<String>,
    /// Replaces the record's location when set.
    pub location: Option<String>,
}

/// Field overrides applied by [`AttendanceTracker::edit_attendance`].
///
/// Unset fields keep their current value. Any timing override triggers a
/// recomputation of the derived hours, and every edit forces the record
/// back to `pending-approval`.
#[derive(Debug, Clone, Default)]
pub struct AttendanceEdit {
    /// Corrected clock-in time.
    pub clock_in_time: Option<NaiveDateTime>,
    /// Corrected clock-out time.
    pub clock_out_time: Option<NaiveDateTime>,
    /// Replacement break intervals.
    pub break_intervals: Option<Vec<BreakInterval>>,
    /// Replacement notes.
    pub notes: Option<String>,
    /// Replacement location.
    pub location: Option<String>,
}

impl AttendanceEdit {
    fn changes_timing(&self) -> bool {
        self.clock_in_time.is_some()
            || self.clock_out_time.is_some()
            || self.break_intervals.is_some()
    }
}

/// The attendance session state machine.
///
/// Operations mutate records in an explicitly-passed [`WorkforceStore`];
/// the tracker itself only holds the collaborators it reads from (staff
/// directory, clock) and the pay policy supplying the standard-day
/// threshold.
///
/// # Example
///
/// ```
/// use staffops_engine::models::StaffMember;
/// use staffops_engine::policy::PayPolicy;
/// use staffops_engine::store::{InMemoryDirectory, ManualClock, WorkforceStore};
/// use staffops_engine::tracker::{AttendanceTracker, ClockInOptions};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut directory = InMemoryDirectory::new();
/// directory.add(StaffMember {
///     id: "staff_001".to_string(),
///     name: "Aoi Tanaka".to_string(),
///     hourly_rate: Decimal::new(1200, 0),
///     position: "server".to_string(),
/// });
/// let clock = ManualClock::new(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_hms_opt(9, 0, 0).unwrap(),
/// );
/// let tracker = AttendanceTracker::new(directory, clock, PayPolicy::default());
///
/// let mut store = WorkforceStore::new();
/// let record = tracker
///     .clock_in(&mut store, "staff_001", ClockInOptions::default())
///     .unwrap();
/// assert!(record.is_open());
/// ```
#[derive(Debug)]
pub struct AttendanceTracker<D: StaffDirectory, C: Clock> {
    directory: D,
    clock: C,
    policy: PayPolicy,
}

impl<D: StaffDirectory, C: Clock> AttendanceTracker<D, C> {
    /// Creates a tracker over the given directory, clock and policy.
    pub fn new(directory: D, clock: C, policy: PayPolicy) -> Self {
        Self {
            directory,
            clock,
            policy,
        }
    }

    fn resolve_staff(&self, staff_id: &str) -> EngineResult<StaffMember> {
        self.directory
            .staff_by_id(staff_id)
            .ok_or_else(|| EngineError::StaffNotFound {
                staff_id: staff_id.to_string(),
            })
    }

    /// Recomputes the derived hour fields from the record's timestamps.
    fn recompute(&self, record: &mut AttendanceRecord, as_of: NaiveDateTime) {
        record.total_work_hours = total_work_hours(record, as_of);
        record.overtime_hours =
            overtime_hours(record.total_work_hours, self.policy.standard_daily_hours);
    }

    /// Opens a new attendance session.
    ///
    /// # Errors
    ///
    /// - `StaffNotFound` if the staff id is unknown.
    /// - `AlreadyClockedIn` if the staff member already has an open session.
    pub fn clock_in(
        &self,
        store: &mut WorkforceStore,
        staff_id: &str,
        options: ClockInOptions,
    ) -> EngineResult<AttendanceRecord> {
        let staff = self.resolve_staff(staff_id)?;

        if let Some(open) = store.current_record(staff_id) {
            return Err(EngineError::AlreadyClockedIn {
                staff_id: open.staff_id,
            });
        }

        let time = options.time.unwrap_or_else(|| self.clock.now());
        let record = AttendanceRecord {
            id: format!("att_{}", Uuid::new_v4()),
            staff_id: staff.id,
            date: time.date(),
            clock_in_time: time,
            clock_out_time: None,
            break_intervals: Vec::new(),
            status: AttendanceStatus::InProgress,
            total_work_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            notes: options.notes,
            location: options.location,
        };

        info!(staff_id, record_id = %record.id, %time, "clock-in recorded");
        Ok(store.upsert_attendance(record))
    }

    /// Starts a break on the open session.
    ///
    /// # Errors
    ///
    /// - `StaffNotFound` if the staff id is unknown.
    /// - `NoOpenSession` if the staff member is not clocked in.
    /// - `AlreadyOnBreak` if a break is already open.
    pub fn start_break(
        &self,
        store: &mut WorkforceStore,
        staff_id: &str,
    ) -> EngineResult<AttendanceRecord> {
        self.resolve_staff(staff_id)?;

        let mut record = store
            .current_record(staff_id)
            .ok_or_else(|| EngineError::NoOpenSession {
                staff_id: staff_id.to_string(),
            })?;

        if record.open_break().is_some() {
            return Err(EngineError::AlreadyOnBreak {
                staff_id: staff_id.to_string(),
            });
        }

        let now = self.clock.now();
        record.break_intervals.push(BreakInterval {
            start: now,
            end: None,
        });
        record.validate()?;
        self.recompute(&mut record, now);

        info!(staff_id, record_id = %record.id, %now, "break started");
        Ok(store.upsert_attendance(record))
    }

    /// Ends the open break on the open session.
    ///
    /// # Errors
    ///
    /// - `StaffNotFound` if the staff id is unknown.
    /// - `NoOpenSession` if the staff member is not clocked in.
    /// - `NoOpenBreak` if no break is open.
    /// - `InvalidTimeRange` if the break would end before it started.
    pub fn end_break(
        &self,
        store: &mut WorkforceStore,
        staff_id: &str,
    ) -> EngineResult<AttendanceRecord> {
        self.resolve_staff(staff_id)?;

        let mut record = store
            .current_record(staff_id)
            .ok_or_else(|| EngineError::NoOpenSession {
                staff_id: staff_id.to_string(),
            })?;

        let now = self.clock.now();
        let open = record
            .open_break_mut()
            .ok_or_else(|| EngineError::NoOpenBreak {
                staff_id: staff_id.to_string(),
            })?;

        if now < open.start {
            return Err(EngineError::InvalidTimeRange {
                message: format!("break end {} precedes break start {}", now, open.start),
            });
        }
        open.end = Some(now);
        self.recompute(&mut record, now);

        info!(staff_id, record_id = %record.id, %now, "break ended");
        Ok(store.upsert_attendance(record))
    }

    /// Closes the open session and freezes its derived hours.
    ///
    /// A break still open at clock-out is implicitly closed at the
    /// clock-out instant before totals are computed.
    ///
    /// # Errors
    ///
    /// - `StaffNotFound` if the staff id is unknown.
    /// - `NoOpenSession` if the staff member is not clocked in.
    /// - `InvalidTimeRange` if the clock-out instant precedes the clock-in
    ///   or the open break's start.
    pub fn clock_out(
        &self,
        store: &mut WorkforceStore,
        staff_id: &str,
        options: ClockOutOptions,
    ) -> EngineResult<AttendanceRecord> {
        self.resolve_staff(staff_id)?;

        let mut record = store
            .current_record(staff_id)
            .ok_or_else(|| EngineError::NoOpenSession {
                staff_id: staff_id.to_string(),
            })?;

        // One instant for the whole operation: the same time closes a
        // dangling break and computes the totals.
        let time = options.time.unwrap_or_else(|| self.clock.now());
        if time < record.clock_in_time {
            return Err(EngineError::InvalidTimeRange {
                message: format!(
                    "clock-out {} precedes clock-in {}",
                    time, record.clock_in_time
                ),
            });
        }

        if let Some(open) = record.open_break_mut() {
            if time < open.start {
                return Err(EngineError::InvalidTimeRange {
                    message: format!(
                        "clock-out {} precedes the open break's start {}",
                        time, open.start
                    ),
                });
            }
            open.end = Some(time);
            warn!(staff_id, record_id = %record.id, "open break closed at clock-out");
        }

        record.clock_out_time = Some(time);
        record.status = AttendanceStatus::PendingApproval;
        if let Some(notes) = options.notes {
            record.notes = Some(notes);
        }
        if let Some(location) = options.location {
            record.location = Some(location);
        }
        self.recompute(&mut record, time);

        info!(
            staff_id,
            record_id = %record.id,
            %time,
            total_work_hours = %record.total_work_hours,
            "clock-out recorded"
        );
        Ok(store.upsert_attendance(record))
    }

    /// Applies field overrides to a record.
    ///
    /// Recomputes the derived hours when any timing field changed. A
    /// closed record is forced back to `pending-approval` regardless of
    /// its prior status: every edit requires re-approval. A record whose
    /// session is still open after the edit stays `in-progress`, so the
    /// staff member can continue to take breaks and clock out.
    ///
    /// # Errors
    ///
    /// - `RecordNotFound` if the record id is unknown.
    /// - `InvalidTimeRange` if the edited timestamps violate the record's
    ///   ordering invariants.
    pub fn edit_attendance(
        &self,
        store: &mut WorkforceStore,
        record_id: &str,
        edit: AttendanceEdit,
    ) -> EngineResult<AttendanceRecord> {
        let mut record = store
            .attendance(record_id)
            .ok_or_else(|| EngineError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;

        let timing_changed = edit.changes_timing();

        if let Some(clock_in) = edit.clock_in_time {
            record.clock_in_time = clock_in;
            record.date = clock_in.date();
        }
        if let Some(clock_out) = edit.clock_out_time {
            record.clock_out_time = Some(clock_out);
        }
        if let Some(breaks) = edit.break_intervals {
            record.break_intervals = breaks;
        }
        if let Some(notes) = edit.notes {
            record.notes = Some(notes);
        }
        if let Some(location) = edit.location {
            record.location = Some(location);
        }

        record.validate()?;
        if timing_changed {
            let as_of = self.clock.now();
            self.recompute(&mut record, as_of);
        }
        // Status tracks the session: a clock-out time is present iff the
        // record is pending approval or approved.
        record.status = if record.is_open() {
            AttendanceStatus::InProgress
        } else {
            AttendanceStatus::PendingApproval
        };

        info!(record_id, timing_changed, "attendance edited");
        Ok(store.upsert_attendance(record))
    }

    /// Approves a pending record.
    ///
    /// Approval never recomputes hours. Approving an already-approved
    /// record is a no-op.
    ///
    /// # Errors
    ///
    /// - `RecordNotFound` if the record id is unknown.
    /// - `InvalidStateTransition` if the session is still open.
    pub fn approve_attendance(
        &self,
        store: &mut WorkforceStore,
        record_id: &str,
    ) -> EngineResult<AttendanceRecord> {
        let mut record = store
            .attendance(record_id)
            .ok_or_else(|| EngineError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;

        match record.status {
            AttendanceStatus::Approved => Ok(record),
            AttendanceStatus::InProgress => Err(EngineError::InvalidStateTransition {
                id: record_id.to_string(),
                message: "session is still open".to_string(),
            }),
            AttendanceStatus::PendingApproval => {
                record.status = AttendanceStatus::Approved;
                info!(record_id, "attendance approved");
                Ok(store.upsert_attendance(record))
            }
        }
    }
}
