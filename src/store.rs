//! Record repository, clock abstraction and staff directory.
//!
//! The engine keeps all state in an explicit [`WorkforceStore`] passed
//! into each operation; there is no ambient global store. The store has
//! plain upsert semantics keyed by id, with no transactions or
//! versioning, and is written by exactly one caller at a time.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use crate::models::{
    AttendanceRecord, AttendanceStatus, PayrollRecord, Shift, ShiftRequest, StaffMember,
};

/// A source of the current instant.
///
/// Mutating operations sample the clock exactly once, so substituting a
/// deterministic implementation makes every derived field reproducible.
pub trait Clock {
    /// Returns the current instant in business-local time.
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// The wall clock, in the business-local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A manually-driven clock for deterministic tests and replay.
///
/// Clones share the same underlying instant, so a test can hand one clone
/// to a tracker and keep another to advance time between operations.
///
/// # Example
///
/// ```
/// use staffops_engine::store::{Clock, ManualClock};
/// use chrono::{Duration, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// let clock = ManualClock::new(start);
/// let handle = clock.clone();
/// handle.advance(Duration::hours(3));
/// assert_eq!(clock.now(), start + Duration::hours(3));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<RefCell<NaiveDateTime>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(RefCell::new(start)),
        }
    }

    /// Moves the clock to the given instant.
    pub fn set(&self, instant: NaiveDateTime) {
        *self.now.borrow_mut() = instant;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.borrow_mut();
        *now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.borrow()
    }
}

/// Read-only access to staff identity, rates and positions.
///
/// Staff management is a collaborator concern; the engine only resolves
/// ids against whatever directory it is handed.
pub trait StaffDirectory {
    /// Looks up a staff member by id.
    fn staff_by_id(&self, id: &str) -> Option<StaffMember>;

    /// Returns every staff member, ordered by id.
    fn all_staff(&self) -> Vec<StaffMember>;
}

impl<D: StaffDirectory + ?Sized> StaffDirectory for &D {
    fn staff_by_id(&self, id: &str) -> Option<StaffMember> {
        (**self).staff_by_id(id)
    }

    fn all_staff(&self) -> Vec<StaffMember> {
        (**self).all_staff()
    }
}

/// A simple in-memory staff directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    staff: HashMap<String, StaffMember>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a staff member.
    pub fn add(&mut self, staff: StaffMember) {
        self.staff.insert(staff.id.clone(), staff);
    }
}

impl StaffDirectory for InMemoryDirectory {
    fn staff_by_id(&self, id: &str) -> Option<StaffMember> {
        self.staff.get(id).cloned()
    }

    fn all_staff(&self) -> Vec<StaffMember> {
        let mut staff: Vec<StaffMember> = self.staff.values().cloned().collect();
        staff.sort_by(|a, b| a.id.cmp(&b.id));
        staff
    }
}

/// In-memory storage for attendance, payroll, shifts and shift requests.
///
/// Accessors return owned clones; mutations go through upserts so every
/// operation either stores a fully-updated record or leaves the store
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct WorkforceStore {
    attendance: HashMap<String, AttendanceRecord>,
    payroll: HashMap<String, PayrollRecord>,
    shifts: HashMap<String, Shift>,
    shift_requests: HashMap<String, ShiftRequest>,
}

impl WorkforceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an attendance record, returning the stored copy.
    pub fn upsert_attendance(&mut self, record: AttendanceRecord) -> AttendanceRecord {
        self.attendance.insert(record.id.clone(), record.clone());
        record
    }

    /// Looks up an attendance record by id.
    pub fn attendance(&self, id: &str) -> Option<AttendanceRecord> {
        self.attendance.get(id).cloned()
    }

    /// Returns a staff member's attendance records ordered by clock-in.
    pub fn attendance_by_staff(&self, staff_id: &str) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = self
            .attendance
            .values()
            .filter(|r| r.staff_id == staff_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.date, r.clock_in_time));
        records
    }

    /// Returns the staff member's open session, if any.
    pub fn current_record(&self, staff_id: &str) -> Option<AttendanceRecord> {
        self.attendance
            .values()
            .find(|r| r.staff_id == staff_id && r.status == AttendanceStatus::InProgress)
            .cloned()
    }

    /// Returns a staff member's approved records with dates inside the
    /// closed range `[period_start, period_end]`, ordered by clock-in.
    pub fn approved_in_period(
        &self,
        staff_id: &str,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = self
            .attendance
            .values()
            .filter(|r| {
                r.staff_id == staff_id
                    && r.status == AttendanceStatus::Approved
                    && r.date >= period_start
                    && r.date <= period_end
            })
            .cloned()
            .collect();
        records.sort_by_key(|r| (r.date, r.clock_in_time));
        records
    }

    /// Inserts or replaces a payroll record, returning the stored copy.
    pub fn upsert_payroll(&mut self, record: PayrollRecord) -> PayrollRecord {
        self.payroll.insert(record.id.clone(), record.clone());
        record
    }

    /// Looks up a payroll record by id.
    pub fn payroll(&self, id: &str) -> Option<PayrollRecord> {
        self.payroll.get(id).cloned()
    }

    /// Returns a staff member's payroll records ordered by period start.
    pub fn payroll_by_staff(&self, staff_id: &str) -> Vec<PayrollRecord> {
        let mut records: Vec<PayrollRecord> = self
            .payroll
            .values()
            .filter(|r| r.staff_id == staff_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.period_start);
        records
    }

    /// Inserts or replaces a scheduled shift, returning the stored copy.
    pub fn upsert_shift(&mut self, shift: Shift) -> Shift {
        self.shifts.insert(shift.id.clone(), shift.clone());
        shift
    }

    /// Looks up a scheduled shift by id.
    pub fn shift(&self, id: &str) -> Option<Shift> {
        self.shifts.get(id).cloned()
    }

    /// Inserts or replaces a shift request, returning the stored copy.
    pub fn upsert_shift_request(&mut self, request: ShiftRequest) -> ShiftRequest {
        self.shift_requests
            .insert(request.id.clone(), request.clone());
        request
    }

    /// Looks up a shift request by id.
    pub fn shift_request(&self, id: &str) -> Option<ShiftRequest> {
        self.shift_requests.get(id).cloned()
    }

    /// Returns a staff member's shift requests ordered by id.
    pub fn shift_requests_by_staff(&self, staff_id: &str) -> Vec<ShiftRequest> {
        let mut requests: Vec<ShiftRequest> = self
            .shift_requests
            .values()
            .filter(|r| r.staff_id == staff_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.id.cmp(&b.id));
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn parse(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_attendance(id: &str, staff_id: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        AttendanceRecord {
            id: id.to_string(),
            staff_id: staff_id.to_string(),
            date,
            clock_in_time: date.and_hms_opt(9, 0, 0).unwrap(),
            clock_out_time: None,
            break_intervals: vec![],
            status,
            total_work_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            notes: None,
            location: None,
        }
    }

    #[test]
    fn test_manual_clock_shares_instant_across_clones() {
        let clock = ManualClock::new(parse("2026-03-02 09:00:00"));
        let handle = clock.clone();
        handle.advance(Duration::minutes(90));
        assert_eq!(clock.now(), parse("2026-03-02 10:30:00"));

        handle.set(parse("2026-03-02 12:00:00"));
        assert_eq!(clock.now(), parse("2026-03-02 12:00:00"));
    }

    #[test]
    fn test_upsert_attendance_replaces_by_id() {
        let mut store = WorkforceStore::new();
        store.upsert_attendance(make_attendance(
            "att_001",
            "staff_001",
            "2026-03-02",
            AttendanceStatus::InProgress,
        ));

        let mut updated = make_attendance(
            "att_001",
            "staff_001",
            "2026-03-02",
            AttendanceStatus::PendingApproval,
        );
        updated.notes = Some("edited".to_string());
        store.upsert_attendance(updated);

        let stored = store.attendance("att_001").unwrap();
        assert_eq!(stored.status, AttendanceStatus::PendingApproval);
        assert_eq!(stored.notes.as_deref(), Some("edited"));
    }

    #[test]
    fn test_current_record_finds_only_open_session() {
        let mut store = WorkforceStore::new();
        store.upsert_attendance(make_attendance(
            "att_001",
            "staff_001",
            "2026-03-01",
            AttendanceStatus::Approved,
        ));
        store.upsert_attendance(make_attendance(
            "att_002",
            "staff_001",
            "2026-03-02",
            AttendanceStatus::InProgress,
        ));

        let current = store.current_record("staff_001").unwrap();
        assert_eq!(current.id, "att_002");
        assert!(store.current_record("staff_002").is_none());
    }

    #[test]
    fn test_attendance_by_staff_is_ordered_by_date() {
        let mut store = WorkforceStore::new();
        store.upsert_attendance(make_attendance(
            "att_b",
            "staff_001",
            "2026-03-05",
            AttendanceStatus::Approved,
        ));
        store.upsert_attendance(make_attendance(
            "att_a",
            "staff_001",
            "2026-03-02",
            AttendanceStatus::Approved,
        ));
        store.upsert_attendance(make_attendance(
            "att_c",
            "staff_002",
            "2026-03-03",
            AttendanceStatus::Approved,
        ));

        let records = store.attendance_by_staff("staff_001");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "att_a");
        assert_eq!(records[1].id, "att_b");
    }

    #[test]
    fn test_approved_in_period_filters_status_and_range() {
        let mut store = WorkforceStore::new();
        store.upsert_attendance(make_attendance(
            "att_in",
            "staff_001",
            "2026-03-02",
            AttendanceStatus::Approved,
        ));
        store.upsert_attendance(make_attendance(
            "att_pending",
            "staff_001",
            "2026-03-03",
            AttendanceStatus::PendingApproval,
        ));
        store.upsert_attendance(make_attendance(
            "att_out",
            "staff_001",
            "2026-04-01",
            AttendanceStatus::Approved,
        ));

        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let records = store.approved_in_period("staff_001", start, end);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "att_in");
    }

    #[test]
    fn test_approved_in_period_includes_boundary_days() {
        let mut store = WorkforceStore::new();
        store.upsert_attendance(make_attendance(
            "att_first",
            "staff_001",
            "2026-03-01",
            AttendanceStatus::Approved,
        ));
        store.upsert_attendance(make_attendance(
            "att_last",
            "staff_001",
            "2026-03-15",
            AttendanceStatus::Approved,
        ));

        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(store.approved_in_period("staff_001", start, end).len(), 2);
    }

    #[test]
    fn test_directory_all_staff_ordered_by_id() {
        let mut directory = InMemoryDirectory::new();
        directory.add(StaffMember {
            id: "staff_002".to_string(),
            name: "Ren Sato".to_string(),
            hourly_rate: Decimal::new(1350, 0),
            position: "kitchen".to_string(),
        });
        directory.add(StaffMember {
            id: "staff_001".to_string(),
            name: "Aoi Tanaka".to_string(),
            hourly_rate: Decimal::new(1200, 0),
            position: "server".to_string(),
        });

        let staff = directory.all_staff();
        assert_eq!(staff.len(), 2);
        assert_eq!(staff[0].id, "staff_001");
        assert!(directory.staff_by_id("staff_003").is_none());
    }
}
