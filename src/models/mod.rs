//! Data models for the staff-operations engine.
//!
//! This module contains the record types shared across the attendance
//! tracker, payroll engine and approval workflows.

mod attendance;
mod payroll;
mod shift;
mod staff;

pub use attendance::{AttendanceRecord, AttendanceStatus, BreakInterval};
pub use payroll::{PayComponent, PaymentDetails, PayrollRecord, PayrollStatus};
pub use shift::{ProposedChange, RequestStatus, Shift, ShiftRequest};
pub use staff::StaffMember;
