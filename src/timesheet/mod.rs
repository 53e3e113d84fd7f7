//! Pure time aggregation over attendance records.
//!
//! This module derives worked, overtime and night hours from raw clock
//! and break timestamps. All functions are pure: open sessions are
//! projected "as of" an explicit instant supplied by the caller, and no
//! rounding is applied at this layer. Rounding, if any, belongs to
//! currency handling downstream.

mod hours;
mod night;

pub use hours::{break_duration, overtime_hours, total_work_hours};
pub use night::night_hours;
