//! Worked-hour and overtime derivation.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, BreakInterval};

const SECONDS_PER_HOUR: i64 = 3600;

/// Converts a signed span between two instants to fractional hours,
/// floored at zero.
fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// Returns the duration of a break in fractional hours.
///
/// An open break is provisionally closed at `as_of`. The result is floored
/// at zero.
///
/// # Example
///
/// ```
/// use staffops_engine::models::BreakInterval;
/// use staffops_engine::timesheet::break_duration;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let interval = BreakInterval {
///     start: NaiveDateTime::parse_from_str("2026-03-02 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: Some(NaiveDateTime::parse_from_str("2026-03-02 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap()),
/// };
/// let as_of = NaiveDateTime::parse_from_str("2026-03-02 18:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(break_duration(&interval, as_of), Decimal::new(5, 1)); // 0.5
/// ```
pub fn break_duration(interval: &BreakInterval, as_of: NaiveDateTime) -> Decimal {
    hours_between(interval.start, interval.end.unwrap_or(as_of))
}

/// Returns the total worked hours of a record in fractional hours.
///
/// Elapsed time from clock-in to clock-out (or `as_of` for an open
/// session) minus the sum of break durations, floored at zero.
///
/// # Example
///
/// ```
/// use staffops_engine::models::{AttendanceRecord, AttendanceStatus, BreakInterval};
/// use staffops_engine::timesheet::total_work_hours;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let parse = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let record = AttendanceRecord {
///     id: "att_001".to_string(),
///     staff_id: "staff_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     clock_in_time: parse("2026-03-02 09:00:00"),
///     clock_out_time: Some(parse("2026-03-02 18:00:00")),
///     break_intervals: vec![BreakInterval {
///         start: parse("2026-03-02 12:00:00"),
///         end: Some(parse("2026-03-02 12:30:00")),
///     }],
///     status: AttendanceStatus::PendingApproval,
///     total_work_hours: Decimal::ZERO,
///     overtime_hours: Decimal::ZERO,
///     notes: None,
///     location: None,
/// };
/// let as_of = parse("2026-03-02 18:00:00");
/// assert_eq!(total_work_hours(&record, as_of), Decimal::new(85, 1)); // 8.5
/// ```
pub fn total_work_hours(record: &AttendanceRecord, as_of: NaiveDateTime) -> Decimal {
    let end = record.clock_out_time.unwrap_or(as_of);
    let elapsed = hours_between(record.clock_in_time, end);

    let breaks: Decimal = record
        .break_intervals
        .iter()
        .map(|b| break_duration(b, as_of))
        .sum();

    let worked = elapsed - breaks;
    if worked < Decimal::ZERO {
        Decimal::ZERO
    } else {
        worked
    }
}

/// Splits off the overtime portion of a day's worked hours.
///
/// Returns `max(0, total - standard_hours)`.
///
/// # Example
///
/// ```
/// use staffops_engine::timesheet::overtime_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     overtime_hours(Decimal::new(85, 1), Decimal::new(8, 0)),
///     Decimal::new(5, 1) // 0.5
/// );
/// assert_eq!(
///     overtime_hours(Decimal::new(6, 0), Decimal::new(8, 0)),
///     Decimal::ZERO
/// );
/// ```
pub fn overtime_hours(total: Decimal, standard_hours: Decimal) -> Decimal {
    if total > standard_hours {
        total - standard_hours
    } else {
        Decimal::ZERO
    }
}
