//! Night-window hour derivation.
//!
//! Night hours are the overlap between the worked interval (net of
//! breaks) and the configured night window, summed per calendar day
//! across the record's span. They are computed on demand by the payroll
//! engine and never stored on the attendance record.

use chrono::{Days, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::AttendanceRecord;
use crate::policy::NightWindow;

const SECONDS_PER_HOUR: i64 = 3600;

/// Returns the overlap of two half-open intervals in fractional hours.
fn overlap_hours(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> Decimal {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// Materializes the night window for one calendar day as a concrete
/// interval. A window spanning midnight ends on the following day.
fn window_interval(date: NaiveDate, window: &NightWindow) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = date.and_time(window.start);
    let end_date = if window.spans_midnight() {
        date.checked_add_days(Days::new(1))?
    } else {
        date
    };
    Some((start, end_date.and_time(window.end)))
}

/// Returns the hours a record worked inside the night window.
///
/// The worked interval runs from clock-in to clock-out (or `as_of` for an
/// open session). For each calendar day the record touches, the night
/// window is materialized and intersected with the worked interval; break
/// overlaps with the window are subtracted. Results are fractional hours
/// with no rounding.
///
/// # Example
///
/// ```
/// use staffops_engine::models::{AttendanceRecord, AttendanceStatus};
/// use staffops_engine::policy::PayPolicy;
/// use staffops_engine::timesheet::night_hours;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let parse = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// // 20:00 to 02:00 the next morning, window 22:00-05:00
/// let record = AttendanceRecord {
///     id: "att_001".to_string(),
///     staff_id: "staff_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     clock_in_time: parse("2026-03-02 20:00:00"),
///     clock_out_time: Some(parse("2026-03-03 02:00:00")),
///     break_intervals: vec![],
///     status: AttendanceStatus::PendingApproval,
///     total_work_hours: Decimal::new(6, 0),
///     overtime_hours: Decimal::ZERO,
///     notes: None,
///     location: None,
/// };
/// let policy = PayPolicy::default();
/// let hours = night_hours(&record, &policy.night_window, record.clock_out_time.unwrap());
/// assert_eq!(hours, Decimal::new(4, 0)); // 22:00-02:00
/// ```
pub fn night_hours(
    record: &AttendanceRecord,
    window: &NightWindow,
    as_of: NaiveDateTime,
) -> Decimal {
    let worked_start = record.clock_in_time;
    let worked_end = record.clock_out_time.unwrap_or(as_of);
    if worked_end <= worked_start {
        return Decimal::ZERO;
    }

    // Start one day early so a midnight-spanning window opened on the
    // previous calendar day still intersects the worked interval.
    let first_day = worked_start
        .date()
        .checked_sub_days(Days::new(1))
        .unwrap_or_else(|| worked_start.date());
    let last_day = worked_end.date();

    let mut total = Decimal::ZERO;
    for day in first_day.iter_days().take_while(|d| *d <= last_day) {
        let Some((win_start, win_end)) = window_interval(day, window) else {
            continue;
        };

        let mut in_window = overlap_hours(worked_start, worked_end, win_start, win_end);
        for interval in &record.break_intervals {
            let break_end = interval.end.unwrap_or(as_of);
            in_window -= overlap_hours(interval.start, break_end, win_start, win_end);
        }
        if in_window > Decimal::ZERO {
            total += in_window;
        }
    }

    total
}
