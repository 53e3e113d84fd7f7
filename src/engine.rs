//! The payroll engine.
//!
//! Aggregates a staff member's approved attendance over a payroll period
//! into a [`PayrollRecord`]: regular/overtime/night hours, pay at the
//! policy multipliers, policy-driven allowances, and percentage
//! deductions rounded per line to the currency unit.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, PayComponent, PaymentDetails, PayrollRecord, PayrollStatus, StaffMember,
};
use crate::policy::PayPolicy;
use crate::store::{StaffDirectory, WorkforceStore};
use crate::timesheet::night_hours;

/// Computes payroll records from approved attendance.
///
/// Calculation is pure over the store's contents: no clock is sampled and
/// record ids derive from the staff id and period, so recomputing over the
/// same inputs yields identical records.
///
/// # Example
///
/// ```
/// use staffops_engine::engine::PayrollEngine;
/// use staffops_engine::models::StaffMember;
/// use staffops_engine::policy::PayPolicy;
/// use staffops_engine::store::{InMemoryDirectory, WorkforceStore};
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
/// let engine = PayrollEngine::new(directory, PayPolicy::default());
///
/// let store = WorkforceStore::new();
/// let records = engine
///     .calculate_payroll(
///         &store,
///         NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
///         None,
///     )
///     .unwrap();
/// // No approved attendance in range: no records, not an error.
/// assert!(records.is_empty());
/// ```
#[derive(Debug)]
pub struct PayrollEngine<D: StaffDirectory> {
    directory: D,
    policy: PayPolicy,
}

impl<D: StaffDirectory> PayrollEngine<D> {
    /// Creates an engine over the given directory and policy.
    pub fn new(directory: D, policy: PayPolicy) -> Self {
        Self { directory, policy }
    }

    /// Computes payroll for the closed period `[period_start, period_end]`.
    ///
    /// With `staff_id` set, computes for that staff member only; otherwise
    /// for every directory entry. Staff with no approved attendance in the
    /// period are skipped rather than emitted as zero-value records.
    ///
    /// Results carry status `calculated` and are not stored; persisting is
    /// the explicit [`save_payroll`](Self::save_payroll) confirmation step.
    ///
    /// # Errors
    ///
    /// - `StaffNotFound` if `staff_id` matches no directory entry.
    /// - `InvalidTimeRange` if the period ends before it starts.
    pub fn calculate_payroll(
        &self,
        store: &WorkforceStore,
        period_start: NaiveDate,
        period_end: NaiveDate,
        staff_id: Option<&str>,
    ) -> EngineResult<Vec<PayrollRecord>> {
        if period_end < period_start {
            return Err(EngineError::InvalidTimeRange {
                message: format!("period end {} precedes period start {}", period_end, period_start),
            });
        }

        let targets = match staff_id {
            Some(id) => {
                let staff =
                    self.directory
                        .staff_by_id(id)
                        .ok_or_else(|| EngineError::StaffNotFound {
                            staff_id: id.to_string(),
                        })?;
                vec![staff]
            }
            None => self.directory.all_staff(),
        };

        let mut records = Vec::new();
        for staff in &targets {
            if let Some(record) = self.compute_for_staff(store, staff, period_start, period_end) {
                records.push(record);
            }
        }

        info!(
            %period_start,
            %period_end,
            staff_count = targets.len(),
            record_count = records.len(),
            "payroll calculated"
        );
        Ok(records)
    }

    /// Computes one staff member's payroll record, or `None` if the period
    /// contains no approved attendance for them.
    fn compute_for_staff(
        &self,
        store: &WorkforceStore,
        staff: &StaffMember,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Option<PayrollRecord> {
        let attendance = store.approved_in_period(&staff.id, period_start, period_end);
        if attendance.is_empty() {
            return None;
        }

        let mut regular_hours = Decimal::ZERO;
        let mut overtime = Decimal::ZERO;
        let mut night = Decimal::ZERO;
        for record in &attendance {
            regular_hours += record
                .total_work_hours
                .min(self.policy.standard_daily_hours);
            overtime += record.overtime_hours;
            night += self.record_night_hours(record);
        }

        let regular_pay = regular_hours * staff.hourly_rate;
        let overtime_pay = overtime * staff.hourly_rate * self.policy.overtime_multiplier;
        let night_allowance = night * staff.hourly_rate * self.policy.night_multiplier;

        let other_allowances: Vec<PayComponent> = self
            .policy
            .allowances
            .iter()
            .filter(|rule| rule.applies_to(&staff.position))
            .map(|rule| PayComponent {
                name: rule.name.clone(),
                amount: rule.amount,
            })
            .collect();
        let allowance_total: Decimal = other_allowances.iter().map(|a| a.amount).sum();

        // Deductions apply to base pay (regular + overtime), each line
        // rounded to the currency unit before summing.
        let deduction_base = regular_pay + overtime_pay;
        let deductions: Vec<PayComponent> = self
            .policy
            .deductions
            .iter()
            .map(|rule| PayComponent {
                name: rule.name.clone(),
                amount: (deduction_base * rule.rate)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            })
            .collect();
        let total_deductions: Decimal = deductions.iter().map(|d| d.amount).sum();

        let gross_pay = regular_pay + overtime_pay + night_allowance + allowance_total;
        let net_pay = gross_pay - total_deductions;

        debug!(
            staff_id = %staff.id,
            %regular_hours,
            overtime_hours = %overtime,
            night_hours = %night,
            %gross_pay,
            %net_pay,
            "payroll computed for staff"
        );

        Some(PayrollRecord {
            id: format!("pay_{}_{}_{}", staff.id, period_start, period_end),
            staff_id: staff.id.clone(),
            period_start,
            period_end,
            working_days: attendance.len() as u32,
            regular_hours,
            overtime_hours: overtime,
            night_hours: night,
            regular_pay,
            overtime_pay,
            night_allowance,
            other_allowances,
            deductions,
            gross_pay,
            total_deductions,
            net_pay,
            status: PayrollStatus::Calculated,
            payment_date: None,
            payment_method: None,
            payment_notes: None,
        })
    }

    /// Night hours for one approved record.
    ///
    /// Approved records always carry a clock-out time; it doubles as the
    /// projection instant so the computation never samples a clock.
    fn record_night_hours(&self, record: &AttendanceRecord) -> Decimal {
        let as_of = record.clock_out_time.unwrap_or(record.clock_in_time);
        night_hours(record, &self.policy.night_window, as_of)
    }

    /// Upserts a payroll record, forcing its status to `approved`.
    ///
    /// This is the manual confirmation step between `calculated` and
    /// payment.
    pub fn save_payroll(
        &self,
        store: &mut WorkforceStore,
        mut record: PayrollRecord,
    ) -> PayrollRecord {
        record.status = PayrollStatus::Approved;
        info!(record_id = %record.id, "payroll saved and approved");
        store.upsert_payroll(record)
    }

    /// Marks an approved payroll record as paid.
    ///
    /// # Errors
    ///
    /// - `RecordNotFound` if the id is unknown.
    /// - `InvalidStateTransition` if the record is not `approved`.
    pub fn process_payment(
        &self,
        store: &mut WorkforceStore,
        id: &str,
        details: PaymentDetails,
    ) -> EngineResult<PayrollRecord> {
        let mut record = store
            .payroll(id)
            .ok_or_else(|| EngineError::RecordNotFound {
                record_id: id.to_string(),
            })?;

        match record.status {
            PayrollStatus::Approved => {
                record.status = PayrollStatus::Paid;
                record.payment_date = Some(details.payment_date);
                record.payment_method = Some(details.method);
                record.payment_notes = details.notes;
                info!(record_id = %record.id, payment_date = %details.payment_date, "payroll paid");
                Ok(store.upsert_payroll(record))
            }
            PayrollStatus::Paid => Err(EngineError::InvalidStateTransition {
                id: id.to_string(),
                message: "payroll record is already paid".to_string(),
            }),
            PayrollStatus::Draft | PayrollStatus::Calculated => {
                Err(EngineError::InvalidStateTransition {
                    id: id.to_string(),
                    message: "payroll record must be approved before payment".to_string(),
                })
            }
        }
    }
}
