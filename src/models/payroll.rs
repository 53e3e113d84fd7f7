//! Payroll record model and related types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    /// Created but not yet computed.
    Draft,
    /// Computed by the payroll engine, not yet confirmed.
    Calculated,
    /// Manually confirmed and saved.
    Approved,
    /// Payment executed.
    Paid,
}

/// A named monetary line item: an allowance or a deduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayComponent {
    /// The name of the line item (e.g., "health_insurance").
    pub name: String,
    /// The amount in the business currency.
    pub amount: Decimal,
}

/// Details supplied when a payroll record is paid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// The date the payment was made.
    pub payment_date: NaiveDate,
    /// The payment method (e.g., "bank_transfer").
    pub method: String,
    /// Free-form notes about the payment.
    pub notes: Option<String>,
}

/// One staff member's pay computed over a payroll period.
///
/// All monetary fields derive from the approved attendance records in the
/// period per the pay policy:
/// `gross_pay = regular_pay + overtime_pay + night_allowance + Σ other_allowances`
/// and `net_pay = gross_pay − total_deductions`.
///
/// # Example
///
/// ```
/// use staffops_engine::models::{PayrollRecord, PayrollStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = PayrollRecord {
///     id: "pay_staff_001_2026-03-01_2026-03-15".to_string(),
///     staff_id: "staff_001".to_string(),
///     period_start: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
///     working_days: 10,
///     regular_hours: Decimal::new(80, 0),
///     overtime_hours: Decimal::ZERO,
///     night_hours: Decimal::ZERO,
///     regular_pay: Decimal::new(96000, 0),
///     overtime_pay: Decimal::ZERO,
///     night_allowance: Decimal::ZERO,
///     other_allowances: vec![],
///     deductions: vec![],
///     gross_pay: Decimal::new(96000, 0),
///     total_deductions: Decimal::ZERO,
///     net_pay: Decimal::new(96000, 0),
///     status: PayrollStatus::Calculated,
///     payment_date: None,
///     payment_method: None,
///     payment_notes: None,
/// };
/// assert_eq!(record.net_pay, record.gross_pay - record.total_deductions);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Deterministic identifier derived from staff id and period.
    pub id: String,
    /// The staff member the record belongs to.
    pub staff_id: String,
    /// First day of the payroll period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the payroll period (inclusive).
    pub period_end: NaiveDate,
    /// Number of attendance records contributing to the period.
    pub working_days: u32,
    /// Hours paid at the base rate, capped per day at the standard day.
    pub regular_hours: Decimal,
    /// Hours beyond the standard day, summed across records.
    pub overtime_hours: Decimal,
    /// Hours worked inside the night window, summed across records.
    pub night_hours: Decimal,
    /// `regular_hours × hourly_rate`.
    pub regular_pay: Decimal,
    /// `overtime_hours × hourly_rate × overtime multiplier`.
    pub overtime_pay: Decimal,
    /// `night_hours × hourly_rate × night multiplier`.
    pub night_allowance: Decimal,
    /// Policy-driven allowance line items.
    #[serde(default)]
    pub other_allowances: Vec<PayComponent>,
    /// Deduction line items, each rounded to the currency unit.
    #[serde(default)]
    pub deductions: Vec<PayComponent>,
    /// Pay before deductions.
    pub gross_pay: Decimal,
    /// Sum of the deduction line items.
    pub total_deductions: Decimal,
    /// Pay after deductions.
    pub net_pay: Decimal,
    /// Lifecycle status.
    pub status: PayrollStatus,
    /// The date the record was paid, `None` until paid.
    pub payment_date: Option<NaiveDate>,
    /// The payment method, `None` until paid.
    pub payment_method: Option<String>,
    /// Payment notes, `None` until paid.
    pub payment_notes: Option<String>,
}
