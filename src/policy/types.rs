//! Pay policy types.
//!
//! The policy captures every number the engine must not hard-code: the
//! standard day threshold, the overtime and night multipliers, the night
//! window, and the allowance/deduction rule sets.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The time-of-day range attracting the night-shift multiplier.
///
/// A window whose `start` is later than its `end` spans midnight
/// (e.g., 22:00–05:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NightWindow {
    /// Start of the window (inclusive).
    pub start: NaiveTime,
    /// End of the window (exclusive).
    pub end: NaiveTime,
}

impl NightWindow {
    /// Returns true if the window spans midnight.
    pub fn spans_midnight(&self) -> bool {
        self.start > self.end
    }
}

/// A policy-driven allowance line, optionally restricted to a position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AllowanceRule {
    /// The name of the allowance (e.g., "transportation").
    pub name: String,
    /// The flat amount granted per payroll period.
    pub amount: Decimal,
    /// If set, the allowance applies only to staff with this position.
    #[serde(default)]
    pub position: Option<String>,
}

impl AllowanceRule {
    /// Returns true if the rule applies to the given position.
    pub fn applies_to(&self, position: &str) -> bool {
        self.position.as_deref().is_none_or(|p| p == position)
    }
}

/// A percentage deduction applied to `regular_pay + overtime_pay`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeductionRule {
    /// The name of the deduction (e.g., "health_insurance").
    pub name: String,
    /// The rate as a fraction (0.05 for 5%).
    pub rate: Decimal,
}

/// The complete pay policy.
///
/// The [`Default`] implementation carries the house rules: an 8-hour
/// standard day, 1.25× overtime and night multipliers, a 22:00–05:00 night
/// window, and the four statutory deduction lines.
///
/// # Example
///
/// ```
/// use staffops_engine::policy::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::default();
/// assert_eq!(policy.standard_daily_hours, Decimal::new(8, 0));
/// assert_eq!(policy.overtime_multiplier, Decimal::new(125, 2));
/// assert_eq!(policy.deductions.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayPolicy {
    /// Hours per day paid at the base rate before overtime starts.
    pub standard_daily_hours: Decimal,
    /// Multiplier applied to overtime hours.
    pub overtime_multiplier: Decimal,
    /// Multiplier applied to night-window hours.
    pub night_multiplier: Decimal,
    /// The night window.
    pub night_window: NightWindow,
    /// Allowance rules applied per payroll period.
    #[serde(default)]
    pub allowances: Vec<AllowanceRule>,
    /// Deduction rules applied per payroll period.
    #[serde(default)]
    pub deductions: Vec<DeductionRule>,
}

impl Default for PayPolicy {
    fn default() -> Self {
        Self {
            standard_daily_hours: Decimal::new(8, 0),
            overtime_multiplier: Decimal::new(125, 2),
            night_multiplier: Decimal::new(125, 2),
            night_window: NightWindow {
                start: NaiveTime::from_hms_opt(22, 0, 0).expect("valid time"),
                end: NaiveTime::from_hms_opt(5, 0, 0).expect("valid time"),
            },
            allowances: Vec::new(),
            deductions: vec![
                DeductionRule {
                    name: "health_insurance".to_string(),
                    rate: Decimal::new(5, 2),
                },
                DeductionRule {
                    name: "pension".to_string(),
                    rate: Decimal::new(9, 2),
                },
                DeductionRule {
                    name: "employment_insurance".to_string(),
                    rate: Decimal::new(3, 3),
                },
                DeductionRule {
                    name: "income_tax".to_string(),
                    rate: Decimal::new(10, 2),
                },
            ],
        }
    }
}
