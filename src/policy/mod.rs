//! Pay policy configuration.
//!
//! This module contains the strongly-typed pay policy (standard day
//! length, overtime and night multipliers, allowance and deduction rules)
//! and the YAML loader for reading a policy file from disk.

mod loader;
mod types;

pub use loader::load_policy;
pub use types::{AllowanceRule, DeductionRule, NightWindow, PayPolicy};
