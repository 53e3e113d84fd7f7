//! Pay policy loading.
//!
//! Policies are single YAML files. Decimal values are written as quoted
//! strings so they parse exactly.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::PayPolicy;

/// Loads a pay policy from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the policy file (e.g., "./policy/house.yaml")
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file cannot be read, or
/// `ConfigParseError` if it contains invalid YAML or is missing required
/// fields.
///
/// # Example
///
/// ```no_run
/// use staffops_engine::policy::load_policy;
///
/// let policy = load_policy("./policy/house.yaml")?;
/// # Ok::<(), staffops_engine::error::EngineError>(())
/// ```
pub fn load_policy<P: AsRef<Path>>(path: P) -> EngineResult<PayPolicy> {
    let path_str = path.as_ref().display().to_string();

    let content = fs::read_to_string(path.as_ref()).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}
