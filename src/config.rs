//! Engine configuration.
//!
//! This module provides the [`EngineConfig`] type, loaded from a YAML file.
//! Every field has a built-in default so embedding the engine without a
//! configuration file is possible.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

fn default_floater_policy_name() -> String {
    "Floater Leave".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_departments() -> Vec<String> {
    [
        "INTERN", "PRODUCTS", "FINANCE", "HR", "DEVOPS", "IT", "CUSTOMER", "MARKETING", "QA",
        "ADMIN",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Tunable constants of the leave engine.
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::EngineConfig;
///
/// let config = EngineConfig::load("./config/engine.yaml").unwrap();
/// assert_eq!(config.floater_policy_name, "Floater Leave");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Name of the policy whose requests may only cover floater days.
    #[serde(default = "default_floater_policy_name")]
    pub floater_policy_name: String,
    /// Delay used to coalesce search-as-you-type lookups, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Departments offered by the user-management forms.
    #[serde(default = "default_departments")]
    pub departments: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            floater_policy_name: default_floater_policy_name(),
            debounce_ms: default_debounce_ms(),
            departments: default_departments(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The parsed configuration, or an error if the file is missing or
    /// contains invalid YAML. Fields absent from the file take their
    /// defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
