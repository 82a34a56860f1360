//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$TFGUARD_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/tfguard/config.toml`
//! 3. `~/.tfguard/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing. File names must be plain names
//! because both files live in the working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// tool_path = "/opt/terraform/bin/terraform"
/// marker_file = "variables.tf"
/// plan_file = ".tfplan"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Path to the external tool executable
    pub tool_path: Option<PathBuf>,

    /// Name of the file whose first line carries the environment marker
    pub marker_file: Option<String>,

    /// Name of the plan file written by `plan` and consumed by `apply`
    pub plan_file: Option<String>,
}

impl GuardConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tool) = &self.tool_path {
            if tool.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "tool_path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(marker) = &self.marker_file {
            validate_file_name("marker_file", marker)?;
        }

        if let Some(plan) = &self.plan_file {
            validate_file_name("plan_file", plan)?;
        }

        Ok(())
    }
}

/// Check that `value` names a file directly inside the working directory.
pub fn validate_file_name(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue(format!("{key} cannot be empty")));
    }

    if value == "." || value == ".." {
        return Err(ConfigError::InvalidValue(format!(
            "{key} '{value}' is not a file name"
        )));
    }

    let mut components = Path::new(value).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    );
    if !plain || value.contains('/') || value.contains('\\') {
        return Err(ConfigError::InvalidValue(format!(
            "{key} '{value}' must be a plain file name without directories"
        )));
    }

    Ok(())
}
