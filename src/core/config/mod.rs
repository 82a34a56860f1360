//! core::config
//!
//! Configuration schema, loading, and the merged runtime settings.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags ([`Overrides`])
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$TFGUARD_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/tfguard/config.toml`
//! 3. `~/.tfguard/config.toml`
//!
//! A missing file is not an error. A file that exists but does not parse,
//! or that holds invalid values, is.
//!
//! # Example
//!
//! ```no_run
//! use tfguard::core::config::{Config, Overrides, Settings};
//!
//! let config = Config::load().unwrap();
//! let settings = Settings::resolve(&config, &Overrides::default()).unwrap();
//! println!("tool: {}", settings.tool_path().display());
//! println!("marker: {}", settings.marker_file());
//! ```

pub mod schema;

pub use schema::GuardConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TFGUARD_CONFIG";

/// Executable used when nothing else is configured (looked up on `PATH`).
pub const DEFAULT_TOOL: &str = "terraform";

/// Marker file used when nothing else is configured.
pub const DEFAULT_MARKER_FILE: &str = "variables.tf";

/// Plan file used when nothing else is configured.
pub const DEFAULT_PLAN_FILE: &str = ".tfplan";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Configuration as read from disk.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults if no file was found)
    pub file: GuardConfig,
    /// Path the file was loaded from
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read,
    /// parsed, or validated.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: GuardConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        debug!(path = %path.display(), "loaded config");
        Ok(Self {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        Self::locate_in(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        )
    }

    /// Search order over the candidate locations, first existing file wins.
    fn locate_in(
        explicit: Option<PathBuf>,
        xdg_home: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Option<PathBuf> {
        [
            // 1. $TFGUARD_CONFIG
            explicit,
            // 2. $XDG_CONFIG_HOME/tfguard/config.toml
            xdg_home.map(|dir| dir.join("tfguard/config.toml")),
            // 3. ~/.tfguard/config.toml
            home.map(|dir| dir.join(".tfguard/config.toml")),
        ]
        .into_iter()
        .flatten()
        .find(|path| path.exists())
    }

    /// Get the path the config was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tool_path: Option<PathBuf>,
    pub marker_file: Option<String>,
    pub plan_file: Option<String>,
}

/// Fully merged settings threaded into every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    tool_path: PathBuf,
    marker_file: String,
    plan_file: String,
}

impl Settings {
    /// Build settings from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if either file name is not a
    /// plain file name or the tool path is empty.
    pub fn new(
        tool_path: impl Into<PathBuf>,
        marker_file: impl Into<String>,
        plan_file: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let settings = Self {
            tool_path: tool_path.into(),
            marker_file: marker_file.into(),
            plan_file: plan_file.into(),
        };
        if settings.tool_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "tool path cannot be empty".to_string(),
            ));
        }
        schema::validate_file_name("marker file", &settings.marker_file)?;
        schema::validate_file_name("plan file", &settings.plan_file)?;
        Ok(settings)
    }

    /// Merge defaults, the loaded config, and CLI overrides.
    pub fn resolve(config: &Config, overrides: &Overrides) -> Result<Self, ConfigError> {
        let tool_path = overrides
            .tool_path
            .clone()
            .or_else(|| config.file.tool_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL));
        let marker_file = overrides
            .marker_file
            .clone()
            .or_else(|| config.file.marker_file.clone())
            .unwrap_or_else(|| DEFAULT_MARKER_FILE.to_string());
        let plan_file = overrides
            .plan_file
            .clone()
            .or_else(|| config.file.plan_file.clone())
            .unwrap_or_else(|| DEFAULT_PLAN_FILE.to_string());

        Self::new(tool_path, marker_file, plan_file)
    }

    /// Path to the external tool executable.
    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }

    /// Short name of the tool for prompts and status lines.
    pub fn tool_name(&self) -> String {
        self.tool_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.tool_path.display().to_string())
    }

    /// Name of the marker file.
    pub fn marker_file(&self) -> &str {
        &self.marker_file
    }

    /// Name of the plan file.
    pub fn plan_file(&self) -> &str {
        &self.plan_file
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool_path: PathBuf::from(DEFAULT_TOOL),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            plan_file: DEFAULT_PLAN_FILE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let settings = Settings::resolve(&Config::default(), &Overrides::default()).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tool_path(), Path::new("terraform"));
        assert_eq!(settings.marker_file(), "variables.tf");
        assert_eq!(settings.plan_file(), ".tfplan");
        assert_eq!(settings.tool_name(), "terraform");
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            tool_path = "/opt/tf/terraform"
            marker_file = "tfvars.tf"
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.loaded_from(), Some(path.as_path()));

        let settings = Settings::resolve(&config, &Overrides::default()).unwrap();
        assert_eq!(settings.tool_path(), Path::new("/opt/tf/terraform"));
        assert_eq!(settings.marker_file(), "tfvars.tf");
        assert_eq!(settings.plan_file(), ".tfplan");
    }

    #[test]
    fn explicit_path_wins_over_standard_locations() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("tfguard.toml");
        fs::write(&explicit, "plan_file = \"env.plan\"\n").unwrap();
        let xdg = temp.path().join("xdg");
        fs::create_dir_all(xdg.join("tfguard")).unwrap();
        fs::write(xdg.join("tfguard/config.toml"), "plan_file = \"xdg.plan\"\n").unwrap();

        let found = Config::locate_in(Some(explicit.clone()), Some(xdg), None).unwrap();
        assert_eq!(found, explicit);

        let config = Config::load_from(&found).unwrap();
        assert_eq!(config.file.plan_file.as_deref(), Some("env.plan"));
    }

    #[test]
    fn missing_explicit_path_falls_through() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        fs::create_dir_all(home.join(".tfguard")).unwrap();
        fs::write(home.join(".tfguard/config.toml"), "").unwrap();

        let found = Config::locate_in(
            Some(temp.path().join("absent.toml")),
            Some(temp.path().join("no-xdg")),
            Some(home.clone()),
        );
        assert_eq!(found, Some(home.join(".tfguard/config.toml")));
        assert_eq!(Config::locate_in(None, None, None), None);
    }

    #[test]
    fn overrides_take_precedence() {
        let config = Config {
            file: GuardConfig {
                tool_path: Some(PathBuf::from("/from/file/terraform")),
                marker_file: Some("file.tf".to_string()),
                plan_file: Some("file.plan".to_string()),
            },
            loaded_from: None,
        };
        let overrides = Overrides {
            tool_path: Some(PathBuf::from("/from/flag/tofu")),
            marker_file: None,
            plan_file: Some("flag.plan".to_string()),
        };

        let settings = Settings::resolve(&config, &overrides).unwrap();
        assert_eq!(settings.tool_path(), Path::new("/from/flag/tofu"));
        assert_eq!(settings.tool_name(), "tofu");
        assert_eq!(settings.marker_file(), "file.tf");
        assert_eq!(settings.plan_file(), "flag.plan");
    }

    #[test]
    fn invalid_override_rejected() {
        let overrides = Overrides {
            plan_file: Some("../elsewhere.plan".to_string()),
            ..Default::default()
        };
        let result = Settings::resolve(&Config::default(), &overrides);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn unparseable_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "tool_path = [").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_value_in_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "marker_file = \"\"\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn missing_explicit_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
