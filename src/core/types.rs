//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Environment`] - One of the four known deployment environments
//! - [`ResolvedEnvironment`] - An environment that passed the marker cross-check
//! - [`WorkingContextId`] - Base name of the directory the operator is working in
//!
//! # Validation
//!
//! There is no "invalid" environment value. A failed resolution is an error,
//! and a [`ResolvedEnvironment`] can only be produced by
//! [`crate::core::resolver::resolve`], so code that dispatches commands
//! cannot be handed an environment that was never checked.
//!
//! # Examples
//!
//! ```
//! use tfguard::core::types::Environment;
//!
//! assert_eq!(Environment::from_name("staging"), Some(Environment::Staging));
//! assert_eq!(Environment::from_name("Staging"), None);
//! assert_eq!(Environment::Production.label(), "PRODUCTION");
//! ```

use std::fmt;
use std::path::Path;

/// A known deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Testing,
    Development,
    Staging,
    Production,
}

impl Environment {
    /// All known environments, in promotion order.
    pub const ALL: [Environment; 4] = [
        Environment::Testing,
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    /// The name used in marker files and directory names.
    pub fn name(self) -> &'static str {
        match self {
            Environment::Testing => "testing",
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Upper-case label used in prompts and status lines.
    pub fn label(self) -> &'static str {
        match self {
            Environment::Testing => "TESTING",
            Environment::Development => "DEVELOPMENT",
            Environment::Staging => "STAGING",
            Environment::Production => "PRODUCTION",
        }
    }

    /// Look up an environment by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.name() == name)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An environment whose declared marker and working directory agree.
///
/// The only constructor is crate-private and used by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEnvironment(Environment);

impl ResolvedEnvironment {
    pub(crate) fn new(env: Environment) -> Self {
        Self(env)
    }

    /// The underlying environment.
    pub fn environment(&self) -> Environment {
        self.0
    }
}

impl fmt::Display for ResolvedEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Base name of the operator's working directory.
///
/// Opaque: it is compared byte-for-byte against environment names and
/// never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkingContextId(String);

impl WorkingContextId {
    /// Wrap an already-extracted base name.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id from a directory path.
    ///
    /// A path with no final component (such as `/`) yields an empty id,
    /// which never matches an environment.
    ///
    /// ```
    /// use std::path::Path;
    /// use tfguard::core::types::WorkingContextId;
    ///
    /// let id = WorkingContextId::from_dir(Path::new("/infra/production"));
    /// assert_eq!(id.as_str(), "production");
    /// assert_eq!(WorkingContextId::from_dir(Path::new("/")).as_str(), "");
    /// ```
    pub fn from_dir(dir: &Path) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self(name)
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkingContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
