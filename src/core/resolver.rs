//! core::resolver
//!
//! Cross-checks the declared marker against the working directory.
//!
//! # Invariants
//!
//! - Resolution succeeds only when the declared name and the working context
//!   id are equal AND name one of the four known environments
//! - Every failure is reported as `ResolveError::InvalidEnvironment`; the
//!   attached [`InvalidReason`] is diagnostic detail, not a separate kind
//! - Pure: no filesystem or process access, so it can be exercised with
//!   literal records and ids

use std::fmt;

use thiserror::Error;

use super::marker::MarkerRecord;
use super::types::{Environment, ResolvedEnvironment, WorkingContextId};

/// Why a marker/context pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The marker line did not split into exactly two fields.
    Malformed { fields: usize },
    /// The declared name is not a known environment.
    UnknownName { declared: String },
    /// The declared name is known but the working directory disagrees.
    Mismatch { declared: String, actual: String },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Malformed { fields } => write!(
                f,
                "marker line must look like '<tag>|<environment>' (found {fields} field(s))"
            ),
            InvalidReason::UnknownName { declared } => {
                write!(f, "marker declares unknown environment '{declared}'")
            }
            InvalidReason::Mismatch { declared, actual } => write!(
                f,
                "marker declares '{declared}' but the working directory is '{actual}'"
            ),
        }
    }
}

/// Errors from environment resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("the environment cannot be determined: {0}")]
    InvalidEnvironment(InvalidReason),
}

impl ResolveError {
    /// The diagnostic reason behind the failure.
    pub fn reason(&self) -> &InvalidReason {
        match self {
            ResolveError::InvalidEnvironment(reason) => reason,
        }
    }
}

/// Resolve the environment from a marker record and the working context id.
///
/// # Errors
///
/// Returns `ResolveError::InvalidEnvironment` if the record is malformed,
/// names an unknown environment, or disagrees with `context`.
///
/// # Example
///
/// ```
/// use tfguard::core::marker::MarkerRecord;
/// use tfguard::core::resolver::resolve;
/// use tfguard::core::types::{Environment, WorkingContextId};
///
/// let record = MarkerRecord::from_line("#environment|production");
/// let env = resolve(&record, &WorkingContextId::new("production")).unwrap();
/// assert_eq!(env.environment(), Environment::Production);
///
/// assert!(resolve(&record, &WorkingContextId::new("staging")).is_err());
/// ```
pub fn resolve(
    record: &MarkerRecord,
    context: &WorkingContextId,
) -> Result<ResolvedEnvironment, ResolveError> {
    let fields = record.fields();
    let declared = match fields.as_slice() {
        [_tag, name] => *name,
        _ => {
            return Err(ResolveError::InvalidEnvironment(InvalidReason::Malformed {
                fields: fields.len(),
            }))
        }
    };

    let env = Environment::from_name(declared).ok_or_else(|| {
        ResolveError::InvalidEnvironment(InvalidReason::UnknownName {
            declared: declared.to_string(),
        })
    })?;

    if env.name() != context.as_str() {
        return Err(ResolveError::InvalidEnvironment(InvalidReason::Mismatch {
            declared: declared.to_string(),
            actual: context.as_str().to_string(),
        }));
    }

    Ok(ResolvedEnvironment::new(env))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str, cwd: &str) -> Result<ResolvedEnvironment, ResolveError> {
        resolve(&MarkerRecord::from_line(line), &WorkingContextId::new(cwd))
    }

    #[test]
    fn matching_marker_and_directory_resolve() {
        for env in Environment::ALL {
            let line = format!("#environment|{}", env.name());
            let resolved = run(&line, env.name()).unwrap();
            assert_eq!(resolved.environment(), env);
        }
    }

    #[test]
    fn tag_is_ignored() {
        let resolved = run("anything at all|testing", "testing").unwrap();
        assert_eq!(resolved.environment(), Environment::Testing);
    }

    #[test]
    fn mismatch_rejected() {
        let err = run("#environment|production", "staging").unwrap_err();
        assert_eq!(
            err.reason(),
            &InvalidReason::Mismatch {
                declared: "production".into(),
                actual: "staging".into(),
            }
        );
    }

    #[test]
    fn unknown_declared_name_rejected_even_when_directory_agrees() {
        let err = run("#environment|global", "global").unwrap_err();
        assert_eq!(
            err.reason(),
            &InvalidReason::UnknownName {
                declared: "global".into()
            }
        );
    }

    #[test]
    fn case_differences_rejected() {
        assert!(run("#environment|Production", "Production").is_err());
        assert!(run("#environment|production", "Production").is_err());
    }

    #[test]
    fn malformed_lines_rejected() {
        for line in ["", "#environment", "production", "#env|production|extra"] {
            let err = run(line, "production").unwrap_err();
            assert!(
                matches!(err.reason(), InvalidReason::Malformed { .. }),
                "line {line:?} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn empty_context_never_matches() {
        assert!(run("#environment|testing", "").is_err());
    }

    #[test]
    fn error_message_names_the_failed_check() {
        let err = run("#environment|production", "staging").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("cannot be determined"));
        assert!(message.contains("'production'"));
        assert!(message.contains("'staging'"));
    }
}
