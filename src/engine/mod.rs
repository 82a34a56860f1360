//! engine
//!
//! Orchestrates the invocation lifecycle: Resolve -> Classify -> Gate -> Dispatch.
//!
//! # Architecture
//!
//! - [`catalog`] - Data table of actions, risk tiers, and step sequences
//! - [`gate`] - Confirmation protocol for risky actions
//! - [`runner`] - Executes an action's steps
//! - [`tool`] - Invocation of the wrapped executable
//! - [`pipeline`] - Ties the above together for one invocation
//!
//! # Invariants
//!
//! - No step is dispatched before the environment has been resolved
//! - Risk policy lives only in the catalog table
//! - Every failure is terminal for the invocation; nothing is retried
//!
//! # Example
//!
//! ```no_run
//! use std::io;
//! use std::path::Path;
//! use tfguard::core::config::Settings;
//! use tfguard::engine::pipeline::{Pipeline, Request};
//! use tfguard::engine::tool::ProcessTool;
//! use tfguard::ui::output::Verbosity;
//!
//! let settings = Settings::default();
//! let tool = ProcessTool::new(settings.tool_path());
//! let dir = Path::new("/infra/staging");
//! let pipeline = Pipeline::new(&settings, &tool, dir, Verbosity::Normal);
//!
//! let mut input = io::stdin().lock();
//! let mut output = io::stdout();
//! pipeline.execute(&Request::new("plan", false), &mut input, &mut output)?;
//! # Ok::<(), tfguard::engine::EngineError>(())
//! ```

pub mod catalog;
pub mod gate;
pub mod pipeline;
pub mod runner;
pub mod tool;

// Re-exports for convenience
pub use catalog::{classify, ActionDescriptor, CatalogError, RiskTier, Step, ToolCall};
pub use gate::GateDecision;
pub use pipeline::{Outcome, Pipeline, Request};
pub use runner::{CommandRunner, RunError, RunReport, StepOutcome};
pub use tool::{ExternalTool, ProcessTool, ToolError, ToolStatus};

use std::path::PathBuf;

use crate::core::marker::MarkerError;
use crate::core::resolver::ResolveError;
use crate::ui::output::Verbosity;
use crate::ui::prompts::PromptError;

/// Execution context for an invocation.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Skip confirmation prompts.
    pub assume_yes: bool,
}

impl Context {
    /// Output verbosity implied by the flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// The error taxonomy as reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MarkerNotFound,
    InvalidEnvironment,
    UnknownAction,
    NoPlanArtifact,
    ExternalToolFailure,
    PlanFile,
    Io,
}

/// Errors from engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Marker file missing or unreadable.
    #[error(transparent)]
    Marker(#[from] MarkerError),

    /// Marker and working directory do not agree.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Action keyword not in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Reading the confirmation answer failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// A step of the action failed.
    #[error(transparent)]
    Run(#[from] RunError),

    /// Writing status output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl EngineError {
    /// Classify this error into the operator-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Marker(_) => ErrorKind::MarkerNotFound,
            EngineError::Resolve(_) => ErrorKind::InvalidEnvironment,
            EngineError::Catalog(_) => ErrorKind::UnknownAction,
            EngineError::Run(RunError::NoPlanArtifact { .. }) => ErrorKind::NoPlanArtifact,
            EngineError::Run(RunError::ToolFailed { .. } | RunError::ToolLaunch(_)) => {
                ErrorKind::ExternalToolFailure
            }
            EngineError::Run(RunError::Artifact(_)) => ErrorKind::PlanFile,
            EngineError::Prompt(_)
            | EngineError::Output(_)
            | EngineError::Run(RunError::Output(_)) => ErrorKind::Io,
        }
    }

    /// A suggestion for fixing the problem.
    pub fn hint(&self) -> &'static str {
        match self.kind() {
            ErrorKind::MarkerNotFound => {
                "each environment directory needs a marker file whose first line looks like \
                 '#environment|<name>'; set marker_file in the config or pass --marker-file \
                 if yours is named differently"
            }
            ErrorKind::InvalidEnvironment => {
                "run from a directory named testing, development, staging or production whose \
                 marker file declares that same environment"
            }
            ErrorKind::UnknownAction => "run 'tfguard --help' to list the actions",
            ErrorKind::NoPlanArtifact => "run 'plan' before 'apply'",
            ErrorKind::ExternalToolFailure => match self {
                EngineError::Run(RunError::ToolLaunch(_)) => {
                    "check tool_path in the config or pass --tool"
                }
                _ => "the tool's own output above describes the failure",
            },
            ErrorKind::PlanFile => "check the permissions of the plan file and its directory",
            ErrorKind::Io => "make sure the terminal is still attached",
        }
    }

    /// Process exit code for this error.
    ///
    /// A tool that exited non-zero passes its own code through.
    pub fn exit_code(&self) -> u8 {
        match self {
            EngineError::Run(RunError::ToolFailed {
                status: ToolStatus { code: Some(code) },
                ..
            }) => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}
