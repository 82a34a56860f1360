//! engine::runner
//!
//! Executes an action's steps against the external tool.
//!
//! # Architecture
//!
//! The runner walks [`ActionDescriptor::steps`] in order. Tool steps are
//! handed to an [`ExternalTool`]; plan-file steps go to the
//! [`PlanArtifact`].
//!
//! # Invariants
//!
//! - `RequirePlan` failing stops the sequence before any tool invocation
//!   that follows it
//! - A tool invocation that exits non-zero does not stop the sequence; the
//!   first such failure is returned once every step has run
//! - A tool that cannot be launched, or a plan file that cannot be deleted,
//!   stops the sequence at once
//! - Nothing is retried and tool output is never inspected

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::catalog::{ActionDescriptor, Step, ToolCall};
use super::tool::{ExternalTool, ToolError, ToolStatus};
use crate::core::artifact::{ArtifactError, PlanArtifact, Removal};

/// Errors from running an action's steps.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no plan file found at '{path}'")]
    NoPlanArtifact { path: PathBuf },

    #[error("'{call}' failed with {}", describe_exit(.status))]
    ToolFailed { call: ToolCall, status: ToolStatus },

    #[error(transparent)]
    ToolLaunch(#[from] ToolError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

pub(crate) fn describe_exit(status: &ToolStatus) -> String {
    match status.code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".to_string(),
    }
}

/// What happened at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The tool ran and exited zero.
    Ran(ToolCall),
    /// The tool ran and exited non-zero or was killed.
    Failed { call: ToolCall, status: ToolStatus },
    /// The plan file was found where one was required.
    PlanPresent,
    /// The plan file was cleared (or was already absent).
    Cleared(Removal),
    /// The applied plan file was deleted.
    Consumed(Removal),
}

/// Record of a completed sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<StepOutcome>,
}

impl RunReport {
    /// Tool calls made, in order, whatever their exit status.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                StepOutcome::Ran(call) | StepOutcome::Failed { call, .. } => Some(*call),
                _ => None,
            })
            .collect()
    }
}

/// Runs descriptors against a tool in one working directory.
pub struct CommandRunner<'a, T: ExternalTool + ?Sized> {
    tool: &'a T,
    artifact: &'a PlanArtifact,
    dir: &'a Path,
}

impl<'a, T: ExternalTool + ?Sized> CommandRunner<'a, T> {
    /// Create a runner.
    pub fn new(tool: &'a T, artifact: &'a PlanArtifact, dir: &'a Path) -> Self {
        Self {
            tool,
            artifact,
            dir,
        }
    }

    /// Execute every step of `descriptor` in order.
    ///
    /// # Errors
    ///
    /// - `RunError::NoPlanArtifact` if a required plan file is missing
    /// - `RunError::ToolFailed` for the first tool call that exited non-zero,
    ///   after the remaining steps have run
    /// - `RunError::ToolLaunch` if the tool cannot be started
    /// - `RunError::Artifact` if the plan file cannot be deleted
    pub fn run(&self, descriptor: &ActionDescriptor) -> Result<RunReport, RunError> {
        self.run_observed(descriptor, |_| Ok(()))
    }

    /// Like [`run`](Self::run), calling `observe` as soon as each step
    /// finishes and before the next one starts.
    ///
    /// # Errors
    ///
    /// As for `run`, plus `RunError::Output` if `observe` fails.
    pub fn run_observed<F>(
        &self,
        descriptor: &ActionDescriptor,
        mut observe: F,
    ) -> Result<RunReport, RunError>
    where
        F: FnMut(&StepOutcome) -> io::Result<()>,
    {
        let mut report = RunReport::default();
        let mut first_failure = None;

        for step in descriptor.steps {
            let outcome = self.run_step(*step)?;
            debug!(action = descriptor.keyword, ?outcome, "step complete");
            observe(&outcome).map_err(RunError::Output)?;
            if let StepOutcome::Failed { call, status } = outcome {
                if first_failure.is_none() {
                    first_failure = Some(RunError::ToolFailed { call, status });
                }
            }
            report.outcomes.push(outcome);
        }

        if let Some(err) = first_failure {
            return Err(err);
        }
        info!(action = descriptor.keyword, "action complete");
        Ok(report)
    }

    fn run_step(&self, step: Step) -> Result<StepOutcome, RunError> {
        match step {
            Step::Tool(call) => {
                let args = call.args(self.artifact.file_name());
                let status = self.tool.invoke(&args, self.dir)?;
                if !status.success() {
                    warn!(%call, code = ?status.code, "tool exited unsuccessfully, continuing");
                    return Ok(StepOutcome::Failed { call, status });
                }
                Ok(StepOutcome::Ran(call))
            }
            Step::RequirePlan => {
                if !self.artifact.exists() {
                    return Err(RunError::NoPlanArtifact {
                        path: self.artifact.path().to_path_buf(),
                    });
                }
                Ok(StepOutcome::PlanPresent)
            }
            Step::ClearPlan => Ok(StepOutcome::Cleared(self.artifact.remove()?)),
            Step::ConsumePlan => Ok(StepOutcome::Consumed(self.artifact.remove()?)),
        }
    }
}
