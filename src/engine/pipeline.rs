//! engine::pipeline
//!
//! One invocation, end to end.
//!
//! # Lifecycle
//!
//! ```text
//! Resolve -> Classify -> [Safe: Dispatch]
//!                      | [ConfirmRequired: Gate -> {Proceed: Dispatch | Abort: End}]
//! ```
//!
//! # Invariants
//!
//! - Nothing is dispatched unless resolution succeeded
//! - An unknown action is rejected before the gate and the runner
//! - An aborted gate dispatches nothing and touches no files

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{debug, info};

use super::catalog::{self, ActionDescriptor};
use super::gate::{self, GateDecision};
use super::runner::{self, CommandRunner, RunReport, StepOutcome};
use super::tool::ExternalTool;
use super::EngineError;
use crate::core::artifact::{PlanArtifact, Removal};
use crate::core::config::Settings;
use crate::core::marker;
use crate::core::resolver;
use crate::core::types::{ResolvedEnvironment, WorkingContextId};
use crate::ui::output::{self, Verbosity};

/// What the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Action keyword as typed.
    pub action: String,
    /// Skip the confirmation prompt.
    pub bypass: bool,
}

impl Request {
    pub fn new(action: impl Into<String>, bypass: bool) -> Self {
        Self {
            action: action.into(),
            bypass,
        }
    }
}

/// How an invocation ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action's steps all ran.
    Completed {
        env: ResolvedEnvironment,
        action: &'static str,
        report: RunReport,
    },
    /// The operator declined at the gate.
    Aborted {
        env: ResolvedEnvironment,
        action: &'static str,
    },
}

/// Everything one invocation needs, bound to a working directory.
pub struct Pipeline<'a, T: ExternalTool + ?Sized> {
    settings: &'a Settings,
    tool: &'a T,
    dir: &'a Path,
    verbosity: Verbosity,
}

impl<'a, T: ExternalTool + ?Sized> Pipeline<'a, T> {
    /// Create a pipeline for `dir`.
    pub fn new(settings: &'a Settings, tool: &'a T, dir: &'a Path, verbosity: Verbosity) -> Self {
        Self {
            settings,
            tool,
            dir,
            verbosity,
        }
    }

    /// Resolve the environment from the marker file and the directory name.
    ///
    /// # Errors
    ///
    /// `EngineError::Marker` if the marker file is missing, or
    /// `EngineError::Resolve` if it does not agree with the directory.
    pub fn resolve_environment(&self) -> Result<ResolvedEnvironment, EngineError> {
        let marker_path = self.dir.join(self.settings.marker_file());
        let record = marker::read_marker(&marker_path)?;
        let context = WorkingContextId::from_dir(self.dir);
        let env = resolver::resolve(&record, &context)?;
        info!(%env, dir = %self.dir.display(), "environment resolved");
        Ok(env)
    }

    /// Run one request through the full lifecycle.
    ///
    /// Prompts are written to `output` and answers read from `input`.
    pub fn execute<R, W>(
        &self,
        request: &Request,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome, EngineError>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let env = self.resolve_environment()?;
        let descriptor = catalog::classify(&request.action)?;
        let tool_name = self.settings.tool_name();

        let decision = gate::gate(&tool_name, descriptor, env, request.bypass, input, output)?;
        if decision == GateDecision::Abort {
            debug!(action = descriptor.keyword, %env, "aborted by operator");
            return Ok(Outcome::Aborted {
                env,
                action: descriptor.keyword,
            });
        }

        output::status(output, running_text(&tool_name, descriptor, env), self.verbosity)?;

        let artifact = PlanArtifact::new(self.dir, self.settings.plan_file());
        let invokes_tool = descriptor.invokes_tool();
        let report = CommandRunner::new(self.tool, &artifact, self.dir).run_observed(
            descriptor,
            |outcome| self.report_step(&tool_name, invokes_tool, outcome, output),
        )?;

        Ok(Outcome::Completed {
            env,
            action: descriptor.keyword,
            report,
        })
    }

    /// Operator notices for a finished step, written before the next step runs.
    fn report_step<W: Write + ?Sized>(
        &self,
        tool_name: &str,
        invokes_tool: bool,
        outcome: &StepOutcome,
        output: &mut W,
    ) -> io::Result<()> {
        match outcome {
            StepOutcome::Cleared(Removal::Removed) => {
                output::status(output, " Removed previous local plan file", self.verbosity)?
            }
            StepOutcome::Cleared(Removal::NoOp) if !invokes_tool => {
                output::status(output, " No plan file to remove", self.verbosity)?
            }
            _ => {}
        }
        output::debug(output, describe_step(tool_name, outcome), self.verbosity)
    }
}

fn describe_step(tool_name: &str, outcome: &StepOutcome) -> String {
    let removal = |r: &Removal| match r {
        Removal::Removed => "removed",
        Removal::NoOp => "already absent",
    };
    match outcome {
        StepOutcome::Ran(call) => format!("'{tool_name} {call}' succeeded"),
        StepOutcome::Failed { call, status } => {
            format!("'{tool_name} {call}' failed with {}", runner::describe_exit(status))
        }
        StepOutcome::PlanPresent => "plan file present".to_string(),
        StepOutcome::Cleared(r) => format!("previous plan file {}", removal(r)),
        StepOutcome::Consumed(r) => format!("applied plan file {}", removal(r)),
    }
}

fn running_text(tool_name: &str, descriptor: &ActionDescriptor, env: ResolvedEnvironment) -> String {
    let label = env.environment().label();
    format!(
        "\n {label} selected!!: Running '{tool_name} {}' on the {label} environment!",
        descriptor.label()
    )
}
