//! engine::gate
//!
//! Confirmation gating for risky actions.
//!
//! # Protocol
//!
//! - `Safe` actions always proceed and never touch the input stream
//! - `ConfirmRequired` actions proceed without a prompt when bypassed
//! - Otherwise the operator is asked once; only an exact `yes` proceeds
//!
//! Declining is an [`GateDecision::Abort`], not an error.

use std::io::{BufRead, Write};

use tracing::debug;

use super::catalog::ActionDescriptor;
use crate::core::types::ResolvedEnvironment;
use crate::ui::prompts::{self, PromptError};

/// The answer that lets a gated action proceed.
pub const AFFIRMATIVE: &str = "yes";

/// Outcome of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Abort,
}

/// Prompt text naming the action and the environment.
pub fn prompt_text(tool_name: &str, descriptor: &ActionDescriptor, env: ResolvedEnvironment) -> String {
    let label = env.environment().label();
    format!(
        "\n {label} selected!!: Are you sure you wish to run '{tool_name} {}' on the {label} environment?: ",
        descriptor.label()
    )
}

/// Decide whether `descriptor` may run.
///
/// # Errors
///
/// Returns `PromptError` only if reading the answer fails; end of input is
/// treated as a declined answer.
pub fn gate<R, W>(
    tool_name: &str,
    descriptor: &ActionDescriptor,
    env: ResolvedEnvironment,
    bypass: bool,
    input: &mut R,
    output: &mut W,
) -> Result<GateDecision, PromptError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    if !descriptor.requires_confirmation() {
        return Ok(GateDecision::Proceed);
    }

    if bypass {
        debug!(action = descriptor.keyword, %env, "confirmation bypassed");
        return Ok(GateDecision::Proceed);
    }

    let message = prompt_text(tool_name, descriptor, env);
    let confirmed = prompts::confirm_token(&message, AFFIRMATIVE, input, output)?;
    debug!(action = descriptor.keyword, %env, confirmed, "confirmation answered");

    Ok(if confirmed {
        GateDecision::Proceed
    } else {
        GateDecision::Abort
    })
}
