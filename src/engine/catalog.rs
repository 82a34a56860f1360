//! engine::catalog
//!
//! The table of supported actions.
//!
//! # Architecture
//!
//! Each action is one row: a keyword, a risk tier, and the ordered steps
//! that realize it. Confirmation policy and command sequencing are read
//! from this table and nowhere else.
//!
//! | keyword          | tier            | steps                                         |
//! |------------------|-----------------|-----------------------------------------------|
//! | `plan`           | ConfirmRequired | get, clear plan file, plan -out=<plan file>   |
//! | `apply`          | ConfirmRequired | require plan, apply <plan file>, consume plan |
//! | `destroy`        | ConfirmRequired | destroy                                       |
//! | `get-update`     | ConfirmRequired | get -update                                   |
//! | `validate`       | Safe            | validate                                      |
//! | `removeplanfile` | Safe            | clear plan file                               |

use std::fmt;

use thiserror::Error;

/// Whether an action must pass the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    /// Runs without confirmation.
    Safe,
    /// Requires an explicit "yes" unless bypassed.
    ConfirmRequired,
}

/// A single invocation of the external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCall {
    Get,
    GetUpdate,
    Plan,
    Apply,
    Destroy,
    Validate,
}

impl ToolCall {
    /// Arguments passed to the tool for this call.
    pub fn args(self, plan_file: &str) -> Vec<String> {
        match self {
            ToolCall::Get => vec!["get".into()],
            ToolCall::GetUpdate => vec!["get".into(), "-update".into()],
            ToolCall::Plan => vec!["plan".into(), format!("-out={plan_file}")],
            ToolCall::Apply => vec!["apply".into(), plan_file.into()],
            ToolCall::Destroy => vec!["destroy".into()],
            ToolCall::Validate => vec!["validate".into()],
        }
    }

    /// Subcommand name, for messages.
    pub fn subcommand(self) -> &'static str {
        match self {
            ToolCall::Get | ToolCall::GetUpdate => "get",
            ToolCall::Plan => "plan",
            ToolCall::Apply => "apply",
            ToolCall::Destroy => "destroy",
            ToolCall::Validate => "validate",
        }
    }
}

impl fmt::Display for ToolCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolCall::GetUpdate => f.write_str("get -update"),
            other => f.write_str(other.subcommand()),
        }
    }
}

/// One step of an action's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Invoke the external tool.
    Tool(ToolCall),
    /// Fail with `NoPlanArtifact` unless the plan file exists.
    RequirePlan,
    /// Delete the plan file if present; never fails on absence.
    ClearPlan,
    /// Delete the plan file once it has been applied.
    ConsumePlan,
}

/// A catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub keyword: &'static str,
    pub tier: RiskTier,
    pub steps: &'static [Step],
}

impl ActionDescriptor {
    /// Upper-case action label used in prompts and status lines.
    pub fn label(&self) -> String {
        self.keyword.to_uppercase()
    }

    /// Whether the gate must ask before running this action.
    pub fn requires_confirmation(&self) -> bool {
        self.tier == RiskTier::ConfirmRequired
    }

    /// Whether any step runs the external tool.
    pub fn invokes_tool(&self) -> bool {
        self.steps.iter().any(|step| matches!(step, Step::Tool(_)))
    }
}

/// Every supported action.
pub static CATALOG: &[ActionDescriptor] = &[
    ActionDescriptor {
        keyword: "plan",
        tier: RiskTier::ConfirmRequired,
        steps: &[Step::Tool(ToolCall::Get), Step::ClearPlan, Step::Tool(ToolCall::Plan)],
    },
    ActionDescriptor {
        keyword: "apply",
        tier: RiskTier::ConfirmRequired,
        steps: &[Step::RequirePlan, Step::Tool(ToolCall::Apply), Step::ConsumePlan],
    },
    ActionDescriptor {
        keyword: "destroy",
        tier: RiskTier::ConfirmRequired,
        steps: &[Step::Tool(ToolCall::Destroy)],
    },
    ActionDescriptor {
        keyword: "get-update",
        tier: RiskTier::ConfirmRequired,
        steps: &[Step::Tool(ToolCall::GetUpdate)],
    },
    ActionDescriptor {
        keyword: "validate",
        tier: RiskTier::Safe,
        steps: &[Step::Tool(ToolCall::Validate)],
    },
    ActionDescriptor {
        keyword: "removeplanfile",
        tier: RiskTier::Safe,
        steps: &[Step::ClearPlan],
    },
];

/// Errors from action classification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown action '{keyword}' (expected one of: {})", keywords().join(", "))]
    UnknownAction { keyword: String },
}

/// All recognized keywords, in catalog order.
pub fn keywords() -> Vec<&'static str> {
    CATALOG.iter().map(|d| d.keyword).collect()
}

/// Look up an action by keyword.
///
/// Surrounding whitespace is ignored; matching is case-sensitive.
///
/// # Example
///
/// ```
/// use tfguard::engine::catalog::{classify, RiskTier};
///
/// assert_eq!(classify("destroy").unwrap().tier, RiskTier::ConfirmRequired);
/// assert_eq!(classify(" validate").unwrap().tier, RiskTier::Safe);
/// assert!(classify("import").is_err());
/// ```
pub fn classify(keyword: &str) -> Result<&'static ActionDescriptor, CatalogError> {
    let wanted = keyword.trim();
    CATALOG
        .iter()
        .find(|d| d.keyword == wanted)
        .ok_or_else(|| CatalogError::UnknownAction {
            keyword: wanted.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_match_table() {
        let confirm = ["plan", "apply", "destroy", "get-update"];
        let safe = ["validate", "removeplanfile"];

        for keyword in confirm {
            assert_eq!(classify(keyword).unwrap().tier, RiskTier::ConfirmRequired);
            assert!(classify(keyword).unwrap().requires_confirmation());
        }
        for keyword in safe {
            assert_eq!(classify(keyword).unwrap().tier, RiskTier::Safe);
            assert!(!classify(keyword).unwrap().requires_confirmation());
        }
        assert_eq!(CATALOG.len(), confirm.len() + safe.len());
    }

    #[test]
    fn plan_clears_before_planning() {
        let plan = classify("plan").unwrap();
        assert_eq!(
            plan.steps,
            &[Step::Tool(ToolCall::Get), Step::ClearPlan, Step::Tool(ToolCall::Plan)]
        );
    }

    #[test]
    fn apply_requires_plan_first() {
        let apply = classify("apply").unwrap();
        assert_eq!(apply.steps.first(), Some(&Step::RequirePlan));
        assert_eq!(apply.steps.last(), Some(&Step::ConsumePlan));
    }

    #[test]
    fn removeplanfile_never_invokes_tool() {
        assert!(!classify("removeplanfile").unwrap().invokes_tool());
        for keyword in ["plan", "apply", "destroy", "get-update", "validate"] {
            assert!(classify(keyword).unwrap().invokes_tool(), "{keyword}");
        }
    }

    #[test]
    fn unknown_keywords_rejected() {
        for keyword in ["", "Plan", "APPLY", "import", "remove-plan-file", "get"] {
            let err = classify(keyword).unwrap_err();
            assert!(matches!(err, CatalogError::UnknownAction { .. }));
        }
    }

    #[test]
    fn unknown_action_lists_choices() {
        let err = classify("import").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'import'"));
        assert!(message.contains("removeplanfile"));
    }

    #[test]
    fn keyword_is_trimmed() {
        assert_eq!(classify("  apply\n").unwrap().keyword, "apply");
    }

    #[test]
    fn tool_arguments() {
        assert_eq!(ToolCall::Plan.args(".tfplan"), vec!["plan", "-out=.tfplan"]);
        assert_eq!(ToolCall::Apply.args(".tfplan"), vec!["apply", ".tfplan"]);
        assert_eq!(ToolCall::GetUpdate.args(".tfplan"), vec!["get", "-update"]);
        assert_eq!(ToolCall::Destroy.args("x"), vec!["destroy"]);
    }

    #[test]
    fn labels_are_upper_case() {
        assert_eq!(classify("get-update").unwrap().label(), "GET-UPDATE");
    }
}
