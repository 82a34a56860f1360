//! tfguard - Run Terraform only in the environment you think you are in
//!
//! tfguard wraps an infrastructure-provisioning tool (Terraform by default)
//! and refuses to dispatch anything unless the working directory and a
//! marker line in a local variables file agree on which environment
//! (testing, development, staging, production) is being operated on.
//! Risky actions additionally require the operator to type `yes`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Resolve -> Classify -> Gate -> Dispatch lifecycle
//! - [`core`] - Domain types, marker reading, resolution, plan file, config
//! - [`ui`] - Prompts and operator-facing output
//! - [`logging`] - Developer diagnostics via `tracing`
//!
//! # Safety Invariants
//!
//! 1. An action is dispatched only when the declared and actual environment
//!    names agree and are both recognized
//! 2. Confirm-required actions run only after an exact `yes` or an explicit bypass
//! 3. `apply` runs only against an existing plan file, which it then consumes

pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod ui;
